mod client_tests;

use crate::core::models::usuario::NewUsuario;
use crate::core::services::UsuariosService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use std::sync::Arc;

/// Service over a fresh in-memory table; the storage handle is returned so
/// tests can inspect rows or simulate an outage.
pub fn create_test_service() -> (Arc<UsuariosService>, InMemoryStorage) {
    let storage = InMemoryStorage::new();
    let service = Arc::new(UsuariosService::new(Arc::new(storage.clone())));
    (service, storage)
}

pub fn new_usuario(nombre: &str, email: &str) -> NewUsuario {
    NewUsuario {
        nombre: nombre.to_string(),
        email: email.to_string(),
    }
}

/// Serves the full router on an ephemeral loopback port and returns its base URL.
pub async fn spawn_api() -> (String, InMemoryStorage) {
    let (service, storage) = create_test_service();
    let app = crate::api::router(service, std::time::Duration::from_secs(30));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), storage)
}
