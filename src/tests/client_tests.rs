use crate::client::{ApiClient, ClientError, DELETE_PROMPT, Draft, UsuariosApi, UsuariosApp, render};
use crate::tests::{new_usuario, spawn_api};
use crate::{NewUsuario, Storage, Usuario};
use chrono::NaiveDate;

async fn app_with_api() -> (UsuariosApp<ApiClient>, crate::InMemoryStorage) {
    let (base_url, storage) = spawn_api().await;
    (UsuariosApp::new(ApiClient::new(base_url)), storage)
}

async fn seed(storage: &crate::InMemoryStorage, usuario: NewUsuario) -> Usuario {
    storage.insert_usuario(usuario).await.unwrap()
}

fn usuario(id: i32, nombre: &str) -> Usuario {
    Usuario {
        id,
        nombre: nombre.to_string(),
        email: format!("{}@example.com", nombre.to_lowercase()),
        created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap(),
    }
}

#[tokio::test]
async fn test_init_loads_list_and_info() {
    let (mut app, storage) = app_with_api().await;
    seed(&storage, new_usuario("Ana", "ana@example.com")).await;

    app.init().await;
    let state = app.state();
    assert_eq!(state.usuarios.len(), 1);
    assert_eq!(state.nombre_completo.as_deref(), Some("Javier Alonso"));
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_submit_creates_and_reloads() {
    let (mut app, storage) = app_with_api().await;
    app.draft_mut().nombre = "  Ana ".to_string();
    app.draft_mut().email = "ana@example.com".to_string();

    assert!(app.submit().await);
    let state = app.state();
    assert_eq!(state.usuarios.len(), 1);
    assert_eq!(state.usuarios[0].nombre, "Ana");
    assert_eq!(state.draft.nombre, "");
    assert!(state.editing_id.is_none());
    assert!(!state.loading);
    assert_eq!(storage.len().await, 1);
}

#[tokio::test]
async fn test_submit_rejects_blank_fields_without_request() {
    let (mut app, storage) = app_with_api().await;
    app.draft_mut().nombre = "   ".to_string();
    app.draft_mut().email = "ana@example.com".to_string();

    assert!(!app.submit().await);
    assert_eq!(app.state().error.as_deref(), Some("Nombre y email son requeridos"));
    assert!(storage.is_empty().await);
}

#[tokio::test]
async fn test_submit_duplicate_shows_server_message() {
    let (mut app, storage) = app_with_api().await;
    seed(&storage, new_usuario("Ana", "ana@example.com")).await;
    app.draft_mut().nombre = "Otra".to_string();
    app.draft_mut().email = "ana@example.com".to_string();

    assert!(!app.submit().await);
    let state = app.state();
    assert_eq!(state.error.as_deref(), Some("El email ya existe"));
    assert_eq!(state.draft.nombre, "Otra");
    assert!(!state.loading);
}

#[tokio::test]
async fn test_edit_then_submit_updates() {
    let (mut app, storage) = app_with_api().await;
    let ana = seed(&storage, new_usuario("Ana", "ana@example.com")).await;
    app.load().await;

    app.start_edit(&ana);
    assert_eq!(app.state().editing_id, Some(ana.id));
    assert_eq!(app.state().draft.email, "ana@example.com");
    app.draft_mut().nombre = "Ana María".to_string();

    assert!(app.submit().await);
    let state = app.state();
    assert!(state.editing_id.is_none());
    assert_eq!(state.usuarios[0].nombre, "Ana María");
    assert_eq!(state.usuarios[0].id, ana.id);
    assert_eq!(storage.get_usuario(ana.id).await.unwrap().unwrap().nombre, "Ana María");
}

#[tokio::test]
async fn test_cancel_edit_clears_form() {
    let (mut app, _) = app_with_api().await;
    app.start_edit(&usuario(3, "Ana"));
    app.cancel_edit();
    assert!(app.state().editing_id.is_none());
    assert_eq!(app.state().draft, Draft::default());
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (mut app, storage) = app_with_api().await;
    let ana = seed(&storage, new_usuario("Ana", "ana@example.com")).await;

    let mut asked = None;
    let deleted = app
        .delete(ana.id, |prompt| {
            asked = Some(prompt.to_string());
            false
        })
        .await;
    assert!(!deleted);
    assert_eq!(asked.as_deref(), Some(DELETE_PROMPT));
    assert_eq!(storage.len().await, 1);

    assert!(app.delete(ana.id, |_| true).await);
    assert!(storage.is_empty().await);
    assert!(app.state().usuarios.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_reports_error() {
    let (mut app, _) = app_with_api().await;
    assert!(!app.delete(77, |_| true).await);
    assert_eq!(
        app.state().error.as_deref(),
        Some("Error al eliminar usuario: Request failed with status code 404")
    );
    assert!(!app.state().loading);
}

#[tokio::test]
async fn test_load_failure_keeps_ui_usable() {
    let (mut app, storage) = app_with_api().await;
    storage.set_available(false);
    app.load().await;
    assert_eq!(
        app.state().error.as_deref(),
        Some("Error al cargar usuarios: Request failed with status code 500")
    );
    assert!(!app.state().loading);

    storage.set_available(true);
    app.load().await;
    assert!(app.state().error.is_none());
}

#[tokio::test]
async fn test_stale_load_is_discarded() {
    let (mut app, _) = app_with_api().await;
    let first = app.begin_load();
    let second = app.begin_load();

    assert!(app.apply_load(second, Ok(vec![usuario(2, "Nueva")])));
    assert!(!app.apply_load(first, Ok(vec![usuario(1, "Vieja")])));
    assert_eq!(app.state().usuarios, vec![usuario(2, "Nueva")]);
    assert!(!app.state().loading);
}

#[tokio::test]
async fn test_loading_stays_until_latest_load_resolves() {
    let (mut app, _) = app_with_api().await;
    let first = app.begin_load();
    let second = app.begin_load();
    assert!(!app.apply_load(first, Ok(vec![])));
    assert!(app.state().loading);
    assert!(app.apply_load(second, Ok(vec![])));
    assert!(!app.state().loading);
}

#[tokio::test]
async fn test_api_client_maps_error_bodies() {
    let (base_url, _) = spawn_api().await;
    let client = ApiClient::new(format!("{}/", base_url));
    match client.get(5).await {
        Err(e @ ClientError::Api { status: 404, .. }) => {
            assert_eq!(e.server_message(), Some("Usuario no encontrado"));
        }
        other => panic!("unexpected result: {:?}", other.map(|u| u.id)),
    }
}

#[tokio::test]
async fn test_api_client_health_returns_degraded_body() {
    let (base_url, storage) = spawn_api().await;
    let client = ApiClient::new(base_url);
    assert!(client.health().await.unwrap().is_ok());

    storage.set_available(false);
    let health = client.health().await.unwrap();
    assert!(!health.is_ok());
    assert_eq!(health.database, "disconnected");
}

#[test]
fn test_render_states() {
    let mut state = crate::client::ViewState {
        loading: true,
        ..Default::default()
    };
    assert!(render(&state).contains("Cargando usuarios..."));

    state.loading = false;
    let text = render(&state);
    assert!(text.contains("No hay usuarios registrados"));
    assert!(text.contains("Crear Nuevo Usuario"));

    state.usuarios = vec![usuario(4, "Ana")];
    state.editing_id = Some(4);
    state.error = Some("El email ya existe".to_string());
    let text = render(&state);
    assert!(text.contains("Editar Usuario #4"));
    assert!(text.contains("#4 Ana <ana@example.com> creado: 01/05/2024 10:30:00"));
    assert!(text.contains("[error] El email ya existe"));
}

#[test]
fn test_render_layout_is_line_per_field() {
    let state = crate::client::ViewState {
        usuarios: vec![usuario(4, "Ana")],
        draft: Draft {
            nombre: "Beto".to_string(),
            email: "beto@example.com".to_string(),
        },
        nombre_completo: Some("Javier Alonso".to_string()),
        ..Default::default()
    };
    assert_eq!(
        render(&state),
        "== Sistema de Usuarios ==\n\
         Endpoint /api/alonso: Javier Alonso\n\
         -- Crear Nuevo Usuario --\n\
         Nombre: Beto\n\
         Email: beto@example.com\n\
         -- Lista de Usuarios --\n\
         #4 Ana <ana@example.com> creado: 01/05/2024 10:30:00\n"
    );
}
