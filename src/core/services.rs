use crate::core::errors::{StorageError, UsuariosError};
use crate::core::models::usuario::{NewUsuario, Usuario};
use crate::infrastructure::storage::Storage;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a storage probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub database_connected: bool,
    pub error: Option<String>,
}

pub struct UsuariosService {
    storage: Arc<dyn Storage>,
}

impl UsuariosService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        UsuariosService { storage }
    }

    pub async fn list_usuarios(&self) -> Result<Vec<Usuario>, UsuariosError> {
        Ok(self.storage.list_usuarios().await?)
    }

    pub async fn get_usuario(&self, id: i32) -> Result<Usuario, UsuariosError> {
        self.storage
            .get_usuario(id)
            .await?
            .ok_or(UsuariosError::UsuarioNotFound(id))
    }

    pub async fn create_usuario(&self, usuario: NewUsuario) -> Result<Usuario, UsuariosError> {
        let email = usuario.email.clone();
        let created = self
            .storage
            .insert_usuario(usuario)
            .await
            .map_err(|e| email_conflict(e, &email))?;
        info!(id = created.id, email = %created.email, "usuario created");
        Ok(created)
    }

    /// Replaces `nombre` and `email`; `id` and `created_at` are left untouched.
    pub async fn update_usuario(&self, id: i32, usuario: NewUsuario) -> Result<Usuario, UsuariosError> {
        let email = usuario.email.clone();
        let updated = self
            .storage
            .update_usuario(id, usuario)
            .await
            .map_err(|e| email_conflict(e, &email))?
            .ok_or(UsuariosError::UsuarioNotFound(id))?;
        info!(id, "usuario updated");
        Ok(updated)
    }

    pub async fn delete_usuario(&self, id: i32) -> Result<Usuario, UsuariosError> {
        let deleted = self
            .storage
            .delete_usuario(id)
            .await?
            .ok_or(UsuariosError::UsuarioNotFound(id))?;
        info!(id, "usuario deleted");
        Ok(deleted)
    }

    pub async fn check_health(&self) -> HealthReport {
        match self.storage.ping().await {
            Ok(()) => HealthReport {
                database_connected: true,
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "health check failed");
                HealthReport {
                    database_connected: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn email_conflict(error: StorageError, email: &str) -> UsuariosError {
    match error {
        StorageError::UniqueViolation { .. } => UsuariosError::EmailAlreadyRegistered(email.to_string()),
        other => UsuariosError::Storage(other),
    }
}
