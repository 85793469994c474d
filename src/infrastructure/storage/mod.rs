use crate::core::errors::StorageError;
use crate::core::models::usuario::{NewUsuario, Usuario};
use async_trait::async_trait;

/// Handle over the `usuarios` table.
///
/// Every method is a single statement; `None` means no row matched the id.
#[async_trait]
pub trait Storage: Send + Sync {
    /// All rows, newest id first.
    async fn list_usuarios(&self) -> Result<Vec<Usuario>, StorageError>;
    async fn get_usuario(&self, id: i32) -> Result<Option<Usuario>, StorageError>;
    async fn insert_usuario(&self, usuario: NewUsuario) -> Result<Usuario, StorageError>;
    async fn update_usuario(&self, id: i32, usuario: NewUsuario) -> Result<Option<Usuario>, StorageError>;
    async fn delete_usuario(&self, id: i32) -> Result<Option<Usuario>, StorageError>;
    /// Round-trip to the backend without touching any row.
    async fn ping(&self) -> Result<(), StorageError>;
}

pub mod in_memory;
pub mod postgres;
