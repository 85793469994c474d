pub mod api;
pub mod client;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod logger;
pub mod proxy;
pub mod shutdown;

pub use crate::core::errors::{StorageError, UsuariosError};
pub use crate::core::models::usuario::{NewUsuario, Usuario};
pub use crate::core::services::UsuariosService;
pub use crate::infrastructure::storage::{Storage, in_memory::InMemoryStorage, postgres::PgStorage};

#[cfg(test)]
mod tests;
