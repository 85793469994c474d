use thiserror::Error;

/// Failures reported by a storage backend, independent of the driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A write would break a uniqueness constraint (the `usuarios.email` index).
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// The backend could not be reached.
    #[error("Storage unavailable: {message}")]
    Connection { message: String },

    /// The backend was reached but the statement failed.
    #[error("Storage query failed: {message}")]
    Query { message: String },
}

impl StorageError {
    pub fn unique_violation(constraint: impl Into<String>) -> Self {
        StorageError::UniqueViolation {
            constraint: constraint.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        StorageError::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        StorageError::Query {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsuariosError {
    /// `nombre` or `email` is absent or empty
    #[error("Nombre y email son requeridos")]
    MissingFields,

    /// Path segment is not a numeric id
    #[error("Identificador de usuario inválido: {0}")]
    InvalidId(String),

    /// Another record already owns this email
    #[error("El email {0} ya existe")]
    EmailAlreadyRegistered(String),

    /// No record with the given id
    #[error("Usuario {0} no encontrado")]
    UsuarioNotFound(i32),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
