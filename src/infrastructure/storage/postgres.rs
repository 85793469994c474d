use crate::config::DatabaseConfig;
use crate::core::errors::StorageError;
use crate::core::models::usuario::{NewUsuario, Usuario};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS usuarios (
        id SERIAL PRIMARY KEY,
        nombre VARCHAR(100) NOT NULL,
        email VARCHAR(100) UNIQUE NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )";

/// `usuarios` table behind a `sqlx` connection pool.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Builds a lazily connecting pool; no connection is opened until the first query.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let options = match &config.url {
            Some(url) => PgConnectOptions::from_str(url).map_err(map_sqlx_error)?,
            None => PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user)
                .password(&config.password)
                .database(&config.name),
        };
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(options);
        Ok(PgStorage { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        PgStorage { pool }
    }

    /// Creates the table when it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        info!("usuarios table ready");
        Ok(())
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn list_usuarios(&self) -> Result<Vec<Usuario>, StorageError> {
        sqlx::query_as::<_, Usuario>("SELECT id, nombre, email, created_at FROM usuarios ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn get_usuario(&self, id: i32) -> Result<Option<Usuario>, StorageError> {
        sqlx::query_as::<_, Usuario>("SELECT id, nombre, email, created_at FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn insert_usuario(&self, usuario: NewUsuario) -> Result<Usuario, StorageError> {
        sqlx::query_as::<_, Usuario>(
            "INSERT INTO usuarios (nombre, email) VALUES ($1, $2) RETURNING id, nombre, email, created_at",
        )
        .bind(usuario.nombre)
        .bind(usuario.email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_usuario(&self, id: i32, usuario: NewUsuario) -> Result<Option<Usuario>, StorageError> {
        sqlx::query_as::<_, Usuario>(
            "UPDATE usuarios SET nombre = $1, email = $2 WHERE id = $3 RETURNING id, nombre, email, created_at",
        )
        .bind(usuario.nombre)
        .bind(usuario.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_usuario(&self, id: i32) -> Result<Option<Usuario>, StorageError> {
        sqlx::query_as::<_, Usuario>("DELETE FROM usuarios WHERE id = $1 RETURNING id, nombre, email, created_at")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}

/// Collapses driver errors into the backend-neutral kinds.
pub(crate) fn map_sqlx_error(error: sqlx::Error) -> StorageError {
    debug!(error = %error, "sqlx operation failed");
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StorageError::unique_violation(db.constraint().unwrap_or("unique"))
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StorageError::connection(error.to_string()),
        _ => StorageError::query(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_exhaustion_is_a_connection_error() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StorageError::Connection { .. }
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            StorageError::Connection { .. }
        ));
    }

    #[test]
    fn refused_socket_is_a_connection_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(map_sqlx_error(sqlx::Error::Io(io)), StorageError::Connection { .. }));
    }

    #[test]
    fn missing_row_is_a_query_error() {
        assert!(matches!(map_sqlx_error(sqlx::Error::RowNotFound), StorageError::Query { .. }));
    }
}
