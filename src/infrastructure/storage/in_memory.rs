use crate::core::errors::StorageError;
use crate::core::models::usuario::{NewUsuario, Usuario};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

const EMAIL_CONSTRAINT: &str = "usuarios_email_key";

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Usuario>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|row| row.email == email && Some(row.id) != except)
    }
}

/// Storage fake with the same uniqueness and ordering rules as the Postgres table.
///
/// `set_available(false)` makes every call fail with a connection error.
#[derive(Clone)]
pub struct InMemoryStorage {
    table: Arc<RwLock<Table>>,
    available: Arc<AtomicBool>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            table: Arc::new(RwLock::new(Table::default())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::connection("connection refused"))
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn list_usuarios(&self) -> Result<Vec<Usuario>, StorageError> {
        self.check_available()?;
        let table = self.table.read().await;
        Ok(table.rows.values().rev().cloned().collect())
    }

    async fn get_usuario(&self, id: i32) -> Result<Option<Usuario>, StorageError> {
        self.check_available()?;
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert_usuario(&self, usuario: NewUsuario) -> Result<Usuario, StorageError> {
        self.check_available()?;
        let mut table = self.table.write().await;
        if table.email_taken(&usuario.email, None) {
            return Err(StorageError::unique_violation(EMAIL_CONSTRAINT));
        }
        table.last_id += 1;
        let row = Usuario {
            id: table.last_id,
            nombre: usuario.nombre,
            email: usuario.email,
            created_at: Utc::now().naive_utc(),
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_usuario(&self, id: i32, usuario: NewUsuario) -> Result<Option<Usuario>, StorageError> {
        self.check_available()?;
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if table.email_taken(&usuario.email, Some(id)) {
            return Err(StorageError::unique_violation(EMAIL_CONSTRAINT));
        }
        Ok(table.rows.get_mut(&id).map(|row| {
            row.nombre = usuario.nombre;
            row.email = usuario.email;
            row.clone()
        }))
    }

    async fn delete_usuario(&self, id: i32) -> Result<Option<Usuario>, StorageError> {
        self.check_available()?;
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.check_available()
    }
}
