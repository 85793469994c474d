use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::core::errors::UsuariosError;

/// One row of the `usuarios` table.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, FromRow, PartialEq, Eq)]
pub struct Usuario {
    pub id: i32,
    pub nombre: String,
    pub email: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: NaiveDateTime,
}

/// Name and email accepted for an insert or a replace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUsuario {
    pub nombre: String,
    pub email: String,
}

impl NewUsuario {
    /// Presence check only: both fields must be supplied and non-empty.
    /// Email format is not validated.
    pub fn try_new(nombre: Option<String>, email: Option<String>) -> Result<Self, UsuariosError> {
        match (nombre, email) {
            (Some(nombre), Some(email)) if !nombre.is_empty() && !email.is_empty() => Ok(NewUsuario { nombre, email }),
            _ => Err(UsuariosError::MissingFields),
        }
    }
}
