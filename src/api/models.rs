use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::core::errors::UsuariosError;
use crate::core::models::usuario::{NewUsuario, Usuario};

pub const MISSING_FIELDS: &str = "Nombre y email son requeridos";
pub const EMAIL_TAKEN: &str = "El email ya existe";
pub const NOT_FOUND: &str = "Usuario no encontrado";
pub const INVALID_ID: &str = "Identificador de usuario inválido";
pub const DELETED: &str = "Usuario eliminado correctamente";

pub const LIST_FAILED: &str = "Error al obtener usuarios";
pub const GET_FAILED: &str = "Error al obtener usuario";
pub const CREATE_FAILED: &str = "Error al crear usuario";
pub const UPDATE_FAILED: &str = "Error al actualizar usuario";
pub const DELETE_FAILED: &str = "Error al eliminar usuario";

const FULL_NAME: &str = "Javier Alonso";

// Request structs for JSON payloads
/// Body of create and update. Fields are optional so an absent field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UsuarioPayload {
    pub nombre: Option<String>,
    pub email: Option<String>,
}

impl UsuarioPayload {
    pub fn new(nombre: impl Into<String>, email: impl Into<String>) -> Self {
        UsuarioPayload {
            nombre: Some(nombre.into()),
            email: Some(email.into()),
        }
    }

    pub fn into_new_usuario(self) -> Result<NewUsuario, UsuariosError> {
        NewUsuario::try_new(self.nombre, self.email)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    pub usuario: Usuario,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// Fixed payload of `/api/alonso`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InfoResponse {
    pub nombre_completo: String,
    #[serde(rename = "nombreCompleto")]
    pub nombre_completo_camel: String,
    pub mensaje: String,
    pub timestamp: String,
}

impl InfoResponse {
    pub fn now() -> Self {
        InfoResponse {
            nombre_completo: FULL_NAME.to_string(),
            nombre_completo_camel: FULL_NAME.to_string(),
            mensaje: format!("Endpoint creado por {}", FULL_NAME),
            timestamp: iso_timestamp(),
        }
    }
}

pub(crate) fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// Error response struct
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error plus the generic message shown when it turns into a 500.
pub struct ApiError {
    error: UsuariosError,
    fallback: &'static str,
}

impl ApiError {
    pub fn new(error: UsuariosError, fallback: &'static str) -> Self {
        ApiError { error, fallback }
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            UsuariosError::MissingFields | UsuariosError::InvalidId(_) => StatusCode::BAD_REQUEST,
            UsuariosError::EmailAlreadyRegistered(_) => StatusCode::CONFLICT,
            UsuariosError::UsuarioNotFound(_) => StatusCode::NOT_FOUND,
            UsuariosError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Attaches the operation's generic 500 message to a service result.
pub trait OrFail<T> {
    fn or_fail(self, fallback: &'static str) -> Result<T, ApiError>;
}

impl<T> OrFail<T> for Result<T, UsuariosError> {
    fn or_fail(self, fallback: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(e, fallback))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_message = match &self.error {
            UsuariosError::MissingFields => MISSING_FIELDS.to_string(),
            UsuariosError::InvalidId(_) => INVALID_ID.to_string(),
            UsuariosError::EmailAlreadyRegistered(_) => EMAIL_TAKEN.to_string(),
            UsuariosError::UsuarioNotFound(_) => NOT_FOUND.to_string(),
            UsuariosError::Storage(_) => self.fallback.to_string(),
        };
        if status.is_server_error() {
            error!(error = %self.error, context = self.fallback, "request failed");
        } else {
            warn!(error = %self.error, status = status.as_u16(), "request rejected");
        }
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
