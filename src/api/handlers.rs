use crate::{
    api::models::*,
    core::{
        errors::UsuariosError,
        models::usuario::{NewUsuario, Usuario},
        services::UsuariosService,
    },
};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;
use tracing::debug;

pub type SharedService = Arc<UsuariosService>;

// Define API routes
pub fn api_routes(service: SharedService) -> Router {
    Router::new()
        .route("/alonso", get(get_info))
        .route("/usuarios", get(list_usuarios).post(create_usuario))
        .route(
            "/usuarios/{id}",
            get(get_usuario).put(update_usuario).delete(delete_usuario),
        )
        .route("/health", get(health))
        .with_state(service)
}

fn parse_id(raw: &str) -> Result<i32, UsuariosError> {
    raw.parse().map_err(|_| UsuariosError::InvalidId(raw.to_string()))
}

// A body that is absent, not JSON, or mistyped counts as missing fields.
fn read_payload(body: Result<Json<UsuarioPayload>, JsonRejection>) -> Result<NewUsuario, UsuariosError> {
    match body {
        Ok(Json(req)) => req.into_new_usuario(),
        Err(rejection) => {
            debug!(status = rejection.status().as_u16(), reason = %rejection.body_text(), "unreadable usuario body");
            Err(UsuariosError::MissingFields)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/alonso",
    responses(
        (status = 200, description = "Fixed descriptive payload", body = InfoResponse)
    )
)]
pub async fn get_info() -> Json<InfoResponse> {
    Json(InfoResponse::now())
}

#[utoipa::path(
    get,
    path = "/api/usuarios",
    responses(
        (status = 200, description = "All usuarios, newest first", body = [Usuario]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_usuarios(State(service): State<SharedService>) -> Result<Json<Vec<Usuario>>, ApiError> {
    let usuarios = service.list_usuarios().await.or_fail(LIST_FAILED)?;
    Ok(Json(usuarios))
}

#[utoipa::path(
    get,
    path = "/api/usuarios/{id}",
    params(
        ("id" = i32, Path, description = "ID of the usuario to retrieve")
    ),
    responses(
        (status = 200, description = "Usuario retrieved successfully", body = Usuario),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Usuario not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_usuario(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<Usuario>, ApiError> {
    let id = parse_id(&id).or_fail(GET_FAILED)?;
    let usuario = service.get_usuario(id).await.or_fail(GET_FAILED)?;
    Ok(Json(usuario))
}

#[utoipa::path(
    post,
    path = "/api/usuarios",
    request_body = UsuarioPayload,
    responses(
        (status = 201, description = "Usuario created successfully", body = Usuario),
        (status = 400, description = "Missing nombre or email", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_usuario(
    State(service): State<SharedService>,
    body: Result<Json<UsuarioPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Usuario>), ApiError> {
    let new_usuario = read_payload(body).or_fail(CREATE_FAILED)?;
    let usuario = service.create_usuario(new_usuario).await.or_fail(CREATE_FAILED)?;
    Ok((StatusCode::CREATED, Json(usuario)))
}

#[utoipa::path(
    put,
    path = "/api/usuarios/{id}",
    request_body = UsuarioPayload,
    params(
        ("id" = i32, Path, description = "ID of the usuario to update")
    ),
    responses(
        (status = 200, description = "Usuario updated successfully", body = Usuario),
        (status = 400, description = "Missing nombre or email, or invalid id", body = ErrorResponse),
        (status = 404, description = "Usuario not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_usuario(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    body: Result<Json<UsuarioPayload>, JsonRejection>,
) -> Result<Json<Usuario>, ApiError> {
    let id = parse_id(&id).or_fail(UPDATE_FAILED)?;
    let new_usuario = read_payload(body).or_fail(UPDATE_FAILED)?;
    let usuario = service
        .update_usuario(id, new_usuario)
        .await
        .or_fail(UPDATE_FAILED)?;
    Ok(Json(usuario))
}

#[utoipa::path(
    delete,
    path = "/api/usuarios/{id}",
    params(
        ("id" = i32, Path, description = "ID of the usuario to delete")
    ),
    responses(
        (status = 200, description = "Usuario deleted successfully", body = DeleteResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Usuario not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_usuario(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id).or_fail(DELETE_FAILED)?;
    let usuario = service.delete_usuario(id).await.or_fail(DELETE_FAILED)?;
    Ok(Json(DeleteResponse {
        message: DELETED.to_string(),
        usuario,
    }))
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 500, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(service): State<SharedService>) -> (StatusCode, Json<HealthResponse>) {
    let report = service.check_health().await;
    if report.database_connected {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "OK".to_string(),
                database: "connected".to_string(),
                timestamp: Some(iso_timestamp()),
                error: None,
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse {
                status: "ERROR".to_string(),
                database: "disconnected".to_string(),
                timestamp: None,
                error: report.error,
            }),
        )
    }
}
