use utoipa::OpenApi;

use crate::{
    api::models::{DeleteResponse, ErrorResponse, HealthResponse, InfoResponse, UsuarioPayload},
    core::models::usuario::Usuario,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::get_info,
        super::handlers::list_usuarios,
        super::handlers::get_usuario,
        super::handlers::create_usuario,
        super::handlers::update_usuario,
        super::handlers::delete_usuario,
        super::handlers::health
    ),
    components(schemas(
        UsuarioPayload,
        Usuario,
        DeleteResponse,
        HealthResponse,
        InfoResponse,
        ErrorResponse
    )),
    info(
        title = "Usuarios API",
        description = "CRUD API over the usuarios table",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
