//! Client side of the usuarios API: HTTP calls, view state and its controller.

pub mod api;
pub mod app;
pub mod render;

pub use api::{ApiClient, ClientError, UsuariosApi};
pub use app::{DELETE_PROMPT, Draft, LoadTicket, UsuariosApp, ViewState};
pub use render::render;
