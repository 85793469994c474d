use tracing::{debug, warn};

use crate::api::models::{MISSING_FIELDS, UsuarioPayload};
use crate::client::api::{ClientError, UsuariosApi};
use crate::core::models::usuario::Usuario;

pub const DELETE_PROMPT: &str = "¿Estás seguro de eliminar este usuario?";
const SAVE_FAILED: &str = "Error al guardar usuario";

/// Form contents as typed by the user.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Draft {
    pub nombre: String,
    pub email: String,
}

#[derive(Debug, Default, Clone)]
pub struct ViewState {
    pub usuarios: Vec<Usuario>,
    pub draft: Draft,
    /// Record being edited; `None` means the form creates.
    pub editing_id: Option<i32>,
    pub loading: bool,
    pub error: Option<String>,
    pub nombre_completo: Option<String>,
}

/// Identifies one list fetch. Only the most recently issued ticket may
/// write its result into the view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Client controller: owns the view state and drives the API.
pub struct UsuariosApp<A> {
    api: A,
    state: ViewState,
    generation: u64,
}

impl<A: UsuariosApi> UsuariosApp<A> {
    pub fn new(api: A) -> Self {
        UsuariosApp {
            api,
            state: ViewState::default(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.state.draft
    }

    /// Initial fetch of the list and the informational route.
    pub async fn init(&mut self) {
        self.load().await;
        self.load_info().await;
    }

    pub async fn load_info(&mut self) {
        match self.api.info().await {
            Ok(info) => self.state.nombre_completo = Some(info.nombre_completo_camel),
            Err(e) => warn!(error = %e, "failed to load /api/alonso"),
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state.loading = true;
        LoadTicket(self.generation)
    }

    /// Applies a finished fetch. Returns `false` and leaves the state alone when
    /// a newer fetch has been issued since `ticket`.
    pub fn apply_load(&mut self, ticket: LoadTicket, result: Result<Vec<Usuario>, ClientError>) -> bool {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "discarding stale list response");
            return false;
        }
        match result {
            Ok(usuarios) => {
                self.state.usuarios = usuarios;
                self.state.error = None;
            }
            Err(e) => self.state.error = Some(format!("Error al cargar usuarios: {}", e)),
        }
        self.state.loading = false;
        true
    }

    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let result = self.api.list().await;
        self.apply_load(ticket, result);
    }

    pub fn start_edit(&mut self, usuario: &Usuario) {
        self.state.draft = Draft {
            nombre: usuario.nombre.clone(),
            email: usuario.email.clone(),
        };
        self.state.editing_id = Some(usuario.id);
    }

    pub fn cancel_edit(&mut self) {
        self.state.editing_id = None;
        self.state.draft = Draft::default();
    }

    /// Creates or updates from the draft, then reloads the whole list.
    pub async fn submit(&mut self) -> bool {
        let nombre = self.state.draft.nombre.trim().to_string();
        let email = self.state.draft.email.trim().to_string();
        if nombre.is_empty() || email.is_empty() {
            self.state.error = Some(MISSING_FIELDS.to_string());
            return false;
        }

        self.state.loading = true;
        let payload = UsuarioPayload::new(nombre, email);
        let result = match self.state.editing_id {
            Some(id) => self.api.update(id, &payload).await,
            None => self.api.create(&payload).await,
        };
        match result {
            Ok(_) => {
                self.cancel_edit();
                self.state.error = None;
                self.load().await;
                true
            }
            Err(e) => {
                self.state.error = Some(e.server_message().unwrap_or(SAVE_FAILED).to_string());
                self.state.loading = false;
                false
            }
        }
    }

    /// Deletes after `confirm` accepts [`DELETE_PROMPT`], then reloads the list.
    pub async fn delete<F>(&mut self, id: i32, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            return false;
        }
        self.state.loading = true;
        match self.api.delete(id).await {
            Ok(_) => {
                self.state.error = None;
                self.load().await;
                true
            }
            Err(e) => {
                self.state.error = Some(format!("Error al eliminar usuario: {}", e));
                self.state.loading = false;
                false
            }
        }
    }
}
