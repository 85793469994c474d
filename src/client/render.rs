use crate::client::app::ViewState;

/// Plain-text rendering of the view state.
pub fn render(state: &ViewState) -> String {
    let mut lines = vec!["== Sistema de Usuarios ==".to_string()];
    if let Some(nombre) = &state.nombre_completo {
        lines.push(format!("Endpoint /api/alonso: {}", nombre));
    }

    lines.push(match state.editing_id {
        Some(id) => format!("-- Editar Usuario #{} --", id),
        None => "-- Crear Nuevo Usuario --".to_string(),
    });
    lines.push(format!("Nombre: {}", state.draft.nombre));
    lines.push(format!("Email: {}", state.draft.email));

    if let Some(error) = &state.error {
        lines.push(format!("[error] {}", error));
    }

    lines.push("-- Lista de Usuarios --".to_string());
    if state.usuarios.is_empty() {
        lines.push(if state.loading {
            "Cargando usuarios...".to_string()
        } else {
            "No hay usuarios registrados".to_string()
        });
    }
    lines.extend(state.usuarios.iter().map(|usuario| {
        format!(
            "#{} {} <{}> creado: {}",
            usuario.id,
            usuario.nombre,
            usuario.email,
            usuario.created_at.format("%d/%m/%Y %H:%M:%S")
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
