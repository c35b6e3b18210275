//! Text rendering of the form view.

use driftform_lib::model::Field;
use driftform_lib::{ErrorSource, FormView};

/// Renders the whole form as a block of text.
pub fn render(view: &FormView) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Current rules: {}", view.rules));

    if let Some(message) = &view.success {
        lines.push(format!("[ok] {message}"));
    }
    if let Some(message) = &view.form_error {
        lines.push(format!("[error] {message}"));
    }
    for (name, message) in &view.unattributed {
        lines.push(format!("[error] {name}: {message}"));
    }

    for field in Field::ALL {
        lines.push(format!("  {}: {}", field.label(), view.values.get(field)));
        if let Some(error) = view.error(field) {
            let origin = match error.source {
                ErrorSource::Client => "",
                ErrorSource::Server => " (server)",
            };
            lines.push(format!("    ! {}{origin}", error.message));
        }
    }

    lines.push(if view.submitting {
        "Validating...".to_string()
    } else {
        "Ready. Type `submit` to send.".to_string()
    });

    lines.join("\n")
}
