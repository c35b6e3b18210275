//! What the presentation layer renders

use std::collections::BTreeMap;

use crate::model::ClientErrors;
use crate::model::Field;
use crate::model::FormValues;
use crate::model::RuleSet;
use crate::model::ServerErrors;
use crate::model::SubmissionState;

/// Where a displayed error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSource {
    /// Computed locally from the current rules.
    Client,
    /// Reported by the endpoint after a submission.
    Server,
}

/// The single error shown under a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedError {
    /// Message to show.
    pub message: String,
    /// Which side produced it.
    pub source: ErrorSource,
}

/// Picks the one error to show for a field.
///
/// A client error always wins; the server error for the same field is
/// withheld (not deleted) until the client error goes away.
pub fn resolve_field_error(
    field: Field,
    client: &ClientErrors,
    server: &ServerErrors,
) -> Option<DisplayedError> {
    if let Some(message) = client.get(field) {
        return Some(DisplayedError {
            message: message.to_string(),
            source: ErrorSource::Client,
        });
    }
    server.field(field).map(|message| DisplayedError {
        message: message.to_string(),
        source: ErrorSource::Server,
    })
}

/// A render-ready snapshot of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Current raw input.
    pub values: FormValues,
    /// Rules in force.
    pub rules: RuleSet,
    /// At most one resolved error per field.
    pub field_errors: BTreeMap<Field, DisplayedError>,
    /// Form-level banner error, such as a network failure.
    pub form_error: Option<String>,
    /// Server errors attributed to field names the form does not have.
    pub unattributed: Vec<(String, String)>,
    /// Whether a submission is in flight.
    pub submitting: bool,
    /// Success banner from the last accepted submission.
    pub success: Option<String>,
}

impl FormView {
    /// Builds a view from engine state.
    pub fn build(
        values: &FormValues,
        rules: &RuleSet,
        client: &ClientErrors,
        server: &ServerErrors,
        submission: &SubmissionState,
    ) -> Self {
        let field_errors = Field::ALL
            .iter()
            .filter_map(|field| resolve_field_error(*field, client, server).map(|e| (*field, e)))
            .collect();

        Self {
            values: values.clone(),
            rules: rules.clone(),
            field_errors,
            form_error: server.form().map(String::from),
            unattributed: server
                .unattributed()
                .map(|(name, msg)| (name.to_string(), msg.to_string()))
                .collect(),
            submitting: submission.is_submitting(),
            success: submission.success_message().map(String::from),
        }
    }

    /// Returns the error to show under a field, if any.
    pub fn error(&self, field: Field) -> Option<&DisplayedError> {
        self.field_errors.get(&field)
    }

    /// Returns `true` if the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting
    }
}
