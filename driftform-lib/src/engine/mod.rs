//! Form reconciliation engine
//!
//! Owns the form values and decides, after every event, what the form
//! should show: client errors derived from the newest rules, server errors
//! from the last submission, and the submit lifecycle.

mod config;
mod view;

pub use config::*;
pub use view::*;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::endpoint::SubmitEndpoint;
use crate::endpoint::SubmitResponse;
use crate::error::SubmitError;
use crate::error::UnknownFieldError;
use crate::model::ClientErrors;
use crate::model::Field;
use crate::model::FormValues;
use crate::model::RuleSet;
use crate::model::ServerErrors;
use crate::model::SubmissionId;
use crate::model::SubmissionState;
use crate::validation::validate_form;

/// How a call to [`FormEngine::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was already in flight; nothing happened.
    Ignored,
    /// Client validation failed; the endpoint was not contacted.
    Blocked(ClientErrors),
    /// The endpoint accepted the submission.
    Succeeded(String),
    /// The endpoint refused the submission.
    Rejected(ServerErrors),
    /// No verdict was obtained; carries the banner message.
    TransportFailed(String),
}

/// Reconciles client validation, server verdicts, rule changes and the
/// submit lifecycle into one consistent [`FormView`].
///
/// The engine is cheap to clone (uses `Arc` internally); clones share
/// state. Every mutating call ends by recomputing client errors and
/// publishing a new view to subscribers if anything visible changed.
///
/// # Example
///
/// ```no_run
/// use driftform_lib::endpoint::{MockConfig, MockEndpoint};
/// use driftform_lib::model::Field;
/// use driftform_lib::{EngineConfig, FormEngine, SubmitOutcome};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let endpoint = MockEndpoint::new(MockConfig::default());
/// let engine = FormEngine::new(EngineConfig::default(), endpoint);
/// engine.update_field(Field::Email, "a@ok.com");
/// engine.update_field(Field::Amount, "100");
///
/// match engine.submit().await {
///     SubmitOutcome::Succeeded(message) => println!("{message}"),
///     other => println!("{other:?}"),
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct FormEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    state: Mutex<EngineState>,
    endpoint: Arc<dyn SubmitEndpoint>,
    network_failure_message: String,
    view_tx: watch::Sender<FormView>,
}

struct EngineState {
    values: FormValues,
    rules: RuleSet,
    client_errors: ClientErrors,
    server_errors: ServerErrors,
    submission: SubmissionState,
    /// Set by a submit attempt, cleared by a success. Reveals client
    /// errors on an otherwise untouched form.
    attempted: bool,
}

impl EngineState {
    fn derive_client_errors(&mut self) {
        self.client_errors = if self.values.is_blank() && !self.attempted {
            ClientErrors::new()
        } else {
            validate_form(&self.values, &self.rules)
        };
    }

    fn view(&self) -> FormView {
        FormView::build(
            &self.values,
            &self.rules,
            &self.client_errors,
            &self.server_errors,
            &self.submission,
        )
    }
}

impl FormEngine {
    /// Creates an engine that submits through `endpoint`.
    pub fn new(config: EngineConfig, endpoint: impl SubmitEndpoint + 'static) -> Self {
        Self::with_shared_endpoint(config, Arc::new(endpoint))
    }

    /// Creates an engine that submits through a shared endpoint.
    pub fn with_shared_endpoint(config: EngineConfig, endpoint: Arc<dyn SubmitEndpoint>) -> Self {
        let mut state = EngineState {
            values: config.initial_values,
            rules: config.initial_rules,
            client_errors: ClientErrors::new(),
            server_errors: ServerErrors::new(),
            submission: SubmissionState::Idle,
            attempted: false,
        };
        state.derive_client_errors();
        let (view_tx, _) = watch::channel(state.view());

        Self {
            inner: Arc::new(EngineInner {
                state: Mutex::new(state),
                endpoint,
                network_failure_message: config.network_failure_message,
                view_tx,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs a mutation, then recomputes derived state and publishes the view.
    fn mutate<R>(&self, f: impl FnOnce(&mut EngineState) -> R) -> R {
        let mut state = self.lock();
        let result = f(&mut state);
        state.derive_client_errors();

        let view = state.view();
        self.inner.view_tx.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
        result
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Records new input for a field.
    ///
    /// Drops the field's server error and dismisses a success banner. An
    /// in-flight submission is not affected and still applies its result.
    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.mutate(|state| {
            state.values.set(field, value);
            if state.server_errors.clear_field(field) {
                log::debug!("cleared stale server error for {field}");
            }
            if matches!(state.submission, SubmissionState::Succeeded(_)) {
                state.submission = SubmissionState::Idle;
            }
        });
    }

    /// Records new input for a field given by its wire name.
    pub fn update_field_named(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), UnknownFieldError> {
        let field = name.parse::<Field>()?;
        self.update_field(field, value);
        Ok(())
    }

    /// Replaces the rules in force and re-derives client errors.
    pub fn set_rules(&self, rules: RuleSet) {
        log::debug!("applying rules: {rules}");
        self.mutate(|state| state.rules = rules);
    }

    /// Applies every snapshot published on `rules` until its sender is gone.
    ///
    /// The current snapshot is applied before the task is spawned.
    pub fn follow_rules(&self, mut rules: watch::Receiver<RuleSet>) -> JoinHandle<()> {
        self.set_rules(rules.borrow_and_update().clone());

        let engine = self.clone();
        tokio::spawn(async move {
            while rules.changed().await.is_ok() {
                let snapshot = rules.borrow_and_update().clone();
                engine.set_rules(snapshot);
            }
            log::debug!("rule feed closed");
        })
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Validates and, if clean, submits the current values.
    ///
    /// A call made while another submission is in flight returns
    /// [`SubmitOutcome::Ignored`] without touching anything. The endpoint
    /// receives a snapshot of the values taken when the call starts, so
    /// edits made while waiting are not sent.
    pub async fn submit(&self) -> SubmitOutcome {
        let (id, snapshot) = match self.begin_submit() {
            Ok(started) => started,
            Err(outcome) => return outcome,
        };

        let mut guard = InFlight {
            engine: self,
            id,
            armed: true,
        };
        let result = self.inner.endpoint.submit(&snapshot).await;
        guard.armed = false;

        self.finish_submit(id, result)
    }

    fn begin_submit(&self) -> Result<(SubmissionId, FormValues), SubmitOutcome> {
        self.mutate(|state| {
            if let SubmissionState::Submitting(id) = &state.submission {
                log::debug!("submit ignored, submission {id} in flight");
                return Err(SubmitOutcome::Ignored);
            }

            state.attempted = true;
            let errors = validate_form(&state.values, &state.rules);
            if !errors.is_empty() {
                log::debug!("submit blocked by {} client error(s)", errors.len());
                return Err(SubmitOutcome::Blocked(errors));
            }

            let id = SubmissionId::new();
            log::info!("submission {id} started");
            state.submission = SubmissionState::Submitting(id);
            state.server_errors = ServerErrors::new();
            Ok((id, state.values.clone()))
        })
    }

    fn finish_submit(
        &self,
        id: SubmissionId,
        result: Result<SubmitResponse, SubmitError>,
    ) -> SubmitOutcome {
        let network_failure = self.inner.network_failure_message.clone();
        self.mutate(|state| {
            let outcome = match result {
                Ok(SubmitResponse::Accepted { message }) => {
                    log::info!("submission {id} accepted");
                    SubmitOutcome::Succeeded(message)
                }
                Ok(SubmitResponse::Rejected { errors }) => {
                    log::info!("submission {id} rejected with {} error(s)", errors.len());
                    SubmitOutcome::Rejected(ServerErrors::from_response(&errors))
                }
                Err(err) => {
                    log::warn!("submission {id} failed: {err}");
                    SubmitOutcome::TransportFailed(network_failure)
                }
            };

            if state.submission != SubmissionState::Submitting(id) {
                log::warn!("submission {id} finished after being abandoned, result dropped");
                return outcome;
            }

            match &outcome {
                SubmitOutcome::Succeeded(message) => {
                    state.submission = SubmissionState::Succeeded(message.clone());
                    state.attempted = false;
                }
                SubmitOutcome::Rejected(errors) => {
                    state.server_errors = errors.clone();
                    state.submission = SubmissionState::Failed;
                }
                SubmitOutcome::TransportFailed(message) => {
                    state.server_errors = ServerErrors::form_only(message.clone());
                    state.submission = SubmissionState::Idle;
                }
                SubmitOutcome::Ignored | SubmitOutcome::Blocked(_) => {}
            }
            outcome
        })
    }

    /// Leaves `Submitting` when a submission future is dropped or unwinds.
    fn abandon(&self, id: SubmissionId) {
        let network_failure = self.inner.network_failure_message.clone();
        self.mutate(|state| {
            if state.submission == SubmissionState::Submitting(id) {
                log::warn!("submission {id} abandoned before completing");
                state.submission = SubmissionState::Idle;
                state.server_errors = ServerErrors::form_only(network_failure);
            }
        });
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the client errors for the current values and rules.
    ///
    /// Empty while every field is empty, unless a submit was attempted.
    pub fn current_client_errors(&self) -> ClientErrors {
        self.lock().client_errors.clone()
    }

    /// Returns the server errors from the last submission.
    pub fn server_errors(&self) -> ServerErrors {
        self.lock().server_errors.clone()
    }

    /// Returns the submission lifecycle state.
    pub fn submission(&self) -> SubmissionState {
        self.lock().submission.clone()
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.lock().submission.is_submitting()
    }

    /// Returns the current raw values.
    pub fn values(&self) -> FormValues {
        self.lock().values.clone()
    }

    /// Returns the rules in force.
    pub fn rules(&self) -> RuleSet {
        self.lock().rules.clone()
    }

    /// Returns a render-ready snapshot.
    pub fn view(&self) -> FormView {
        self.lock().view()
    }

    /// Returns a receiver notified whenever the view changes.
    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.inner.view_tx.subscribe()
    }
}

impl std::fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("FormEngine")
            .field("values", &state.values)
            .field("rules", &state.rules)
            .field("submission", &state.submission)
            .finish_non_exhaustive()
    }
}

/// Armed while the endpoint call is pending.
struct InFlight<'a> {
    engine: &'a FormEngine,
    id: SubmissionId,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.engine.abandon(self.id);
        }
    }
}
