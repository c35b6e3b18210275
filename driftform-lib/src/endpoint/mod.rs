//! Submit endpoints
//!
//! The engine only depends on the [`SubmitEndpoint`] capability. This module
//! defines that seam, the verdict wire format, and the stock
//! implementations: a randomized [`MockEndpoint`], an [`HttpEndpoint`] for
//! a real backend, and [`FnEndpoint`] for plain async closures.

mod http;
mod mock;

pub use http::*;
pub use mock::*;

use std::future::Future;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ServerFieldError;
use crate::error::SubmitError;
use crate::model::FormValues;

/// The verdict of a submission that reached the endpoint.
///
/// On the wire this is `{"success": true, "message": "..."}` or
/// `{"success": false, "errors": [{"field": "...", "message": "..."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawResponse", into = "RawResponse")]
pub enum SubmitResponse {
    /// The submission was accepted.
    Accepted {
        /// Confirmation message to show the user.
        message: String,
    },
    /// The submission was refused with per-field errors.
    Rejected {
        /// One entry per refused field.
        errors: Vec<ServerFieldError>,
    },
}

impl SubmitResponse {
    /// Creates an accepted verdict.
    pub fn accepted(message: impl Into<String>) -> Self {
        Self::Accepted {
            message: message.into(),
        }
    }

    /// Creates a rejected verdict.
    pub fn rejected(errors: impl IntoIterator<Item = ServerFieldError>) -> Self {
        Self::Rejected {
            errors: errors.into_iter().collect(),
        }
    }

    /// Returns `true` if the submission was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

#[derive(Serialize, Deserialize)]
struct RawResponse {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<ServerFieldError>>,
}

impl TryFrom<RawResponse> for SubmitResponse {
    type Error = SubmitError;

    fn try_from(raw: RawResponse) -> Result<Self, Self::Error> {
        match (raw.success, raw.message, raw.errors) {
            (true, Some(message), _) => Ok(Self::Accepted { message }),
            (true, None, _) => Err(SubmitError::parse("success response without a message")),
            (false, _, Some(errors)) => Ok(Self::Rejected { errors }),
            (false, _, None) => Err(SubmitError::parse("failure response without errors")),
        }
    }
}

impl From<SubmitResponse> for RawResponse {
    fn from(response: SubmitResponse) -> Self {
        match response {
            SubmitResponse::Accepted { message } => Self {
                success: true,
                message: Some(message),
                errors: None,
            },
            SubmitResponse::Rejected { errors } => Self {
                success: false,
                message: None,
                errors: Some(errors),
            },
        }
    }
}

/// Something that can judge a form submission.
///
/// `Ok` carries the endpoint's verdict, including rejections. `Err` means
/// no verdict was obtained at all.
#[async_trait]
pub trait SubmitEndpoint: Send + Sync {
    /// Submits a snapshot of the form values.
    async fn submit(&self, values: &FormValues) -> Result<SubmitResponse, SubmitError>;
}

/// Adapts an async closure into a [`SubmitEndpoint`].
///
/// # Example
///
/// ```
/// use driftform_lib::endpoint::{FnEndpoint, SubmitResponse};
///
/// let endpoint = FnEndpoint::new(|_values| async {
///     Ok(SubmitResponse::accepted("ok"))
/// });
/// ```
pub struct FnEndpoint<F> {
    f: F,
}

impl<F, Fut> FnEndpoint<F>
where
    F: Fn(FormValues) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SubmitResponse, SubmitError>> + Send + 'static,
{
    /// Wraps a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> SubmitEndpoint for FnEndpoint<F>
where
    F: Fn(FormValues) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SubmitResponse, SubmitError>> + Send + 'static,
{
    async fn submit(&self, values: &FormValues) -> Result<SubmitResponse, SubmitError> {
        (self.f)(values.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted() {
        let response: SubmitResponse =
            serde_json::from_str(r#"{"success": true, "message": "done"}"#).unwrap();
        assert_eq!(response, SubmitResponse::accepted("done"));
    }

    #[test]
    fn test_parse_rejected() {
        let response: SubmitResponse = serde_json::from_str(
            r#"{"success": false, "errors": [{"field": "amount", "message": "limit exceeded"}]}"#,
        )
        .unwrap();
        assert_eq!(
            response,
            SubmitResponse::rejected([ServerFieldError::new("amount", "limit exceeded")])
        );
    }

    #[test]
    fn test_parse_rejects_incomplete_verdicts() {
        assert!(serde_json::from_str::<SubmitResponse>(r#"{"success": true}"#).is_err());
        assert!(serde_json::from_str::<SubmitResponse>(r#"{"success": false}"#).is_err());
    }

    #[test]
    fn test_serialize_wire_shape() {
        let json = serde_json::to_value(SubmitResponse::accepted("done")).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "message": "done"}));

        let json =
            serde_json::to_value(SubmitResponse::rejected([ServerFieldError::new("email", "no")]))
                .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "errors": [{"field": "email", "message": "no"}]})
        );
    }

    #[tokio::test]
    async fn test_fn_endpoint_sees_values() {
        let endpoint = FnEndpoint::new(|values: FormValues| async move {
            Ok(SubmitResponse::accepted(format!("got {}", values.amount)))
        });
        let response = endpoint.submit(&FormValues::new("a@ok.com", "5")).await.unwrap();
        assert_eq!(response, SubmitResponse::accepted("got 5"));
    }
}
