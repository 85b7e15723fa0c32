//! Waitlist signup: email validation, the wire contract with the sheet
//! endpoint, and the form state machine the UI renders from.

use crate::config::SIMULATED_JITTER_MS;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;
use yew::Reducible;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const SUCCESS_MESSAGE: &str = "✨ You’re on the list. We’ll notify you at launch.";
pub const REJECTED_MESSAGE: &str = "Something went wrong.";
pub const NETWORK_ERROR_MESSAGE: &str = "⚠️ Something went wrong. Please try again.";
pub const IDLE_BUTTON_LABEL: &str = "Notify me";
pub const BUSY_BUTTON_LABEL: &str = "Submitting…";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignupError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("network error: {0}")]
    Network(String),
    #[error("signup endpoint returned HTTP {status}")]
    Http { status: u16 },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Trim and check `local@domain.tld` shape with no whitespace.
pub fn validate_email(raw: &str) -> Result<String, SignupError> {
    let email = raw.trim();
    if EMAIL_REGEX.is_match(email) {
        Ok(email.to_string())
    } else {
        Err(SignupError::InvalidEmail)
    }
}

/// JSON body posted to the endpoint. `company` is the honeypot and is sent
/// empty by real visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub company: String,
}

impl SignupRequest {
    pub fn new(email: impl Into<String>, honeypot: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            company: honeypot.into(),
        }
    }

    /// Receiving side: a filled honeypot means a bot filled the form.
    pub fn is_automated(&self) -> bool {
        !self.company.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    pub accepted: bool,
    pub message: Option<String>,
}

impl From<SignupResponse> for SignupOutcome {
    fn from(response: SignupResponse) -> Self {
        Self {
            accepted: response.success,
            message: response.error.filter(|e| !e.is_empty()),
        }
    }
}

/// What the simulated endpoint answers. Honeypot hits are rejected without
/// an explanation so they look like any other failure.
pub fn simulate_response(request: &SignupRequest) -> SignupResponse {
    if request.is_automated() {
        debug!("Simulated endpoint dropped a honeypot submission");
        return SignupResponse {
            success: false,
            error: None,
        };
    }
    SignupResponse {
        success: true,
        error: None,
    }
}

/// Where signups go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupEndpoint {
    Remote { url: String },
    Simulated { delay_ms: u32 },
}

impl SignupEndpoint {
    pub async fn submit(&self, request: &SignupRequest) -> Result<SignupOutcome, SignupError> {
        match self {
            SignupEndpoint::Remote { url } => post_signup(url, request).await,
            SignupEndpoint::Simulated { delay_ms } => {
                let jitter = rand::rng().random_range(0..=SIMULATED_JITTER_MS);
                TimeoutFuture::new(delay_ms.saturating_add(jitter)).await;
                Ok(simulate_response(request).into())
            }
        }
    }
}

async fn post_signup(url: &str, request: &SignupRequest) -> Result<SignupOutcome, SignupError> {
    let response = Request::post(url)
        .json(request)
        .map_err(|e| SignupError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| SignupError::Network(e.to_string()))?;

    if !response.ok() {
        warn!("Signup endpoint responded with {}", response.status());
        return Err(SignupError::Http {
            status: response.status(),
        });
    }

    let body: SignupResponse = response
        .json()
        .await
        .map_err(|e| SignupError::Decode(e.to_string()))?;
    Ok(body.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub text: String,
    pub kind: MessageKind,
}

pub enum FormAction {
    Edit(String),
    /// Local validation failed; nothing was sent.
    Invalid,
    Submitting,
    Completed(Result<SignupOutcome, SignupError>),
    /// Clear the message shown under the given sequence number.
    Expire(u32),
}

/// State of the signup form.
///
/// `message_seq` increases every time a message is shown so that the expiry
/// timer of an older message cannot clear a newer one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub email: String,
    pub submitting: bool,
    pub message: Option<FormMessage>,
    pub message_seq: u32,
}

impl FormState {
    pub fn button_label(&self) -> &'static str {
        if self.submitting {
            BUSY_BUTTON_LABEL
        } else {
            IDLE_BUTTON_LABEL
        }
    }

    pub fn apply(&self, action: FormAction) -> FormState {
        let mut next = self.clone();
        match action {
            FormAction::Edit(text) => next.email = text,
            FormAction::Invalid => next.show(MessageKind::Error, INVALID_EMAIL_MESSAGE),
            FormAction::Submitting => next.submitting = true,
            FormAction::Completed(result) => {
                next.submitting = false;
                match result {
                    Ok(outcome) if outcome.accepted => {
                        info!("Waitlist signup accepted");
                        next.email.clear();
                        next.show(MessageKind::Success, SUCCESS_MESSAGE);
                    }
                    Ok(outcome) => {
                        let text = outcome.message.as_deref().unwrap_or(REJECTED_MESSAGE);
                        next.show(MessageKind::Error, text);
                    }
                    Err(e) => {
                        warn!("Signup failed: {}", e);
                        next.show(MessageKind::Error, NETWORK_ERROR_MESSAGE);
                    }
                }
            }
            FormAction::Expire(seq) => {
                if seq == next.message_seq {
                    next.message = None;
                }
            }
        }
        next
    }

    fn show(&mut self, kind: MessageKind, text: &str) {
        self.message_seq = self.message_seq.wrapping_add(1);
        self.message = Some(FormMessage {
            text: text.to_string(),
            kind,
        });
    }
}

impl Reducible for FormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(email: &str) -> FormState {
        FormState::default().apply(FormAction::Edit(email.to_string()))
    }

    fn response(json: &str) -> Result<SignupOutcome, SignupError> {
        let body: SignupResponse = serde_json::from_str(json).unwrap();
        Ok(body.into())
    }

    #[test]
    fn email_shapes() {
        assert_eq!(validate_email("a@b.co"), Ok("a@b.co".to_string()));
        assert_eq!(validate_email("  a@b.co \n"), Ok("a@b.co".to_string()));
        assert_eq!(validate_email("a@b"), Err(SignupError::InvalidEmail));
        assert_eq!(validate_email("a b@c.com"), Err(SignupError::InvalidEmail));
        assert_eq!(validate_email("@c.com"), Err(SignupError::InvalidEmail));
        assert_eq!(validate_email("a@@c.com"), Err(SignupError::InvalidEmail));
        assert_eq!(validate_email(""), Err(SignupError::InvalidEmail));
    }

    #[test]
    fn request_body_carries_empty_honeypot() {
        let body = serde_json::to_value(SignupRequest::new("a@b.co", "")).unwrap();
        assert_eq!(body, serde_json::json!({ "email": "a@b.co", "company": "" }));
    }

    #[test]
    fn simulated_endpoint_rejects_filled_honeypot_silently() {
        let human = SignupRequest::new("a@b.co", "");
        let bot = SignupRequest::new("a@b.co", "ACME Corp");
        assert!(!human.is_automated());
        assert!(bot.is_automated());

        assert!(SignupOutcome::from(simulate_response(&human)).accepted);
        let rejected = SignupOutcome::from(simulate_response(&bot));
        assert!(!rejected.accepted);
        assert_eq!(rejected.message, None);
    }

    #[test]
    fn accepted_signup_clears_input_and_message_expires() {
        let state = typed("a@b.co").apply(FormAction::Submitting);
        assert!(state.submitting);
        assert_eq!(state.button_label(), BUSY_BUTTON_LABEL);

        let state = state.apply(FormAction::Completed(response(r#"{"success":true}"#)));
        assert!(!state.submitting);
        assert_eq!(state.button_label(), IDLE_BUTTON_LABEL);
        assert_eq!(state.email, "");
        let message = state.message.clone().unwrap();
        assert_eq!(message.kind, MessageKind::Success);
        assert_eq!(message.text, SUCCESS_MESSAGE);

        let state = state.apply(FormAction::Expire(state.message_seq));
        assert_eq!(state.message, None);
    }

    #[test]
    fn rejected_signup_shows_server_error_and_keeps_input() {
        let state = typed("a@b.co")
            .apply(FormAction::Submitting)
            .apply(FormAction::Completed(response(
                r#"{"success":false,"error":"x"}"#,
            )));
        assert!(!state.submitting);
        assert_eq!(state.email, "a@b.co");
        assert_eq!(state.message.unwrap().text, "x");
    }

    #[test]
    fn rejection_without_reason_uses_generic_text() {
        let state = typed("a@b.co").apply(FormAction::Completed(response(r#"{"success":false}"#)));
        assert_eq!(state.message.unwrap().text, REJECTED_MESSAGE);
    }

    #[test]
    fn network_failure_reenables_form() {
        let state = typed("a@b.co")
            .apply(FormAction::Submitting)
            .apply(FormAction::Completed(Err(SignupError::Http { status: 502 })));
        assert!(!state.submitting);
        assert_eq!(state.email, "a@b.co");
        let message = state.message.unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(message.text, NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn stale_expiry_leaves_newer_message() {
        let first = typed("nope").apply(FormAction::Invalid);
        let stale_seq = first.message_seq;
        let second = first.apply(FormAction::Invalid);

        let state = second.apply(FormAction::Expire(stale_seq));
        assert_eq!(state.message.unwrap().text, INVALID_EMAIL_MESSAGE);
    }
}
