//! Validate-then-send flow for the contact form.

use std::cell::Cell;

use crate::config::FormConfig;
use crate::error::SubmitError;
use crate::form::{FormSubmission, ValidationErrors};

/// The form as seen by the submitter: its fields, its submit control, and the
/// user-facing notification channel.
pub trait FormSurface {
    fn read_fields(&self) -> FormSubmission;
    /// Disable or re-enable the submit control and set its visible label.
    fn set_busy(&self, busy: bool, label: &str);
    fn notify(&self, message: &str);
    fn reset_fields(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// Futures here are `!Send`; everything runs on the browser's single event loop.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// POST `body` with `Content-Type: application/json`.
    async fn post_json(&self, endpoint: &str, body: String) -> Result<HttpReply, SubmitError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    Submitting,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Invalid(ValidationErrors),
    Sent(serde_json::Value),
    Failed(SubmitError),
}

pub struct FormSubmitter<S: FormSurface, T: Transport> {
    surface: S,
    transport: T,
    cfg: FormConfig,
    phase: Cell<SubmitPhase>,
}

impl<S: FormSurface, T: Transport> FormSubmitter<S, T> {
    pub fn new(surface: S, transport: T, cfg: FormConfig) -> Self {
        Self {
            surface,
            transport,
            cfg,
            phase: Cell::new(SubmitPhase::Idle),
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase.get()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let current = self.phase.get();
        if current != SubmitPhase::Idle {
            // Not guarded: the disabled control is the only deterrent.
            log::warn!("form: submit while {current:?}, sending anyway");
        }

        self.phase.set(SubmitPhase::Validating);
        let submission = self.surface.read_fields();
        if let Err(errors) = submission.validate() {
            log::debug!("form: {} validation error(s)", errors.messages().len());
            self.surface.notify(&errors.to_string());
            self.phase.set(SubmitPhase::Idle);
            return SubmitOutcome::Invalid(errors);
        }

        self.phase.set(SubmitPhase::Submitting);
        let _busy = BusyGuard::engage(self);

        let result = self.send(&submission).await;
        self.phase.set(SubmitPhase::Done);
        match result {
            Ok(reply) => {
                self.surface.notify(&self.cfg.success_message);
                self.surface.reset_fields();
                SubmitOutcome::Sent(reply)
            }
            Err(e) => {
                log::error!("form: submission to {} failed: {e}", self.cfg.endpoint);
                self.surface.notify(&self.cfg.failure_message);
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn send(&self, submission: &FormSubmission) -> Result<serde_json::Value, SubmitError> {
        let body = submission.to_json()?;
        let reply = self.transport.post_json(&self.cfg.endpoint, body).await?;
        if !reply.is_success() {
            return Err(SubmitError::Http {
                status: reply.status,
            });
        }
        serde_json::from_str(&reply.body).map_err(|e| SubmitError::Parse(e.to_string()))
    }
}

/// Holds the submit control busy; dropping it restores the control and
/// returns the submitter to `Idle` on every exit path.
struct BusyGuard<'a, S: FormSurface, T: Transport> {
    submitter: &'a FormSubmitter<S, T>,
}

impl<'a, S: FormSurface, T: Transport> BusyGuard<'a, S, T> {
    fn engage(submitter: &'a FormSubmitter<S, T>) -> Self {
        submitter.surface.set_busy(true, &submitter.cfg.busy_label);
        Self { submitter }
    }
}

impl<S: FormSurface, T: Transport> Drop for BusyGuard<'_, S, T> {
    fn drop(&mut self) {
        let s = self.submitter;
        s.surface.set_busy(false, &s.cfg.submit_label);
        s.phase.set(SubmitPhase::Idle);
    }
}
