//! Form controllers.
//!
//! Each form owns its field values and per-field errors. Submitting runs the
//! client-side checks first; only a form with every required field filled in
//! reaches the API. Failures are turned into notifications here, so callers
//! only see a [`SubmitOutcome`].
//!
//! Every form exposes `is_submitting()` while its request is in flight, a
//! `watch_submitting()` receiver for that flag, and `subscribe()` for a
//! revision bumped on each edit, validation and submit transition.
//!
//! - [`RegisterForm`] - `POST register/`, navigates to [`Route::Login`](crate::routes::Route::Login)
//! - [`LoginForm`] - `POST login/`, stores the token, navigates to the product list
//! - [`AddProductForm`] - multipart `POST product/add`

pub mod login;
pub mod product;
pub mod register;

pub use login::LoginForm;
pub use product::AddProductForm;
pub use register::RegisterForm;

use tokio::sync::watch;

use crate::api::{ApiError, ApiErrorKind};
use crate::observe::{ChangeNotifier, PendingFlag};

/// A text input and its validation message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    value: String,
    error: String,
    touched: bool,
}

/// Validation state of a [`FormField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Never edited, never validated.
    EmptyUntouched,
    /// No error recorded (re-checked on submit).
    Valid,
    /// Carries an error message.
    Invalid,
}

impl FormField {
    /// Replace the value. Any error on the field is cleared.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.error.clear();
        self.touched = true;
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The error message; empty when the field is valid.
    #[must_use]
    pub fn error(&self) -> &str {
        &self.error
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    #[must_use]
    pub fn state(&self) -> FieldState {
        if !self.error.is_empty() {
            FieldState::Invalid
        } else if !self.touched && self.value.is_empty() {
            FieldState::EmptyUntouched
        } else {
            FieldState::Valid
        }
    }

    /// Set `message` if the field is empty. Returns whether it passed.
    fn require(&mut self, message: &str) -> bool {
        if self.value.is_empty() {
            self.fail(message);
            false
        } else {
            self.error.clear();
            true
        }
    }

    fn fail(&mut self, message: &str) {
        self.error = message.to_owned();
        self.touched = true;
    }
}

/// Submit status and change revision shared by every form.
#[derive(Debug, Default)]
struct FormState {
    submitting: PendingFlag,
    changes: ChangeNotifier,
}

impl FormState {
    fn changed(&self) {
        self.changes.notify();
    }

    fn is_submitting(&self) -> bool {
        self.submitting.is_set()
    }

    fn watch_submitting(&self) -> watch::Receiver<bool> {
        self.submitting.watch()
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Mark a request as in flight until the guard is dropped.
    fn begin_submit(&self) -> SubmitGuard<'_> {
        self.submitting.set(true);
        self.changes.notify();
        SubmitGuard(self)
    }
}

/// Clears the submitting flag on drop, including when the submit future is
/// cancelled.
struct SubmitGuard<'a>(&'a FormState);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.submitting.set(false);
        self.0.changes.notify();
    }
}

/// What happened when a form was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<T> {
    /// Client-side validation failed; nothing was sent.
    Invalid,
    /// The API call was made and did not succeed. A notification was pushed.
    Failed,
    /// The API call succeeded. A notification was pushed.
    Succeeded(T),
}

impl<T> SubmitOutcome<T> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Pick the user-facing message for a failed call.
///
/// Precedence: duplicate-record wording (when the form has one), then the
/// structured message from the response, then `fallback`.
pub(crate) fn failure_message(err: &ApiError, duplicate: Option<&str>, fallback: &str) -> String {
    if let (ApiErrorKind::DuplicateRecord, Some(message)) = (err.kind(), duplicate) {
        return message.to_owned();
    }
    err.detail()
        .message
        .clone()
        .unwrap_or_else(|| fallback.to_owned())
}
