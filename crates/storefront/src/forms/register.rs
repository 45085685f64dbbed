//! Account registration form.

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::instrument;

use super::{FormField, FormState, SubmitOutcome, failure_message};
use crate::api::{RegisterRequest, StoreApi};
use crate::notify::{Notification, Toaster};
use crate::routes::Route;

pub const FULL_NAME_REQUIRED: &str = "Full name is required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const PASSWORD_REQUIRED: &str = "Password is required.";
pub const REGISTERED: &str = "Registered successfully!";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const EMAIL_EXISTS: &str = "Email already exists. Please use a different email.";
pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

/// Full name, email and password.
#[derive(Debug, Default)]
pub struct RegisterForm {
    full_name: FormField,
    email: FormField,
    password: FormField,
    state: FormState,
}

impl RegisterForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) {
        self.full_name.set(value);
        self.state.changed();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email.set(value);
        self.state.changed();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password.set(value);
        self.state.changed();
    }

    #[must_use]
    pub const fn full_name(&self) -> &FormField {
        &self.full_name
    }

    #[must_use]
    pub const fn email(&self) -> &FormField {
        &self.email
    }

    #[must_use]
    pub const fn password(&self) -> &FormField {
        &self.password
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// Watch the submitting flag.
    #[must_use]
    pub fn watch_submitting(&self) -> watch::Receiver<bool> {
        self.state.watch_submitting()
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.state.subscribe()
    }

    /// Check every required field, recording an error on each empty one.
    pub fn validate(&mut self) -> bool {
        // Non-short-circuiting so every field gets its message
        let name_ok = self.full_name.require(FULL_NAME_REQUIRED);
        let email_ok = self.email.require(EMAIL_REQUIRED);
        let password_ok = self.password.require(PASSWORD_REQUIRED);
        self.state.changed();
        name_ok && email_ok && password_ok
    }

    /// Validate and, if complete, register the account.
    ///
    /// On success the caller should navigate to the returned route.
    #[instrument(skip_all, fields(email = %self.email.value()))]
    pub async fn submit<A, T>(&mut self, api: &A, toaster: &mut T) -> SubmitOutcome<Route>
    where
        A: StoreApi,
        T: Toaster,
    {
        if !self.validate() {
            tracing::debug!("Registration blocked by empty fields");
            return SubmitOutcome::Invalid;
        }

        let _submitting = self.state.begin_submit();
        let request = RegisterRequest {
            full_name: self.full_name.value().to_owned(),
            email: self.email.value().to_owned(),
            password: SecretString::from(self.password.value().to_owned()),
        };

        match api.register(&request).await {
            Ok(response) if response.success => {
                tracing::info!("Registered");
                toaster.push(Notification::success(REGISTERED));
                SubmitOutcome::Succeeded(Route::Login)
            }
            Ok(_) => {
                toaster.push(Notification::error(REGISTRATION_FAILED));
                SubmitOutcome::Failed
            }
            Err(err) => {
                tracing::warn!(error = %err, "Registration failed");
                toaster.push(Notification::error(failure_message(
                    &err,
                    Some(EMAIL_EXISTS),
                    GENERIC_ERROR,
                )));
                SubmitOutcome::Failed
            }
        }
    }
}
