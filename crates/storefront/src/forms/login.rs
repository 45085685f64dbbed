//! Sign-in form.

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::instrument;

use super::{FormField, FormState, SubmitOutcome, failure_message};
use crate::api::{LoginRequest, StoreApi};
use crate::notify::{Notification, Toaster};
use crate::routes::Route;
use crate::storage::{KeyValueStore, store_token};

pub use super::register::{EMAIL_REQUIRED, PASSWORD_REQUIRED};

pub const LOGGED_IN: &str = "Logged in successfully!";
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const INVALID_CREDENTIALS: &str = "Invalid Credentials.";
pub const TOKEN_NOT_SAVED: &str = "Logged in, but the session could not be saved.";

/// Email and password.
#[derive(Debug, Default)]
pub struct LoginForm {
    email: FormField,
    password: FormField,
    state: FormState,
}

impl LoginForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// Label for the submit button.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Loading..."
        } else {
            "Login"
        }
    }

    /// Check every required field, recording an error on each empty one.
    pub fn validate(&mut self) -> bool {
        let email_ok = self.email.require(EMAIL_REQUIRED);
        let password_ok = self.password.require(PASSWORD_REQUIRED);
        self.state.changed();
        email_ok && password_ok
    }

    /// Validate and, if complete, sign in.
    ///
    /// A returned token is written to `store` under
    /// [`TOKEN_KEY`](crate::storage::TOKEN_KEY) before the success
    /// notification is pushed.
    #[instrument(skip_all, fields(email = %self.email.value()))]
    pub async fn submit<A, S, T>(
        &mut self,
        api: &A,
        store: &mut S,
        toaster: &mut T,
    ) -> SubmitOutcome<Route>
    where
        A: StoreApi,
        S: KeyValueStore + ?Sized,
        T: Toaster,
    {
        if !self.validate() {
            tracing::debug!("Login blocked by empty fields");
            return SubmitOutcome::Invalid;
        }

        let _submitting = self.state.begin_submit();
        let request = LoginRequest {
            email: self.email.value().to_owned(),
            password: SecretString::from(self.password.value().to_owned()),
        };

        match api.login(&request).await {
            Ok(response) if response.success => {
                if let Some(token) = &response.token {
                    if let Err(e) = store_token(store, token) {
                        tracing::error!(error = %e, "Failed to persist session token");
                        toaster.push(Notification::error(TOKEN_NOT_SAVED));
                        return SubmitOutcome::Failed;
                    }
                } else {
                    tracing::warn!("Login succeeded without a token");
                }
                tracing::info!("Logged in");
                toaster.push(Notification::success(LOGGED_IN));
                SubmitOutcome::Succeeded(Route::ProductList)
            }
            Ok(_) => {
                toaster.push(Notification::error(LOGIN_FAILED));
                SubmitOutcome::Failed
            }
            Err(err) => {
                tracing::warn!(error = %err, "Login failed");
                toaster.push(Notification::error(failure_message(
                    &err,
                    None,
                    INVALID_CREDENTIALS,
                )));
                SubmitOutcome::Failed
            }
        }
    }
}
