//! Account commands: register, login, logout.
//!
//! # Usage
//!
//! ```bash
//! catalog-cli register --full-name "Ada Lovelace" -e ada@example.com -p secret
//! catalog-cli login -e ada@example.com -p secret
//! catalog-cli logout
//! ```

use catalog_cart_storefront::api::StoreApi;
use catalog_cart_storefront::forms::{LoginForm, RegisterForm, SubmitOutcome};
use catalog_cart_storefront::notify::{Notification, Toaster};
use catalog_cart_storefront::storage::{KeyValueStore, TOKEN_KEY};

use super::report_field_errors;
use crate::error::CliError;

/// Credentials as typed on the command line.
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Create an account.
///
/// Rejections from the API are shown as notifications; only local failures
/// are returned as errors.
pub async fn register<A, T>(
    api: &A,
    toaster: &mut T,
    full_name: String,
    credentials: Credentials,
) -> Result<(), CliError>
where
    A: StoreApi,
    T: Toaster,
{
    let mut form = RegisterForm::new();
    form.set_full_name(full_name);
    form.set_email(credentials.email);
    form.set_password(credentials.password);

    match form.submit(api, toaster).await {
        SubmitOutcome::Invalid => {
            report_field_errors(toaster, &[form.full_name(), form.email(), form.password()]);
        }
        SubmitOutcome::Failed => {}
        SubmitOutcome::Succeeded(next) => {
            tracing::debug!(route = %next, "Registration complete");
            toaster.push(Notification::info("Sign in with `catalog-cli login`."));
        }
    }
    Ok(())
}

/// Sign in and keep the session token in `store`.
pub async fn login<A, S, T>(
    api: &A,
    store: &mut S,
    toaster: &mut T,
    credentials: Credentials,
) -> Result<(), CliError>
where
    A: StoreApi,
    S: KeyValueStore + ?Sized,
    T: Toaster,
{
    let mut form = LoginForm::new();
    form.set_email(credentials.email);
    form.set_password(credentials.password);

    match form.submit(api, store, toaster).await {
        SubmitOutcome::Invalid => {
            report_field_errors(toaster, &[form.email(), form.password()]);
        }
        SubmitOutcome::Failed => {}
        SubmitOutcome::Succeeded(next) => {
            tracing::debug!(route = %next, "Login complete");
        }
    }
    Ok(())
}

/// Remove the stored session token.
///
/// # Errors
///
/// Returns an error if the storage file cannot be written.
pub fn logout<S, T>(store: &mut S, toaster: &mut T) -> Result<(), CliError>
where
    S: KeyValueStore + ?Sized,
    T: Toaster,
{
    if store.remove(TOKEN_KEY)? {
        tracing::info!("Session token removed");
        toaster.push(Notification::info("Logged out."));
    } else {
        toaster.push(Notification::info("Not logged in."));
    }
    Ok(())
}
