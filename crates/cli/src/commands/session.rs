//! Login, registration and account commands.

use vmart_storefront::error::AppError;
use vmart_storefront::state::AppState;

use super::output;

/// Log in.
///
/// # Errors
///
/// Returns `AppError::Session` if the credentials are rejected.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<(), AppError> {
    let user = state.session().login(email, password).await?;
    output::user(Some(&user));
    Ok(())
}

/// Create a customer account and log in.
///
/// # Errors
///
/// Returns `AppError::Session` if a field is missing, the email is invalid or
/// already registered.
pub async fn register(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), AppError> {
    let user = state.session().register(name, email, password).await?;
    output::user(Some(&user));
    Ok(())
}

pub fn logout(state: &AppState) {
    state.session().logout();
    output::line("Logged out.");
}

pub fn whoami(state: &AppState) {
    output::user(state.session().current_user().as_ref());
}

/// Change the logged-in user's password.
///
/// # Errors
///
/// Returns `AppError::Session` if nobody is logged in or the new password is
/// rejected.
pub fn change_password(
    state: &AppState,
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<(), AppError> {
    state.session().change_password(current, new, confirm)?;
    output::line("Password updated.");
    Ok(())
}
