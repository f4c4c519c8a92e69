//! Backend endpoints used by the shell itself.
//!
//! Only login lives here; feature views bring their own calls through the
//! shared [`ApiClient`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::Transport;

pub const LOGIN_ENDPOINT: &str = "/auth/login";

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Envelope `data` returned by a successful login.
#[derive(Debug, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<Value>,
}

/// Exchange credentials for a token and persist it in the client's session.
///
/// # Errors
///
/// Returns the classified login failure, or [`ApiError::Setup`] off-browser.
pub async fn login<T: Transport>(api: &ApiClient<T>, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let response: LoginResponse = api.post(LOGIN_ENDPOINT, &LoginRequest { username, password }).await?;
    let user_info = response.user.as_ref().map(Value::to_string);
    api.session().login(&response.token, user_info.as_deref());
    Ok(response)
}

/// Forget the current session locally.
pub fn logout<T: Transport>(api: &ApiClient<T>) {
    api.session().clear();
}
