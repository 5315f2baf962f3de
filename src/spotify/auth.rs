use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode, header::AUTHORIZATION};

use crate::types::{Credentials, TokenResponse};

#[derive(Debug)]
pub enum AuthError {
    Http(reqwest::Error),
    Rejected { status: StatusCode, body: String },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Http(e) => write!(f, "token request failed: {}", e),
            AuthError::Rejected { status, body } => write!(f, "{} {}", status, body),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Http(err)
    }
}

/// Builds the value of the `Authorization` header for the token endpoint.
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let auth_string = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(auth_string.as_bytes()))
}

/// Exchanges the application credentials for a bearer token.
///
/// Performs the OAuth 2.0 client-credentials grant: a single form-encoded
/// `POST` with `grant_type=client_credentials`, authenticated with HTTP Basic
/// auth built from `client_id:client_secret`.
///
/// # Arguments
///
/// * `token_url` - Token endpoint, e.g. `https://accounts.spotify.com/api/token`
/// * `credentials` - Client id and secret of the Spotify application
///
/// # Returns
///
/// The `access_token` field of the JSON response.
///
/// # Errors
///
/// - [`AuthError::Rejected`] with status and response body on a non-success status
/// - [`AuthError::Http`] on network failures or an unparsable response
///
/// The token is not refreshed; callers request one per run.
pub async fn client_credentials_token(
    token_url: &str,
    credentials: &Credentials,
) -> Result<String, AuthError> {
    let client = Client::new();
    let res = client
        .post(token_url)
        .header(AUTHORIZATION, basic_auth_header(credentials))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(AuthError::Rejected { status, body });
    }

    let token = res.json::<TokenResponse>().await?;
    Ok(token.access_token)
}
