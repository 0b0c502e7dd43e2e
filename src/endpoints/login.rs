use super::{endpoint_url, ErrorBody, ServerRejection};
use crate::{Role, Session, User};
use reqwest::{Client, Error as ReqwestError};
use serde_derive::{Deserialize, Serialize};
use url::Url;

/// Authenticate with the activities server and get a new [`Session`].
pub async fn login(
    client: &Client,
    base: &Url,
    username: &str,
    password: &str,
) -> Result<Session, LoginError> {
    let url = endpoint_url(base, &["api", "login"])
        .map_err(|_| LoginError::BadBaseUrl)?;
    let data = Data { username, password };

    log::debug!("Sending a login request to {}", url);

    let response = client.post(url).json(&data).send().await?;
    let status = response.status();
    let body = response.text().await?;
    log::trace!("Response: {}", body);

    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail);
        log::error!("Login failed with HTTP {}", status);

        return Err(LoginError::RejectedByServer(ServerRejection {
            status: status.as_u16(),
            detail,
        }));
    }

    interpret_response(&body)
}

fn interpret_response(body: &str) -> Result<Session, LoginError> {
    let doc: LoginResponse = serde_json::from_str(body)?;
    log::info!("Logged in as {}", doc.username);

    Ok(Session {
        token: doc.access_token,
        user: User {
            username: doc.username,
            role: Role::from(doc.role.as_str()),
        },
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct LoginResponse {
    access_token: String,
    username: String,
    role: String,
}

#[derive(Debug, Copy, Clone, Serialize)]
struct Data<'a> {
    username: &'a str,
    password: &'a str,
}

/// Possible errors that may be returned by [`login()`].
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The HTTP client encountered an error.
    #[error("Unable to send the login request")]
    HttpClient(#[from] ReqwestError),
    /// Unable to parse the login response.
    #[error("Unable to parse the login response")]
    ResponseParse(#[from] serde_json::Error),
    /// The server rejected the credentials.
    #[error(transparent)]
    RejectedByServer(ServerRejection),
    #[error("The server URL cannot be used as a base")]
    BadBaseUrl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_a_happy_login_response() {
        let src = r#"{
            "access_token": "eyJhbGciOiJIUzI1NiJ9.TOKEN",
            "token_type": "bearer",
            "username": "mrs.frizzle",
            "role": "teacher"
        }"#;

        let got = interpret_response(src).unwrap();

        assert_eq!(got.token, "eyJhbGciOiJIUzI1NiJ9.TOKEN");
        assert_eq!(got.user.username, "mrs.frizzle");
        assert_eq!(got.user.role, Role::Teacher);
    }

    #[test]
    fn an_unknown_role_is_not_a_parse_failure() {
        let src = r#"{
            "access_token": "TOKEN",
            "username": "arnold",
            "role": "student"
        }"#;

        let got = interpret_response(src).unwrap();

        assert_eq!(got.user.role, Role::Other);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let got = interpret_response("<html>nope</html>");

        assert!(matches!(got, Err(LoginError::ResponseParse(_))));
    }
}
