use super::{check, endpoint_url, EndpointError};
use crate::{Role, User};
use reqwest::Client;
use serde_derive::Deserialize;
use url::Url;

/// Ask the server who a token belongs to. Used to validate a restored
/// session.
pub async fn me(
    client: &Client,
    base: &Url,
    token: &str,
) -> Result<User, EndpointError> {
    let url = endpoint_url(base, &["api", "me"])?;

    log::debug!("Validating the stored session against {}", url);

    let response =
        check(client.get(url).bearer_auth(token).send().await?).await?;
    let body = response.text().await?;
    log::trace!("Response: {}", body);

    interpret_response(&body)
}

fn interpret_response(body: &str) -> Result<User, EndpointError> {
    let doc: UserInfo = serde_json::from_str(body)?;

    Ok(User {
        username: doc.username,
        role: Role::from(doc.role.as_str()),
    })
}

// the server also sends an `email` field, which we have no use for
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct UserInfo {
    username: String,
    role: String,
}
