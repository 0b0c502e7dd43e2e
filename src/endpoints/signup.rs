use super::{check, endpoint_url, EndpointError};
use reqwest::Client;
use url::Url;

/// Enroll a student in an activity. Teachers only; the server enforces the
/// role check on its side.
pub async fn signup(
    client: &Client,
    base: &Url,
    token: &str,
    activity: &str,
    email: &str,
) -> Result<(), EndpointError> {
    let mut url = endpoint_url(base, &["activities", activity, "signup"])?;
    url.query_pairs_mut().append_pair("email", email);

    log::debug!("Signing {} up via {}", email, url);

    check(client.post(url).bearer_auth(token).send().await?).await?;
    Ok(())
}
