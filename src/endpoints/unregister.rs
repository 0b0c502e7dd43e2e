use super::{check, endpoint_url, EndpointError};
use reqwest::Client;
use url::Url;

/// Remove a student from an activity. Teachers only, enforced server-side.
pub async fn unregister(
    client: &Client,
    base: &Url,
    token: &str,
    activity: &str,
    email: &str,
) -> Result<(), EndpointError> {
    let mut url = endpoint_url(base, &["activities", activity, "unregister"])?;
    url.query_pairs_mut().append_pair("email", email);

    log::debug!("Removing {} via {}", email, url);

    check(client.delete(url).bearer_auth(token).send().await?).await?;
    Ok(())
}
