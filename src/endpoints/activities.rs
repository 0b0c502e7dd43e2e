use super::{check, endpoint_url, EndpointError};
use crate::ActivityMap;
use reqwest::Client;
use url::Url;

/// Fetch the full activity roster. No auth required; the response is a
/// mapping from activity name to its details.
pub async fn get_activities(
    client: &Client,
    base: &Url,
) -> Result<ActivityMap, EndpointError> {
    let url = endpoint_url(base, &["activities"])?;

    log::debug!("Fetching activities from {}", url);

    let response = check(client.get(url).send().await?).await?;
    let body = response.text().await?;
    log::trace!("Response: {}", body);

    let activities: ActivityMap = serde_json::from_str(&body)?;
    log::debug!("Fetched {} activities", activities.len());

    Ok(activities)
}
