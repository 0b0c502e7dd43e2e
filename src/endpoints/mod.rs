//! The activities API's endpoints.

mod activities;
mod login;
mod me;
mod signup;
mod unregister;

pub use activities::get_activities;
pub use login::{login, LoginError};
pub use me::me;
pub use signup::signup;
pub use unregister::unregister;

use reqwest::Response;
use serde_derive::Deserialize;
use url::Url;

/// Typical endpoint errors.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// The HTTP client encountered an error.
    #[error("Unable to send the request")]
    HttpClient(#[from] reqwest::Error),
    /// Unable to parse the JSON in the response.
    #[error("Unable to parse the response")]
    ResponseParse(#[from] serde_json::Error),
    /// The server answered with a non-success status.
    #[error(transparent)]
    Rejected(#[from] ServerRejection),
    /// The configured server URL can't have path segments appended.
    #[error("The server URL cannot be used as a base")]
    BadBaseUrl,
}

/// The server turned a request down, possibly saying why.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("The server rejected the request (HTTP {})", status)]
pub struct ServerRejection {
    pub status: u16,
    /// The `detail` string from the error body, when the server sent one.
    pub detail: Option<String>,
}

impl ServerRejection {
    /// The server's own explanation, or `fallback` when it didn't give one.
    pub fn detail_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.detail.as_deref().unwrap_or(fallback)
    }
}

/// The error body shape used across the API: `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Build an endpoint URL from the server base, percent-encoding each
/// segment along the way.
fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, EndpointError> {
    let mut url = base.clone();
    {
        let mut parts = url
            .path_segments_mut()
            .map_err(|_| EndpointError::BadBaseUrl)?;
        parts.pop_if_empty();
        for segment in segments {
            parts.push(segment);
        }
    }
    Ok(url)
}

/// Turn a non-success response into a [`ServerRejection`], pulling the
/// `detail` string out of the body when there is one.
async fn check(response: Response) -> Result<Response, EndpointError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = match response.text().await {
        Ok(body) => {
            log::trace!("Error body: {}", body);
            serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail)
        },
        Err(_) => None,
    };

    Err(EndpointError::Rejected(ServerRejection {
        status: status.as_u16(),
        detail,
    }))
}
