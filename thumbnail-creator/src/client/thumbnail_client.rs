use crate::domain::error::ResolveError;
use reqwest::header::LOCATION;
use reqwest::Url;
use tracing::{error, instrument, warn};

/// Looks up thumbnail urls on the image viewer service.
#[derive(Debug, Clone)]
pub struct ThumbnailResolver {
    client: reqwest::Client,
    base_url: String,
}

impl ThumbnailResolver {
    pub fn new(client: reqwest::Client, thumbnail_server: &str) -> ThumbnailResolver {
        ThumbnailResolver::with_base_url(client, format!("https://{thumbnail_server}"))
    }

    /// Point the resolver at a full base url, scheme included.
    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> ThumbnailResolver {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ThumbnailResolver { client, base_url }
    }

    pub fn thumbnail_url(&self, pid: &str) -> String {
        format!("{}/viewers/image/thumbnail/{pid}/", self.base_url)
    }

    /// Returns the thumbnail url for `pid` if the service answers it
    /// directly. Redirects and error statuses are logged and give `None`.
    #[instrument(skip(self))]
    pub async fn resolve(&self, pid: &str) -> Result<Option<String>, ResolveError> {
        let url = self.thumbnail_url(pid);
        let request_url = Url::parse(&url).map_err(|source| ResolveError::InvalidUrl {
            url: url.clone(),
            source,
        })?;

        let resp = match self.client.get(request_url.clone()).send().await {
            Ok(resp) => resp,
            Err(e) if e.is_redirect() => {
                let location = e.url().map(Url::to_string).unwrap_or_default();
                warn!("{pid}: got a redirect from thumbnail svc - new url: {location}");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let status = resp.status();
        if status.is_redirection() {
            let location = resp
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            warn!("{pid}: got a redirect from thumbnail svc - new url: {location}");
            Ok(None)
        } else if status.is_success() {
            // Only reachable with a client that follows redirects itself.
            if resp.url() != &request_url {
                warn!(
                    "{pid}: got a redirect from thumbnail svc - new url: {}",
                    resp.url()
                );
                return Ok(None);
            }
            Ok(Some(url))
        } else {
            let body = resp.text().await.unwrap_or_default();
            error!("{pid}: error from thumbnail svc - url {url}");
            error!("{pid}: thumbnail response: {} {body}", status.as_u16());
            Ok(None)
        }
    }
}
