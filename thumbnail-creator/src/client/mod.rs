use reqwest::redirect::Policy;
use reqwest::ClientBuilder;
use tracing::info;

pub mod thumbnail_client;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

fn client_builder() -> ClientBuilder {
    reqwest::Client::builder()
        .use_rustls_tls()
        .user_agent(USER_AGENT)
}

/// Client for the repository.
pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    info!("Initializing http client.");
    client_builder().https_only(true).build()
}

/// Client for the thumbnail service. Redirects come back to the caller
/// instead of being followed.
pub fn thumbnail_http_client() -> Result<reqwest::Client, reqwest::Error> {
    info!("Initializing thumbnail service client.");
    client_builder()
        .https_only(true)
        .redirect(Policy::none())
        .build()
}
