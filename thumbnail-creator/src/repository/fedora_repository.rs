use crate::domain::error::RepositoryError;
use crate::domain::DatastreamUpdate;
use crate::repository::ObjectStore;
use regex::Regex;
use reqwest::{Response, Url};
use std::fmt::{Debug, Formatter};
use tracing::{debug, instrument};

const DSID_PATTERN: &str = r#"<datastream\s[^>]*?\bdsid="([^"]*)""#;

/// Datastreams written by this tool are references the repository redirects to.
const CONTROL_GROUP: &str = "R";
const MIME_TYPE: &str = "image/jpeg";

/// Fedora 3 REST api client.
pub struct FedoraRepository {
    client: reqwest::Client,
    root: Url,
    username: String,
    password: String,
    dsid_pattern: Regex,
}

impl FedoraRepository {
    pub fn new(
        client: reqwest::Client,
        root: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<FedoraRepository, RepositoryError> {
        Ok(FedoraRepository {
            client,
            root: Url::parse(root)?,
            username: username.into(),
            password: password.into(),
            dsid_pattern: Regex::new(DSID_PATTERN)?,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RepositoryError> {
        let mut url = self.root.clone();
        url.path_segments_mut()
            .map_err(|_| RepositoryError::NotABase(self.root.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Pull the datastream ids out of a `listDatastreams` xml document.
    pub fn parse_datastream_list(&self, xml: &str) -> Vec<String> {
        self.dsid_pattern
            .captures_iter(xml)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    async fn check(resp: Response) -> Result<Response, RepositoryError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(RepositoryError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl Debug for FedoraRepository {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FedoraRepository")
            .field("root", &self.root.as_str())
            .field("username", &self.username)
            .finish()
    }
}

impl ObjectStore for FedoraRepository {
    #[instrument(skip(self))]
    async fn list_datastreams(&self, pid: &str) -> Result<Vec<String>, RepositoryError> {
        let url = self.endpoint(&["objects", pid, "datastreams"])?;
        let resp = self
            .client
            .get(url)
            .query(&[("format", "xml")])
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;
        let xml = Self::check(resp).await?.text().await?;
        let datastreams = self.parse_datastream_list(&xml);
        debug!("{pid}: datastreams {datastreams:?}");
        Ok(datastreams)
    }

    #[instrument(skip(self))]
    async fn save_datastream(
        &self,
        pid: &str,
        update: &DatastreamUpdate,
    ) -> Result<(), RepositoryError> {
        let url = self.endpoint(&["objects", pid, "datastreams", update.dsid.as_str()])?;
        let request = if update.exists {
            self.client.put(url).query(&[
                ("dsLocation", update.location.as_str()),
                ("dsLabel", update.label.as_str()),
            ])
        } else {
            self.client.post(url).query(&[
                ("controlGroup", CONTROL_GROUP),
                ("dsLocation", update.location.as_str()),
                ("dsLabel", update.label.as_str()),
                ("mimeType", MIME_TYPE),
            ])
        };
        let resp = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;
        Self::check(resp).await?;
        debug!("{pid}: wrote datastream {}", update.dsid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::{GET, POST, PUT};
    use httpmock::MockServer;

    // base64 of "fedoraAdmin:s3cret"
    const AUTHORIZATION: &str = "Basic ZmVkb3JhQWRtaW46czNjcmV0";
    const THUMBNAIL_URL: &str = "https://example.org/viewers/image/thumbnail/bdr:123/";

    const DATASTREAM_LIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<objectDatastreams xmlns="http://www.fedora.info/definitions/1/0/access/" pid="bdr:123" baseURL="http://localhost:8080/fedora/">
  <datastream dsid="DC" label="Dublin Core Record for this object" mimeType="text/xml"/>
  <datastream dsid="RELS-EXT" label="Relationships" mimeType="application/rdf+xml"/>
  <datastream dsid="THUMBNAIL" label="thumbnail" mimeType="image/jpeg"/>
</objectDatastreams>"#;

    fn repository(server: &MockServer) -> FedoraRepository {
        FedoraRepository::new(
            reqwest::Client::new(),
            &server.url("/fedora/"),
            "fedoraAdmin",
            "s3cret",
        )
        .unwrap()
    }

    fn update(exists: bool) -> DatastreamUpdate {
        DatastreamUpdate {
            dsid: "thumbnail".to_string(),
            label: "thumbnail".to_string(),
            location: THUMBNAIL_URL.to_string(),
            exists,
        }
    }

    fn offline_repository() -> FedoraRepository {
        FedoraRepository::new(
            reqwest::Client::new(),
            "https://repo.example.org/fedora/",
            "fedoraAdmin",
            "s3cret",
        )
        .unwrap()
    }

    #[test]
    fn parses_dsids_from_listing() {
        let repo = offline_repository();
        assert_eq!(
            repo.parse_datastream_list(DATASTREAM_LIST),
            vec!["DC", "RELS-EXT", "THUMBNAIL"]
        );
        assert!(repo.parse_datastream_list("<objectDatastreams/>").is_empty());
    }

    #[test]
    fn endpoint_appends_segments_to_root() {
        let repo = offline_repository();
        let url = repo.endpoint(&["objects", "bdr:123", "datastreams"]).unwrap();

        assert_eq!(
            url.as_str(),
            "https://repo.example.org/fedora/objects/bdr:123/datastreams"
        );
    }

    #[test]
    fn debug_hides_password() {
        let repo = offline_repository();
        assert!(!format!("{repo:?}").contains("s3cret"));
    }

    #[tokio::test]
    async fn lists_datastreams_with_credentials() {
        let server = MockServer::start_async().await;
        let listing = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/fedora/objects/bdr:123/datastreams")
                    .query_param("format", "xml")
                    .header("authorization", AUTHORIZATION);
                then.status(200).body(DATASTREAM_LIST);
            })
            .await;

        let datastreams = repository(&server).list_datastreams("bdr:123").await.unwrap();

        listing.assert_async().await;
        assert_eq!(datastreams, vec!["DC", "RELS-EXT", "THUMBNAIL"]);
    }

    #[tokio::test]
    async fn missing_object_is_a_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/fedora/objects/bdr:404/datastreams");
                then.status(404).body("Object not found in low-level storage: bdr:404");
            })
            .await;

        let err = repository(&server)
            .list_datastreams("bdr:404")
            .await
            .unwrap_err();

        match err {
            RepositoryError::Status { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("bdr:404"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn new_datastream_is_added_as_reference() {
        let server = MockServer::start_async().await;
        let add = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/fedora/objects/bdr:123/datastreams/thumbnail")
                    .query_param("controlGroup", "R")
                    .query_param("dsLocation", THUMBNAIL_URL)
                    .query_param("dsLabel", "thumbnail")
                    .query_param("mimeType", "image/jpeg")
                    .header("authorization", AUTHORIZATION);
                then.status(201);
            })
            .await;

        repository(&server)
            .save_datastream("bdr:123", &update(false))
            .await
            .unwrap();

        add.assert_async().await;
    }

    #[tokio::test]
    async fn existing_datastream_is_modified() {
        let server = MockServer::start_async().await;
        let modify = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/fedora/objects/bdr:123/datastreams/thumbnail")
                    .query_param("dsLocation", THUMBNAIL_URL)
                    .query_param("dsLabel", "thumbnail")
                    .header("authorization", AUTHORIZATION);
                then.status(200);
            })
            .await;

        repository(&server)
            .save_datastream("bdr:123", &update(true))
            .await
            .unwrap();

        modify.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_save_reports_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/fedora/objects/bdr:123/datastreams/thumbnail");
                then.status(401).body("Unauthorized");
            })
            .await;

        let err = repository(&server)
            .save_datastream("bdr:123", &update(false))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "repository returned 401: Unauthorized");
    }
}
