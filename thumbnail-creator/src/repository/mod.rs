use crate::domain::error::RepositoryError;
use crate::domain::DatastreamUpdate;

pub mod fedora_repository;

/// The object store holding repository objects and their datastreams.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    async fn list_datastreams(&self, pid: &str) -> Result<Vec<String>, RepositoryError>;

    async fn save_datastream(
        &self,
        pid: &str,
        update: &DatastreamUpdate,
    ) -> Result<(), RepositoryError>;
}
