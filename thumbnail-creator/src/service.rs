use crate::client::thumbnail_client::ThumbnailResolver;
use crate::domain::error::CreatorError;
use crate::domain::{has_thumbnail, DatastreamUpdate, ThumbnailOutcome};
use crate::repository::ObjectStore;
use tracing::{error, info, instrument};

/// Writes thumbnail references onto repository objects.
///
/// Two calls on the same pid running at once can both see no thumbnail and
/// both save; whichever the repository applies last wins.
#[derive(Debug)]
pub struct ThumbnailCreator<S: ObjectStore> {
    store: S,
    resolver: ThumbnailResolver,
}

impl<S: ObjectStore> ThumbnailCreator<S> {
    pub fn new(store: S, resolver: ThumbnailResolver) -> ThumbnailCreator<S> {
        ThumbnailCreator { store, resolver }
    }

    /// Use `force` to write a thumbnail even if the object already has one.
    ///
    /// Only listing failures and thumbnail service transport failures are
    /// returned as errors. A failed save is reported through the outcome.
    #[instrument(skip(self))]
    pub async fn create_thumbnail(
        &self,
        pid: &str,
        force: bool,
    ) -> Result<ThumbnailOutcome, CreatorError> {
        info!("{pid}: creating thumbnail");
        let datastreams = self.store.list_datastreams(pid).await.map_err(|source| {
            CreatorError::ListDatastreams {
                pid: pid.to_string(),
                source,
            }
        })?;

        if !force && has_thumbnail(&datastreams) {
            info!("{pid}: thumbnail datastream already exists.");
            return Ok(ThumbnailOutcome::AlreadyPresent);
        }

        let resolved = self
            .resolver
            .resolve(pid)
            .await
            .map_err(|source| CreatorError::Resolve {
                pid: pid.to_string(),
                source,
            })?;
        let Some(thumbnail_url) = resolved else {
            return Ok(ThumbnailOutcome::Unresolved);
        };

        let update = DatastreamUpdate::thumbnail(thumbnail_url, &datastreams);
        match self.store.save_datastream(pid, &update).await {
            Ok(()) => {
                info!("{pid}: thumbnail saved.");
                Ok(ThumbnailOutcome::Saved)
            }
            Err(e) => {
                error!("{pid}: exception saving changes: {e:?}");
                Ok(ThumbnailOutcome::SaveFailed(e.to_string()))
            }
        }
    }
}
