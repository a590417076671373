use std::fmt::{Display, Formatter};

pub mod error;

/// Datastream id the thumbnail reference is written to.
pub const THUMBNAIL_DSID: &str = "thumbnail";
pub const THUMBNAIL_LABEL: &str = "thumbnail";

const THUMBNAIL_DATASTREAMS: [&str; 3] = ["thumbnail", "THUMBNAIL", "Thumbnail"];

/// True when any of the datastream names is one of the known thumbnail
/// spellings. Only these three casings count.
pub fn has_thumbnail<S: AsRef<str>>(datastreams: &[S]) -> bool {
    datastreams
        .iter()
        .any(|ds| THUMBNAIL_DATASTREAMS.contains(&ds.as_ref()))
}

/// A reference datastream to add to, or modify on, an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatastreamUpdate {
    pub dsid: String,
    pub label: String,
    pub location: String,
    /// Whether the datastream already exists on the object.
    pub exists: bool,
}

impl DatastreamUpdate {
    pub fn thumbnail<S: AsRef<str>>(location: String, datastreams: &[S]) -> DatastreamUpdate {
        DatastreamUpdate {
            dsid: THUMBNAIL_DSID.to_string(),
            label: THUMBNAIL_LABEL.to_string(),
            location,
            exists: datastreams.iter().any(|ds| ds.as_ref() == THUMBNAIL_DSID),
        }
    }
}

/// What a single `create_thumbnail` call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailOutcome {
    AlreadyPresent,
    Unresolved,
    Saved,
    SaveFailed(String),
}

impl Display for ThumbnailOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ThumbnailOutcome::AlreadyPresent => write!(f, "already present"),
            ThumbnailOutcome::Unresolved => write!(f, "unresolved"),
            ThumbnailOutcome::Saved => write!(f, "saved"),
            ThumbnailOutcome::SaveFailed(reason) => write!(f, "save failed: {reason}"),
        }
    }
}
