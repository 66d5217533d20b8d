//! Per-segment skip reporting shared by both pipelines.

use serde::Serialize;
use tracing::warn;
use tracktools_core::{GeometryError, ItemId};

/// A selected track that a batch left untouched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedSegment {
    pub track: ItemId,
    #[serde(serialize_with = "serialize_error")]
    pub error: GeometryError,
}

impl SkippedSegment {
    pub(crate) fn record(track: ItemId, error: GeometryError, operation: &str) -> Self {
        warn!(%track, %error, "{} skipped segment", operation);
        Self { track, error }
    }
}

fn serialize_error<S: serde::Serializer>(error: &GeometryError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&error.to_string())
}
