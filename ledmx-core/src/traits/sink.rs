//! Destination for exported artifacts

use crate::Artifact;

/// Something that can persist a named byte sequence
///
/// Takes `&self` so a sink can be shared between worker threads during
/// a parallel export.
pub trait ArtifactSink {
    /// Value returned for a successful write (e.g. the written path)
    type Output;

    /// Error type for a failed write
    type Error;

    /// Persist one artifact
    fn write_artifact(&self, artifact: &Artifact) -> Result<Self::Output, Self::Error>;
}
