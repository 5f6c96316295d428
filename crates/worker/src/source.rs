use std::future::Future;

use engine::CostEstimate;
use uuid::Uuid;

use crate::{ArtifactLocator, SourceError};

/// Where cost estimates are read from and where the generated artifact is
/// recorded.
pub trait CostEstimateSource: Send + Sync {
    /// Loads the whole estimate aggregate in one read. `Ok(None)` when no
    /// estimate has this id.
    fn load(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<CostEstimate>, SourceError>> + Send;

    /// Records the locator of the latest workbook on the estimate.
    fn attach_artifact(
        &self,
        id: Uuid,
        locator: &ArtifactLocator,
    ) -> impl Future<Output = Result<(), SourceError>> + Send;
}
