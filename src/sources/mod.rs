use crate::mac::HardwareId;
use crate::model::{DirectoryOutcome, LeaseRecord};
use async_trait::async_trait;

// Submodule declarations
pub mod directory;
pub mod lease;

/// Lease record source
///
/// Queried with a hardware identifier; answers with the most recent
/// lease attributed to it, or nothing. Implementations are best-effort:
/// transport failures surface as `None`, never as errors.
#[async_trait]
pub trait LeaseSource: Send + Sync {
    /// Look up the most recent lease for the given identifier
    async fn lookup(&self, id: &HardwareId) -> Option<LeaseRecord>;

    /// Return a human-readable name for this source
    fn name(&self) -> &'static str;
}

/// Set-top device directory
///
/// Queried with a hardware identifier; distinguishes a confirmed miss
/// from a source failure so the caller can report each appropriately.
#[async_trait]
pub trait DeviceDirectory: Send + Sync {
    /// Look up the most recent login for the given identifier
    async fn lookup(&self, id: &HardwareId) -> DirectoryOutcome;

    /// Return a human-readable name for this source
    fn name(&self) -> &'static str;
}
