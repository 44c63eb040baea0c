use crate::mac::{self, HardwareId};
use crate::model::{DirectoryOutcome, Resolution};
use crate::sources::{DeviceDirectory, LeaseSource};

/// Per-identifier fallback chain, made explicit so that adding another
/// source later is a local change
enum ResolveState {
    TryLeaseOriginal,
    TryLeaseIncremented,
    TryDirectory,
    Done,
}

/// Resolution orchestrator
///
/// Drives the sources in a fixed order for each identifier found in a
/// message: the lease page with the original identifier, the lease page
/// with the incremented candidate, then the device directory. Sources
/// are trait objects so tests can inject fakes.
pub struct MacResolver {
    lease: Box<dyn LeaseSource>,
    directory: Box<dyn DeviceDirectory>,
}

impl MacResolver {
    pub fn new(lease: Box<dyn LeaseSource>, directory: Box<dyn DeviceDirectory>) -> Self {
        Self { lease, directory }
    }

    /// Resolve every identifier in the message text, in order
    ///
    /// Tokens that fail normalization are dropped silently; identifiers
    /// are resolved to completion one after another.
    pub async fn resolve_message(&self, text: &str) -> Vec<(HardwareId, Resolution)> {
        let mut results = Vec::new();
        for raw in mac::extract(text) {
            let Some(id) = mac::normalize(&raw) else {
                log::debug!("MAC_DROPPED raw={}", raw);
                continue;
            };
            let resolution = self.resolve_one(&id).await;
            results.push((id, resolution));
        }
        results
    }

    /// Resolve a single identifier through the fallback chain
    ///
    /// Each source is tried at most once. The directory is skippable
    /// work: it only runs when both lease lookups came back empty.
    pub async fn resolve_one(&self, id: &HardwareId) -> Resolution {
        log::debug!("RESOLVE_START mac={}", id);
        let mut state = ResolveState::TryLeaseOriginal;
        let mut resolution = Resolution::NotFound {
            directory_failed: false,
        };

        loop {
            state = match state {
                ResolveState::TryLeaseOriginal => match self.lease.lookup(id).await {
                    Some(record) => {
                        log::info!("LEASE_HIT mac={} ip={}", id, record.ip);
                        resolution = Resolution::Lease {
                            record,
                            used_increment: false,
                        };
                        ResolveState::Done
                    }
                    None => ResolveState::TryLeaseIncremented,
                },

                ResolveState::TryLeaseIncremented => {
                    let candidate = mac::increment(id);
                    match self.lease.lookup(&candidate).await {
                        Some(record) => {
                            log::info!(
                                "LEASE_INCREMENT_HIT mac={} candidate={} ip={}",
                                id,
                                candidate,
                                record.ip
                            );
                            resolution = Resolution::Lease {
                                record,
                                used_increment: true,
                            };
                            ResolveState::Done
                        }
                        None => ResolveState::TryDirectory,
                    }
                }

                ResolveState::TryDirectory => {
                    match self.directory.lookup(id).await {
                        DirectoryOutcome::Found(record) => {
                            log::info!("DEVICE_HIT mac={}", id);
                            resolution = Resolution::Device { record };
                        }
                        DirectoryOutcome::NotFound => {
                            log::info!("RESOLVE_MISS mac={}", id);
                        }
                        DirectoryOutcome::Error => {
                            log::warn!("DIRECTORY_FAILED mac={}", id);
                            resolution = Resolution::NotFound {
                                directory_failed: true,
                            };
                        }
                    }
                    ResolveState::Done
                }

                ResolveState::Done => break,
            };
        }

        resolution
    }
}
