use chrono::{DateTime, NaiveDateTime, Utc};

/// One historical DHCP lease attributed to a hardware identifier
#[derive(Debug, Clone, PartialEq)]
pub struct LeaseRecord {
    pub ip: String,
    pub observed_at: NaiveDateTime,
    pub switch_ip: Option<String>,
    pub port: Option<String>,
}

/// One historical set-top login attributed to a hardware identifier
///
/// `login_at` is `None` when the upstream timestamp was missing or did not
/// match the expected pattern; the record still participates in ranking
/// (sorted last) and renders with an invalid-date marker.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    pub subscriber: Option<String>,
    pub login_at: Option<DateTime<Utc>>,
}

/// The three ways a directory query can end
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryOutcome {
    Found(DeviceRecord),
    /// The directory answered and holds no logins for this identifier
    NotFound,
    /// The directory could not answer (transport, status, or undecodable body)
    Error,
}

/// Outcome of resolving one hardware identifier
///
/// `used_increment` marks a lease match made on the incremented candidate;
/// the incremented value itself is never surfaced, callers always display
/// the original identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Lease {
        record: LeaseRecord,
        used_increment: bool,
    },
    Device {
        record: DeviceRecord,
    },
    NotFound {
        /// True when the directory reported an error rather than a confirmed miss
        directory_failed: bool,
    },
}
