use super::DeviceDirectory;
use crate::config::ResolverConfig;
use crate::constants::DIRECTORY_TIME_FORMAT;
use crate::mac::HardwareId;
use crate::model::{DeviceRecord, DirectoryOutcome};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// One login object as returned by the directory endpoint
///
/// Both fields are optional upstream; missing data degrades the record
/// instead of rejecting it.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginEntry {
    #[serde(default)]
    pub login_at: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Nested subscriber object inside a login entry
#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub provider_uid: Option<String>,
}

/// HTTP implementation of the device directory
pub struct HttpDeviceDirectory {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl HttpDeviceDirectory {
    pub fn new(http: reqwest::Client, config: &ResolverConfig) -> Self {
        Self {
            http,
            url: config.directory_url.clone(),
            token: config.directory_token.clone(),
        }
    }
}

#[async_trait]
impl DeviceDirectory for HttpDeviceDirectory {
    async fn lookup(&self, id: &HardwareId) -> DirectoryOutcome {
        let mac = id.to_string();
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("format", "json"),
                ("token", self.token.as_str()),
                ("interface_mac", mac.as_str()),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                log::warn!("DIRECTORY_TRANSPORT_ERROR mac={} error={}", mac, e);
                return DirectoryOutcome::Error;
            }
        };

        if !response.status().is_success() {
            log::warn!("DIRECTORY_STATUS mac={} status={}", mac, response.status());
            return DirectoryOutcome::Error;
        }

        // A null body counts as a missing array, not malformed data
        let entries: Option<Vec<LoginEntry>> = match response.json().await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("DIRECTORY_DECODE_ERROR mac={} error={}", mac, e);
                return DirectoryOutcome::Error;
            }
        };

        select_latest_login(entries.unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "Set-Top Device Directory"
    }
}

/// Select the most recent login among the directory's entries
///
/// Entries are ranked by parsed timestamp, newest first; entries whose
/// timestamp is missing or unparseable rank last but stay eligible,
/// with `login_at: None` on the resulting record.
pub fn select_latest_login(entries: Vec<LoginEntry>) -> DirectoryOutcome {
    if entries.is_empty() {
        return DirectoryOutcome::NotFound;
    }

    let mut ranked: Vec<(Option<DateTime<Utc>>, LoginEntry)> = entries
        .into_iter()
        .map(|entry| {
            let login_at = entry.login_at.as_deref().and_then(parse_login_at);
            (login_at, entry)
        })
        .collect();
    // None sorts below any Some, so descending order puts it last
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    let (login_at, entry) = ranked.into_iter().next().expect("ranked is non-empty");
    DirectoryOutcome::Found(DeviceRecord {
        subscriber: entry.user.and_then(|user| user.provider_uid),
        login_at,
    })
}

/// Parse the directory's fractional-seconds UTC timestamp
fn parse_login_at(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, DIRECTORY_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
