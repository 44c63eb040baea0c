use super::LeaseSource;
use crate::config::ResolverConfig;
use crate::constants::LEASE_TIME_FORMAT;
use crate::mac::HardwareId;
use crate::model::LeaseRecord;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use once_cell::sync::OnceCell;
use regex::Regex;
use reqwest::header;
use scraper::{ElementRef, Html, Selector};

static ANCHOR_SELECTOR: OnceCell<Selector> = OnceCell::new();
static BRACKET_PATTERN: OnceCell<Regex> = OnceCell::new();

fn anchor_selector() -> &'static Selector {
    ANCHOR_SELECTOR.get_or_init(|| Selector::parse("a").expect("anchor selector is valid"))
}

/// Bracket-delimited `[switch:port]` tokens in the anchor's surroundings
fn bracket_pattern() -> &'static Regex {
    BRACKET_PATTERN.get_or_init(|| Regex::new(r"\[([^\]]+)\]").expect("bracket pattern is valid"))
}

/// One anchor element lifted out of the lease document
///
/// `text` is the anchor's own visible text, `context` the full text of
/// its enclosing element. The document traversal stops here; everything
/// downstream is pure selection over these records.
#[derive(Debug, Clone)]
pub struct AnchorRecord {
    pub text: String,
    pub context: String,
}

/// HTTP implementation of the lease source
///
/// POSTs the identifier as a form field and scrapes the returned HTML.
pub struct HttpLeaseSource {
    http: reqwest::Client,
    url: String,
    user_agent: String,
}

impl HttpLeaseSource {
    pub fn new(http: reqwest::Client, config: &ResolverConfig) -> Self {
        Self {
            http,
            url: config.lease_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }
}

#[async_trait]
impl LeaseSource for HttpLeaseSource {
    async fn lookup(&self, id: &HardwareId) -> Option<LeaseRecord> {
        let mac = id.to_string();
        let response = self
            .http
            .post(&self.url)
            .header(header::USER_AGENT, &self.user_agent)
            .form(&[("mac", mac.as_str())])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                log::warn!("LEASE_TRANSPORT_ERROR mac={} error={}", mac, e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::debug!("LEASE_STATUS mac={} status={}", mac, response.status());
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("LEASE_BODY_ERROR mac={} error={}", mac, e);
                return None;
            }
        };

        select_latest(&anchor_records(&body))
    }

    fn name(&self) -> &'static str {
        "DHCP Lease Page"
    }
}

/// Flatten a lease document into its ordered anchor records
///
/// An anchor with no enclosing element falls back to its own text as
/// context.
pub fn anchor_records(html: &str) -> Vec<AnchorRecord> {
    let document = Html::parse_document(html);
    document
        .select(anchor_selector())
        .map(|anchor| {
            let text = anchor.text().collect::<String>().trim().to_string();
            let context = anchor
                .parent()
                .and_then(ElementRef::wrap)
                .map(|parent| parent.text().collect::<String>())
                .unwrap_or_else(|| text.clone());
            AnchorRecord { text, context }
        })
        .collect()
}

/// Select the most recent lease among the anchor records
///
/// Anchor text must be `"<ip> - <timestamp>"`; anything else is an
/// unrelated link and is skipped. The winner's context is scanned for
/// `[switch:port]` tokens, last one wins.
pub fn select_latest(records: &[AnchorRecord]) -> Option<LeaseRecord> {
    let mut best: Option<(NaiveDateTime, String, &AnchorRecord)> = None;

    for record in records {
        let Some((ip, raw_time)) = record.text.split_once(" - ") else {
            continue;
        };
        let Ok(observed) = NaiveDateTime::parse_from_str(raw_time.trim(), LEASE_TIME_FORMAT) else {
            continue;
        };
        if best.as_ref().map_or(true, |(latest, _, _)| observed > *latest) {
            best = Some((observed, ip.trim().to_string(), record));
        }
    }

    best.map(|(observed_at, ip, record)| {
        let (switch_ip, port) = switch_port(&record.context);
        LeaseRecord {
            ip,
            observed_at,
            switch_ip,
            port,
        }
    })
}

/// Extract the switch/port annotation from an anchor's context
///
/// Every bracket token overwrites the previous one; tokens without a
/// colon are ignored.
fn switch_port(context: &str) -> (Option<String>, Option<String>) {
    let mut switch_ip = None;
    let mut port = None;
    for caps in bracket_pattern().captures_iter(context) {
        if let Some((switch, p)) = caps[1].split_once(':') {
            switch_ip = Some(switch.to_string());
            port = Some(p.to_string());
        }
    }
    (switch_ip, port)
}
