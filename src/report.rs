use crate::constants::{INVALID_DATE_MARKER, LEASE_TIME_FORMAT, LOGIN_DISPLAY_FORMAT};
use crate::mac::HardwareId;
use crate::model::{DeviceRecord, LeaseRecord, Resolution};
use std::fmt::Write;

/// Render resolution results into one display-ready text block
///
/// One paragraph per identifier, blank-line separated when the message
/// contained more than one. Uses a constrained markup subset: `<pre>`
/// spans for IPs and switches, one `<a>` link per device match. The
/// identifier is omitted from the text when it was the only one in the
/// message.
pub fn render(results: &[(HardwareId, Resolution)], account_url: &str) -> String {
    if results.is_empty() {
        return "Router and set-top box not found.".to_string();
    }

    let show_id = results.len() > 1;
    let paragraphs: Vec<String> = results
        .iter()
        .map(|(id, resolution)| match resolution {
            Resolution::Lease { record, .. } => lease_paragraph(id, record, show_id),
            Resolution::Device { record } => device_paragraph(id, record, show_id, account_url),
            Resolution::NotFound { directory_failed } => {
                miss_paragraph(id, show_id, *directory_failed)
            }
        })
        .collect();

    paragraphs.join("\n\n")
}

fn lease_paragraph(id: &HardwareId, record: &LeaseRecord, show_id: bool) -> String {
    let mut paragraph = String::from("Router");
    if show_id {
        let _ = write!(paragraph, " {}", id);
    }
    let _ = write!(
        paragraph,
        " received IP <pre>{}</pre> at {}",
        record.ip,
        record.observed_at.format(LEASE_TIME_FORMAT)
    );
    if let (Some(switch_ip), Some(port)) = (&record.switch_ip, &record.port) {
        let _ = write!(
            paragraph,
            " from switch <pre>{}</pre> port {}",
            switch_ip, port
        );
    }
    paragraph.push('.');
    paragraph
}

fn device_paragraph(
    id: &HardwareId,
    record: &DeviceRecord,
    show_id: bool,
    account_url: &str,
) -> String {
    let login = record
        .login_at
        .map(|at| at.format(LOGIN_DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| INVALID_DATE_MARKER.to_string());

    let mut paragraph = String::from("Set-top");
    if show_id {
        let _ = write!(paragraph, " {}", id);
    }
    let _ = write!(
        paragraph,
        " last connected to the directory at {} under account ",
        login
    );
    match &record.subscriber {
        Some(uid) => {
            let _ = write!(paragraph, "<a href=\"{}{}\">{}</a>", account_url, uid, uid);
        }
        None => paragraph.push_str("unknown"),
    }
    paragraph.push('.');
    paragraph
}

fn miss_paragraph(id: &HardwareId, show_id: bool, directory_failed: bool) -> String {
    match (directory_failed, show_id) {
        (false, false) => "No routers or set-top boxes found.".to_string(),
        (false, true) => format!("No routers or set-top boxes found for {}.", id),
        (true, false) => "Directory lookup failed; no routers or set-top boxes found.".to_string(),
        (true, true) => format!(
            "Directory lookup failed for {}; no routers or set-top boxes found.",
            id
        ),
    }
}
