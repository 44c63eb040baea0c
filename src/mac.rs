use once_cell::sync::OnceCell;
use regex::Regex;
use std::fmt;

use eui48::MacAddress;

static MAC_PATTERN: OnceCell<Regex> = OnceCell::new();

/// Compiled extraction pattern: six groups of two hex digits joined
/// consistently by `:` or consistently by `-`. The regex crate has no
/// backreferences, so consistency is expressed as an alternation.
fn mac_pattern() -> &'static Regex {
    MAC_PATTERN.get_or_init(|| {
        Regex::new(r"(?:[0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}|(?:[0-9A-Fa-f]{2}-){5}[0-9A-Fa-f]{2}")
            .expect("MAC pattern is valid")
    })
}

/// A 48-bit hardware identifier in canonical form
///
/// Canonical form is six lowercase hex byte-pairs joined by colons,
/// e.g. `aa:bb:cc:00:11:22`. Only [`normalize`] constructs these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareId(MacAddress);

impl HardwareId {
    /// The six raw octets, most significant first
    pub fn octets(&self) -> [u8; 6] {
        self.0.to_array()
    }
}

impl fmt::Display for HardwareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex_string())
    }
}

/// Scan message text for MAC-shaped tokens
///
/// Non-ASCII look-alike characters are folded to ASCII first so that
/// identifiers pasted through chat clients or OCR survive extraction.
/// Returns the raw matched substrings in order of appearance; an empty
/// result is valid.
pub fn extract(text: &str) -> Vec<String> {
    let ascii = asciify(text);
    mac_pattern()
        .find_iter(&ascii)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Canonicalize one extracted token
///
/// Strips separators, lowercases, maps the letter `o` to the digit `0`
/// (a recurring artifact in upstream logs), and validates that exactly
/// 12 hex digits remain. Idempotent on already-canonical input.
pub fn normalize(raw: &str) -> Option<HardwareId> {
    let mut hex = String::with_capacity(12);
    for c in raw.chars() {
        match c {
            ':' | '-' => continue,
            'o' | 'O' => hex.push('0'),
            _ => hex.push(c.to_ascii_lowercase()),
        }
    }

    if hex.len() != 12 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let mut octets = [0u8; 6];
    for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
        let pair = std::str::from_utf8(pair).ok()?;
        octets[i] = u8::from_str_radix(pair, 16).ok()?;
    }
    Some(HardwareId(MacAddress::new(octets)))
}

/// Derive the secondary lookup candidate by adding 1 to the identifier
///
/// The lease source is known to register some devices one address above
/// the one printed on the unit. Addition is modulo 2^48: the maximal
/// identifier wraps to all-zero.
pub fn increment(id: &HardwareId) -> HardwareId {
    let mut value: u64 = 0;
    for octet in id.octets() {
        value = (value << 8) | u64::from(octet);
    }
    let next = value.wrapping_add(1) & 0xFFFF_FFFF_FFFF;

    let mut octets = [0u8; 6];
    for (i, octet) in octets.iter_mut().enumerate() {
        *octet = ((next >> (8 * (5 - i))) & 0xff) as u8;
    }
    HardwareId(MacAddress::new(octets))
}

/// Fold non-ASCII look-alike characters to their ASCII counterparts
///
/// Covers the stand-ins that actually show up in operator messages:
/// Cyrillic and Greek letters that shadow hex digits, fullwidth forms,
/// and the Unicode dash family. Everything else passes through.
fn asciify(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            // Cyrillic capitals that shadow hex letters
            'А' => 'A',
            'В' => 'B',
            'С' => 'C',
            'Е' => 'E',
            'О' => 'O',
            // Cyrillic lowercase
            'а' => 'a',
            'с' => 'c',
            'е' => 'e',
            'о' => 'o',
            // Greek
            'Α' => 'A',
            'Β' => 'B',
            'Ε' => 'E',
            'Ο' => 'O',
            'ο' => 'o',
            // Dash family and fullwidth punctuation
            '‐' | '‑' | '‒' | '–' | '—' | '−' => '-',
            '：' => ':',
            '－' => '-',
            // Fullwidth alphanumerics map straight down to ASCII
            '０'..='９' | 'Ａ'..='Ｚ' | 'ａ'..='ｚ' => {
                char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asciify_cyrillic_lookalikes() {
        assert_eq!(asciify("АА:ВВ:СС"), "AA:BB:CC");
        assert_eq!(asciify("ее:оо"), "ee:oo");
    }

    #[test]
    fn test_asciify_fullwidth_and_dashes() {
        assert_eq!(asciify("ＡＢ０１"), "AB01");
        assert_eq!(asciify("aa–bb—cc"), "aa-bb-cc");
    }

    #[test]
    fn test_asciify_passes_plain_ascii() {
        assert_eq!(asciify("aa:bb:cc:dd:ee:ff"), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_normalize_rejects_non_hex() {
        assert!(normalize("zz:bb:cc:dd:ee:ff").is_none());
        assert!(normalize("aa:bb:cc:dd:ee").is_none());
    }

    #[test]
    fn test_normalize_o_correction() {
        let id = normalize("aO:bb:cc:dd:ee:fo").unwrap();
        assert_eq!(id.to_string(), "a0:bb:cc:dd:ee:f0");
    }
}
