//! Metadata extraction: document attributes in canonical form.
//!
//! A fixed list of document-level attributes is read from the engine; absent
//! or empty native values omit the key entirely. The creation time needs
//! coercion: depending on the engine and the document it surfaces either as
//! epoch seconds or as a PDF date string (`D:YYYYMMDDHHmmSS` plus optional
//! timezone). Both normalize to one canonical shape — an ISO-8601 UTC
//! timestamp like `2013-09-03T12:34:56Z` — so downstream consumers never see
//! engine-specific date forms.

use super::loader::DocumentHandle;
use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, TimeZone, Utc};
use indexmap::IndexMap;
use pdfium_render::prelude::*;

/// Output key for the document creation time.
const CREATED_TIME_KEY: &str = "created-time";

/// The attributes read from every document, in output order.
const DOCUMENT_ATTRIBUTES: [(PdfDocumentMetadataTagType, &str); 7] = [
    (PdfDocumentMetadataTagType::Title, "title"),
    (PdfDocumentMetadataTagType::Author, "author"),
    (PdfDocumentMetadataTagType::Subject, "subject"),
    (PdfDocumentMetadataTagType::Keywords, "keywords"),
    (PdfDocumentMetadataTagType::Creator, "creator"),
    (PdfDocumentMetadataTagType::Producer, "producer"),
    (PdfDocumentMetadataTagType::CreationDate, CREATED_TIME_KEY),
];

/// Read the fixed attribute list from the document.
pub(crate) fn extract_attributes(handle: &DocumentHandle) -> IndexMap<String, String> {
    let metadata = handle.document().metadata();
    let mut attributes = IndexMap::new();

    for (tag, key) in DOCUMENT_ATTRIBUTES {
        let Some(raw) = metadata.get(tag).map(|t| t.value().to_string()) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        let value = if key == CREATED_TIME_KEY {
            coerce_creation_time(&raw)
        } else {
            raw
        };
        attributes.insert(key.to_string(), value);
    }

    attributes
}

/// Normalize a raw creation-time value to ISO-8601 UTC.
///
/// Epoch seconds never exceed 11 digits for any plausible document, so a
/// longer bare digit run is treated as a compact PDF date. A value that
/// parses as neither is stored verbatim.
pub(crate) fn coerce_creation_time(raw: &str) -> String {
    let parsed = if let Some(rest) = raw.strip_prefix("D:") {
        parse_pdf_date(rest)
    } else if raw.len() <= 11 {
        parse_epoch(raw)
    } else {
        parse_pdf_date(raw)
    };

    match parsed {
        Some(timestamp) => timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => raw.to_string(),
    }
}

fn parse_epoch(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// Parse a PDF date with the `D:` prefix already stripped.
///
/// Everything after the year is optional and defaults per the PDF spec
/// (month/day to 1, time components to 0, timezone to UTC).
fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month = component(s, 4..6, 1)?;
    let day = component(s, 6..8, 1)?;
    let hour = component(s, 8..10, 0)?;
    let minute = component(s, 10..12, 0)?;
    let second = component(s, 12..14, 0)?;

    let offset_secs = parse_tz_offset(s.get(14..).unwrap_or(""))?;

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    Some(Utc.from_utc_datetime(&(naive - Duration::seconds(offset_secs))))
}

/// One two-digit date component, or `default` when the string has ended.
fn component(s: &str, range: std::ops::Range<usize>, default: u32) -> Option<u32> {
    match s.get(range) {
        Some(digits) => digits.parse().ok(),
        None => Some(default),
    }
}

/// Timezone suffix: empty or `Z` is UTC; `+HH'mm'` / `-HH'mm'` is a local
/// offset in seconds east of UTC. Anything else is malformed.
fn parse_tz_offset(tz: &str) -> Option<i64> {
    let mut chars = tz.chars();
    let sign = match chars.next() {
        None | Some('Z') => return Some(0),
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return None,
    };

    let rest: String = chars.collect();
    let hours: i64 = rest.get(0..2)?.parse().ok()?;
    let minutes: i64 = match rest.get(3..5) {
        Some(digits) if rest.get(2..3) == Some("'") => digits.parse().ok()?,
        _ => 0,
    };

    Some(sign * (hours * 3600 + minutes * 60))
}
