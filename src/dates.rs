//! Date normalization and the clock the pipeline reads time from.
//!
//! Two modes are supported:
//!
//! - [`DateMode::CollectionTime`] (default): every article is stamped with the
//!   collection time, whatever text the page showed. This is the historical
//!   behavior the dashboard was built against.
//! - [`DateMode::Parse`]: the captured text is parsed with a list of common
//!   layouts. Anything that does not parse still falls back to collection
//!   time.
//!
//! Normalization never fails.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Source of "now" for the pipeline.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// How captured date text is turned into a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateMode {
    #[default]
    CollectionTime,
    Parse,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateNormalizer {
    mode: DateMode,
}

impl DateNormalizer {
    pub fn new(mode: DateMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DateMode {
        self.mode
    }

    /// Turn `raw` into a timestamp, using `now` whenever no real date is known.
    pub fn normalize(&self, raw: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        let raw = raw.trim();
        if raw.is_empty() {
            return now;
        }
        match self.mode {
            DateMode::CollectionTime => now,
            DateMode::Parse => match parse_article_date(raw) {
                Some(parsed) => parsed,
                None => {
                    debug!(raw, "Unrecognized date text; using collection time");
                    now
                }
            },
        }
    }
}

static LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(published|updated|posted|date)(\s+on)?\s*:?\s*").expect("static regex")
});

static ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").expect("static regex"));

static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Strip labels, ordinal suffixes and redundant whitespace from page text.
fn clean_date_text(raw: &str) -> String {
    let s = SPACES.replace_all(raw.trim(), " ");
    let s = LABEL.replace(&s, "");
    let s = ORDINAL.replace_all(&s, "$1");
    s.trim().trim_end_matches(['.', ',']).to_string()
}

/// Best-effort parse of a date as displayed on a news page.
///
/// Values without an offset are taken as UTC. Returns `None` when no known
/// layout matches.
pub fn parse_article_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = clean_date_text(raw);
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(&s) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats_with_tz = [
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%d %H:%M:%S %z",
        "%a, %d %b %Y %H:%M:%S %z",
        "%d %b %Y %H:%M:%S %z",
    ];
    for fmt in &formats_with_tz {
        if let Ok(dt) = DateTime::parse_from_str(&s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let formats_naive = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%B %d, %Y %H:%M",
        "%b %d, %Y %H:%M",
        "%d %B %Y %H:%M",
        "%d %b %Y %H:%M",
    ];
    for fmt in &formats_naive {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    let formats_date = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d.%m.%Y",
        "%B %d, %Y",
        "%b %d, %Y",
        "%B %d %Y",
        "%b %d %Y",
        "%d %B %Y",
        "%d %b %Y",
        "%A, %B %d, %Y",
        "%a, %b %d, %Y",
        "%A %d %B %Y",
    ];
    for fmt in &formats_date {
        if let Ok(date) = NaiveDate::parse_from_str(&s, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}
