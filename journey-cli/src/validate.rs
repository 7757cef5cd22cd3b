//! Turning raw Journey entries into what Day One accepts.
//!
//! Nothing here fails on a bad entry. Unusable fields are dropped or replaced
//! with a fallback and a warning is logged; the entry as a whole is either
//! imported or skipped.

use crate::entry::JourneyEntry;
use crate::error::{ImportError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use journey_babel::Converter;
use std::path::{Path, PathBuf};

/// An entry ready to be handed to Day One.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEntry {
    /// Journey id, for progress output.
    pub id: String,
    /// Converted Markdown body.
    pub text: String,
    /// Entry date, formatted in `timezone`.
    pub timestamp: String,
    pub timezone: Tz,
    /// Tags with whitespace escaped.
    pub tags: Vec<String>,
    /// Absolute paths of photos that exist.
    pub photos: Vec<PathBuf>,
    /// Latitude and longitude.
    pub coordinate: Option<(f64, f64)>,
}

impl ValidatedEntry {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No text and no photos.
    Empty,
    /// Contains the skip marker.
    AlreadyExported,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Import(ValidatedEntry),
    Skip(SkipReason),
}

/// Validation settings shared by every entry of a run.
#[derive(Debug, Clone)]
pub struct Validator {
    converter: Converter,
    photo_dir: PathBuf,
    fallback_zone: Tz,
    timestamp_format: String,
    skip_marker: String,
    now: DateTime<Utc>,
}

impl Validator {
    /// Fails if `timestamp_format` contains a specifier chrono does not know.
    pub fn new(
        converter: Converter,
        photo_dir: &Path,
        fallback_zone: Tz,
        timestamp_format: &str,
        skip_marker: &str,
    ) -> Result<Self> {
        if StrftimeItems::new(timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ImportError::InvalidTimestampFormat(timestamp_format.to_string()));
        }
        let photo_dir = std::path::absolute(photo_dir).map_err(|source| ImportError::Io {
            path: photo_dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            converter,
            photo_dir,
            fallback_zone,
            timestamp_format: timestamp_format.to_string(),
            skip_marker: skip_marker.to_string(),
            now: Utc::now(),
        })
    }

    /// Fixes the time used for entries without a usable date.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    pub fn validate(&self, entry: &JourneyEntry) -> Verdict {
        let text = self.converter.convert(&entry.text);
        if !self.skip_marker.is_empty() && text.contains(&self.skip_marker) {
            log::debug!("{}: contains '{}'", entry.id, self.skip_marker);
            return Verdict::Skip(SkipReason::AlreadyExported);
        }

        let photos = self.photos(entry);
        if text.trim().is_empty() {
            log::warn!("{}: entry has no text", entry.id);
            if photos.is_empty() {
                return Verdict::Skip(SkipReason::Empty);
            }
        }

        let timezone = self.timezone(entry);
        Verdict::Import(ValidatedEntry {
            id: entry.id.clone(),
            text,
            timestamp: self.timestamp(entry, timezone),
            timezone,
            tags: entry.tags.iter().map(|tag| escape_tag(tag)).collect(),
            photos,
            coordinate: coordinate(entry),
        })
    }

    fn timezone(&self, entry: &JourneyEntry) -> Tz {
        match entry.timezone.as_deref().filter(|zone| !zone.is_empty()) {
            None => self.fallback_zone,
            Some(zone) => zone.parse().unwrap_or_else(|_| {
                log::warn!(
                    "{}: unknown timezone '{zone}', using {}",
                    entry.id,
                    self.fallback_zone
                );
                self.fallback_zone
            }),
        }
    }

    fn timestamp(&self, entry: &JourneyEntry, zone: Tz) -> String {
        let date = match entry.date_journal {
            None => None,
            Some(millis) => {
                let date = from_millis(millis);
                if date.is_none() {
                    log::warn!("{}: invalid date {millis}, using the current time", entry.id);
                }
                date
            }
        };
        date.unwrap_or(self.now)
            .with_timezone(&zone)
            .format(&self.timestamp_format)
            .to_string()
    }

    fn photos(&self, entry: &JourneyEntry) -> Vec<PathBuf> {
        entry
            .photos
            .iter()
            .filter_map(|name| {
                let path = self.photo_dir.join(name);
                if path.is_file() {
                    Some(path)
                } else {
                    log::warn!("{}: photo {} not found", entry.id, path.display());
                    None
                }
            })
            .collect()
    }
}

fn from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Journey writes `f64::MAX` for both halves when an entry has no location.
const NO_LOCATION: f64 = f64::MAX;

fn coordinate(entry: &JourneyEntry) -> Option<(f64, f64)> {
    let (lat, lon) = (entry.lat?, entry.lon?);
    if lat == NO_LOCATION && lon == NO_LOCATION {
        return None;
    }
    let valid = lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon);
    if valid {
        Some((lat, lon))
    } else {
        log::warn!("{}: invalid coordinate ({lat}, {lon}) dropped", entry.id);
        None
    }
}

/// Prefixes every whitespace run with a backslash, so Day One keeps the tag whole.
pub fn escape_tag(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut in_space = false;
    for c in tag.chars() {
        let space = c.is_whitespace();
        if space && !in_space {
            out.push('\\');
        }
        in_space = space;
        out.push(c);
    }
    out
}

/// Zone for entries without a valid one: the configured zone, else the
/// system zone, else UTC.
pub fn resolve_fallback_zone(configured: Option<&str>) -> Result<Tz> {
    if let Some(name) = configured {
        return name
            .parse()
            .map_err(|_| ImportError::InvalidTimezone(name.to_string()));
    }
    let zone = iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC);
    log::debug!("fallback timezone {zone}");
    Ok(zone)
}
