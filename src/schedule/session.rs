use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};

use super::equipment::EquipmentId;

/// Half-open interval `[start, end)` in naive local wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Span {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    /// Standard four-way overlap test. Touching spans do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    #[allow(dead_code)]
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Human-readable window, e.g. `szept. 1. 10:00 - 12:00`.
    pub fn localized(&self) -> String {
        format!(
            "{} - {}",
            self.start.and_utc().format_localized("%b %e. %H:%M", chrono::Locale::hu_HU),
            self.end.and_utc().format_localized("%H:%M", chrono::Locale::hu_HU),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u32);

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(&format!("#{}", self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
}

/// A filming session ("forgatás") as reported by the backend.
///
/// The backend owns the record; this is a transient, refetchable copy.
/// Times deserialize leniently: an absent or unparseable value loads as
/// `None`, and such a session simply has no schedulable window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_time")]
    pub time_from: Option<NaiveTime>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub time_to: Option<NaiveTime>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub equipment_ids: Vec<EquipmentId>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, rename = "type")]
    pub session_type: Option<String>,
}

impl Session {
    /// The session's `[start, end)` window, if it has a valid one.
    ///
    /// `None` when either time is missing or the pair is inverted or empty.
    pub fn span(&self) -> Option<Span> {
        let from = self.time_from?;
        let to = self.time_to?;

        if from >= to {
            return None;
        }

        Some(Span::new(self.date.and_time(from), self.date.and_time(to)))
    }

    pub fn location_name(&self) -> &str {
        self.location.as_ref().map_or("", |l| l.name.as_str())
    }

    /// Human-readable window, e.g. `szept. 1. 10:00 - 12:00`.
    pub fn window_localized(&self) -> Option<String> {
        self.span().map(|span| span.localized())
    }
}

/// Today's date in the school's time zone.
pub fn today() -> NaiveDate {
    chrono::Utc::now()
        .with_timezone(&chrono_tz::Europe::Budapest)
        .date_naive()
}

fn lenient_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    Ok(raw.as_deref().and_then(|raw| match parse_time(raw) {
        Some(time) => Some(time),
        None => {
            log::warn!("Skipping unparseable session time: {raw:?}");
            None
        }
    }))
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}
