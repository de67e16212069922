use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// A portal announcement. Read-only here; authored on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Announcement {
    pub id: u32,
    pub title: String,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    pub fn created_localized(&self) -> String {
        self.created_at
            .with_timezone(&chrono_tz::Europe::Budapest)
            .format_localized("%Y. %b %e. %H:%M", chrono::Locale::hu_HU)
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcuseState {
    Excused,
    Unexcused,
    Pending,
}

impl core::fmt::Display for ExcuseState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Excused => f.write_str("excused"),
            Self::Unexcused => f.write_str("unexcused"),
            Self::Pending => f.write_str("pending"),
        }
    }
}

/// A student's reported absence interval.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Absence {
    pub id: u32,
    pub student: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub state: ExcuseState,
}
