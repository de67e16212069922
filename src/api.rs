use base64::prelude::*;
use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use ureq::Agent;
use url::Url;

use crate::auth::AuthContext;
use crate::bulletin::{Absence, Announcement};
use crate::config;
use crate::schedule::{EquipmentId, EquipmentItem, ScheduleMap, Session, SessionId};

#[derive(Clone)]
pub enum Credentials {
    Basic(String, String),
    Bearer(String),
}

impl From<&config::Api> for Credentials {
    fn from(api: &config::Api) -> Self {
        match &api.token {
            Some(token) => Self::Bearer(token.clone()),
            // config::init guarantees username + password when no token is set
            None => Self::Basic(
                api.username.clone().unwrap_or_default(),
                api.password.clone().unwrap_or_default(),
            ),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<hidden>")
    }
}

/// Client for the FTV backend's JSON API.
///
/// The backend owns all business logic and authorization; this client only
/// fetches transient copies and submits full-replacement writes.
#[derive(Debug, Clone)]
pub struct Client {
    credentials: Credentials,
    agent: Agent,
    base_url: Url,
}

/// Full-replacement equipment write. The backend replaces the session's
/// assignment list with exactly this set, never a delta.
#[derive(Debug, Serialize)]
struct EquipmentAssignment<'a> {
    equipment_ids: &'a [EquipmentId],
}

impl Client {
    pub fn new(credentials: Credentials, base_url: Url) -> Self {
        Self {
            credentials,
            agent: Agent::new(),
            base_url,
        }
    }

    fn get_auth_header(&self) -> String {
        match &self.credentials {
            Credentials::Basic(username, password) => {
                format!(
                    "Basic {}",
                    BASE64_STANDARD.encode(format!("{username}:{password}"))
                )
            }
            Credentials::Bearer(token) => format!("Bearer {token}"),
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, Error> {
        let url = self.base_url.join(path)?;
        let auth = self.get_auth_header();

        let mut request = self
            .agent
            .get(url.as_str())
            .set("Authorization", &auth)
            .set("Accept", "application/json");

        for (name, value) in query {
            request = request.query(name, value);
        }

        let content = request.call()?.into_string().map_err(|e| Error {
            kind: ErrorKind::Http,
            message: e.to_string(),
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    fn patch<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T, Error> {
        let url = self.base_url.join(path)?;
        let auth = self.get_auth_header();
        let body = serde_json::to_string(body)?;

        let content = self
            .agent
            .request("PATCH", url.as_str())
            .set("Authorization", &auth)
            .set("Content-Type", "application/json")
            .send_string(&body)?
            .into_string()
            .map_err(|e| Error {
                kind: ErrorKind::Http,
                message: e.to_string(),
            })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Sessions whose date falls within the given window.
    ///
    /// # Errors
    /// Returns an error if the request or the JSON parsing fails.
    pub fn sessions_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Session>, Error> {
        self.get(
            "filming-sessions",
            &[
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
            ],
        )
    }

    /// A single session by id.
    ///
    /// # Errors
    /// Returns an error if the request or the JSON parsing fails.
    pub fn session(&self, id: SessionId) -> Result<Session, Error> {
        self.get(&format!("filming-sessions/{}", id.0), &[])
    }

    /// The equipment inventory, optionally filtered to functional items.
    ///
    /// # Errors
    /// Returns an error if the request or the JSON parsing fails.
    pub fn equipment(&self, functional_only: bool) -> Result<Vec<EquipmentItem>, Error> {
        self.get(
            "equipment",
            &[("functional_only", functional_only.to_string())],
        )
    }

    /// Replace a session's equipment assignment with the given full list.
    ///
    /// Returns the updated session. Last write wins: the backend exposes no
    /// concurrency token, so concurrent editors overwrite each other.
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects the
    /// assignment; no partial write is possible.
    pub fn update_session_equipment(
        &self,
        id: SessionId,
        equipment_ids: &[EquipmentId],
    ) -> Result<Session, Error> {
        self.patch(
            &format!("filming-sessions/{}/equipment", id.0),
            &EquipmentAssignment { equipment_ids },
        )
    }

    /// # Errors
    /// Returns an error if the request or the JSON parsing fails.
    pub fn announcements(&self) -> Result<Vec<Announcement>, Error> {
        self.get("announcements", &[])
    }

    /// # Errors
    /// Returns an error if the request or the JSON parsing fails.
    pub fn absences_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Absence>, Error> {
        self.get(
            "absences",
            &[
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
            ],
        )
    }

    /// The current user's profile and role.
    ///
    /// # Errors
    /// Returns an error if the request or the JSON parsing fails.
    pub fn me(&self) -> Result<AuthContext, Error> {
        self.get("me", &[])
    }

    /// Fetch the schedule around the given date into a fresh map:
    /// sessions within ± `window_months` plus the equipment inventory.
    ///
    /// # Errors
    /// Returns an error if any of the underlying requests fail.
    pub fn fetch_map(
        &self,
        around: NaiveDate,
        window_months: u32,
        functional_only: bool,
    ) -> Result<ScheduleMap, Error> {
        let first_of_month = around.with_day0(0).unwrap_or(around);
        let start = first_of_month - chrono::Months::new(window_months);
        let end = first_of_month + chrono::Months::new(window_months);

        let mut map = ScheduleMap::default();

        for session in self.sessions_between(start, end)? {
            map.add_session(session);
        }

        for item in self.equipment(functional_only)? {
            map.add_equipment(item);
        }

        log::info!(
            "Fetched schedule map: {} sessions, {} equipment items",
            map.len_sessions(),
            map.len_equipment(),
        );

        Ok(map)
    }
}

/// Errors that may occur talking to the backend.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// Transport-level failure; nothing reached the backend.
    Http,
    /// The backend answered with a non-success status.
    Status(u16),
    /// The response body or an URL could not be parsed.
    Parsing,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::Http => write!(f, "request failed: {}", self.message),
            ErrorKind::Status(code) => write!(f, "backend returned {code}: {}", self.message),
            ErrorKind::Parsing => write!(f, "unexpected response: {}", self.message),
        }
    }
}

impl std::error::Error for Error {}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, response) => Self {
                kind: ErrorKind::Status(code),
                message: response.into_string().unwrap_or_default(),
            },
            transport => Self {
                kind: ErrorKind::Http,
                message: transport.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self {
            kind: ErrorKind::Parsing,
            message: e.to_string(),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self {
            kind: ErrorKind::Parsing,
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_payload_is_the_full_list() {
        let ids = [EquipmentId(1), EquipmentId(2), EquipmentId(3)];
        let body = serde_json::to_string(&EquipmentAssignment {
            equipment_ids: &ids,
        })
        .unwrap();

        assert_eq!(body, r#"{"equipment_ids":[1,2,3]}"#);
    }

    #[test]
    fn basic_auth_header() {
        let client = Client::new(
            Credentials::Basic("aladdin".into(), "opensesame".into()),
            Url::parse("https://ftv.example/api/").unwrap(),
        );

        assert_eq!(
            client.get_auth_header(),
            "Basic YWxhZGRpbjpvcGVuc2VzYW1l"
        );
    }

    #[test]
    fn bearer_auth_header() {
        let client = Client::new(
            Credentials::Bearer("token123".into()),
            Url::parse("https://ftv.example/api/").unwrap(),
        );

        assert_eq!(client.get_auth_header(), "Bearer token123");
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let credentials = Credentials::Basic("user".into(), "secret".into());

        assert_eq!(format!("{credentials:?}"), "<hidden>");
    }

    #[test]
    fn session_list_parses() {
        let sessions: Vec<Session> = serde_json::from_str(
            r#"[
                {
                    "id": 1,
                    "name": "Szalagavató",
                    "date": "2025-11-21",
                    "time_from": "17:00:00",
                    "time_to": "21:00:00",
                    "location": {"id": 4, "name": "Díszterem"},
                    "equipment_ids": [1, 5],
                    "notes": "Két kamerás felállás",
                    "type": "rendezveny"
                },
                {
                    "id": 2,
                    "name": "Kacsa",
                    "date": "2025-11-22"
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].location_name(), "Díszterem");
        assert!(sessions[0].span().is_some());
        assert!(sessions[1].span().is_none());
        assert!(sessions[1].equipment_ids.is_empty());
    }
}
