use crate::error::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of a lead as issued by the backend (numeric or opaque string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeadId {
    Number(i64),
    Text(String),
}

impl From<i64> for LeadId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LeadId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LeadId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Pipeline stage of a lead. Transported as its ordinal (0..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum LeadStatus {
    New,
    Discussion,
    DecisionMaker,
    ContractDiscussion,
}

impl LeadStatus {
    /// All statuses in board column order
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::Discussion,
        LeadStatus::DecisionMaker,
        LeadStatus::ContractDiscussion,
    ];

    /// Maps a transport ordinal to a status, `None` for anything outside 0..=3
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(Self::New),
            1 => Some(Self::Discussion),
            2 => Some(Self::DecisionMaker),
            3 => Some(Self::ContractDiscussion),
            _ => None,
        }
    }

    pub fn ordinal(self) -> i64 {
        match self {
            Self::New => 0,
            Self::Discussion => 1,
            Self::DecisionMaker => 2,
            Self::ContractDiscussion => 3,
        }
    }

    /// Stable key of the board column holding this status
    pub fn column_key(self) -> &'static str {
        match self {
            Self::New => "leads",
            Self::Discussion => "discussions",
            Self::DecisionMaker => "decisionMakers",
            Self::ContractDiscussion => "contractDiscussions",
        }
    }

    /// Resolves a column key (as carried by drag events) back to its status
    pub fn from_column_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.column_key() == key)
    }

    /// Position of this status in `ALL`
    pub(crate) fn index(self) -> usize {
        self.ordinal() as usize
    }
}

impl From<LeadStatus> for i64 {
    fn from(status: LeadStatus) -> Self {
        status.ordinal()
    }
}

impl TryFrom<i64> for LeadStatus {
    type Error = String;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        LeadStatus::from_ordinal(value).ok_or_else(|| format!("unknown lead status {}", value))
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "New"),
            Self::Discussion => write!(f, "Discussion"),
            Self::DecisionMaker => write!(f, "Decision Maker"),
            Self::ContractDiscussion => write!(f, "Contract Discussion"),
        }
    }
}

/// Where a lead came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Instagram,
    Facebook,
    /// Entered by the sales team directly
    SelfSourced,
    Unknown,
}

impl Platform {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "ig" | "instagram" => Self::Instagram,
            "fb" | "facebook" => Self::Facebook,
            "self" | "manual" => Self::SelfSourced,
            _ => Self::Unknown,
        }
    }
}

/// Parses a `CreatedTime` value into a wall-clock timestamp.
///
/// Accepts ISO-8601 local date-times (with `T` or a space, optional
/// fractional seconds, optional seconds), RFC 3339 with an offset
/// (normalized to UTC) and bare dates (midnight). Returns `None` for
/// anything else.
pub fn parse_created_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Reads any scalar as text; arrays and objects count as absent
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Reads an integral status ordinal; anything else counts as absent
fn lenient_ordinal<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_i64())
}

/// An imported sales lead, in the backend's transport shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lead {
    pub id: LeadId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_time: Option<String>,
    #[serde(rename = "LeadsStatus", default, deserialize_with = "lenient_ordinal")]
    pub status_code: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ad_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub adset_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub campaign_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub form_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub postal_code: Option<String>,
}

impl Lead {
    /// Decodes one transport record
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Creates a lead with the given identity, creation time and status
    pub fn new(id: impl Into<LeadId>, created_time: impl Into<String>, status: LeadStatus) -> Self {
        Self {
            id: id.into(),
            created_time: Some(created_time.into()),
            status_code: Some(status.ordinal()),
            platform: None,
            full_name: None,
            phone_number: None,
            email: None,
            city: None,
            ad_name: None,
            adset_name: None,
            campaign_name: None,
            form_name: None,
            country: None,
            state: None,
            address: None,
            postal_code: None,
        }
    }

    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_platform(mut self, tag: impl Into<String>) -> Self {
        self.platform = Some(tag.into());
        self
    }

    /// The recognized status, or `None` when the ordinal is missing or unknown
    pub fn status(&self) -> Option<LeadStatus> {
        self.status_code.and_then(LeadStatus::from_ordinal)
    }

    pub fn set_status(&mut self, status: LeadStatus) {
        self.status_code = Some(status.ordinal());
    }

    pub fn platform(&self) -> Platform {
        Platform::from_tag(self.platform.as_deref().unwrap_or_default())
    }

    /// Parsed creation time, `None` when missing or malformed
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        self.created_time.as_deref().and_then(parse_created_time)
    }

    /// Lower-cased, space-joined values of every searchable field.
    ///
    /// Field order: id, created time, status, platform, full name, phone,
    /// email, city, ad, adset, campaign, form, country, state, address,
    /// postal code. Absent fields are skipped.
    pub fn search_text(&self) -> String {
        let id = self.id.to_string();
        let status = self.status_code.map(|s| s.to_string());
        let parts = [
            Some(id.as_str()),
            self.created_time.as_deref(),
            status.as_deref(),
            self.platform.as_deref(),
            self.full_name.as_deref(),
            self.phone_number.as_deref(),
            self.email.as_deref(),
            self.city.as_deref(),
            self.ad_name.as_deref(),
            self.adset_name.as_deref(),
            self.campaign_name.as_deref(),
            self.form_name.as_deref(),
            self.country.as_deref(),
            self.state.as_deref(),
            self.address.as_deref(),
            self.postal_code.as_deref(),
        ];

        parts
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}
