use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A country row from the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: Uuid,
    pub country_code: String,
    pub name: String,
    pub flag_url: Option<String>,
    pub current_capital: Option<String>,
    pub current_population: Option<i64>,
    pub region: Option<String>,
    pub general_information: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A historical event tied to a country and a year.
///
/// `year` is a signed calendar year: negative for BCE, positive for CE.
/// `category` is the raw label stored in the remote table; use
/// [`EventCategory::parse`] to map it onto the closed category set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    pub id: Uuid,
    pub country_code: String,
    pub year: i32,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The closed set of event categories the history browser understands.
///
/// Events whose category does not normalize onto one of these are dropped
/// during grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    War,
    Revolution,
    Discovery,
    NaturalDisaster,
    Politics,
    Social,
    Economics,
    Culture,
    Religion,
}

impl EventCategory {
    /// Every known category, in display order.
    pub const ALL: [EventCategory; 9] = [
        EventCategory::War,
        EventCategory::Revolution,
        EventCategory::Discovery,
        EventCategory::NaturalDisaster,
        EventCategory::Politics,
        EventCategory::Social,
        EventCategory::Economics,
        EventCategory::Culture,
        EventCategory::Religion,
    ];

    /// The canonical snake_case key stored in the remote table.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::War => "war",
            EventCategory::Revolution => "revolution",
            EventCategory::Discovery => "discovery",
            EventCategory::NaturalDisaster => "natural_disaster",
            EventCategory::Politics => "politics",
            EventCategory::Social => "social",
            EventCategory::Economics => "economics",
            EventCategory::Culture => "culture",
            EventCategory::Religion => "religion",
        }
    }

    /// Normalize a raw category label: lowercase, with every run of
    /// whitespace collapsed to a single underscore.
    pub fn normalize(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut prev_ws = false;
        for c in raw.chars() {
            if c.is_whitespace() {
                if !prev_ws {
                    out.push('_');
                }
                prev_ws = true;
            } else {
                out.extend(c.to_lowercase());
                prev_ws = false;
            }
        }
        out
    }

    /// Look up an already-normalized key.
    pub fn from_normalized(normalized: &str) -> Option<EventCategory> {
        match normalized {
            "war" => Some(EventCategory::War),
            "revolution" => Some(EventCategory::Revolution),
            "discovery" => Some(EventCategory::Discovery),
            "natural_disaster" => Some(EventCategory::NaturalDisaster),
            "politics" => Some(EventCategory::Politics),
            "social" => Some(EventCategory::Social),
            "economics" => Some(EventCategory::Economics),
            "culture" => Some(EventCategory::Culture),
            "religion" => Some(EventCategory::Religion),
            _ => None,
        }
    }

    /// Normalize a raw label and look it up.
    pub fn parse(raw: &str) -> Option<EventCategory> {
        Self::from_normalized(&Self::normalize(raw))
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inclusive year interval for event queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// A window of `radius` years on either side of `year`.
    pub fn around(year: i32, radius: i32) -> Self {
        Self {
            start: year.saturating_sub(radius),
            end: year.saturating_add(radius),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

/// Sort direction for event queries. Callers must pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearOrder {
    Ascending,
    Descending,
}

/// A point on the globe in degrees.
///
/// `lat` in [-90, 90], `lng` in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterPoint {
    pub lat: f64,
    pub lng: f64,
}

impl CenterPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}
