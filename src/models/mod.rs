use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of lodging offered by a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LodgingType {
    Flat,
    Bungalo,
    House,
    Palace,
}

impl LodgingType {
    pub const ALL: [LodgingType; 4] = [
        LodgingType::Flat,
        LodgingType::Bungalo,
        LodgingType::House,
        LodgingType::Palace,
    ];

    /// Value used in markup and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            LodgingType::Flat => "flat",
            LodgingType::Bungalo => "bungalo",
            LodgingType::House => "house",
            LodgingType::Palace => "palace",
        }
    }

    /// Label shown in the details dialog
    pub fn label(&self) -> &'static str {
        match self {
            LodgingType::Flat => "Квартира",
            LodgingType::Bungalo => "Бунгало",
            LodgingType::House => "Дом",
            LodgingType::Palace => "Дворец",
        }
    }

    /// Lowest nightly price accepted by the notice form for this type
    pub fn min_price(&self) -> u32 {
        match self {
            LodgingType::Flat => 1000,
            LodgingType::Bungalo => 0,
            LodgingType::House => 5000,
            LodgingType::Palace => 10000,
        }
    }
}

impl fmt::Display for LodgingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lodging type: {0:?}")]
pub struct UnknownLodgingType(pub String);

impl FromStr for LodgingType {
    type Err = UnknownLodgingType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LodgingType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownLodgingType(s.to_string()))
    }
}

/// Author of a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub avatar: String,
}

/// Map coordinates of a listing, in pixels of the map container
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

/// The offer itself
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    pub title: String,
    pub address: String,
    pub price: u32,
    #[serde(rename = "type")]
    pub kind: LodgingType,
    pub rooms: u32,
    pub guests: u32,
    pub checkin: String,
    pub checkout: String,
    pub features: Vec<String>,
    pub description: String,
    pub photos: Vec<String>,
}

/// Core listing ("ad") data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub author: Author,
    pub location: Location,
    pub offer: Offer,
}

/// Listings generated for one map session, as exported to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub listings: Vec<Listing>,
}

impl Location {
    /// Address string derived from the coordinates
    pub fn address(&self) -> String {
        format!("{}, {}", self.x, self.y)
    }
}
