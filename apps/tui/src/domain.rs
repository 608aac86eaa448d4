use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cafe,
    Roastery,
    Shop,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Cafe, Self::Roastery, Self::Shop];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Roastery => "roastery",
            Self::Shop => "shop",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Cafe),
            1 => Some(Self::Roastery),
            2 => Some(Self::Shop),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cafe" => Some(Self::Cafe),
            "roastery" => Some(Self::Roastery),
            "shop" => Some(Self::Shop),
            _ => None,
        }
    }

    /// Plural chip label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cafe => "Cafes",
            Self::Roastery => "Roasteries",
            Self::Shop => "Shops",
        }
    }
}

/// One spoke of the brew chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrewMethod {
    Filter,
    Espresso,
    ColdBrew,
    Decaf,
}

impl BrewMethod {
    /// Spoke order, clockwise from the top.
    pub const ALL: [Self; 4] = [Self::Filter, Self::Espresso, Self::ColdBrew, Self::Decaf];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Filter => "Filter",
            Self::Espresso => "Espresso",
            Self::ColdBrew => "Cold Brew",
            Self::Decaf => "Decaf",
        }
    }

    /// Screen-space angle in degrees, 0 = right and 90 = down.
    pub const fn angle_degrees(self) -> f64 {
        match self {
            Self::Filter => -90.0,
            Self::Espresso => 0.0,
            Self::ColdBrew => 90.0,
            Self::Decaf => 180.0,
        }
    }

    /// Distance past the outer ring where the spoke label sits.
    pub const fn label_offset(self) -> f64 {
        match self {
            Self::Filter | Self::Decaf => 25.0,
            Self::Espresso | Self::ColdBrew => 30.0,
        }
    }

    /// Maps a free-form `brewing_method` from a review onto a spoke.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value
            .trim()
            .to_lowercase()
            .replace(['_', '-'], " ");

        match normalized.as_str() {
            "filter" | "pour over" | "pourover" | "v60" | "chemex" | "drip" | "aeropress"
            | "french press" | "batch brew" => Some(Self::Filter),
            "espresso" | "ristretto" | "lungo" | "moka" | "moka pot" | "cortado"
            | "flat white" | "cappuccino" | "latte" => Some(Self::Espresso),
            "cold brew" | "coldbrew" | "iced" | "cold drip" => Some(Self::ColdBrew),
            "decaf" | "decaffeinated" => Some(Self::Decaf),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coffee {
    pub id: String,
    pub roaster_id: String,
    pub roaster_name: Option<String>,
    pub name: String,
    pub origin: Option<String>,
    pub region: Option<String>,
    pub process: Option<String>,
    pub roast_level: Option<String>,
    pub tasting_notes: Option<Vec<String>>,
    pub altitude: Option<String>,
    pub varietal: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roaster {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub coffee_id: String,
    pub user_name: String,
    pub rating: u8,
    pub review_text: Option<String>,
    pub brewing_method: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: Option<String>,
    pub coordinate: Coordinate,
    pub category: Category,
    pub is_open: bool,
    pub is_primary: bool,
    pub distance: Option<String>,
    pub roaster_id: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub coffee_ids: Vec<String>,
}
