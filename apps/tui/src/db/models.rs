use crate::domain::{Category, Coffee, Coordinate, Location, Review, Roaster};
use sqlx::types::Json;
use sqlx::FromRow;

/// Represents a coffee row joined with its roaster's name
#[derive(Debug, FromRow, Clone)]
pub struct CoffeeRecord {
    pub id: String,
    pub roaster_id: String,
    pub roaster_name: Option<String>,
    pub name: String,
    pub origin: Option<String>,
    pub region: Option<String>,
    pub process: Option<String>,
    pub roast_level: Option<String>,
    pub tasting_notes: Option<Json<Vec<String>>>,
    pub altitude: Option<String>,
    pub varietal: Option<String>,
    pub created_at: String,
}

impl From<CoffeeRecord> for Coffee {
    fn from(record: CoffeeRecord) -> Self {
        Self {
            id: record.id,
            roaster_id: record.roaster_id,
            roaster_name: record.roaster_name,
            name: record.name,
            origin: record.origin,
            region: record.region,
            process: record.process,
            roast_level: record.roast_level,
            tasting_notes: record.tasting_notes.map(|Json(notes)| notes),
            altitude: record.altitude,
            varietal: record.varietal,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, FromRow, Clone)]
pub struct RoasterRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

impl From<RoasterRecord> for Roaster {
    fn from(record: RoasterRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            website: record.website,
            location: record.location,
        }
    }
}

#[derive(Debug, FromRow, Clone)]
pub struct ReviewRecord {
    pub id: String,
    pub coffee_id: String,
    pub user_name: String,
    pub rating: i64,
    pub review_text: Option<String>,
    pub brewing_method: Option<String>,
    pub created_at: String,
}

impl From<ReviewRecord> for Review {
    fn from(record: ReviewRecord) -> Self {
        Self {
            id: record.id,
            coffee_id: record.coffee_id,
            user_name: record.user_name,
            rating: u8::try_from(record.rating.clamp(1, 5)).unwrap_or(1),
            review_text: record.review_text,
            brewing_method: record.brewing_method,
            created_at: record.created_at,
        }
    }
}

/// Represents a location row; coffee ids are a JSON array built from the
/// stock table
#[derive(Debug, FromRow, Clone)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Category,
    pub is_open: bool,
    pub is_primary: bool,
    pub distance: Option<String>,
    pub roaster_id: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub coffee_ids: Json<Vec<String>>,
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            address: record.address,
            city: record.city,
            country: record.country,
            coordinate: Coordinate {
                latitude: record.latitude,
                longitude: record.longitude,
            },
            category: record.category,
            is_open: record.is_open,
            is_primary: record.is_primary,
            distance: record.distance,
            roaster_id: record.roaster_id,
            phone: record.phone,
            website: record.website,
            coffee_ids: record.coffee_ids.0,
        }
    }
}

/// Query parameters for the location finder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilterParams {
    pub city: Option<String>,
    pub category: Option<Category>,
    pub search: Option<String>,
    pub coffee_id: Option<String>,
    pub roaster_id: Option<String>,
}
