//! Application context: owns the pool, configuration and map renderer and
//! is handed by reference to every consumer.

use crate::config::AppConfig;
use crate::db::models::LocationFilterParams;
use crate::db::{create_database_pool, queries, seed_demo_data, DataError};
use crate::domain::{Coffee, Location, Review, Roaster};
use crate::geometry::{mean_rating, rating_histogram, BrewShares};
use crate::map::{annotate_distances, build_renderer, MapRenderer};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Everything the coffee detail screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct CoffeeDetail {
    pub coffee: Coffee,
    pub roaster: Option<Roaster>,
    pub reviews: Vec<Review>,
    pub shares: BrewShares,
    pub mean_rating: Option<f64>,
    pub histogram: [u32; 5],
}

/// A roaster with the coffees it sells and the places that carry its name.
#[derive(Debug, Clone, PartialEq)]
pub struct RoasterProfile {
    pub roaster: Roaster,
    pub coffees: Vec<Coffee>,
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub total_coffees: i64,
    pub total_roasters: i64,
    pub total_reviews: i64,
    pub locations_by_category: Vec<(String, i64)>,
    pub coffees_by_origin: Vec<(String, i64)>,
    pub recent_coffees: Vec<RecentCoffee>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentCoffee {
    pub name: String,
    pub roaster: String,
    pub origin: String,
    pub created_at: String,
}

#[derive(Debug)]
pub struct AppContext {
    pool: SqlitePool,
    config: AppConfig,
    renderer: Box<dyn MapRenderer>,
}

impl AppContext {
    /// Opens the configured database and builds the renderer.
    pub async fn connect(config: AppConfig) -> Result<Self, DataError> {
        let pool = create_database_pool(&config).await?;
        Ok(Self::with_pool(pool, config))
    }

    pub fn with_pool(pool: SqlitePool, config: AppConfig) -> Self {
        let renderer = build_renderer(config.map_renderer);
        info!(renderer = %renderer.kind(), "context ready");
        Self {
            pool,
            config,
            renderer,
        }
    }

    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn renderer(&self) -> &dyn MapRenderer {
        self.renderer.as_ref()
    }

    pub async fn seed(&self) -> Result<bool, DataError> {
        Ok(seed_demo_data(&self.pool).await?)
    }

    pub async fn coffees(&self) -> Result<Vec<Coffee>, DataError> {
        Ok(queries::get_coffees(&self.pool).await?)
    }

    pub async fn search_coffees(&self, term: &str) -> Result<Vec<Coffee>, DataError> {
        Ok(queries::search_coffees(&self.pool, term).await?)
    }

    pub async fn roaster_with_coffees(
        &self,
        roaster_id: &str,
    ) -> Result<Option<(Roaster, Vec<Coffee>)>, DataError> {
        let Some(roaster) = queries::get_roaster(&self.pool, roaster_id).await? else {
            return Ok(None);
        };
        let coffees = queries::get_roaster_coffees(&self.pool, roaster_id).await?;
        Ok(Some((roaster, coffees)))
    }

    pub async fn roaster_profile(
        &self,
        roaster_id: &str,
    ) -> Result<Option<RoasterProfile>, DataError> {
        let Some((roaster, coffees)) = self.roaster_with_coffees(roaster_id).await? else {
            debug!(roaster_id, "roaster not found");
            return Ok(None);
        };
        let locations = self
            .locations(&LocationFilterParams {
                roaster_id: Some(roaster_id.to_string()),
                ..LocationFilterParams::default()
            })
            .await?;
        Ok(Some(RoasterProfile {
            roaster,
            coffees,
            locations,
        }))
    }

    /// Coffee, roaster, reviews and the derived brew shares in one call.
    pub async fn coffee_detail(&self, coffee_id: &str) -> Result<Option<CoffeeDetail>, DataError> {
        let Some(coffee) = queries::get_coffee_by_id(&self.pool, coffee_id).await? else {
            debug!(coffee_id, "coffee not found");
            return Ok(None);
        };

        let roaster = queries::get_roaster(&self.pool, &coffee.roaster_id).await?;
        let reviews = queries::get_reviews(&self.pool, coffee_id).await?;
        let votes = queries::get_brewing_votes(&self.pool, coffee_id).await?;
        let shares = BrewShares::from_votes(votes.iter().map(String::as_str));

        let ratings = || reviews.iter().map(|r| r.rating);
        let mean_rating = mean_rating(ratings());
        let histogram = rating_histogram(ratings());

        Ok(Some(CoffeeDetail {
            coffee,
            roaster,
            reviews,
            shares,
            mean_rating,
            histogram,
        }))
    }

    /// Locations matching `params`, with distance labels filled in from the
    /// configured origin where the row has none.
    pub async fn locations(
        &self,
        params: &LocationFilterParams,
    ) -> Result<Vec<Location>, DataError> {
        let mut locations = queries::get_locations(&self.pool, params).await?;
        if let Some(origin) = self.config.origin {
            annotate_distances(&mut locations, origin);
        }
        Ok(locations)
    }

    pub async fn coffee_locations(&self, coffee_id: &str) -> Result<Vec<Location>, DataError> {
        self.locations(&LocationFilterParams {
            coffee_id: Some(coffee_id.to_string()),
            ..LocationFilterParams::default()
        })
        .await
    }

    pub async fn summary(&self, recent: usize) -> Result<CatalogSummary, DataError> {
        let total_coffees = queries::count_coffees(&self.pool).await?;
        let total_roasters = queries::count_roasters(&self.pool).await?;
        let total_reviews = queries::count_reviews(&self.pool).await?;
        let locations_by_category = queries::count_locations_by_category(&self.pool)
            .await?
            .into_iter()
            .map(|(category, count)| (category.as_str().to_string(), count))
            .collect();
        let coffees_by_origin = queries::count_coffees_by_origin(&self.pool).await?;

        let recent_coffees = queries::get_coffees(&self.pool)
            .await?
            .into_iter()
            .take(recent)
            .map(|coffee| RecentCoffee {
                roaster: coffee
                    .roaster_name
                    .unwrap_or_else(|| "(unknown)".to_string()),
                origin: coffee.origin.unwrap_or_else(|| "(none)".to_string()),
                name: coffee.name,
                created_at: coffee.created_at,
            })
            .collect();

        Ok(CatalogSummary {
            total_coffees,
            total_roasters,
            total_reviews,
            locations_by_category,
            coffees_by_origin,
            recent_coffees,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::domain::Coordinate;
    use crate::map::RendererKind;
    use std::path::Path;

    async fn seeded_context(
        pairs: &'static [(&'static str, &'static str)],
    ) -> Result<AppContext, Box<dyn std::error::Error>> {
        let config = AppConfig::from_lookup(Path::new("/tmp"), |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        })?;
        let pool = create_memory_pool().await?;
        let context = AppContext::with_pool(pool, config);
        assert!(context.seed().await?);
        Ok(context)
    }

    #[tokio::test]
    async fn test_renderer_follows_config() -> Result<(), Box<dyn std::error::Error>> {
        let canvas = seeded_context(&[]).await?;
        assert_eq!(canvas.renderer().kind(), RendererKind::Canvas);
        assert!(canvas.renderer().supports_hit_testing());

        let text = seeded_context(&[("MAP_RENDERER", "text")]).await?;
        assert_eq!(text.renderer().kind(), RendererKind::Text);
        assert!(!text.renderer().supports_hit_testing());

        Ok(())
    }

    #[tokio::test]
    async fn test_coffee_detail_derives_shares() -> Result<(), Box<dyn std::error::Error>> {
        let context = seeded_context(&[]).await?;

        let detail = context
            .coffee_detail("fellow-farms")
            .await?
            .ok_or("missing detail")?;
        assert_eq!(detail.reviews.len(), 3);
        assert_eq!(detail.roaster.map(|r| r.name).as_deref(), Some("Nomad Coffee"));

        // V60 + Chemex are filter votes, one espresso
        let third = 100.0 / 3.0;
        assert!((detail.shares.filter - 2.0 * third).abs() < 1e-9);
        assert!((detail.shares.espresso - third).abs() < 1e-9);
        assert!(detail.shares.cold_brew.abs() < 1e-9);
        assert_eq!(detail.histogram, [0, 0, 0, 1, 2]);
        assert!(detail
            .mean_rating
            .is_some_and(|m| (m - 14.0 / 3.0).abs() < 1e-9));

        let empty = context
            .coffee_detail("mystery-lot")
            .await?
            .ok_or("missing detail")?;
        assert_eq!(empty.shares, BrewShares::default());
        assert_eq!(empty.mean_rating, None);

        assert!(context.coffee_detail("nope").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_origin_fills_missing_distances() -> Result<(), Box<dyn std::error::Error>> {
        let context =
            seeded_context(&[("ORIGIN_LAT", "41.3874"), ("ORIGIN_LON", "2.1686")]).await?;
        assert_eq!(
            context.config().origin,
            Some(Coordinate {
                latitude: 41.3874,
                longitude: 2.1686
            })
        );

        sqlx::query("UPDATE location SET distance = NULL WHERE id = 'loc-2'")
            .execute(context.pool())
            .await?;

        let locations = context.locations(&LocationFilterParams::default()).await?;
        let by_id = |id: &str| locations.iter().find(|l| l.id == id).cloned();

        assert_eq!(
            by_id("loc-1").and_then(|l| l.distance).as_deref(),
            Some("0.3 km")
        );
        let computed = by_id("loc-2").and_then(|l| l.distance).ok_or("no distance")?;
        assert!(computed.ends_with(" m"), "{computed}");

        Ok(())
    }

    #[tokio::test]
    async fn test_roaster_and_summary() -> Result<(), Box<dyn std::error::Error>> {
        let context = seeded_context(&[]).await?;

        let (roaster, coffees) = context
            .roaster_with_coffees("skye-1")
            .await?
            .ok_or("missing roaster")?;
        assert_eq!(roaster.name, "Skye Coffee Co.");
        assert_eq!(coffees.len(), 2);
        assert!(context.roaster_with_coffees("ghost").await?.is_none());

        let profile = context
            .roaster_profile("nomad-1")
            .await?
            .ok_or("missing profile")?;
        assert_eq!(profile.roaster.location.as_deref(), Some("Barcelona, Spain"));
        assert_eq!(profile.coffees.len(), 3);
        let shops: Vec<_> = profile.locations.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(shops, ["loc-1", "loc-2", "loc-4", "loc-6"]);
        assert!(context.roaster_profile("ghost").await?.is_none());

        let stock = context.coffee_locations("house-espresso").await?;
        assert_eq!(stock.len(), 2);

        let summary = context.summary(2).await?;
        assert_eq!(summary.total_coffees, 6);
        assert_eq!(summary.recent_coffees.len(), 2);
        assert_eq!(summary.recent_coffees[0].name, "Fellow Farms");
        assert_eq!(
            summary.locations_by_category[0],
            ("cafe".to_string(), 2)
        );

        let json = serde_json::to_value(&summary)?;
        assert_eq!(json["total_roasters"], 3);

        Ok(())
    }
}
