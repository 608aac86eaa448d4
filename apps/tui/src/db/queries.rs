use sqlx::{query_as, query_scalar, SqlitePool};

use crate::db::models::{
    CoffeeRecord, LocationFilterParams, LocationRecord, ReviewRecord, RoasterRecord,
};
use crate::domain::{Category, Coffee, Location, Review, Roaster};

const COFFEE_COLUMNS: &str = "SELECT c.id, c.roaster_id, r.name AS roaster_name, c.name, c.origin, \
     c.region, c.process, c.roast_level, c.tasting_notes, c.altitude, c.varietal, c.created_at \
     FROM coffee c LEFT JOIN roaster r ON r.id = c.roaster_id";

const LOCATION_COLUMNS: &str = "SELECT l.id, l.name, l.address, l.city, l.country, l.latitude, \
     l.longitude, l.category, l.is_open, l.is_primary, l.distance, l.roaster_id, l.phone, \
     l.website, (SELECT json_group_array(coffee_id) FROM (SELECT lc.coffee_id \
     FROM location_coffee lc WHERE lc.location_id = l.id ORDER BY lc.rowid)) AS coffee_ids \
     FROM location l";

/// Retrieves every coffee, newest first
pub async fn get_coffees(pool: &SqlitePool) -> Result<Vec<Coffee>, sqlx::Error> {
    let rows = query_as::<_, CoffeeRecord>(&format!(
        "{COFFEE_COLUMNS} ORDER BY c.created_at DESC, c.rowid"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Coffee::from).collect())
}

/// Case-insensitive match on name or origin. A blank query returns nothing.
pub async fn search_coffees(pool: &SqlitePool, term: &str) -> Result<Vec<Coffee>, sqlx::Error> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = format!("%{term}%");
    let rows = query_as::<_, CoffeeRecord>(&format!(
        "{COFFEE_COLUMNS} WHERE c.name LIKE ?1 OR c.origin LIKE ?1 \
         ORDER BY c.created_at DESC, c.rowid"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Coffee::from).collect())
}

pub async fn get_coffee_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Coffee>, sqlx::Error> {
    let row = query_as::<_, CoffeeRecord>(&format!("{COFFEE_COLUMNS} WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Coffee::from))
}

pub async fn get_roaster(pool: &SqlitePool, id: &str) -> Result<Option<Roaster>, sqlx::Error> {
    let row = query_as::<_, RoasterRecord>(
        "SELECT id, name, description, website, location FROM roaster WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Roaster::from))
}

pub async fn get_roaster_coffees(
    pool: &SqlitePool,
    roaster_id: &str,
) -> Result<Vec<Coffee>, sqlx::Error> {
    let rows = query_as::<_, CoffeeRecord>(&format!(
        "{COFFEE_COLUMNS} WHERE c.roaster_id = ? ORDER BY c.created_at DESC, c.rowid"
    ))
    .bind(roaster_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Coffee::from).collect())
}

/// Reviews for one coffee, newest first
pub async fn get_reviews(pool: &SqlitePool, coffee_id: &str) -> Result<Vec<Review>, sqlx::Error> {
    let rows = query_as::<_, ReviewRecord>(
        "SELECT id, coffee_id, user_name, rating, review_text, brewing_method, created_at \
         FROM review WHERE coffee_id = ? ORDER BY created_at DESC",
    )
    .bind(coffee_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Review::from).collect())
}

/// Raw brewing-method strings from a coffee's reviews, one per vote
pub async fn get_brewing_votes(
    pool: &SqlitePool,
    coffee_id: &str,
) -> Result<Vec<String>, sqlx::Error> {
    query_scalar(
        "SELECT brewing_method FROM review \
         WHERE coffee_id = ? AND brewing_method IS NOT NULL AND brewing_method <> ''",
    )
    .bind(coffee_id)
    .fetch_all(pool)
    .await
}

/// Locations matching every parameter that is set. City compares
/// case-insensitively, search is a substring of name or address.
pub async fn get_locations(
    pool: &SqlitePool,
    params: &LocationFilterParams,
) -> Result<Vec<Location>, sqlx::Error> {
    let city = params
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"));

    let rows = query_as::<_, LocationRecord>(&format!(
        "{LOCATION_COLUMNS} \
         WHERE (?1 IS NULL OR LOWER(l.city) = LOWER(?1)) \
           AND (?2 IS NULL OR l.category = ?2) \
           AND (?3 IS NULL OR l.name LIKE ?3 OR l.address LIKE ?3) \
           AND (?4 IS NULL OR EXISTS ( \
                SELECT 1 FROM location_coffee s WHERE s.location_id = l.id AND s.coffee_id = ?4)) \
           AND (?5 IS NULL OR l.roaster_id = ?5) \
         ORDER BY l.rowid"
    ))
    .bind(city)
    .bind(params.category)
    .bind(search)
    .bind(params.coffee_id.as_deref())
    .bind(params.roaster_id.as_deref())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Location::from).collect())
}

pub async fn count_coffees(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM coffee")
        .fetch_one(pool)
        .await
}

pub async fn count_roasters(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM roaster")
        .fetch_one(pool)
        .await
}

pub async fn count_reviews(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM review")
        .fetch_one(pool)
        .await
}

pub async fn count_locations_by_category(
    pool: &SqlitePool,
) -> Result<Vec<(Category, i64)>, sqlx::Error> {
    query_as::<_, (Category, i64)>(
        "SELECT category, COUNT(*) FROM location GROUP BY category ORDER BY category",
    )
    .fetch_all(pool)
    .await
}

pub async fn count_coffees_by_origin(pool: &SqlitePool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    query_as::<_, (String, i64)>(
        "SELECT origin, COUNT(*) FROM coffee WHERE origin IS NOT NULL \
         GROUP BY origin ORDER BY COUNT(*) DESC, origin",
    )
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, seed_demo_data};

    async fn setup_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = create_memory_pool().await?;
        seed_demo_data(&pool).await?;
        Ok(pool)
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;
        let before = count_coffees(&pool).await?;

        assert!(!seed_demo_data(&pool).await?);
        assert_eq!(count_coffees(&pool).await?, before);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_coffees_newest_first() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        let coffees = get_coffees(&pool).await?;
        assert_eq!(coffees.len(), 6);
        assert_eq!(coffees[0].name, "Fellow Farms");
        assert_eq!(coffees[0].roaster_name.as_deref(), Some("Nomad Coffee"));
        assert!(coffees[0]
            .tasting_notes
            .as_ref()
            .is_some_and(|notes| notes.contains(&"Honey".to_string())));

        let mystery = coffees
            .iter()
            .find(|c| c.id == "mystery-lot")
            .ok_or("mystery lot missing")?;
        assert_eq!(mystery.tasting_notes, None);
        assert_eq!(mystery.origin, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_search_coffees() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        let by_origin = search_coffees(&pool, "colombia").await?;
        let names: Vec<_> = by_origin.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Fellow Farms", "Sidra Las Flores"]);

        let by_name = search_coffees(&pool, "ESPRESSO").await?;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "house-espresso");

        assert!(search_coffees(&pool, "   ").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_coffee_by_id() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        let coffee = get_coffee_by_id(&pool, "kochere").await?.ok_or("missing")?;
        assert_eq!(coffee.origin.as_deref(), Some("Ethiopia"));
        assert_eq!(coffee.roaster_name.as_deref(), Some("Satan's Coffee Corner"));

        assert!(get_coffee_by_id(&pool, "nope").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_roaster_and_its_coffees() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        let roaster = get_roaster(&pool, "nomad-1").await?.ok_or("missing")?;
        assert_eq!(roaster.website.as_deref(), Some("https://nomadcoffee.es"));

        let coffees = get_roaster_coffees(&pool, "nomad-1").await?;
        assert_eq!(coffees.len(), 3);
        assert!(coffees.iter().all(|c| c.roaster_id == "nomad-1"));

        Ok(())
    }

    #[tokio::test]
    async fn test_reviews_and_votes() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        let reviews = get_reviews(&pool, "fellow-farms").await?;
        assert_eq!(reviews.len(), 3);
        assert!(reviews.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert!(reviews.iter().all(|r| (1..=5).contains(&r.rating)));

        let mut votes = get_brewing_votes(&pool, "fellow-farms").await?;
        votes.sort();
        assert_eq!(votes, vec!["Chemex", "Espresso", "V60"]);

        assert!(get_brewing_votes(&pool, "mystery-lot").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_locations_filters() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        let all = get_locations(&pool, &LocationFilterParams::default()).await?;
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].id, "loc-1");
        assert_eq!(all[0].coffee_ids.len(), 3);

        let barcelona = LocationFilterParams {
            city: Some("BARCELONA".to_string()),
            ..LocationFilterParams::default()
        };
        assert_eq!(get_locations(&pool, &barcelona).await?.len(), 5);

        let roasteries = LocationFilterParams {
            category: Some(Category::Roastery),
            ..LocationFilterParams::default()
        };
        let ids: Vec<_> = get_locations(&pool, &roasteries)
            .await?
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["loc-1", "loc-5"]);

        let by_address = LocationFilterParams {
            search: Some("rec comtal".to_string()),
            ..LocationFilterParams::default()
        };
        let found = get_locations(&pool, &by_address).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Three Marks Coffee");

        let combined = LocationFilterParams {
            city: Some("barcelona".to_string()),
            category: Some(Category::Cafe),
            search: Some("nomad".to_string()),
            coffee_id: None,
            roaster_id: None,
        };
        let found = get_locations(&pool, &combined).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "loc-2");

        let skye = LocationFilterParams {
            roaster_id: Some("skye-1".to_string()),
            ..LocationFilterParams::default()
        };
        let found = get_locations(&pool, &skye).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].website.as_deref(), Some("https://skyecoffee.com"));

        Ok(())
    }

    #[tokio::test]
    async fn test_coffee_locations_keep_full_stock() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        let kochere = LocationFilterParams {
            coffee_id: Some("kochere".to_string()),
            ..LocationFilterParams::default()
        };
        let locations = get_locations(&pool, &kochere).await?;
        let ids: Vec<_> = locations.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["loc-3", "loc-4"]);

        // the EXISTS filter must not trim the aggregated stock list
        let three_marks = &locations[1];
        assert_eq!(three_marks.coffee_ids.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_stock_ids_survive_commas() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        sqlx::query(
            "INSERT INTO coffee (id, roaster_id, name, created_at) \
             VALUES ('lot,7', 'nomad-1', 'Comma Lot', '2024-01-01')",
        )
        .execute(&pool)
        .await?;
        sqlx::query(
            "INSERT INTO location (id, name, address, city, latitude, longitude, category) \
             VALUES ('empty', 'Empty Shelf', 'Nowhere 1', 'Girona', 41.98, 2.82, 'shop')",
        )
        .execute(&pool)
        .await?;
        sqlx::query(
            "INSERT INTO location_coffee (location_id, coffee_id) VALUES ('loc-3', 'lot,7')",
        )
        .execute(&pool)
        .await?;

        let all = get_locations(&pool, &LocationFilterParams::default()).await?;
        let stock = |id: &str| {
            all.iter()
                .find(|l| l.id == id)
                .map(|l| l.coffee_ids.clone())
                .unwrap_or_default()
        };
        assert_eq!(stock("loc-3"), vec!["kochere".to_string(), "lot,7".to_string()]);
        assert!(stock("empty").is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_counts() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        assert_eq!(count_roasters(&pool).await?, 3);
        assert_eq!(count_reviews(&pool).await?, 10);

        let by_category = count_locations_by_category(&pool).await?;
        assert_eq!(
            by_category,
            vec![
                (Category::Cafe, 2),
                (Category::Roastery, 2),
                (Category::Shop, 2)
            ]
        );

        let by_origin = count_coffees_by_origin(&pool).await?;
        assert_eq!(by_origin[0], ("Colombia".to_string(), 2));

        Ok(())
    }
}
