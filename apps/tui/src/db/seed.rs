//! Demo catalogue used by `--seed` and by tests.

use crate::domain::Category;
use chrono::{Duration, Utc};
use sqlx::{query, query_scalar, SqlitePool};
use tracing::info;

struct SeedRoaster {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    website: &'static str,
    location: &'static str,
}

struct SeedCoffee {
    id: &'static str,
    roaster_id: &'static str,
    name: &'static str,
    origin: Option<&'static str>,
    region: Option<&'static str>,
    process: Option<&'static str>,
    roast_level: Option<&'static str>,
    tasting_notes: &'static [&'static str],
    altitude: Option<&'static str>,
    varietal: Option<&'static str>,
}

struct SeedLocation {
    id: &'static str,
    name: &'static str,
    address: &'static str,
    city: &'static str,
    latitude: f64,
    longitude: f64,
    category: Category,
    is_open: bool,
    is_primary: bool,
    roaster_id: &'static str,
    distance: &'static str,
    phone: Option<&'static str>,
    website: Option<&'static str>,
    stocks: &'static [&'static str],
}

const ROASTERS: &[SeedRoaster] = &[
    SeedRoaster {
        id: "nomad-1",
        name: "Nomad Coffee",
        description: "Specialty roasters in Barcelona focused on direct trade.",
        website: "https://nomadcoffee.es",
        location: "Barcelona, Spain",
    },
    SeedRoaster {
        id: "satans-1",
        name: "Satan's Coffee Corner",
        description: "Gothic Quarter cafe roasting bright, clean lots.",
        website: "https://satanscoffee.com",
        location: "Barcelona, Spain",
    },
    SeedRoaster {
        id: "skye-1",
        name: "Skye Coffee Co.",
        description: "Poblenou roastery and espresso bar.",
        website: "https://skyecoffee.com",
        location: "Barcelona, Spain",
    },
];

const COFFEES: &[SeedCoffee] = &[
    SeedCoffee {
        id: "fellow-farms",
        roaster_id: "nomad-1",
        name: "Fellow Farms",
        origin: Some("Colombia"),
        region: Some("Valle del Cauca"),
        process: Some("Natural"),
        roast_level: Some("Light"),
        tasting_notes: &["White flowers", "Honey", "Poached pear", "Plum", "Peach"],
        altitude: Some("1,700-2,000 MASL"),
        varietal: Some("Geisha"),
    },
    SeedCoffee {
        id: "sidra-las-flores",
        roaster_id: "nomad-1",
        name: "Sidra Las Flores",
        origin: Some("Colombia"),
        region: Some("Acevedo, Huila"),
        process: Some("Natural Anaerobic"),
        roast_level: Some("Light"),
        tasting_notes: &["Cacao nibs", "Lychee", "Pineapple", "Mango", "Cherry"],
        altitude: Some("1,750 MASL"),
        varietal: Some("Bourbon Sidra"),
    },
    SeedCoffee {
        id: "jardin",
        roaster_id: "nomad-1",
        name: "Jardín",
        origin: Some("Costa Rica"),
        region: Some("Turrialba"),
        process: Some("Natural Anaerobic"),
        roast_level: Some("Medium"),
        tasting_notes: &["Blackberries", "Red plum", "Tamarind", "Cherry", "Dark chocolate"],
        altitude: Some("1,400 MASL"),
        varietal: Some("SL28, Typica, Geisha"),
    },
    SeedCoffee {
        id: "kochere",
        roaster_id: "satans-1",
        name: "Kochere",
        origin: Some("Ethiopia"),
        region: Some("Yirgacheffe"),
        process: Some("Washed"),
        roast_level: Some("Light"),
        tasting_notes: &["Jasmine", "Bergamot", "Citrus"],
        altitude: Some("2,000 MASL"),
        varietal: Some("Heirloom"),
    },
    SeedCoffee {
        id: "house-espresso",
        roaster_id: "skye-1",
        name: "House Espresso",
        origin: Some("Brazil"),
        region: None,
        process: Some("Pulped Natural"),
        roast_level: Some("Medium-Dark"),
        tasting_notes: &["Milk chocolate", "Hazelnut", "Caramel"],
        altitude: None,
        varietal: None,
    },
    SeedCoffee {
        id: "mystery-lot",
        roaster_id: "skye-1",
        name: "Mystery Lot",
        origin: None,
        region: None,
        process: None,
        roast_level: None,
        tasting_notes: &[],
        altitude: None,
        varietal: None,
    },
];

/// (coffee, user, rating, text, brewing method)
const REVIEWS: &[(&str, &str, i64, &str, &str)] = &[
    ("fellow-farms", "marta", 5, "Floral and sweet, stunning as a V60.", "V60"),
    ("fellow-farms", "jordi", 4, "Great filter, a bit thin as espresso.", "Espresso"),
    ("fellow-farms", "anna", 5, "Peach for days.", "Chemex"),
    ("sidra-las-flores", "marta", 4, "Tropical bomb.", "Filter"),
    ("sidra-las-flores", "pau", 5, "Wild as cold brew.", "Cold Brew"),
    ("jardin", "anna", 4, "Jammy and deep.", "Espresso"),
    ("jardin", "pau", 3, "Too fermented for me.", "Filter"),
    ("kochere", "jordi", 5, "Textbook washed Ethiopian.", "Pour over"),
    ("house-espresso", "marta", 4, "Reliable in milk.", "Flat white"),
    ("house-espresso", "anna", 3, "Fine as decaf substitute, not really.", "Decaf"),
];

const LOCATIONS: &[SeedLocation] = &[
    SeedLocation {
        id: "loc-1",
        name: "Nomad Coffee Lab",
        address: "Passatge Sert 12",
        city: "Barcelona",
        latitude: 41.3921,
        longitude: 2.1649,
        category: Category::Roastery,
        is_open: true,
        is_primary: true,
        roaster_id: "nomad-1",
        distance: "0.3 km",
        phone: Some("+34 933 22 52 89"),
        website: Some("https://nomadcoffee.es"),
        stocks: &["fellow-farms", "sidra-las-flores", "jardin"],
    },
    SeedLocation {
        id: "loc-2",
        name: "Nomad Coffee - Eixample",
        address: "Carrer de Consell de Cent 413",
        city: "Barcelona",
        latitude: 41.3897,
        longitude: 2.1623,
        category: Category::Cafe,
        is_open: true,
        is_primary: false,
        roaster_id: "nomad-1",
        distance: "0.8 km",
        phone: Some("+34 934 51 03 82"),
        website: None,
        stocks: &["fellow-farms", "jardin"],
    },
    SeedLocation {
        id: "loc-3",
        name: "Satan's Coffee Corner",
        address: "Carrer de l'Arc de Sant Ramon del Call 11",
        city: "Barcelona",
        latitude: 41.3833,
        longitude: 2.1767,
        category: Category::Cafe,
        is_open: false,
        is_primary: true,
        roaster_id: "satans-1",
        distance: "1.2 km",
        phone: None,
        website: None,
        stocks: &["kochere"],
    },
    SeedLocation {
        id: "loc-4",
        name: "Three Marks Coffee",
        address: "Carrer del Rec Comtal 20",
        city: "Barcelona",
        latitude: 41.3876,
        longitude: 2.1789,
        category: Category::Shop,
        is_open: true,
        is_primary: true,
        roaster_id: "nomad-1",
        distance: "1.5 km",
        phone: Some("+34 933 15 98 73"),
        website: Some("https://threemarkscoffee.com"),
        stocks: &["fellow-farms", "kochere", "house-espresso"],
    },
    SeedLocation {
        id: "loc-5",
        name: "Skye Coffee Co.",
        address: "Carrer de Pujades 78",
        city: "Barcelona",
        latitude: 41.3901,
        longitude: 2.1945,
        category: Category::Roastery,
        is_open: true,
        is_primary: true,
        roaster_id: "skye-1",
        distance: "2.1 km",
        phone: None,
        website: Some("https://skyecoffee.com"),
        stocks: &["house-espresso", "mystery-lot"],
    },
    SeedLocation {
        id: "loc-6",
        name: "Nomad at Mercado",
        address: "Calle de Fuencarral 21",
        city: "Madrid",
        latitude: 40.4215,
        longitude: -3.7010,
        category: Category::Shop,
        is_open: true,
        is_primary: false,
        roaster_id: "nomad-1",
        distance: "505 km",
        phone: None,
        website: None,
        stocks: &["sidra-las-flores"],
    },
];

/// Inserts the demo catalogue unless coffees already exist. Returns whether
/// anything was written.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let existing: i64 = query_scalar("SELECT COUNT(*) FROM coffee")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!(existing, "catalogue already present, skipping seed");
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    let now = Utc::now();

    for roaster in ROASTERS {
        query(
            "INSERT INTO roaster (id, name, description, website, location) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(roaster.id)
        .bind(roaster.name)
        .bind(roaster.description)
        .bind(roaster.website)
        .bind(roaster.location)
        .execute(&mut *tx)
        .await?;
    }

    for (age, coffee) in (0_i64..).zip(COFFEES) {
        let notes = if coffee.tasting_notes.is_empty() {
            None
        } else {
            serde_json::to_string(coffee.tasting_notes).ok()
        };
        let created_at = (now - Duration::days(age)).to_rfc3339();

        query(
            "INSERT INTO coffee (id, roaster_id, name, origin, region, process, roast_level, \
             tasting_notes, altitude, varietal, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(coffee.id)
        .bind(coffee.roaster_id)
        .bind(coffee.name)
        .bind(coffee.origin)
        .bind(coffee.region)
        .bind(coffee.process)
        .bind(coffee.roast_level)
        .bind(notes)
        .bind(coffee.altitude)
        .bind(coffee.varietal)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;
    }

    for (n, (coffee_id, user, rating, text, method)) in (1_i64..).zip(REVIEWS) {
        query(
            "INSERT INTO review (id, coffee_id, user_name, rating, review_text, brewing_method, \
             created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(format!("rev-{n}"))
        .bind(*coffee_id)
        .bind(*user)
        .bind(*rating)
        .bind(*text)
        .bind(*method)
        .bind((now - Duration::hours(n)).to_rfc3339())
        .execute(&mut *tx)
        .await?;
    }

    for location in LOCATIONS {
        query(
            "INSERT INTO location (id, name, address, city, country, latitude, longitude, \
             category, is_open, is_primary, distance, roaster_id, phone, website) \
             VALUES (?, ?, ?, ?, 'Spain', ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(location.id)
        .bind(location.name)
        .bind(location.address)
        .bind(location.city)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(location.category)
        .bind(location.is_open)
        .bind(location.is_primary)
        .bind(location.distance)
        .bind(location.roaster_id)
        .bind(location.phone)
        .bind(location.website)
        .execute(&mut *tx)
        .await?;

        for coffee_id in location.stocks {
            query("INSERT INTO location_coffee (location_id, coffee_id) VALUES (?, ?)")
                .bind(location.id)
                .bind(*coffee_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;
    info!(
        roasters = ROASTERS.len(),
        coffees = COFFEES.len(),
        locations = LOCATIONS.len(),
        "seeded demo catalogue"
    );
    Ok(true)
}
