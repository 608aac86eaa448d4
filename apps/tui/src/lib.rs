// Library core for the coffee finder: domain types, the pure filter,
// geometry, selection and map logic, and the SQLite-backed context.
pub mod config;
pub mod context;
pub mod db;
pub mod domain;
pub mod filter;
pub mod geometry;
pub mod logging;
pub mod map;
pub mod selection;

pub use context::AppContext;
pub use domain::{BrewMethod, Category, Coffee, Coordinate, Location, Review, Roaster};
