pub mod coffee_detail;
pub mod discover;
pub mod help;
pub mod roaster;
pub mod where_to_find;
