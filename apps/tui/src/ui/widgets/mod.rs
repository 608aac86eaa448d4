pub mod charts;
pub mod map;
pub mod popup;
pub mod star_chart;
pub mod tables;
