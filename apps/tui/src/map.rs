//! Map projection, marker hit testing and the renderer capability.

use crate::domain::{Coordinate, Location};
use geo::{BoundingRect, HaversineDistance, MultiPoint, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const REGION_PADDING: f64 = 1.2;
const MIN_DELTA: f64 = 0.01;

/// Visible window of the map in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for MapRegion {
    /// Barcelona, where the demo data lives.
    fn default() -> Self {
        Self {
            latitude: 41.3874,
            longitude: 2.1686,
            latitude_delta: 0.05,
            longitude_delta: 0.05,
        }
    }
}

impl MapRegion {
    /// Smallest padded region that contains every coordinate.
    pub fn fit<I>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let points: MultiPoint<f64> = coordinates.into_iter().map(Point::from).collect();
        let Some(bounds) = points.bounding_rect() else {
            return Self::default();
        };

        let center = bounds.center();
        Self {
            latitude: center.y,
            longitude: center.x,
            latitude_delta: (bounds.height() * REGION_PADDING).max(MIN_DELTA),
            longitude_delta: (bounds.width() * REGION_PADDING).max(MIN_DELTA),
        }
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.longitude_delta / 2.0;
        [self.longitude - half, self.longitude + half]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.latitude_delta / 2.0;
        [self.latitude - half, self.latitude + half]
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        let [west, east] = self.x_bounds();
        let [south, north] = self.y_bounds();
        (west..=east).contains(&coordinate.longitude)
            && (south..=north).contains(&coordinate.latitude)
    }

    /// Same size, moved to `coordinate`.
    pub const fn centered_on(&self, coordinate: Coordinate) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            latitude_delta: self.latitude_delta,
            longitude_delta: self.longitude_delta,
        }
    }

    /// Equirectangular projection into a `width` x `height` surface with the
    /// origin at the top left.
    pub fn project(&self, coordinate: Coordinate, width: f64, height: f64) -> (f64, f64) {
        let [west, _] = self.x_bounds();
        let [_, north] = self.y_bounds();
        let x = (coordinate.longitude - west) / self.longitude_delta * width;
        let y = (north - coordinate.latitude) / self.latitude_delta * height;
        (x, y)
    }
}

/// Index of the marker closest to a click at `(x, y)` on the projected
/// surface, if one lies within `threshold` surface units.
pub fn nearest_marker(
    region: &MapRegion,
    markers: &[Coordinate],
    click: (f64, f64),
    size: (f64, f64),
    threshold: f64,
) -> Option<usize> {
    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let (mx, my) = region.project(*marker, size.0, size.1);
            (i, (mx - click.0).hypot(my - click.1))
        })
        .filter(|(_, distance)| *distance <= threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Next marker east (`forward`) or west of the current one, wrapping around.
/// Used to walk the map with the keyboard.
pub fn step_marker(markers: &[Coordinate], current: Option<usize>, forward: bool) -> Option<usize> {
    if markers.is_empty() {
        return None;
    }

    let mut order: Vec<usize> = (0..markers.len()).collect();
    order.sort_by(|&a, &b| {
        markers[a]
            .longitude
            .total_cmp(&markers[b].longitude)
            .then(markers[b].latitude.total_cmp(&markers[a].latitude))
    });

    let Some(position) = current.and_then(|c| order.iter().position(|&i| i == c)) else {
        return Some(if forward { order[0] } else { order[order.len() - 1] });
    };

    let next = if forward {
        (position + 1) % order.len()
    } else {
        (position + order.len() - 1) % order.len()
    };
    Some(order[next])
}

impl From<Coordinate> for Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        Self::new(coordinate.longitude, coordinate.latitude)
    }
}

/// Great-circle distance in kilometres.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    Point::from(a).haversine_distance(&Point::from(b)) / 1000.0
}

/// "850 m" below one kilometre, "1.2 km" above. The unit is chosen after
/// rounding, so 999.6 m reads "1.0 km".
pub fn distance_label(km: f64) -> String {
    let metres = (km * 1000.0).round();
    if metres < 1000.0 {
        format!("{metres:.0} m")
    } else {
        format!("{km:.1} km")
    }
}

/// Fills in missing distance labels relative to `origin`.
pub fn annotate_distances(locations: &mut [Location], origin: Coordinate) {
    for location in locations.iter_mut().filter(|l| l.distance.is_none()) {
        location.distance = Some(distance_label(haversine_km(origin, location.coordinate)));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown map renderer '{0}', expected 'canvas' or 'text'")]
pub struct UnknownRenderer(pub String);

/// Which [`MapRenderer`] implementation to build at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Canvas,
    Text,
}

impl FromStr for RendererKind {
    type Err = UnknownRenderer;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "canvas" | "braille" => Ok(Self::Canvas),
            "text" | "fallback" => Ok(Self::Text),
            other => Err(UnknownRenderer(other.to_string())),
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canvas => write!(f, "canvas"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// One marker as the renderer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub coordinate: Coordinate,
    pub selected: bool,
    pub primary: bool,
    pub open: bool,
}

impl<'a> Marker<'a> {
    pub fn from_location(location: &'a Location, selected: bool) -> Self {
        Self {
            id: &location.id,
            label: &location.name,
            coordinate: location.coordinate,
            selected,
            primary: location.is_primary,
            open: location.is_open,
        }
    }
}

/// Surface-independent drawing commands produced by a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum MapShape {
    Frame { region: MapRegion },
    Dot { x: f64, y: f64, selected: bool, primary: bool },
    Label { x: f64, y: f64, text: String, selected: bool },
    Row { text: String, selected: bool },
}

/// A way of presenting markers. Implementations are chosen once from
/// configuration, never by probing the terminal at draw time.
pub trait MapRenderer: fmt::Debug + Send + Sync {
    fn kind(&self) -> RendererKind;

    /// Whether clicks on the surface can be resolved to markers.
    fn supports_hit_testing(&self) -> bool;

    fn shapes(&self, region: &MapRegion, markers: &[Marker<'_>]) -> Vec<MapShape>;
}

/// Plots markers in map coordinates on a braille canvas.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanvasMap;

impl MapRenderer for CanvasMap {
    fn kind(&self) -> RendererKind {
        RendererKind::Canvas
    }

    fn supports_hit_testing(&self) -> bool {
        true
    }

    fn shapes(&self, region: &MapRegion, markers: &[Marker<'_>]) -> Vec<MapShape> {
        let mut shapes = vec![MapShape::Frame { region: *region }];

        // Selected marker last so it draws on top.
        let mut ordered: Vec<&Marker<'_>> = markers.iter().collect();
        ordered.sort_by_key(|m| m.selected);

        for marker in ordered {
            let Coordinate {
                latitude,
                longitude,
            } = marker.coordinate;
            shapes.push(MapShape::Dot {
                x: longitude,
                y: latitude,
                selected: marker.selected,
                primary: marker.primary,
            });
            if marker.selected {
                shapes.push(MapShape::Label {
                    x: longitude,
                    y: latitude,
                    text: marker.label.to_string(),
                    selected: true,
                });
            }
        }
        shapes
    }
}

/// Coordinate listing for terminals where a canvas is unreadable.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextMap;

impl MapRenderer for TextMap {
    fn kind(&self) -> RendererKind {
        RendererKind::Text
    }

    fn supports_hit_testing(&self) -> bool {
        false
    }

    fn shapes(&self, _region: &MapRegion, markers: &[Marker<'_>]) -> Vec<MapShape> {
        markers
            .iter()
            .map(|marker| MapShape::Row {
                text: format!(
                    "{} {} ({:.4}, {:.4}){}",
                    if marker.selected { ">" } else { " " },
                    marker.label,
                    marker.coordinate.latitude,
                    marker.coordinate.longitude,
                    if marker.open { "" } else { " closed" },
                ),
                selected: marker.selected,
            })
            .collect()
    }
}

pub fn build_renderer(kind: RendererKind) -> Box<dyn MapRenderer> {
    match kind {
        RendererKind::Canvas => Box::new(CanvasMap),
        RendererKind::Text => Box::new(TextMap),
    }
}
