//! Brew-method star chart geometry.
//!
//! Four spokes at fixed compass angles (filter up, espresso right, cold brew
//! down, decaf left). Coordinates are screen space: y grows downward.

use crate::domain::BrewMethod;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelAnchor {
    pub method: BrewMethod,
    pub text: &'static str,
    pub position: Point,
}

/// Share of votes per brew method, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BrewShares {
    pub filter: f64,
    pub espresso: f64,
    pub cold_brew: f64,
    pub decaf: f64,
}

impl BrewShares {
    pub const fn new(filter: f64, espresso: f64, cold_brew: f64, decaf: f64) -> Self {
        Self {
            filter,
            espresso,
            cold_brew,
            decaf,
        }
    }

    /// Builds shares from the brewing methods recorded on reviews.
    /// Methods that do not map to a spoke are not counted.
    pub fn from_votes<'a, I>(methods: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = [0_u32; 4];
        for method in methods.into_iter().filter_map(BrewMethod::parse) {
            counts[spoke_index(method)] += 1;
        }

        let total: u32 = counts.iter().sum();
        if total == 0 {
            return Self::default();
        }

        let share = |count: u32| f64::from(count) / f64::from(total) * 100.0;
        Self::new(
            share(counts[0]),
            share(counts[1]),
            share(counts[2]),
            share(counts[3]),
        )
    }

    pub const fn get(&self, method: BrewMethod) -> f64 {
        match method {
            BrewMethod::Filter => self.filter,
            BrewMethod::Espresso => self.espresso,
            BrewMethod::ColdBrew => self.cold_brew,
            BrewMethod::Decaf => self.decaf,
        }
    }

    /// Values in spoke order.
    pub const fn as_array(&self) -> [f64; 4] {
        [self.filter, self.espresso, self.cold_brew, self.decaf]
    }
}

const fn spoke_index(method: BrewMethod) -> usize {
    match method {
        BrewMethod::Filter => 0,
        BrewMethod::Espresso => 1,
        BrewMethod::ColdBrew => 2,
        BrewMethod::Decaf => 3,
    }
}

/// Percentages are clamped to `[0, 100]`; NaN counts as zero.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub size: f64,
    pub margin: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            size: 280.0,
            margin: 40.0,
        }
    }
}

impl ChartGeometry {
    pub const fn new(size: f64, margin: f64) -> Self {
        Self { size, margin }
    }

    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }

    /// Spoke length at 100%. Never negative.
    pub fn max_radius(&self) -> f64 {
        (self.size / 2.0 - self.margin).max(0.0)
    }

    pub fn point_at(&self, angle_degrees: f64, radius: f64) -> Point {
        let center = self.center();
        let rad = angle_degrees.to_radians();
        Point::new(
            rad.cos().mul_add(radius, center.x),
            rad.sin().mul_add(radius, center.y),
        )
    }
}

/// Vertices of the data polygon in spoke order.
pub fn derive_vertices(shares: &BrewShares, geometry: &ChartGeometry) -> [Point; 4] {
    let max_radius = geometry.max_radius();
    BrewMethod::ALL.map(|method| {
        let radius = clamp_percentage(shares.get(method)) / 100.0 * max_radius;
        geometry.point_at(method.angle_degrees(), radius)
    })
}

/// Everything needed to draw the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarChart {
    pub center: Point,
    pub max_radius: f64,
    pub data: [Point; 4],
    pub reference: [Point; 4],
    pub axes: [Segment; 4],
    pub labels: [LabelAnchor; 4],
}

impl StarChart {
    pub fn compute(shares: &BrewShares, geometry: &ChartGeometry) -> Self {
        let center = geometry.center();
        let max_radius = geometry.max_radius();

        let reference =
            BrewMethod::ALL.map(|method| geometry.point_at(method.angle_degrees(), max_radius));
        let axes = reference.map(|to| Segment { from: center, to });
        let labels = BrewMethod::ALL.map(|method| LabelAnchor {
            method,
            text: method.label(),
            position: geometry.point_at(method.angle_degrees(), max_radius + method.label_offset()),
        });

        Self {
            center,
            max_radius,
            data: derive_vertices(shares, geometry),
            reference,
            axes,
            labels,
        }
    }

    /// Closed outline edges (last vertex joins the first).
    pub fn polygon_edges(points: &[Point; 4]) -> [Segment; 4] {
        [0, 1, 2, 3].map(|i| Segment {
            from: points[i],
            to: points[(i + 1) % 4],
        })
    }
}

/// Mean of 1..=5 ratings. `None` when there are no ratings.
pub fn mean_rating<I>(ratings: I) -> Option<f64>
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0_u32, 0_u32), |(sum, count), r| (sum + u32::from(r), count + 1));

    (count > 0).then(|| f64::from(sum) / f64::from(count))
}

/// Review count per star, index 0 holds one-star reviews.
/// Ratings outside 1..=5 are ignored.
pub fn rating_histogram<I>(ratings: I) -> [u32; 5]
where
    I: IntoIterator<Item = u8>,
{
    let mut buckets = [0; 5];
    for rating in ratings {
        if (1..=5).contains(&rating) {
            buckets[usize::from(rating - 1)] += 1;
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn all_zero_collapses_to_center() {
        let geometry = ChartGeometry::default();
        let vertices = derive_vertices(&BrewShares::default(), &geometry);
        for vertex in vertices {
            assert_close(vertex, geometry.center());
        }
    }

    #[test]
    fn full_shares_reach_max_radius_at_spoke_angles() {
        let geometry = ChartGeometry::default();
        let center = geometry.center();
        let r = geometry.max_radius();
        let vertices = derive_vertices(&BrewShares::new(100.0, 100.0, 100.0, 100.0), &geometry);

        assert_close(vertices[0], Point::new(center.x, center.y - r));
        assert_close(vertices[1], Point::new(center.x + r, center.y));
        assert_close(vertices[2], Point::new(center.x, center.y + r));
        assert_close(vertices[3], Point::new(center.x - r, center.y));
        for vertex in vertices {
            assert!((vertex.distance(center) - r).abs() < EPSILON);
        }
    }

    #[test]
    fn in_range_vertices_stay_inside_radius() {
        let geometry = ChartGeometry::new(200.0, 20.0);
        let center = geometry.center();
        let r = geometry.max_radius();
        for step in 0..=20 {
            let p = f64::from(step) * 5.0;
            let shares = BrewShares::new(p, 100.0 - p, p / 2.0, 100.0);
            for vertex in derive_vertices(&shares, &geometry) {
                assert!(vertex.distance(center) <= r + EPSILON);
            }
        }
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let geometry = ChartGeometry::default();
        let clamped = derive_vertices(&BrewShares::new(250.0, -10.0, f64::NAN, 50.0), &geometry);
        let expected = derive_vertices(&BrewShares::new(100.0, 0.0, 0.0, 50.0), &geometry);
        assert_eq!(clamped, expected);
    }

    #[test]
    fn derive_vertices_is_deterministic() {
        let geometry = ChartGeometry::default();
        let shares = BrewShares::new(12.5, 40.0, 33.3, 14.2);
        assert_eq!(
            derive_vertices(&shares, &geometry),
            derive_vertices(&shares, &geometry)
        );
    }

    #[test]
    fn chart_reference_axes_and_labels() {
        let geometry = ChartGeometry::default();
        let chart = StarChart::compute(&BrewShares::new(50.0, 0.0, 0.0, 0.0), &geometry);

        assert!((chart.max_radius - 100.0).abs() < EPSILON);
        for (axis, reference) in chart.axes.iter().zip(chart.reference) {
            assert_close(axis.from, chart.center);
            assert_close(axis.to, reference);
        }
        // Filter label sits 25 past the ring, straight up.
        assert_close(chart.labels[0].position, Point::new(140.0, 140.0 - 125.0));
        // Espresso label sits 30 past the ring, to the right.
        assert_close(chart.labels[1].position, Point::new(140.0 + 130.0, 140.0));
        assert_eq!(chart.labels[2].text, "Cold Brew");
        assert_close(chart.data[0], Point::new(140.0, 90.0));
    }

    #[test]
    fn tiny_chart_never_has_negative_radius() {
        let geometry = ChartGeometry::new(40.0, 40.0);
        assert!(geometry.max_radius().abs() < EPSILON);
        let vertices = derive_vertices(&BrewShares::new(100.0, 100.0, 100.0, 100.0), &geometry);
        for vertex in vertices {
            assert_close(vertex, geometry.center());
        }
    }

    #[test]
    fn shares_from_votes_ignore_unknown_methods() {
        let shares = BrewShares::from_votes(["V60", "espresso", "Espresso", "Chemex", "turkish"]);
        assert!((shares.filter - 50.0).abs() < EPSILON);
        assert!((shares.espresso - 50.0).abs() < EPSILON);
        assert!(shares.cold_brew.abs() < EPSILON);
        assert!(shares.decaf.abs() < EPSILON);
    }

    #[test]
    fn shares_from_no_votes_are_zero() {
        assert_eq!(BrewShares::from_votes(Vec::<&str>::new()), BrewShares::default());
    }

    #[test]
    fn polygon_edges_close_the_shape() {
        let geometry = ChartGeometry::default();
        let chart = StarChart::compute(&BrewShares::new(10.0, 20.0, 30.0, 40.0), &geometry);
        let edges = StarChart::polygon_edges(&chart.data);
        assert_close(edges[3].to, chart.data[0]);
        assert_close(edges[0].from, chart.data[0]);
    }

    #[test]
    fn ratings_summary() {
        assert_eq!(mean_rating(Vec::new()), None);
        assert!(mean_rating([4, 5, 3]).is_some_and(|mean| (mean - 4.0).abs() < EPSILON));
        assert_eq!(rating_histogram([5, 5, 1, 0, 9, 3]), [1, 0, 1, 0, 2]);
    }
}
