//! Trend radar layout
//!
//! Places each visible trend item on a polar grid. Rings map to radii,
//! quadrants to angular spans, and each item gets an angular and radial
//! offset so points scatter instead of stacking on the ring.
//!
//! Coordinates are in radar units: the centre is the origin and the
//! outer edge sits at `RADAR_EXTENT`. Angles are in degrees, measured
//! clockwise from the positive x axis (screen orientation).

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::state::data::{Quadrant, Ring, TrendItem};

pub const RADAR_EXTENT: f32 = 100.0;

/// Offset added to `quadrant angle - 45°`
pub const ANGLE_OFFSET: Range<f32> = 15.0..75.0;

/// Offset added to the ring radius
pub const RADIUS_OFFSET: Range<f32> = -10.0..10.0;

pub fn ring_radius(ring: Ring) -> f32 {
    match ring {
        Ring::Adopt => 25.0,
        Ring::Trial => 45.0,
        Ring::Assess => 65.0,
        Ring::Hold => 85.0,
    }
}

/// Central angle of the quadrant in degrees
pub fn quadrant_angle(quadrant: Quadrant) -> f32 {
    match quadrant {
        Quadrant::ConsumerBehavior => 45.0,
        Quadrant::Technology => 135.0,
        Quadrant::MarketDynamics => 225.0,
        Quadrant::ExperienceDesign => 315.0,
    }
}

/// Where placement offsets come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jitter {
    /// Derived from the item id mixed with the seed; same input, same layout
    Seeded(u64),
    /// Fresh randomness on every layout
    Unseeded,
}

impl Default for Jitter {
    fn default() -> Self {
        Jitter::Seeded(0)
    }
}

/// Active ring/quadrant restriction. `None` leaves the axis unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RadarFilter {
    pub ring: Option<Ring>,
    pub quadrant: Option<Quadrant>,
}

impl RadarFilter {
    pub fn matches(&self, item: &TrendItem) -> bool {
        self.ring.map_or(true, |ring| item.ring == ring)
            && self.quadrant.map_or(true, |quadrant| item.quadrant == quadrant)
    }

    pub fn is_active(&self) -> bool {
        self.ring.is_some() || self.quadrant.is_some()
    }

    /// Selecting the active ring again clears it
    pub fn toggle_ring(&mut self, ring: Ring) {
        self.ring = if self.ring == Some(ring) { None } else { Some(ring) };
    }

    pub fn toggle_quadrant(&mut self, quadrant: Quadrant) {
        self.quadrant = if self.quadrant == Some(quadrant) {
            None
        } else {
            Some(quadrant)
        };
    }
}

/// A placed trend item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarPoint<'a> {
    pub item: &'a TrendItem,
    /// Degrees
    pub angle: f32,
    pub radius: f32,
    pub x: f32,
    pub y: f32,
}

/// Items matching the filter, in input order
pub fn visible_items<'a>(items: &'a [TrendItem], filter: &RadarFilter) -> Vec<&'a TrendItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Place every visible item. Filtered-out items are not part of the result.
pub fn layout<'a>(items: &'a [TrendItem], filter: &RadarFilter, jitter: Jitter) -> Vec<RadarPoint<'a>> {
    visible_items(items, filter)
        .into_iter()
        .map(|item| place(item, jitter))
        .collect()
}

fn place(item: &TrendItem, jitter: Jitter) -> RadarPoint<'_> {
    let (angle_offset, radius_offset) = match jitter {
        Jitter::Seeded(seed) => {
            let mut rng = StdRng::seed_from_u64(stable_hash(&item.id) ^ seed);
            draw_offsets(&mut rng)
        }
        Jitter::Unseeded => draw_offsets(&mut rand::thread_rng()),
    };

    let angle = quadrant_angle(item.quadrant) - 45.0 + angle_offset;
    let radius = ring_radius(item.ring) + radius_offset;
    let radians = angle.to_radians();

    RadarPoint {
        item,
        angle,
        radius,
        x: radius * radians.cos(),
        y: radius * radians.sin(),
    }
}

fn draw_offsets<R: Rng + ?Sized>(rng: &mut R) -> (f32, f32) {
    (rng.gen_range(ANGLE_OFFSET), rng.gen_range(RADIUS_OFFSET))
}

/// FNV-1a; stable across builds and platforms, unlike `DefaultHasher`
fn stable_hash(id: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    id.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

/// The point nearest to (`x`, `y`) within `tolerance`, all in radar units
pub fn hit_test<'a>(points: &[RadarPoint<'a>], x: f32, y: f32, tolerance: f32) -> Option<&'a TrendItem> {
    points
        .iter()
        .map(|point| (point, (point.x - x).hypot(point.y - y)))
        .filter(|(_, distance)| *distance <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(point, _)| point.item)
}

/// Radar selection: nothing selected, or exactly one item
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RadarSelection {
    #[default]
    None,
    Selected(String),
}

impl RadarSelection {
    /// Selecting the selected item clears the selection; any other item
    /// replaces it directly
    pub fn toggle(&mut self, id: &str) {
        *self = match self {
            RadarSelection::Selected(current) if current == id => RadarSelection::None,
            _ => RadarSelection::Selected(id.to_string()),
        };
    }

    pub fn clear(&mut self) {
        *self = RadarSelection::None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        match self {
            RadarSelection::None => None,
            RadarSelection::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::catalog::fixtures::{trend, trend_grid};

    #[test]
    fn test_ring_filter_excludes_other_rings() {
        let items = trend_grid();

        for quadrant in [None, Some(Quadrant::Technology)] {
            let filter = RadarFilter {
                ring: Some(Ring::Adopt),
                quadrant,
            };
            let points = layout(&items, &filter, Jitter::default());
            assert!(!points.is_empty());
            assert!(points.iter().all(|p| p.item.ring == Ring::Adopt));
        }
    }

    #[test]
    fn test_no_filter_places_everything() {
        let items = trend_grid();
        let points = layout(&items, &RadarFilter::default(), Jitter::Unseeded);
        assert_eq!(points.len(), items.len());
        assert!(layout(&[], &RadarFilter::default(), Jitter::default()).is_empty());
    }

    #[test]
    fn test_seeded_layout_is_reproducible() {
        let items = trend_grid();
        let first = layout(&items, &RadarFilter::default(), Jitter::Seeded(7));
        let second = layout(&items, &RadarFilter::default(), Jitter::Seeded(7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_placement_ignores_other_items() {
        let items = trend_grid();
        let all = layout(&items, &RadarFilter::default(), Jitter::Seeded(1));
        let filter = RadarFilter {
            ring: Some(Ring::Trial),
            quadrant: None,
        };
        for point in layout(&items, &filter, Jitter::Seeded(1)) {
            let same = all.iter().find(|p| p.item.id == point.item.id).unwrap();
            assert_eq!(same.x, point.x);
            assert_eq!(same.y, point.y);
        }
    }

    #[test]
    fn test_filter_toggles() {
        let mut filter = RadarFilter::default();
        filter.toggle_ring(Ring::Hold);
        assert_eq!(filter.ring, Some(Ring::Hold));
        filter.toggle_ring(Ring::Trial);
        assert_eq!(filter.ring, Some(Ring::Trial));
        filter.toggle_ring(Ring::Trial);
        assert!(!filter.is_active());

        filter.toggle_quadrant(Quadrant::MarketDynamics);
        assert!(filter.is_active());
        filter.toggle_quadrant(Quadrant::MarketDynamics);
        assert!(filter.quadrant.is_none());
    }

    #[test]
    fn test_selecting_twice_clears() {
        let mut selection = RadarSelection::default();
        selection.toggle("trend-1");
        assert!(selection.is_selected("trend-1"));
        selection.toggle("trend-1");
        assert_eq!(selection, RadarSelection::None);
    }

    #[test]
    fn test_selecting_another_item_replaces() {
        let mut selection = RadarSelection::default();
        selection.toggle("trend-1");
        selection.toggle("trend-2");
        assert_eq!(selection.selected_id(), Some("trend-2"));
    }

    #[test]
    fn test_hit_test_picks_nearest() {
        let items = vec![
            trend("near", Ring::Adopt, Quadrant::ConsumerBehavior),
            trend("far", Ring::Hold, Quadrant::ConsumerBehavior),
        ];
        let points = layout(&items, &RadarFilter::default(), Jitter::default());
        let near = points[0];

        let hit = hit_test(&points, near.x + 0.5, near.y, 4.0);
        assert_eq!(hit.map(|item| item.id.as_str()), Some("near"));
        assert!(hit_test(&points, 0.0, 0.0, 1.0).is_none());
    }

    proptest! {
        #[test]
        fn prop_points_stay_in_quadrant_and_ring_band(seed in any::<u64>(), ring in 0usize..4, quadrant in 0usize..4, id in "[a-z0-9-]{1,16}") {
            let ring = Ring::ALL[ring];
            let quadrant = Quadrant::ALL[quadrant];
            let items = vec![trend(&id, ring, quadrant)];

            for jitter in [Jitter::Seeded(seed), Jitter::Unseeded] {
                let point = layout(&items, &RadarFilter::default(), jitter)[0];
                let centre = quadrant_angle(quadrant);
                prop_assert!(point.angle >= centre - 30.0 && point.angle <= centre + 30.0);

                let band = ring_radius(ring);
                prop_assert!(point.radius >= band - 10.0 && point.radius <= band + 10.0);
                prop_assert!(point.radius < RADAR_EXTENT);
            }
        }
    }
}
