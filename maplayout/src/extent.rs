//! Geographic extent of sample points.
//!
//! Latitudes are bounded by a plain min/max. Longitudes live on a circle, so the bounding
//! interval is the smallest arc that contains every sample: the complement of the largest
//! angular gap between neighbouring samples. This lets a view fitted to data spanning the
//! antimeridian cover e.g. `[170, -170]` instead of almost the whole world.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

const FULL_TURN: f64 = 360.0;
const HALF_TURN: f64 = 180.0;

/// Longitude and latitude samples of a trace, in degrees.
///
/// The sequences are independent: longitude is authoritative for the longitude extent and
/// latitude for the latitude extent, so their lengths may differ.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    /// Longitudes. Any real value, not limited to `[-180, 180]`.
    pub lon: Vec<f64>,
    /// Latitudes.
    pub lat: Vec<f64>,
}

impl SampleSet {
    /// Creates a new sample set.
    pub fn new(lon: Vec<f64>, lat: Vec<f64>) -> Self {
        Self { lon, lat }
    }

    /// Creates a sample set from `(lon, lat)` pairs.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (lon, lat) = points.into_iter().unzip();
        Self { lon, lat }
    }

    /// Computes the bounding extent of the samples.
    ///
    /// Fails with [`LayoutError::EmptyInput`] if there are no latitude samples.
    pub fn extent(&self) -> Result<BoundingExtent, LayoutError> {
        let lon = longitude_extent(&self.lon);
        let lat = latitude_extent(&self.lat)?;
        Ok(BoundingExtent::new(lon, lat))
    }
}

/// Minimal bounding arc of a set of longitudes.
///
/// The arc goes eastwards from `min_lon` to `max_lon`, so `min_lon > max_lon` means the arc
/// crosses the antimeridian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LonExtent {
    /// Western end of the arc, in `(-180, 180]`.
    pub min_lon: f64,
    /// Eastern end of the arc, in `(-180, 180]`.
    pub max_lon: f64,
}

impl LonExtent {
    /// Returns true if the given longitude lies on the arc.
    pub fn contains(&self, lon: f64) -> bool {
        let start = normalize(self.min_lon);
        normalize(normalize(lon) - start) <= normalize(normalize(self.max_lon) - start)
    }

    /// Angular length of the arc in degrees.
    pub fn span(&self) -> f64 {
        normalize(self.max_lon - self.min_lon)
    }
}

/// Latitude range of a set of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatExtent {
    /// Southern limit.
    pub min_lat: f64,
    /// Northern limit.
    pub max_lat: f64,
}

impl LatExtent {
    /// Creates a new latitude range.
    pub fn new(min_lat: f64, max_lat: f64) -> Self {
        Self { min_lat, max_lat }
    }
}

/// Longitude arc and latitude range of a sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingExtent {
    /// Western end of the longitude arc.
    pub min_lon: f64,
    /// Eastern end of the longitude arc.
    pub max_lon: f64,
    /// Southern limit.
    pub min_lat: f64,
    /// Northern limit.
    pub max_lat: f64,
}

impl BoundingExtent {
    /// Combines a longitude arc and a latitude range.
    pub fn new(lon: LonExtent, lat: LatExtent) -> Self {
        Self {
            min_lon: lon.min_lon,
            max_lon: lon.max_lon,
            min_lat: lat.min_lat,
            max_lat: lat.max_lat,
        }
    }

    /// Longitude part of the extent.
    pub fn lon(&self) -> LonExtent {
        LonExtent {
            min_lon: self.min_lon,
            max_lon: self.max_lon,
        }
    }
}

/// Reduces a longitude into `[0, 360)`.
pub fn normalize(lon: f64) -> f64 {
    ((lon % FULL_TURN) + FULL_TURN) % FULL_TURN
}

fn to_signed(lon: f64) -> f64 {
    if lon > HALF_TURN {
        lon - FULL_TURN
    } else {
        lon
    }
}

/// Computes the smallest arc containing all the given longitudes.
///
/// Empty input (or input without finite values) gives `{0, 0}`. When several gaps share the
/// maximum size the first one in sorted order is excluded, so symmetric inputs produce an
/// order-dependent but deterministic result.
pub fn longitude_extent(lons: &[f64]) -> LonExtent {
    let mut norm: Vec<f64> = lons
        .iter()
        .copied()
        .filter(|lon| lon.is_finite())
        .map(normalize)
        .collect();
    if norm.is_empty() {
        return LonExtent::default();
    }

    norm.sort_by(f64::total_cmp);

    let count = norm.len();
    let mut max_gap = -1.0;
    let mut gap_index = 0;
    for (i, curr) in norm.iter().enumerate() {
        let next = norm[(i + 1) % count];
        let gap = (next - curr + FULL_TURN) % FULL_TURN;
        if gap > max_gap {
            max_gap = gap;
            gap_index = i;
        }
    }

    log::trace!("Largest longitude gap is {max_gap} after sample {gap_index} of {count}");

    LonExtent {
        min_lon: to_signed(norm[(gap_index + 1) % count]),
        max_lon: to_signed(norm[gap_index]),
    }
}

/// Computes the latitude range of the samples.
///
/// Fails with [`LayoutError::EmptyInput`] if there are no finite samples.
pub fn latitude_extent(lats: &[f64]) -> Result<LatExtent, LayoutError> {
    lats.iter()
        .copied()
        .filter(|lat| lat.is_finite())
        .fold(None, |acc: Option<LatExtent>, lat| {
            Some(match acc {
                None => LatExtent::new(lat, lat),
                Some(ext) => LatExtent::new(ext.min_lat.min(lat), ext.max_lat.max(lat)),
            })
        })
        .ok_or(LayoutError::EmptyInput {
            what: "latitude extent",
        })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    fn extent(lons: &[f64]) -> (f64, f64) {
        let ext = longitude_extent(lons);
        (ext.min_lon, ext.max_lon)
    }

    #[test]
    fn empty_longitudes() {
        assert_eq!(extent(&[]), (0.0, 0.0));
        assert_eq!(extent(&[f64::NAN]), (0.0, 0.0));
    }

    #[test]
    fn straddles_antimeridian() {
        assert_eq!(extent(&[10.0, 20.0, 350.0]), (-10.0, 20.0));
        assert_eq!(extent(&[170.0, -170.0, 175.0]), (170.0, -170.0));
    }

    #[test]
    fn evenly_spaced_keeps_first_tie() {
        assert_eq!(extent(&[0.0, 90.0, 180.0, 270.0]), (90.0, 0.0));
        assert_eq!(extent(&[270.0, 180.0, 90.0, 0.0]), (90.0, 0.0));
    }

    #[test]
    fn single_point() {
        assert_eq!(extent(&[-45.0]), (-45.0, -45.0));
        assert_eq!(extent(&[200.0, 200.0, -160.0]), (-160.0, -160.0));
    }

    #[test]
    fn regular_cluster() {
        assert_eq!(extent(&[-30.0, 40.0, 5.0]), (-30.0, 40.0));
        assert_eq!(extent(&[540.0]), (180.0, 180.0));
    }

    #[test]
    fn fractional_values() {
        let ext = longitude_extent(&[-179.5, 179.25, -178.75]);
        assert_abs_diff_eq!(ext.min_lon, 179.25);
        assert_abs_diff_eq!(ext.max_lon, -178.75);
        assert_abs_diff_eq!(ext.span(), 2.0);
    }

    #[test]
    fn latitude_range() {
        let lat = latitude_extent(&[10.0, -5.5, 42.0, f64::NAN]).unwrap();
        assert_eq!(lat, LatExtent::new(-5.5, 42.0));
    }

    #[test]
    fn latitude_of_empty_input_fails() {
        assert!(matches!(
            latitude_extent(&[]),
            Err(LayoutError::EmptyInput { .. })
        ));
    }

    #[test]
    fn sample_set_extent() {
        let samples = SampleSet::from_points([(179.0, 10.0), (-179.0, 20.0)]);
        let ext = samples.extent().unwrap();
        assert_eq!(
            ext,
            BoundingExtent {
                min_lon: 179.0,
                max_lon: -179.0,
                min_lat: 10.0,
                max_lat: 20.0,
            }
        );
    }

    fn has_unique_max_gap(lons: &[f64]) -> bool {
        let mut norm: Vec<f64> = lons.iter().copied().map(normalize).collect();
        norm.sort_by(f64::total_cmp);
        let gaps: Vec<f64> = (0..norm.len())
            .map(|i| (norm[(i + 1) % norm.len()] - norm[i] + FULL_TURN) % FULL_TURN)
            .collect();
        let max = gaps.iter().copied().fold(f64::MIN, f64::max);
        gaps.iter().filter(|gap| **gap == max).count() == 1
    }

    proptest! {
        #[test]
        fn arc_contains_every_sample(lons in prop::collection::vec(-1000i32..1000, 1..40)) {
            let lons: Vec<f64> = lons.into_iter().map(f64::from).collect();
            let ext = longitude_extent(&lons);
            for lon in &lons {
                prop_assert!(ext.contains(*lon), "{lon} is outside of {ext:?}");
            }
        }

        #[test]
        fn arc_is_the_shortest_covering_arc(lons in prop::collection::vec(-180i32..180, 2..40)) {
            let lons: Vec<f64> = lons.into_iter().map(f64::from).collect();
            let ext = longitude_extent(&lons);
            for start in &lons {
                prop_assert!(ext.span() <= span_from(*start, &lons));
            }
        }

        #[test]
        fn rotation_rotates_the_arc(
            lons in prop::collection::vec(-720i32..720, 1..40),
            shift in -1000i32..1000,
        ) {
            let shift = f64::from(shift);
            let lons: Vec<f64> = lons.into_iter().map(f64::from).collect();
            let rotated: Vec<f64> = lons.iter().map(|lon| lon + shift).collect();
            let ext = longitude_extent(&lons);
            let rotated_ext = longitude_extent(&rotated);
            for lon in &rotated {
                prop_assert!(rotated_ext.contains(*lon), "{lon} is outside of {rotated_ext:?}");
            }
            if has_unique_max_gap(&lons) {
                prop_assert_eq!(normalize(rotated_ext.min_lon), normalize(ext.min_lon + shift));
                prop_assert_eq!(normalize(rotated_ext.max_lon), normalize(ext.max_lon + shift));
            }
        }
    }

    // Length of the arc that starts at `start` and goes east until it covers every sample.
    fn span_from(start: f64, lons: &[f64]) -> f64 {
        lons.iter()
            .map(|lon| normalize(lon - start))
            .fold(0.0, f64::max)
    }
}
