//! # Geographic coordinates
//!
//! A latitude/longitude pair is hashed to a single nonnegative integer by
//! running an independent 25-step binary-space partition over each axis and
//! interleaving the decision bits: longitude bits occupy the odd positions,
//! latitude bits the even ones, with the first bisection of each axis at the
//! top of its stream. The hash is lossy; unhashing returns the midpoint of
//! the final subinterval, within about 1e-5 degrees of the input.

/// Bisection steps per axis. A constant of the wire format.
const PRECISION: u32 = 25;

/// A geographic coordinate pair.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct LatLon {
    /// Latitude in degrees, within [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, within [-180, 180].
    pub lon: f64,
}

impl LatLon {
    /// Creates a new `LatLon`.
    pub fn new(lat: f64, lon: f64) -> LatLon { LatLon { lat, lon } }

    /// Interleaves the two bisection streams into a 50-bit hash.
    pub(crate) fn hash(&self) -> u64 {
        let mut h = 0u64;
        let (mut lat_lo, mut lat_hi) = (-90.0f64, 90.0);
        let (mut lon_lo, mut lon_hi) = (-180.0f64, 180.0);
        for step in (0..PRECISION).rev() {
            let mid = (lat_lo + lat_hi) / 2.0;
            if self.lat > mid {
                h |= 1 << (2 * step);
                lat_lo = mid;
            } else {
                lat_hi = mid;
            }
            let mid = (lon_lo + lon_hi) / 2.0;
            if self.lon > mid {
                h |= 1 << (2 * step + 1);
                lon_lo = mid;
            } else {
                lon_hi = mid;
            }
        }
        h
    }

    /// Reverses [`hash`](LatLon::hash), returning the midpoint of the final
    /// subinterval on each axis.
    pub(crate) fn from_hash(h: u64) -> LatLon {
        let (mut lat_lo, mut lat_hi) = (-90.0f64, 90.0);
        let (mut lon_lo, mut lon_hi) = (-180.0f64, 180.0);
        for step in (0..PRECISION).rev() {
            let mid = (lat_lo + lat_hi) / 2.0;
            if h >> (2 * step) & 1 == 1 {
                lat_lo = mid;
            } else {
                lat_hi = mid;
            }
            let mid = (lon_lo + lon_hi) / 2.0;
            if h >> (2 * step + 1) & 1 == 1 {
                lon_lo = mid;
            } else {
                lon_hi = mid;
            }
        }
        LatLon {
            lat: (lat_lo + lat_hi) / 2.0,
            lon: (lon_lo + lon_hi) / 2.0,
        }
    }
}
