//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in decimal degrees.
///
/// Equality is structural. Use [`Coordinate::key`] when a coordinate needs
/// to participate in a hash key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns the hashable key for this coordinate.
    pub fn key(&self) -> CoordKey {
        CoordKey::from(*self)
    }

    /// Planar distance in degrees.
    ///
    /// Only meaningful for comparing points that are close together.
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Bit-exact, hashable form of a [`Coordinate`].
///
/// `-0.0` is folded into `0.0` so the two compare equal, matching `f64`
/// equality. Every other distinct value produces a distinct key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey([u64; 2]);

impl CoordKey {
    fn bits(value: f64) -> u64 {
        (value + 0.0).to_bits()
    }
}

impl From<Coordinate> for CoordKey {
    fn from(c: Coordinate) -> Self {
        CoordKey([Self::bits(c.latitude), Self::bits(c.longitude)])
    }
}

impl fmt::Display for CoordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}",
            f64::from_bits(self.0[0]),
            f64::from_bits(self.0[1])
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        assert_eq!(Coordinate::new(55.86, -4.24), Coordinate::new(55.86, -4.24));
        assert_ne!(Coordinate::new(55.86, -4.24), Coordinate::new(-4.24, 55.86));
    }

    #[test]
    fn negative_zero_shares_key() {
        let a = Coordinate::new(0.0, 1.0).key();
        let b = Coordinate::new(-0.0, 1.0).key();
        assert_eq!(a, b);
    }

    #[test]
    fn swapped_components_differ() {
        assert_ne!(
            Coordinate::new(1.0, 2.0).key(),
            Coordinate::new(2.0, 1.0).key()
        );
    }

    #[test]
    fn key_display() {
        assert_eq!(Coordinate::new(1.5, -2.0).key().to_string(), "1.5,-2");
    }

    #[test]
    fn planar_distance() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(3.0, 4.0);
        assert!((a.planar_distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn serde_field_names() {
        let json = serde_json::to_string(&Coordinate::new(1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"latitude":1.0,"longitude":2.0}"#);
    }
}
