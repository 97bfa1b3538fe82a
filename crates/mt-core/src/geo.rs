//! Cartesian coordinate type and spatial utilities.
//!
//! The engine receives positions from an external physics layer in a local
//! metric frame (metres).  Interaction and congestion geometry is planar:
//! only x/y participate in distances and grid keys, z is carried through for
//! consumers that render in 3D.

/// A 3D point in the external driver's metric frame.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point on the ground plane (z = 0).
    #[inline]
    pub fn ground(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance in the x/y plane, metres.
    ///
    /// Symmetric by construction: `a.planar_distance(b) == b.planar_distance(a)`.
    #[inline]
    pub fn planar_distance(self, other: Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` when every coordinate is a finite number.
    ///
    /// NaN or infinite coordinates would silently corrupt congestion grid
    /// keys, so the registration boundary rejects them up front.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::fmt::Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
