//! Typed vehicle identifiers.
//!
//! The wire/display form is the classic `CAR_000123` string — uppercase class
//! tag plus a six-digit serial assigned sequentially per class by the
//! factory.  Internally the id is a `Copy` pair of `(class, serial)` so it
//! can be used as a `BTreeMap` key and compared without allocation; ids order
//! by class first, then serial, which keeps registry iteration stable.

use std::fmt;

use crate::VehicleClass;

/// Unique identity of one vehicle for the lifetime of the simulation.
///
/// Immutable once assigned.  The factory guarantees uniqueness by owning a
/// monotonically increasing serial counter per class.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId {
    pub class: VehicleClass,
    pub serial: u32,
}

impl VehicleId {
    #[inline]
    pub fn new(class: VehicleClass, serial: u32) -> Self {
        Self { class, serial }
    }

    /// Stable 64-bit hash of this id, used to derive per-vehicle RNG seeds.
    ///
    /// Mixes the class discriminant into the high bits so `CAR_000001` and
    /// `BUS_000001` never collide.
    pub fn seed_key(self) -> u64 {
        ((self.class as u64) << 32) | self.serial as u64
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{:06}", self.class.tag(), self.serial)
    }
}
