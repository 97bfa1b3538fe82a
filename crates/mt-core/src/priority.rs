//! The priority total order used for yield/assert conflict resolution.

use std::fmt;

use crate::VehicleClass;

/// Priority rank over vehicle classes plus the dynamic emergency overlay.
///
/// Lower numeric rank = higher priority.  `Emergency` is never derived from
/// a class: it is assigned only to ids the manager has registered as
/// emergency vehicles, and outranks every nominal class rank.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    Emergency    = 1,
    Bus          = 2,
    Truck        = 3,
    Car          = 4,
    AutoRickshaw = 5,
    Motorcycle   = 6,
    Bicycle      = 7,
}

impl Priority {
    /// Nominal priority of a vehicle class.  Unknown classes rank as `Car`.
    pub fn of(class: VehicleClass) -> Priority {
        match class {
            VehicleClass::Bus          => Priority::Bus,
            VehicleClass::Truck        => Priority::Truck,
            VehicleClass::Car          => Priority::Car,
            VehicleClass::AutoRickshaw => Priority::AutoRickshaw,
            VehicleClass::Motorcycle   => Priority::Motorcycle,
            VehicleClass::Bicycle      => Priority::Bicycle,
            // Fallback for classes added behind #[non_exhaustive].
            _ => Priority::Car,
        }
    }

    /// Numeric rank; lower wins.
    #[inline]
    pub fn rank(self) -> i32 {
        self as i32
    }

    /// `true` if `self` outranks `other` (strictly higher priority).
    #[inline]
    pub fn outranks(self, other: Priority) -> bool {
        self.rank() < other.rank()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Emergency    => "emergency",
            Priority::Bus          => "bus",
            Priority::Truck        => "truck",
            Priority::Car          => "car",
            Priority::AutoRickshaw => "auto_rickshaw",
            Priority::Motorcycle   => "motorcycle",
            Priority::Bicycle      => "bicycle",
        };
        f.write_str(s)
    }
}
