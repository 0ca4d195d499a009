//! Value types for places and roads.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Category reserved for regional centers unless configured otherwise.
pub const REGIONAL_CENTER: &str = "regional_center";

/// A settlement identified by its (category, name) pair.
///
/// Ordering is lexicographic on category, then name. Tie-breaking in the
/// restoration planner relies on this ordering being total and stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Place {
    pub category: String,
    pub name: String,
}

impl Place {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }

    /// Shorthand for a place in the default regional-center category.
    pub fn regional_center(name: impl Into<String>) -> Self {
        Self::new(REGIONAL_CENTER, name)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.category == category
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category, self.name)
    }
}

/// Unordered pair of places, stored with the smaller endpoint first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoadKey {
    low: Place,
    high: Place,
}

impl RoadKey {
    pub fn new(a: Place, b: Place) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn from_refs(a: &Place, b: &Place) -> Self {
        Self::new(a.clone(), b.clone())
    }

    pub fn low(&self) -> &Place {
        &self.low
    }

    pub fn high(&self) -> &Place {
        &self.high
    }

    pub fn contains(&self, place: &Place) -> bool {
        &self.low == place || &self.high == place
    }

    /// The endpoint opposite `place`, if `place` is one of the two.
    pub fn other(&self, place: &Place) -> Option<&Place> {
        if &self.low == place {
            Some(&self.high)
        } else if &self.high == place {
            Some(&self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for RoadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.low, self.high)
    }
}

/// A blocked road with the cost of reopening it.
///
/// `a` and `b` keep the order they were declared in, which is only used for
/// display. Equality, hashing and ordering go through the canonical
/// [`RoadKey`] so `(A, B, w)` and `(B, A, w)` are the same road.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedRoad {
    pub a: Place,
    pub b: Place,
    pub cost: u64,
}

impl BlockedRoad {
    pub fn new(a: Place, b: Place, cost: u64) -> Self {
        Self { a, b, cost }
    }

    pub fn key(&self) -> RoadKey {
        RoadKey::from_refs(&self.a, &self.b)
    }

    pub fn connects(&self, x: &Place, y: &Place) -> bool {
        (&self.a == x && &self.b == y) || (&self.a == y && &self.b == x)
    }

    fn canonical(&self) -> (&Place, &Place, u64) {
        if self.a <= self.b {
            (&self.a, &self.b, self.cost)
        } else {
            (&self.b, &self.a, self.cost)
        }
    }
}

impl PartialEq for BlockedRoad {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for BlockedRoad {}

impl Hash for BlockedRoad {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl PartialOrd for BlockedRoad {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BlockedRoad {
    /// Cheapest first, then by canonical endpoints.
    fn cmp(&self, other: &Self) -> Ordering {
        let (a1, b1, c1) = self.canonical();
        let (a2, b2, c2) = other.canonical();
        c1.cmp(&c2).then_with(|| a1.cmp(a2)).then_with(|| b1.cmp(b2))
    }
}

impl fmt::Display for BlockedRoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.a, self.b, self.cost)
    }
}
