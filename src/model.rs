//! Intermediate representation of an OpenDRIVE road network.
//!
//! Links and junction membership are optional here; the `-1` / `0`
//! sentinels of the map-builder interface are applied only when emitting.

pub type RoadId = i32;
pub type LaneId = i32;

/// One road with its speed zones and lane sections, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub id: RoadId,
    pub name: String,
    pub length: f64,
    /// Junction the road belongs to, `None` when it is an ordinary road.
    pub junction: Option<RoadId>,
    pub predecessor: Option<RoadId>,
    pub successor: Option<RoadId>,
    pub speed_zones: Vec<RoadTypeSpeed>,
    pub sections: Vec<LaneSection>,
}

impl Road {
    /// Total lane count over all sections.
    pub fn lane_count(&self) -> usize {
        self.sections.iter().map(|s| s.lanes.len()).sum()
    }
}

/// Road type (and optional speed limit) starting at `s`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadTypeSpeed {
    pub s: f64,
    pub road_type: String,
    /// 0 when no speed is given.
    pub max_speed: f64,
    /// Empty when no speed is given.
    pub unit: String,
}

/// Cubic polynomial `a + b*ds + c*ds^2 + d*ds^3` starting at `s`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polynomial {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Polynomial {
    pub fn new(s: f64, a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { s, a, b, c, d }
    }

    /// Value at local offset `ds` from `s`.
    pub fn evaluate(&self, ds: f64) -> f64 {
        ((self.d * ds + self.c) * ds + self.b) * ds + self.a
    }

    /// The same coefficients re-anchored at `s`.
    pub fn rebased(&self, s: f64) -> Self {
        Self { s, ..*self }
    }
}

/// A lane section. Its polynomial carries the section's own `s` and the
/// coefficients of the lane offset paired with it.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneSection {
    pub polynomial: Polynomial,
    pub lanes: LaneGroups,
}

/// Left and right lanes of a section, each in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaneGroups {
    pub left: Vec<Lane>,
    pub right: Vec<Lane>,
}

impl LaneGroups {
    /// Merged lane order: every left lane, then every right lane.
    pub fn iter(&self) -> impl Iterator<Item = &Lane> {
        self.left.iter().chain(self.right.iter())
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> IntoIterator for &'a LaneGroups {
    type Item = &'a Lane;
    type IntoIter = std::iter::Chain<std::slice::Iter<'a, Lane>, std::slice::Iter<'a, Lane>>;

    fn into_iter(self) -> Self::IntoIter {
        self.left.iter().chain(self.right.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    /// Positive left of the reference line, negative right of it.
    pub id: LaneId,
    pub lane_type: String,
    pub level: bool,
    pub predecessor: Option<LaneId>,
    pub successor: Option<LaneId>,
}
