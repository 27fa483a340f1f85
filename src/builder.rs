//! Map-builder boundary.
//!
//! The parser drives a [`MapBuilder`] with sentinel-encoded ids: a missing
//! road link or junction is `-1`, a missing lane link is `0`.

use serde::Serialize;

use crate::model::{LaneId, Polynomial, RoadId};

/// Road-level "none" sentinel.
pub const NO_ROAD: RoadId = -1;
/// Lane-level "none" sentinel.
pub const NO_LANE: LaneId = 0;

/// Lane-width polynomial handed to [`MapBuilder::add_road_section`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicPolynomial {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub s: f64,
}

impl From<Polynomial> for CubicPolynomial {
    fn from(p: Polynomial) -> Self {
        Self {
            a: p.a,
            b: p.b,
            c: p.c,
            d: p.d,
            s: p.s,
        }
    }
}

/// Stateful consumer of the parsed road network.
///
/// Calls arrive road by road: `add_road`, its speed zones, then for each
/// section `add_road_section` followed by that section's lanes.
pub trait MapBuilder {
    fn add_road(
        &mut self,
        id: RoadId,
        name: &str,
        length: f64,
        junction_id: RoadId,
        predecessor: RoadId,
        successor: RoadId,
    );

    fn set_road_type_speed(&mut self, road_id: RoadId, s: f64, road_type: &str, max_speed: f64, unit: &str);

    fn add_road_section(&mut self, road_id: RoadId, polynomial: CubicPolynomial);

    #[allow(clippy::too_many_arguments)]
    fn add_road_section_lane(
        &mut self,
        road_id: RoadId,
        section_index: usize,
        lane_id: LaneId,
        lane_type: &str,
        level: bool,
        predecessor: LaneId,
        successor: LaneId,
    );
}

impl<T: MapBuilder + ?Sized> MapBuilder for &mut T {
    fn add_road(
        &mut self,
        id: RoadId,
        name: &str,
        length: f64,
        junction_id: RoadId,
        predecessor: RoadId,
        successor: RoadId,
    ) {
        (**self).add_road(id, name, length, junction_id, predecessor, successor);
    }

    fn set_road_type_speed(&mut self, road_id: RoadId, s: f64, road_type: &str, max_speed: f64, unit: &str) {
        (**self).set_road_type_speed(road_id, s, road_type, max_speed, unit);
    }

    fn add_road_section(&mut self, road_id: RoadId, polynomial: CubicPolynomial) {
        (**self).add_road_section(road_id, polynomial);
    }

    fn add_road_section_lane(
        &mut self,
        road_id: RoadId,
        section_index: usize,
        lane_id: LaneId,
        lane_type: &str,
        level: bool,
        predecessor: LaneId,
        successor: LaneId,
    ) {
        (**self).add_road_section_lane(
            road_id,
            section_index,
            lane_id,
            lane_type,
            level,
            predecessor,
            successor,
        );
    }
}

/// One recorded map-builder call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum Call {
    AddRoad {
        id: RoadId,
        name: String,
        length: f64,
        junction_id: RoadId,
        predecessor: RoadId,
        successor: RoadId,
    },
    SetRoadTypeSpeed {
        road_id: RoadId,
        s: f64,
        road_type: String,
        max_speed: f64,
        unit: String,
    },
    AddRoadSection {
        road_id: RoadId,
        polynomial: CubicPolynomial,
    },
    AddRoadSectionLane {
        road_id: RoadId,
        section_index: usize,
        lane_id: LaneId,
        lane_type: String,
        level: bool,
        predecessor: LaneId,
        successor: LaneId,
    },
}

/// A [`MapBuilder`] that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct CallRecorder {
    calls: Vec<Call>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<Call> {
        self.calls
    }
}

impl MapBuilder for CallRecorder {
    fn add_road(
        &mut self,
        id: RoadId,
        name: &str,
        length: f64,
        junction_id: RoadId,
        predecessor: RoadId,
        successor: RoadId,
    ) {
        self.calls.push(Call::AddRoad {
            id,
            name: name.to_string(),
            length,
            junction_id,
            predecessor,
            successor,
        });
    }

    fn set_road_type_speed(&mut self, road_id: RoadId, s: f64, road_type: &str, max_speed: f64, unit: &str) {
        self.calls.push(Call::SetRoadTypeSpeed {
            road_id,
            s,
            road_type: road_type.to_string(),
            max_speed,
            unit: unit.to_string(),
        });
    }

    fn add_road_section(&mut self, road_id: RoadId, polynomial: CubicPolynomial) {
        self.calls.push(Call::AddRoadSection { road_id, polynomial });
    }

    fn add_road_section_lane(
        &mut self,
        road_id: RoadId,
        section_index: usize,
        lane_id: LaneId,
        lane_type: &str,
        level: bool,
        predecessor: LaneId,
        successor: LaneId,
    ) {
        self.calls.push(Call::AddRoadSectionLane {
            road_id,
            section_index,
            lane_id,
            lane_type: lane_type.to_string(),
            level,
            predecessor,
            successor,
        });
    }
}
