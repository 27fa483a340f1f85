//! Scalar road attributes, road links and speed zones.

use crate::model::{Road, RoadTypeSpeed};
use crate::tree::Node;

use super::LinkIds;

/// `junction` value marking a road outside any junction.
const NO_JUNCTION: i32 = -1;

/// Reads everything about a road except its lane sections.
pub struct RoadRecordBuilder<'a> {
    node: Node<'a>,
}

impl<'a> RoadRecordBuilder<'a> {
    pub fn new(node: Node<'a>) -> Self {
        Self { node }
    }

    /// Never fails: missing attributes fall back to zero or empty values.
    pub fn build(&self) -> Road {
        let node = self.node;
        let link = LinkIds::read(node.child("link"), "elementId");

        Road {
            id: node.attr_i32_or("id", 0),
            name: node.attr_str_or("name", "").to_string(),
            length: node.attr_f64_or("length", 0.0),
            // An absent junction reads as "not in a junction", like -1.
            junction: node.attr_i32("junction").filter(|&id| id != NO_JUNCTION),
            predecessor: link.predecessor,
            successor: link.successor,
            speed_zones: node.children("type").map(road_type).collect(),
            sections: Vec::new(),
        }
    }
}

fn road_type(node: Node<'_>) -> RoadTypeSpeed {
    let speed = node.child("speed");
    RoadTypeSpeed {
        s: node.attr_f64_or("s", 0.0),
        road_type: node.attr_str_or("type", "").to_string(),
        max_speed: speed.map_or(0.0, |speed| speed.attr_f64_or("max", 0.0)),
        unit: speed
            .map_or("", |speed| speed.attr_str_or("unit", ""))
            .to_string(),
    }
}
