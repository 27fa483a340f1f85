//! Lane section assembly: pairs each section with its lane offset and
//! merges the left and right lane groups.

use log::trace;

use crate::error::RoadErrorKind;
use crate::model::{Lane, LaneGroups, LaneId, LaneSection};
use crate::tree::Node;

use super::LinkIds;
use super::offsets::LaneOffsetQueue;

const DEFAULT_LANE_TYPE: &str = "none";
const CENTER_LANE: LaneId = 0;

/// Builds the lane sections of one road from its `lanes` element.
pub struct LaneSectionAssembler<'q> {
    offsets: &'q mut LaneOffsetQueue,
}

impl<'q> LaneSectionAssembler<'q> {
    pub fn new(offsets: &'q mut LaneOffsetQueue) -> Self {
        Self { offsets }
    }

    /// Assemble every `laneSection` in document order.
    ///
    /// Fails on the first section that finds the offset queue empty.
    pub fn assemble(&mut self, lanes: Option<Node<'_>>) -> Result<Vec<LaneSection>, RoadErrorKind> {
        let mut sections = Vec::new();
        for (index, node) in lanes
            .into_iter()
            .flat_map(|lanes| lanes.children("laneSection"))
            .enumerate()
        {
            sections.push(self.section(index, node)?);
        }
        Ok(sections)
    }

    fn section(&mut self, index: usize, node: Node<'_>) -> Result<LaneSection, RoadErrorKind> {
        let s = node.attr_f64_or("s", 0.0);

        let offset = self
            .offsets
            .take_next()
            .map_err(|e| RoadErrorKind::ExhaustedQueue {
                section_index: index,
                declared_offsets: e.declared,
            })?;

        // Center lanes carry no topology and are not recorded, wherever they appear.
        Ok(LaneSection {
            polynomial: offset.rebased(s),
            lanes: LaneGroups {
                left: lane_group(node.child("left")),
                right: lane_group(node.child("right")),
            },
        })
    }
}

fn lane_group(group: Option<Node<'_>>) -> Vec<Lane> {
    group
        .into_iter()
        .flat_map(|group| group.children("lane"))
        .map(lane)
        .filter(|lane| {
            if lane.id == CENTER_LANE {
                trace!("dropping center lane (type {}) outside <center>", lane.lane_type);
            }
            lane.id != CENTER_LANE
        })
        .collect()
}

fn lane(node: Node<'_>) -> Lane {
    let link = LinkIds::read(node.child("link"), "id");
    Lane {
        id: node.attr_i32_or("id", 0),
        lane_type: node.attr_str_or("type", DEFAULT_LANE_TYPE).to_string(),
        level: node.attr_bool_or("level", false),
        predecessor: link.predecessor,
        successor: link.successor,
    }
}
