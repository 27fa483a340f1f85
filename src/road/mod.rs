//! Road records: scalar attributes, links, speed zones and lane sections.

mod offsets;
mod record;
mod section;

pub use offsets::LaneOffsetQueue;
pub use record::RoadRecordBuilder;
pub use section::LaneSectionAssembler;

use log::debug;

use crate::error::RoadError;
use crate::model::Road;
use crate::tree::Node;

/// Read one `road` element into a complete [`Road`].
///
/// Each road gets a fresh offset queue; a lane section without a matching
/// lane offset fails this road only.
pub fn read_road(node: Node<'_>) -> Result<Road, RoadError> {
    let mut road = RoadRecordBuilder::new(node).build();

    let lanes = node.child("lanes");
    let mut offsets = LaneOffsetQueue::from_lanes(lanes);
    road.sections = LaneSectionAssembler::new(&mut offsets)
        .assemble(lanes)
        .map_err(|kind| RoadError {
            road_id: road.id,
            kind,
        })?;

    if offsets.remaining() > 0 {
        debug!(
            "road {}: {} lane offsets left without a lane section",
            road.id,
            offsets.remaining()
        );
    }

    Ok(road)
}

/// Predecessor/successor ids read from an optional `link` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct LinkIds {
    pub predecessor: Option<i32>,
    pub successor: Option<i32>,
}

impl LinkIds {
    /// `id_attr` names the attribute holding the linked id
    /// (`elementId` for roads, `id` for lanes).
    pub fn read(link: Option<Node<'_>>, id_attr: &str) -> Self {
        let linked = |name: &str| {
            link.and_then(|link| link.child(name))
                .map(|node| node.attr_i32_or(id_attr, 0))
        };
        Self {
            predecessor: linked("predecessor"),
            successor: linked("successor"),
        }
    }
}
