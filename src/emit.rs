//! Emission of parsed roads into a [`MapBuilder`].

use log::debug;

use crate::builder::{MapBuilder, NO_LANE, NO_ROAD};
use crate::model::Road;

/// Counts of what was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitStats {
    pub roads: usize,
    pub speed_zones: usize,
    pub sections: usize,
    pub lanes: usize,
}

/// Issue the construction calls for `roads`, in order.
///
/// Per road: the road, its speed zones, then each section followed by its
/// lanes. Section indices restart at zero for every road.
pub fn emit_roads<B: MapBuilder + ?Sized>(roads: &[Road], builder: &mut B) -> EmitStats {
    let mut stats = EmitStats::default();

    for road in roads {
        builder.add_road(
            road.id,
            &road.name,
            road.length,
            road.junction.unwrap_or(NO_ROAD),
            road.predecessor.unwrap_or(NO_ROAD),
            road.successor.unwrap_or(NO_ROAD),
        );

        for zone in &road.speed_zones {
            builder.set_road_type_speed(road.id, zone.s, &zone.road_type, zone.max_speed, &zone.unit);
        }

        for (index, section) in road.sections.iter().enumerate() {
            builder.add_road_section(road.id, section.polynomial.into());

            for lane in &section.lanes {
                builder.add_road_section_lane(
                    road.id,
                    index,
                    lane.id,
                    &lane.lane_type,
                    lane.level,
                    lane.predecessor.unwrap_or(NO_LANE),
                    lane.successor.unwrap_or(NO_LANE),
                );
            }
        }

        debug!(
            "emitted road {} ({} sections, {} lanes)",
            road.id,
            road.sections.len(),
            road.lane_count()
        );

        stats.roads += 1;
        stats.speed_zones += road.speed_zones.len();
        stats.sections += road.sections.len();
        stats.lanes += road.lane_count();
    }

    stats
}
