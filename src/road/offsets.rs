//! Per-road FIFO of declared lane offsets.

use std::collections::VecDeque;

use log::trace;

use crate::error::ExhaustedQueue;
use crate::model::Polynomial;
use crate::tree::Node;

/// Lane offsets of one road, consumed one per lane section in declaration order.
#[derive(Debug, Clone, Default)]
pub struct LaneOffsetQueue {
    pending: VecDeque<Polynomial>,
    declared: usize,
}

impl LaneOffsetQueue {
    /// Collect the `laneOffset` children of a road's `lanes` element.
    pub fn from_lanes(lanes: Option<Node<'_>>) -> Self {
        lanes
            .into_iter()
            .flat_map(|lanes| lanes.children("laneOffset"))
            .map(|node| {
                Polynomial::new(
                    node.attr_f64_or("s", 0.0),
                    node.attr_f64_or("a", 0.0),
                    node.attr_f64_or("b", 0.0),
                    node.attr_f64_or("c", 0.0),
                    node.attr_f64_or("d", 0.0),
                )
            })
            .collect()
    }

    /// Remove and return the oldest offset.
    pub fn take_next(&mut self) -> Result<Polynomial, ExhaustedQueue> {
        let next = self.pending.pop_front().ok_or(ExhaustedQueue {
            declared: self.declared,
        })?;
        trace!(
            "took lane offset {} of {} (s={})",
            self.declared - self.pending.len(),
            self.declared,
            next.s
        );
        Ok(next)
    }

    /// Offsets not yet consumed.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FromIterator<Polynomial> for LaneOffsetQueue {
    fn from_iter<I: IntoIterator<Item = Polynomial>>(iter: I) -> Self {
        let pending: VecDeque<_> = iter.into_iter().collect();
        Self {
            declared: pending.len(),
            pending,
        }
    }
}
