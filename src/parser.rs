//! Road network parsing: document -> [`RoadNetwork`] -> [`MapBuilder`] calls.

use log::{debug, warn};

use crate::builder::MapBuilder;
use crate::emit::{EmitStats, emit_roads};
use crate::error::{Error, Result, RoadError};
use crate::model::Road;
use crate::road::read_road;
use crate::tree::Document;

const ROOT_ELEMENT: &str = "OpenDRIVE";

/// Parser options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail the whole call on the first malformed road instead of skipping it.
    pub strict: bool,
}

/// Roads read from a document, plus the roads that had to be dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadNetwork {
    pub roads: Vec<Road>,
    pub skipped: Vec<RoadError>,
}

/// Outcome of a successful [`RoadParser::parse`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub emitted: EmitStats,
    pub skipped: Vec<RoadError>,
}

impl ParseReport {
    /// True when every road in the document was emitted.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoadParser {
    options: ParseOptions,
}

impl RoadParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Read every road of the document into memory.
    ///
    /// Roads with a lane section/offset mismatch are left out and listed in
    /// [`RoadNetwork::skipped`], unless the parser is strict.
    pub fn read_roads(&self, doc: &Document) -> Result<RoadNetwork> {
        let root = doc.child(ROOT_ELEMENT).ok_or(Error::MissingRoot)?;
        let mut network = RoadNetwork::default();

        for node in root.children("road") {
            match read_road(node) {
                Ok(road) => {
                    debug!(
                        "read road {} '{}' ({} speed zones, {} sections)",
                        road.id,
                        road.name,
                        road.speed_zones.len(),
                        road.sections.len()
                    );
                    network.roads.push(road);
                }
                Err(e) if self.options.strict => return Err(Error::MalformedRoad(e)),
                Err(e) => {
                    warn!("skipping {e}");
                    network.skipped.push(e);
                }
            }
        }

        Ok(network)
    }

    /// Read the document and drive `builder` with the result.
    ///
    /// Nothing reaches the builder unless the whole document was read.
    pub fn parse<B: MapBuilder + ?Sized>(&self, doc: &Document, builder: &mut B) -> Result<ParseReport> {
        let network = self.read_roads(doc)?;
        let emitted = emit_roads(&network.roads, builder);
        Ok(ParseReport {
            emitted,
            skipped: network.skipped,
        })
    }
}

/// Parse an OpenDRIVE string with default options.
pub fn parse_str<B: MapBuilder + ?Sized>(content: &str, builder: &mut B) -> Result<ParseReport> {
    let doc = Document::parse(content)?;
    RoadParser::new().parse(&doc, builder)
}
