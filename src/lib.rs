//! # xodr
//!
//! Reads the road layer of an OpenDRIVE document and replays it into a map
//! builder as an ordered sequence of construction calls.
//!
//! ## What is read
//!
//! - Roads: id, name, length, junction, predecessor/successor links
//! - Road types with optional speed limits
//! - Lane offsets, paired one-to-one and in order with lane sections
//! - Left and right lanes of each section with their lane links
//!
//! Junctions, geometry, elevation, objects and signals are ignored.
//!
//! ## Quick Start
//!
//! ```
//! use xodr::{CallRecorder, parse_str};
//!
//! let xodr = r#"<OpenDRIVE>
//!   <road id="1" name="Main" length="100.0" junction="-1">
//!     <lanes>
//!       <laneOffset s="0" a="0" b="0" c="0" d="0"/>
//!       <laneSection s="0">
//!         <right><lane id="-1" type="driving"/></right>
//!       </laneSection>
//!     </lanes>
//!   </road>
//! </OpenDRIVE>"#;
//!
//! let mut recorder = CallRecorder::new();
//! let report = parse_str(xodr, &mut recorder).unwrap();
//! assert_eq!(report.emitted.lanes, 1);
//! assert_eq!(recorder.calls().len(), 3);
//! ```
//!
//! ## Missing data
//!
//! Absent attributes read as zero or empty. A missing road link or junction
//! is emitted as `-1`, a missing lane link as `0`. A road with more lane
//! sections than lane offsets is skipped and reported in
//! [`ParseReport::skipped`]; the rest of the document is still emitted.

pub mod builder;
pub mod emit;
pub mod error;
pub mod model;
pub mod parser;
pub mod road;
pub mod tree;

pub use builder::{Call, CallRecorder, CubicPolynomial, MapBuilder};
pub use emit::{EmitStats, emit_roads};
pub use error::{Error, ExhaustedQueue, Result, RoadError, RoadErrorKind};
pub use model::{Lane, LaneGroups, LaneId, LaneSection, Polynomial, Road, RoadId, RoadTypeSpeed};
pub use parser::{ParseOptions, ParseReport, RoadNetwork, RoadParser, parse_str};
pub use tree::{Document, Node};
