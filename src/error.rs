//! Error types for xodr operations.

use thiserror::Error;

use crate::model::RoadId;

/// Errors that abort a whole load or parse call.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Missing required element: OpenDRIVE")]
    MissingRoot,

    #[error("Malformed road: {0}")]
    MalformedRoad(RoadError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// The offset queue was asked for an entry after its last one was taken.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("lane offset queue exhausted after {declared} entries")]
pub struct ExhaustedQueue {
    /// Number of offsets the road declared.
    pub declared: usize,
}

/// A structural mismatch confined to a single road.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("road {road_id}: {kind}")]
pub struct RoadError {
    pub road_id: RoadId,
    pub kind: RoadErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoadErrorKind {
    /// Lane section `section_index` found no unconsumed lane offset.
    #[error("lane section {section_index} has no lane offset ({declared_offsets} declared)")]
    ExhaustedQueue {
        section_index: usize,
        declared_offsets: usize,
    },
}
