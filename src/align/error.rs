use std::fmt;
use thiserror::Error;

use crate::geo::GeometryError;

/// The alignment step an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Trace,
    MarkArea,
    Marker,
}
impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Trace => write!(f,"trace"),
            Stage::MarkArea => write!(f,"mark area"),
            Stage::Marker => write!(f,"marker"),
        }
    }
}

/// Failures local to one pair of pieces; the rest of the stack is still aligned.
#[derive(Debug, Error, PartialEq)]
pub enum AlignError {
    #[error("layer {layer:03} piece {lower} under piece {upper}: {stage} computation aborted, {source}")]
    UnexpectedGeometry{layer:usize,lower:usize,upper:usize,stage:Stage,source:GeometryError},
    #[error("layer {layer:03} piece {lower} under piece {upper}: no marker position found, left unmarked")]
    PlacementFailure{layer:usize,lower:usize,upper:usize},
}
