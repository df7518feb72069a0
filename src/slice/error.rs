use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SliceError {
    #[error("Classification error: triangle {triangle} matches no case against the plane at z={z} (vertex offsets {offsets:?})")]
    Classification{triangle:usize,z:f32,offsets:[f32;3]},
    #[error("Topology error: open contour at z={z}, the loop started by segment {start_segment} has no continuation at ({x}, {y}) while {unused} segments are unused")]
    Topology{z:f32,start_segment:usize,x:f32,y:f32,unused:usize},
}

impl SliceError {
    /// Classification errors point to a defect and stop the whole run,
    /// topology errors only discard the plane they occur in.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SliceError::Classification{..})
    }
}
