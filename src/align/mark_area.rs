use log::warn;

use crate::geo::{GeometryError, Polygon};
use super::{AlignError, MarkArea, Piece, Stage};

/// Intersects the traces of every lower piece with the traces of the upper
/// pieces they came from. What remains is covered by two layers and hidden
/// in the assembled model. Returns the number of mark areas added.
pub fn resolve_mark_areas(layer_nr:usize, lower:&mut [Piece], upper:&[Piece], errors:&mut Vec<AlignError>) -> usize {
    let mut count = 0;
    for (lower_ndx,piece) in lower.iter_mut().enumerate() {
        for upper_ndx in piece.upper_neighbours() {
            let above = &upper[upper_ndx];
            let pair:Result<Vec<Vec<Polygon>>,GeometryError> = piece.traces.iter()
                .filter(|trace| trace.upper == upper_ndx )
                .flat_map(|trace| above.traces.iter().map(move |upper_trace| (trace,upper_trace)) )
                .map(|(trace,upper_trace)| trace.shape.intersection(&upper_trace.shape) )
                .collect();

            match pair {
                Ok(parts) => {
                    let areas:Vec<MarkArea> = parts.into_iter()
                        .flatten()
                        .map(|shape| MarkArea{upper:upper_ndx, shape})
                        .collect();
                    count += areas.len();
                    piece.mark_areas.extend(areas);
                },
                Err(source) => {
                    let err = AlignError::UnexpectedGeometry{
                        layer:layer_nr,
                        lower:lower_ndx,
                        upper:upper_ndx,
                        stage:Stage::MarkArea,
                        source,
                    };
                    warn!("{err}");
                    errors.push(err);
                },
            }
        }
    }
    count
}
