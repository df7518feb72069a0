use log::warn;

use crate::geo::{GeometryError, Polygon};
use super::{AlignError, Piece, Stage, Trace};

/// Records on every lower piece the footprints of the upper pieces resting on it.
/// Returns the number of traces added.
pub fn trace_layers(layer_nr:usize, lower:&mut [Piece], upper:&[Piece], errors:&mut Vec<AlignError>) -> usize {
    trace_layers_with(layer_nr, lower, upper, errors, Polygon::intersection)
}

/// `trace_layers` with the polygon intersection passed in.
pub(super) fn trace_layers_with<F>(
    layer_nr:usize,
    lower:&mut [Piece],
    upper:&[Piece],
    errors:&mut Vec<AlignError>,
    intersect:F,
    ) -> usize
where F: Fn(&Polygon,&Polygon) -> Result<Vec<Polygon>,GeometryError>
{
    let mut count = 0;
    for (lower_ndx,piece) in lower.iter_mut().enumerate() {
        for (upper_ndx,above) in upper.iter().enumerate() {
            match intersect(&piece.shape, &above.shape) {
                Ok(parts) => {
                    count += parts.len();
                    piece.traces.extend(parts.into_iter().map(|shape| Trace{upper:upper_ndx, shape}));
                },
                Err(source) => {
                    let err = AlignError::UnexpectedGeometry{
                        layer:layer_nr,
                        lower:lower_ndx,
                        upper:upper_ndx,
                        stage:Stage::Trace,
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
