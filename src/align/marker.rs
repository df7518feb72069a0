use nalgebra::{distance, Point2, Vector2};
use std::f32::consts::PI;

use crate::geo::{Contour, Enclosed, GeometryError, Polygon};
use super::{Marker, Piece};

/// The marker outline: a pentagon with circumradius `r`, pointing up.
pub fn marker_shape(center:Point2<f32>, r:f32) -> Contour {
    Contour::regular(center, r, 5, PI/2.0)
}

/// An accepted marker position and the number of points tested to find it.
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Candidate{
    pub point: Point2<f32>,
    pub attempts: usize,
}

fn is_legal(test_area:&Polygon, occupied:&[Point2<f32>], r:f32, point:&Point2<f32>) -> bool {
    test_area.contains_disc(point, r) &&
    occupied.iter().all(|other| distance(other, point) > 2.0*r)
}

/// Looks for a point in `test_area` where a disc of radius `r` fits and that
/// keeps more than `2r` from every `occupied` point.
///
/// The centroid is tried first, then rings around it with radii r, 2r, ..
/// sampled every `r` of arc length. Areas too small to hold the disc are
/// rejected without sampling, as is a radius that is not a positive number.
pub fn find_marker_point(test_area:&Polygon, occupied:&[Point2<f32>], r:f32) -> Option<Candidate> {
    if !(r.is_finite() && r > 0.0) { return None }
    if test_area.area() <= PI*r*r { return None }

    let centroid = test_area.centroid();
    let mut attempts = 1;
    if is_legal(test_area, occupied, r, &centroid) {
        return Some(Candidate{point:centroid, attempts})
    }

    let max_bound = test_area.aabb().max_extent();
    for ring in (1usize..).take_while(|n| (*n as f32)*r < max_bound - 2.0*r) {
        let d = (ring as f32)*r;
        let samples = (2.0*PI*d/r).ceil() as usize;
        for k in 0..samples {
            let theta = (k as f32)*r/d;
            let point = centroid + Vector2::new(theta.cos(), theta.sin())*d;
            if !test_area.point_is_inside(&point) { continue }
            attempts += 1;
            if is_legal(test_area, occupied, r, &point) {
                return Some(Candidate{point, attempts})
            }
        }
    }
    None
}

/// Tries the mark areas the lower piece shares with `upper` until a marker
/// fits. The marker is engraved on the lower piece and cut out of the upper
/// one at the same spot. Returns the accepted candidate, None when every
/// mark area was exhausted.
pub fn place_marker(
    lower:&mut Piece,
    lower_ndx:usize,
    upper:&mut Piece,
    upper_ndx:usize,
    occupied:&[Point2<f32>],
    r:f32,
    ) -> Result<Option<Candidate>,GeometryError> {
    for mark_area in lower.mark_areas.iter().filter(|area| area.upper == upper_ndx) {
        for test_area in mark_area.shape.intersection(&upper.shape)? {
            let Some(candidate) = find_marker_point(&test_area, occupied, r) else { continue };
            let center = candidate.point;
            let shape = marker_shape(center, r);
            upper.cutouts.push(Marker{partner:lower_ndx, center, shape:shape.clone()});
            lower.marks.push(Marker{partner:upper_ndx, center, shape});
            return Ok(Some(candidate))
        }
    }
    Ok(None)
}
