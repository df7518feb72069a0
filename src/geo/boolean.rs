use nalgebra::Point2;
use thiserror::Error;

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use super::{Contour, Polygon};

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("unexpected geometry: boolean result shape {shape} has no contours")]
    EmptyShape{shape:usize},
    #[error("unexpected geometry: boolean result shape {shape} contour {contour} has {points} points")]
    DegenerateContour{shape:usize,contour:usize,points:usize},
}

impl Polygon {
    fn paths(&self) -> Vec<Vec<[f32;2]>> {
        self.contours()
            .map(|c| c.points.iter().map(|p|[p.x,p.y]).collect() )
            .collect()
    }
    /// The region covered by both polygons, as zero or more polygons.
    pub fn intersection(&self, other:&Polygon) -> Result<Vec<Polygon>,GeometryError> {
        if !self.aabb().overlaps(other.aabb()) { return Ok(Vec::new()) }

        let subj = self.paths();
        let clip = other.paths();
        let result = subj.overlay(&clip, OverlayRule::Intersect, FillRule::EvenOdd);

        result.into_iter()
            .enumerate()
            .map(|(shape_ndx,shape)| polygon_from_shape(shape_ndx,shape) )
            .collect()
    }
}

/// i_overlay returns every shape as [outer, hole, hole, ..]
fn polygon_from_shape(shape_ndx:usize, shape:Vec<Vec<[f32;2]>>) -> Result<Polygon,GeometryError> {
    let mut contours = shape.into_iter()
        .enumerate()
        .map(|(contour_ndx,contour)|{
            if contour.len() < 3 {
                return Err(GeometryError::DegenerateContour{
                    shape:shape_ndx,
                    contour:contour_ndx,
                    points:contour.len(),
                })
            }
            Ok(Contour::from(contour.into_iter().map(|[x,y]|Point2::new(x,y)).collect::<Vec<_>>()))
        })
        .collect::<Result<Vec<Contour>,_>>()?
        .into_iter();
    let outer_loop = contours.next().ok_or(GeometryError::EmptyShape{shape:shape_ndx})?;
    Ok(Polygon::new(outer_loop,contours.collect()))
}
