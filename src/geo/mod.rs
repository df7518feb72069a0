use nalgebra::Point2;
use ordered_float::OrderedFloat;

mod aabb;
pub use aabb::*;

mod contour;
pub use contour::*;

mod polygon;
pub use polygon::*;

mod layer;
pub use layer::*;

mod points;
pub use points::*;

mod boolean;
pub use boolean::*;


/// The Enclosed trait defines that the struct encloses an area.
/// structs that implement Enclosed therefore have an interior and an exterior.
pub trait Enclosed {
    /// computes the area of the shape projected onto the xy-plane
    fn area(&self) -> f32;
    /// returns true if the point is inside the enclosed area
    fn point_is_inside(&self,point:&Point2<f32>) -> bool;
}

/// Groups loose contours into polygons with holes.
///
/// A contour contained in an even number of other contours is an outer loop,
/// otherwise it is a hole of the smallest contour that contains it.
pub fn polygons_from_contours(contours:Vec<Contour>) -> Vec<Polygon> {
    let parents:Vec<Option<usize>> = contours.iter().enumerate()
        .map(|(i,contour)|{
            let Some(test_point) = contour.points.first() else { return None };
            let containers:Vec<usize> = contours.iter()
                .enumerate()
                .filter(|(n,_)| *n != i )
                .filter(|(_,other)| other.area.abs() > contour.area.abs() )
                .filter(|(_,other)| other.point_is_inside(test_point) )
                .map(|(n,_)| n )
                .collect();
            if containers.len() % 2 == 0 { return None }
            containers.into_iter()
                .min_by_key(|n| OrderedFloat(contours[*n].area.abs()) )
        })
        .collect();

    let mut outer_loops:Vec<Option<(Contour,Vec<Contour>)>> = vec![None;contours.len()];
    let mut holes = Vec::new();
    for (i,(contour,parent)) in contours.into_iter().zip(parents).enumerate() {
        match parent {
            Some(parent) => holes.push((parent,contour)),
            None => outer_loops[i] = Some((contour,Vec::new())),
        }
    }
    for (parent,hole) in holes {
        if let Some((_,parent_holes)) = outer_loops[parent].as_mut() {
            parent_holes.push(hole);
        }
    }

    outer_loops.into_iter()
        .flatten()
        .map(|(outer_loop,holes)| Polygon::new(outer_loop,holes) )
        .collect()
}
