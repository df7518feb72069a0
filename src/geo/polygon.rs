use nalgebra::{Point2,Vector2};
use super::{Contour,AABB};
pub use super::Enclosed;

/// A filled region: a counter-clockwise outer loop and clockwise holes.
#[derive(Debug,Clone,PartialEq)]
pub struct Polygon{
    pub outer_loop: Contour,
    pub holes: Vec<Contour>,
}
impl Enclosed for Polygon {
    fn area(&self) -> f32 {
        // holes carry a negative signed area
        self.contours().map(|contour| contour.area ).sum()
    }
    fn point_is_inside(&self,point:&Point2<f32>) -> bool {
        if !self.outer_loop.point_is_inside(point) {return false}
        !self.holes.iter().any(|hole| hole.point_is_inside(point))
    }
}

impl Polygon {
    pub fn new(mut outer_loop:Contour,mut holes:Vec<Contour>)->Self{
        if outer_loop.area.is_sign_negative() {
            outer_loop.reverse_order();
        }
        for hole in holes.iter_mut() {
            if hole.area.is_sign_positive(){
                hole.reverse_order();
            }
        }
        Self{
            outer_loop,
            holes,
        }
    }
    pub fn contours(&self) -> impl Iterator<Item = &Contour> {
        std::iter::once(&self.outer_loop).chain(self.holes.iter())
    }
    pub fn aabb(&self) -> &AABB {
        &self.outer_loop.aabb
    }
    pub fn centroid(&self) -> Point2<f32> {
        let (area,moment) = self.contours()
            .map(|contour| contour.moments() )
            .fold((0.0,Vector2::zeros()),|(a,m),(area,moment)| (a+area, m+moment) );
        if area == 0.0 {
            // degenerate polygon, fall back to the vertex average
            let n = self.outer_loop.points.len().max(1) as f32;
            let sum = self.outer_loop.points.iter().fold(Vector2::zeros(),|acc,p| acc + p.coords );
            return Point2::from(sum/n)
        }
        Point2::from(moment/area)
    }
    /// Shortest distance from `point` to the outer loop or any hole.
    pub fn distance_to_boundary(&self,point:&Point2<f32>) -> f32 {
        self.contours()
            .map(|contour| contour.distance_to_edges(point) )
            .fold(f32::INFINITY, f32::min)
    }
    /// true if a disc of `radius` around `center` lies entirely inside the polygon
    pub fn contains_disc(&self,center:&Point2<f32>,radius:f32) -> bool {
        self.point_is_inside(center) && self.distance_to_boundary(center) >= radius
    }
}
