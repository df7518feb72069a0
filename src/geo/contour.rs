use nalgebra::{Point2,Vector2};
use nalgebra_glm::cross2d;
use std::f32::consts::PI;

use super::Enclosed;
use super::AABB;

#[derive(Debug,Clone,PartialEq)]
pub struct Contour{
    pub area:f32,
    pub aabb:AABB,
    pub points: Vec<Point2<f32>>
}
impl Enclosed for Contour{
    fn area(&self) -> f32 {
        self.area
    }
    fn point_is_inside(&self,point:&Point2<f32>)->bool{
        // returns true if a point is inside the contour
        if !self.aabb.point_is_inside(point) { return false }

        let intersections: usize = self.edges()
            .filter(|(p1,p2)|{
                // special case: a ray running along a horizontal edge does not cross it
                let ray_is_parallel_to_the_line = (point.y == p1.y) && (point.y == p2.y);
                // check if the ray will intersect the line
                let ray_crosses_the_edge = (p1.y <= point.y) != (p2.y <= point.y);
                if ray_is_parallel_to_the_line || !ray_crosses_the_edge { return false }
                // check if the intersection point is on the correct side of the point
                point.x <= ((point.y-p1.y)*(p2.x-p1.x)/(p2.y-p1.y) + p1.x)
            })
            .count();
        intersections % 2 == 1
    }
}
impl From<Vec<Point2<f32>>> for Contour {
    fn from(points:Vec<Point2<f32>>) -> Self {
        let aabb = AABB::from_points(points.iter());
        let area = points.iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(p1,p2)| p1.x*p2.y - p2.x*p1.y )
            .sum::<f32>();

        Self{
            area: area/2.0,
            aabb,
            points,
        }
    }
}

impl Contour {
    /// Regular n-gon with its first vertex at `phase` radians from the x-axis.
    pub fn regular(center:Point2<f32>, radius:f32, sides:usize, phase:f32) -> Self {
        let step = 2.0*PI/(sides as f32);
        Self::from(
            (0..sides)
                .map(|i| phase + step*(i as f32) )
                .map(|a| center + Vector2::new(a.cos(),a.sin())*radius )
                .collect::<Vec<_>>()
        )
    }
    pub fn reverse_order(&mut self) {
        self.points.reverse();
        self.area = self.area * -1.0;
    }
    /// returns a iterator over the edges (pairs of points) of the closed contour
    pub fn edges(&self) -> impl Iterator<Item = (&Point2<f32>,&Point2<f32>)>{
        let points = self.points.iter();
        let points_offset_by_one = points.clone().cycle().skip(1);
        points.zip(points_offset_by_one)
    }
    /// Removes points spanning a triangle with its neighbours smaller than `min_a`,
    /// which drops collinear points left over from segment chaining.
    pub fn simplify(&mut self, min_a:f32){
        let len = self.points.len();
        for i in (0..len).rev(){
            if self.points.len() < 3 { break }
            let i_pluss = (i+1)%self.points.len();
            let i_minus = if i == 0 {self.points.len()-1}else{i-1};

            let p = self.points[i];
            let v1 = self.points[i_pluss] - p;
            let v2 = self.points[i_minus] - p;

            let area_x2 = cross2d(&v1, &v2);
            if area_x2.abs() < min_a*2. {self.points.remove(i);}
        }
        if self.points.len() < 3 {self.points.clear();}
        *self = Contour::from(std::mem::take(&mut self.points));
    }
    /// Shortest distance from `point` to any edge of the contour.
    pub fn distance_to_edges(&self,point:&Point2<f32>) -> f32 {
        self.edges()
            .map(|(p1,p2)| distance_to_segment(point, p1, p2) )
            .fold(f32::INFINITY, f32::min)
    }
    /// The area weighted sum used for centroids: (signed area, first moment)
    pub(super) fn moments(&self) -> (f32,Vector2<f32>) {
        let moment = self.edges()
            .map(|(p1,p2)|{
                let cross = p1.x*p2.y - p2.x*p1.y;
                Vector2::new((p1.x+p2.x)*cross,(p1.y+p2.y)*cross)
            })
            .fold(Vector2::zeros(), |acc,m| acc + m );
        (self.area, moment/6.0)
    }
}

pub fn distance_to_segment(point:&Point2<f32>,a:&Point2<f32>,b:&Point2<f32>) -> f32 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 { return (point - a).norm() }
    let t = ((point - a).dot(&ab)/len_sq).clamp(0.0,1.0);
    (point - (a + ab*t)).norm()
}

#[macro_export]
macro_rules! contour {
    ( $( [$x:expr, $y:expr] ),* ) => {
        $crate::geo::Contour::from(vec![
            $(
                nalgebra::Point2::new($x,$y),
            )*
        ])
    };
}
