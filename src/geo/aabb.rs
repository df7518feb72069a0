use nalgebra::Point2;

use super::Enclosed;

/// Axis Aligned Bounding Box
#[derive(Debug,Clone,PartialEq)]
pub struct AABB{
    pub x_max:f32,
    pub x_min:f32,
    pub y_max:f32,
    pub y_min:f32,
}
impl Enclosed for AABB {
    fn area(&self) -> f32 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }
    fn point_is_inside(&self,point:&Point2<f32>) -> bool {
        self.x_min <= point.x && point.x <= self.x_max &&
        self.y_min <= point.y && point.y <= self.y_max
    }
}
impl AABB {
    pub fn from_points<'a>(points:impl IntoIterator<Item = &'a Point2<f32>>) -> Self {
        points.into_iter().fold(
            AABB{
                x_max: f32::NEG_INFINITY,
                x_min: f32::INFINITY,
                y_max: f32::NEG_INFINITY,
                y_min: f32::INFINITY,
            },
            |mut aabb,point|{
                aabb.x_max = aabb.x_max.max(point.x);
                aabb.x_min = aabb.x_min.min(point.x);
                aabb.y_max = aabb.y_max.max(point.y);
                aabb.y_min = aabb.y_min.min(point.y);
                aabb
            })
    }
    /// true if the two boxes share at least one point
    pub fn overlaps(&self,other:&AABB) -> bool {
        self.x_min <= other.x_max && other.x_min <= self.x_max &&
        self.y_min <= other.y_max && other.y_min <= self.y_max
    }
    pub fn width(&self) -> f32 { self.x_max - self.x_min }
    pub fn height(&self) -> f32 { self.y_max - self.y_min }
    /// length of the longest side
    pub fn max_extent(&self) -> f32 { self.width().max(self.height()) }
}
