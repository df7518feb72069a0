use super::{Contour, Polygon, Enclosed, polygons_from_contours};

/// The polygons cut out of one sheet, at the height of its cutting plane.
#[derive(Debug,Clone,PartialEq)]
pub struct Layer{
    pub z: f32,
    pub polygons: Vec<Polygon>,
}

impl Layer{
    pub fn new(z:f32, polygons:Vec<Polygon>) -> Self {
        Self{ z, polygons }
    }
    /// Cleans the contours of collinear points, drops the ones left without
    /// area and sorts the rest into polygons with holes.
    pub fn from_contours(z:f32, contours:Vec<Contour>, min_area:f32) -> Self {
        let contours = contours.into_iter()
            .map(|mut contour|{ contour.simplify(min_area); contour })
            .filter(|contour| contour.area.abs() > min_area )
            .collect();
        Self{ z, polygons: polygons_from_contours(contours) }
    }
    pub fn area(&self) -> f32 {
        self.polygons.iter().map(|polygon| polygon.area() ).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
