use log::debug;
use nalgebra::Point2;

use crate::geo::Contour;
use super::{Segment, SliceError};

/// A chain of segments. Only well formed once `closed` is set.
#[derive(Debug,Clone,PartialEq)]
pub struct Loop{
    pub points: Vec<Point2<f32>>,
    pub closed: bool,
}

impl Loop {
    fn new(first:&Segment) -> Self {
        Self{
            points: vec![first.start, first.end],
            closed: false,
        }
    }
    pub fn start(&self) -> Point2<f32> {
        self.points[0]
    }
    /// The open end of the chain
    pub fn search_point(&self) -> Point2<f32> {
        self.points[self.points.len()-1]
    }
    fn add_point(&mut self, point:Point2<f32>, max_err:f32){
        debug_assert!(!self.closed,"adding a point to a closed loop");
        self.points.push(point);
        if within(&point, &self.start(), max_err) {
            self.closed = true;
        }
    }
    /// Converts the loop into a contour, dropping the closing point that
    /// repeats the start.
    pub fn into_contour(mut self, max_err:f32) -> Contour {
        if self.points.len() > 1 && within(&self.search_point(), &self.start(), max_err) {
            self.points.pop();
        }
        Contour::from(self.points)
    }
}

fn within(a:&Point2<f32>, b:&Point2<f32>, max_err:f32) -> bool {
    (a.x - b.x).abs() < max_err && (a.y - b.y).abs() < max_err
}

/// Chains an unordered set of segments into closed loops.
///
/// The continuation of a loop is the first unused segment, in slice order,
/// with an endpoint within `max_err` of the loop's open end. The start point
/// of a segment is tested before its end point. When several segments
/// qualify the first one wins, so loose tolerances can pick a different
/// topology than the mesh had.
pub fn assemble_loops(segments:&[Segment], max_err:f32, z:f32) -> Result<Vec<Loop>,SliceError> {
    let mut used = vec![false; segments.len()];
    let mut loops = Vec::new();

    while let Some(start_segment) = used.iter().position(|used| !used) {
        used[start_segment] = true;
        let mut current_loop = Loop::new(&segments[start_segment]);

        while !current_loop.closed {
            let search_point = current_loop.search_point();
            let next = segments.iter()
                .enumerate()
                .filter(|(ndx,_)| !used[*ndx] )
                .find_map(|(ndx,segment)|{
                    if within(&segment.start, &search_point, max_err) { Some((ndx,segment.end)) }
                    else if within(&segment.end, &search_point, max_err) { Some((ndx,segment.start)) }
                    else { None }
                });

            match next {
                Some((ndx,point)) => {
                    used[ndx] = true;
                    current_loop.add_point(point, max_err);
                },
                None => {
                    let unused = used.iter().filter(|used| !**used).count();
                    if unused > 0 {
                        return Err(SliceError::Topology{
                            z,
                            start_segment,
                            x: search_point.x,
                            y: search_point.y,
                            unused,
                        })
                    }
                    debug!("z={z}: all segments used, force closing loop started by segment {start_segment}");
                    current_loop.closed = true;
                },
            }
        }
        loops.push(current_loop);
    }
    Ok(loops)
}
