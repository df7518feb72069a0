use std::collections::HashMap;

use log::{debug, info, warn};
use nalgebra::Point2;

use crate::geo::{Contour, Layer, Polygon};
use crate::settings::Settings;

mod error;
pub use error::{AlignError, Stage};

mod trace;
pub use trace::trace_layers;

mod mark_area;
pub use mark_area::resolve_mark_areas;

mod marker;
pub use marker::{Candidate, find_marker_point, marker_shape, place_marker};


/// Footprint of the piece `upper` (index in the layer above) on a piece.
#[derive(Debug,Clone,PartialEq)]
pub struct Trace{
    pub upper: usize,
    pub shape: Polygon,
}

/// Part of a trace that is also covered by a trace of the piece above it,
/// i.e. hidden under two layers.
#[derive(Debug,Clone,PartialEq)]
pub struct MarkArea{
    pub upper: usize,
    pub shape: Polygon,
}

/// A placed marker. `partner` is the index of the piece holding the matching
/// shape: the piece above for a mark, the piece below for a cutout.
#[derive(Debug,Clone,PartialEq)]
pub struct Marker{
    pub partner: usize,
    pub center: Point2<f32>,
    pub shape: Contour,
}

/// One polygon of a layer together with its alignment annotations.
#[derive(Debug,Clone,PartialEq)]
pub struct Piece{
    pub shape: Polygon,
    pub traces: Vec<Trace>,
    pub mark_areas: Vec<MarkArea>,
    pub marks: Vec<Marker>,
    pub cutouts: Vec<Marker>,
    pub stack_line: usize,
}

impl Piece {
    pub fn new(shape:Polygon) -> Self {
        Self{
            shape,
            traces: Vec::new(),
            mark_areas: Vec::new(),
            marks: Vec::new(),
            cutouts: Vec::new(),
            stack_line: 0,
        }
    }
    /// indices of the pieces above that leave a trace, in order of appearance
    pub fn upper_neighbours(&self) -> Vec<usize> {
        dedup(self.traces.iter().map(|trace| trace.upper))
    }
    /// indices of the pieces above that share a mark area with this one
    pub fn marked_neighbours(&self) -> Vec<usize> {
        dedup(self.mark_areas.iter().map(|area| area.upper))
    }
    pub fn is_marked(&self) -> bool {
        !self.marks.is_empty()
    }
    /// centres of all marks and cutouts on this piece
    pub fn marker_points(&self) -> impl Iterator<Item = &Point2<f32>> {
        self.marks.iter().chain(self.cutouts.iter()).map(|marker| &marker.center)
    }
}

fn dedup(ndxes:impl Iterator<Item = usize>) -> Vec<usize> {
    let mut unique = Vec::new();
    for ndx in ndxes {
        if !unique.contains(&ndx) { unique.push(ndx) }
    }
    unique
}

#[derive(Debug,Clone,PartialEq)]
pub struct StackLayer{
    pub z: f32,
    pub pieces: Vec<Piece>,
}

/// The layers of the model from the bottom up.
#[derive(Debug,Clone,PartialEq)]
pub struct Stack{
    pub layers: Vec<StackLayer>,
}

/// Summary of an alignment run. Every failure is kept in `errors`.
#[derive(Debug,Default)]
pub struct AlignReport{
    pub traces: usize,
    pub mark_areas: usize,
    pub markers: usize,
    pub errors: Vec<AlignError>,
}

impl Stack {
    pub fn from_layers(layers:Vec<Layer>) -> Self {
        Self{
            layers: layers.into_iter()
                .map(|layer| StackLayer{
                    z: layer.z,
                    pieces: layer.polygons.into_iter().map(Piece::new).collect(),
                })
                .collect()
        }
    }

    /// Runs the alignment stages enabled in the settings, bottom layer first.
    pub fn align(&mut self, s:&Settings) -> AlignReport {
        let mut report = AlignReport::default();
        if !s.traces { return report }

        self.trace(&mut report);
        self.assign_stack_lines();
        if s.markers || s.mark_areas {
            self.resolve_mark_areas(&mut report);
        }
        if s.markers {
            self.place_markers(s.marker_radius, &mut report);
        }
        info!("{} traces, {} mark areas, {} markers, {} problems",
            report.traces, report.mark_areas, report.markers, report.errors.len());
        report
    }

    pub fn trace(&mut self, report:&mut AlignReport) {
        for i in 0..self.layers.len().saturating_sub(1) {
            let (below,above) = self.layers.split_at_mut(i+1);
            let count = trace_layers(i, &mut below[i].pieces, &above[0].pieces, &mut report.errors);
            debug!("layer {i:03}: {count} traces");
            report.traces += count;
        }
    }

    pub fn resolve_mark_areas(&mut self, report:&mut AlignReport) {
        for i in 0..self.layers.len().saturating_sub(1) {
            let (below,above) = self.layers.split_at_mut(i+1);
            let count = resolve_mark_areas(i, &mut below[i].pieces, &above[0].pieces, &mut report.errors);
            debug!("layer {i:03}: {count} mark areas");
            report.mark_areas += count;
        }
    }

    /// Groups pieces connected through traces into stack lines.
    pub fn assign_stack_lines(&mut self) {
        let offsets:Vec<usize> = self.layers.iter()
            .scan(0,|acc,layer|{ let offset = *acc; *acc += layer.pieces.len(); Some(offset) })
            .collect();
        let total = self.layers.iter().map(|layer| layer.pieces.len()).sum();
        let mut parent:Vec<usize> = (0..total).collect();

        fn find(parent:&mut [usize], mut i:usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        for (layer_nr,layer) in self.layers.iter().enumerate() {
            for (piece_ndx,piece) in layer.pieces.iter().enumerate() {
                for trace in &piece.traces {
                    let a = find(&mut parent, offsets[layer_nr] + piece_ndx);
                    let b = find(&mut parent, offsets[layer_nr+1] + trace.upper);
                    if a != b { parent[a] = b }
                }
            }
        }

        let mut line_ids:HashMap<usize,usize> = HashMap::new();
        for (layer_nr,layer) in self.layers.iter_mut().enumerate() {
            for (piece_ndx,piece) in layer.pieces.iter_mut().enumerate() {
                let root = find(&mut parent, offsets[layer_nr] + piece_ndx);
                let next_id = line_ids.len();
                piece.stack_line = *line_ids.entry(root).or_insert(next_id);
            }
        }
    }

    /// Places at most one marker per pair of pieces sharing a mark area.
    /// Markers on the same stack line keep more than `2r` apart.
    pub fn place_markers(&mut self, r:f32, report:&mut AlignReport) {
        let mut occupied:HashMap<usize,Vec<Point2<f32>>> = HashMap::new();
        for layer in &self.layers {
            for piece in &layer.pieces {
                occupied.entry(piece.stack_line).or_default().extend(piece.marker_points());
            }
        }

        for i in 0..self.layers.len().saturating_sub(1) {
            let (below,above) = self.layers.split_at_mut(i+1);
            let (lower_layer,upper_layer) = (&mut below[i],&mut above[0]);

            for lower_ndx in 0..lower_layer.pieces.len() {
                let lower = &mut lower_layer.pieces[lower_ndx];
                for upper_ndx in lower.marked_neighbours() {
                    let upper = &mut upper_layer.pieces[upper_ndx];
                    let line = occupied.entry(lower.stack_line).or_default();

                    match place_marker(lower, lower_ndx, upper, upper_ndx, line, r) {
                        Ok(Some(candidate)) => {
                            let center = candidate.point;
                            debug!("layer {i:03} piece {lower_ndx}: marker at ({}, {}) after {} attempts",
                                center.x,center.y,candidate.attempts);
                            line.push(center);
                            report.markers += 1;
                        },
                        Ok(None) => {
                            let err = AlignError::PlacementFailure{layer:i, lower:lower_ndx, upper:upper_ndx};
                            warn!("{err}");
                            report.errors.push(err);
                        },
                        Err(source) => {
                            let err = AlignError::UnexpectedGeometry{
                                layer:i,
                                lower:lower_ndx,
                                upper:upper_ndx,
                                stage:Stage::Marker,
                                source,
                            };
                            warn!("{err}");
                            report.errors.push(err);
                        },
                    }
                }
            }
        }
    }
}
