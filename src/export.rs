use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::align::{Marker, Piece, Stack};
use crate::geo::{PointSeq, Polygon};
use crate::settings::Settings;
use crate::Error;

/// The annotated stack as handed to the renderer.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct StackDoc{
    pub thickness: f32,
    pub marker_radius: f32,
    pub layers: Vec<LayerDoc>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct LayerDoc{
    pub index: usize,
    pub z: f32,
    pub pieces: Vec<PieceDoc>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ShapeDoc{
    pub outer: PointSeq,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<PointSeq>,
}
impl From<&Polygon> for ShapeDoc {
    fn from(polygon:&Polygon) -> Self {
        Self{
            outer: PointSeq::from(&polygon.outer_loop),
            holes: polygon.holes.iter().map(PointSeq::from).collect(),
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct PartnerShapeDoc{
    pub partner: usize,
    pub shape: ShapeDoc,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct MarkerDoc{
    pub partner: usize,
    pub center: [f32;2],
    pub outline: PointSeq,
}
impl From<&Marker> for MarkerDoc {
    fn from(marker:&Marker) -> Self {
        Self{
            partner: marker.partner,
            center: [marker.center.x, marker.center.y],
            outline: PointSeq::from(&marker.shape),
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct PieceDoc{
    pub stack_line: usize,
    pub shape: ShapeDoc,
    pub traces: Vec<PartnerShapeDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mark_areas: Vec<PartnerShapeDoc>,
    pub marks: Vec<MarkerDoc>,
    pub cutouts: Vec<MarkerDoc>,
}
impl PieceDoc {
    fn from_piece(piece:&Piece, s:&Settings) -> Self {
        let mark_areas = if s.mark_areas {
            piece.mark_areas.iter()
                .map(|area| PartnerShapeDoc{ partner:area.upper, shape:ShapeDoc::from(&area.shape) })
                .collect()
        } else {
            Vec::new()
        };
        Self{
            stack_line: piece.stack_line,
            shape: ShapeDoc::from(&piece.shape),
            traces: piece.traces.iter()
                .map(|trace| PartnerShapeDoc{ partner:trace.upper, shape:ShapeDoc::from(&trace.shape) })
                .collect(),
            mark_areas,
            marks: piece.marks.iter().map(MarkerDoc::from).collect(),
            cutouts: piece.cutouts.iter().map(MarkerDoc::from).collect(),
        }
    }
}

impl StackDoc {
    pub fn from_stack(stack:&Stack, s:&Settings) -> Self {
        Self{
            thickness: s.thickness,
            marker_radius: s.marker_radius,
            layers: stack.layers.iter()
                .enumerate()
                .map(|(index,layer)| LayerDoc{
                    index,
                    z: layer.z,
                    pieces: layer.pieces.iter().map(|piece| PieceDoc::from_piece(piece, s)).collect(),
                })
                .collect(),
        }
    }
    pub fn write_json<T:AsRef<Path>>(&self, path:T) -> Result<(),Error> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::contour;
    use crate::geo::Layer;

    fn square(x:f32, y:f32, size:f32) -> Polygon {
        Polygon::new(contour!([x,y],[x+size,y],[x+size,y+size],[x,y+size]), Vec::new())
    }

    fn two_layer_stack() -> Stack {
        let mut stack = Stack::from_layers(vec![
            Layer::new(0.5, vec![square(0.,0.,10.)]),
            Layer::new(1.5, vec![square(5.,5.,10.)]),
        ]);
        let mut report = Default::default();
        stack.trace(&mut report);
        stack
    }

    #[test]
    fn export_layers_test(){
        let stack = two_layer_stack();
        let doc = StackDoc::from_stack(&stack, &Settings::default());
        assert_eq!(doc.layers.len(),2);
        assert_eq!(doc.layers[1].index,1);
        assert_eq!(doc.layers[0].pieces[0].traces.len(),1);
        assert_eq!(doc.layers[0].pieces[0].traces[0].partner,0);
        assert_eq!(doc.layers[0].pieces[0].shape.outer.to_string(),"0,0 10,0 10,10 0,10");
    }

    #[test]
    fn export_json_test(){
        let stack = two_layer_stack();
        let doc = StackDoc::from_stack(&stack, &Settings::default());
        let json = serde_json::to_string(&doc).expect("serialize");
        assert!(json.contains("\"outer\":\"0,0 10,0 10,10 0,10\""));
        assert!(!json.contains("mark_areas"));
        let back:StackDoc = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back,doc);
    }

    #[test]
    fn export_mark_areas_flag_test(){
        let mut stack = two_layer_stack();
        stack.layers[0].pieces[0].mark_areas.push(crate::align::MarkArea{ upper:0, shape:square(6.,6.,2.) });

        let hidden = StackDoc::from_stack(&stack, &Settings::default());
        assert!(hidden.layers[0].pieces[0].mark_areas.is_empty());

        let settings = Settings{ mark_areas:true, ..Default::default() };
        let shown = StackDoc::from_stack(&stack, &settings);
        assert_eq!(shown.layers[0].pieces[0].mark_areas.len(),1);
    }
}
