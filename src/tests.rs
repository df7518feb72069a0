use std::io::Cursor;

use nalgebra::{distance, Point3};

use crate::align::Stack;
use crate::export::StackDoc;
use crate::geo::Enclosed;
use crate::settings::Settings;
use crate::slice::{cut_heights, slice_layers, Triangle};

/// closed box between the two corners, two triangles per face
fn cuboid(min:[f32;3], max:[f32;3]) -> Vec<Triangle> {
    let c = |i:usize| Point3::new(
        if i & 1 == 0 { min[0] } else { max[0] },
        if i & 2 == 0 { min[1] } else { max[1] },
        if i & 4 == 0 { min[2] } else { max[2] },
    );
    [
        [0,2,3,1], // bottom
        [4,5,7,6], // top
        [0,1,5,4], // front
        [2,6,7,3], // back
        [0,4,6,2], // left
        [1,3,7,5], // right
    ].into_iter()
        .flat_map(|[a,b,d,e]| [[c(a),c(b),c(d)],[c(a),c(d),c(e)]])
        .collect()
}

/// three boxes stacked into a step pyramid, 6 mm tall
fn step_pyramid() -> Vec<Triangle> {
    let mut mesh = cuboid([0.,0.,0.],[30.,30.,2.]);
    mesh.extend(cuboid([5.,5.,2.],[25.,25.,4.]));
    mesh.extend(cuboid([10.,10.,4.],[20.,20.,6.]));
    mesh
}

fn settings() -> Settings {
    Settings{ thickness:1.0, ..Default::default() }
}

#[test]
fn slice_step_pyramid_test(){
    let mesh = step_pyramid();
    let heights = cut_heights(&mesh, 1.0);
    assert_eq!(heights,vec![0.5,1.5,2.5,3.5,4.5,5.5]);

    let sliced = slice_layers(&mesh, &heights, &settings()).unwrap();
    assert!(sliced.failed.is_empty());
    let areas:Vec<f32> = sliced.layers.iter().map(|layer| layer.area()).collect();
    for (area,expected) in areas.iter().zip([900.,900.,400.,400.,100.,100.]) {
        assert!((area - expected).abs() < 1e-2,"{areas:?}");
    }
}

#[test]
fn slice_hollow_box_has_hole_test(){
    let mut mesh = cuboid([0.,0.,0.],[10.,10.,3.]);
    mesh.extend(cuboid([3.,3.,0.5],[7.,7.,2.5]));

    let sliced = slice_layers(&mesh, &[1.5], &settings()).unwrap();
    assert!(sliced.failed.is_empty());
    let layer = &sliced.layers[0];
    assert_eq!(layer.polygons.len(),1);
    assert_eq!(layer.polygons[0].holes.len(),1);
    assert!((layer.area() - 84.0).abs() < 1e-3, "{}", layer.area());
}

#[test]
fn read_stl_and_slice_test(){
    let triangles:Vec<stl_io::Triangle> = cuboid([0.,0.,0.],[4.,3.,2.]).into_iter()
        .map(|t| stl_io::Triangle{
            normal: stl_io::Normal::new([0.0,0.0,0.0]),
            vertices: t.map(|v| stl_io::Vertex::new([v.x,v.y,v.z])),
        })
        .collect();
    let mut bytes = Vec::new();
    stl_io::write_stl(&mut bytes, triangles.iter()).unwrap();
    let mesh = stl_io::read_stl(&mut Cursor::new(bytes)).unwrap();

    let heights = cut_heights(&mesh, 1.0);
    assert_eq!(heights,vec![0.5,1.5]);
    let sliced = slice_layers(&mesh, &heights, &settings()).unwrap();
    for layer in &sliced.layers {
        assert_eq!(layer.polygons.len(),1);
        assert!((layer.area() - 12.0).abs() < 1e-4);
    }
}

#[test]
fn align_step_pyramid_test(){
    let mesh = step_pyramid();
    let s = settings();
    let heights = cut_heights(&mesh, s.thickness);
    let sliced = slice_layers(&mesh, &heights, &s).unwrap();
    let mut stack = Stack::from_layers(sliced.layers);
    let report = stack.align(&s);

    assert!(report.errors.is_empty(),"{:?}",report.errors);
    assert_eq!(report.traces,5);
    assert_eq!(report.mark_areas,4);
    assert_eq!(report.markers,4);

    let pieces:Vec<_> = stack.layers.iter().flat_map(|layer| layer.pieces.iter()).collect();
    assert!(pieces.iter().all(|piece| piece.stack_line == pieces[0].stack_line));

    let centers:Vec<_> = pieces.iter().flat_map(|piece| piece.marks.iter().map(|mark| mark.center)).collect();
    assert_eq!(centers.len(),4);
    for (i,a) in centers.iter().enumerate() {
        for b in centers.iter().skip(i+1) {
            assert!(distance(a,b) > 2.0*s.marker_radius);
        }
    }
    // every mark sits where the layers below and above overlap
    for (layer_nr,layer) in stack.layers.iter().enumerate() {
        for piece in &layer.pieces {
            for mark in &piece.marks {
                assert!(piece.shape.contains_disc(&mark.center, s.marker_radius));
                let upper = &stack.layers[layer_nr+1].pieces[mark.partner];
                assert!(upper.shape.contains_disc(&mark.center, s.marker_radius));
                assert!(upper.shape.point_is_inside(&mark.center));
            }
        }
    }
}

#[test]
fn export_step_pyramid_test(){
    let mesh = step_pyramid();
    let s = Settings{ mark_areas:true, ..settings() };
    let sliced = slice_layers(&mesh, &cut_heights(&mesh, s.thickness), &s).unwrap();
    let mut stack = Stack::from_layers(sliced.layers);
    stack.align(&s);

    let doc = StackDoc::from_stack(&stack, &s);
    let json = serde_json::to_string_pretty(&doc).unwrap();
    let back:StackDoc = serde_json::from_str(&json).unwrap();
    assert_eq!(back.layers.len(),6);
    assert_eq!(back.layers[0].pieces[0].mark_areas.len(),1);
    assert_eq!(back.layers[0].pieces[0].marks.len(),1);
    assert_eq!(back.layers[1].pieces[0].cutouts.len(),1);
    assert_eq!(back,doc);
}
