use log::{debug, error, info};
use nalgebra::{Point2, Point3};
use stl_io::IndexedMesh;

use crate::geo::Layer;
use crate::settings::Settings;

mod error;
pub use error::SliceError;

mod assemble;
pub use assemble::{Loop, assemble_loops};


pub type Triangle = [Point3<f32>;3];

/// Read only access to the triangles of a mesh.
pub trait Mesh {
    fn triangle_count(&self) -> usize;
    fn triangle(&self, ndx:usize) -> Triangle;

    fn triangles<'a>(&'a self) -> Box<dyn Iterator<Item = Triangle> + 'a> {
        Box::new((0..self.triangle_count()).map(move |ndx| self.triangle(ndx)))
    }
    /// lowest and highest vertex, None for an empty mesh
    fn z_range(&self) -> Option<(f32,f32)> {
        self.triangles()
            .flat_map(|triangle| triangle.into_iter())
            .map(|vertex| vertex.z)
            .fold(None, |range,z| match range {
                None => Some((z,z)),
                Some((min,max)) => Some((f32::min(min,z),f32::max(max,z))),
            })
    }
}

impl Mesh for IndexedMesh {
    fn triangle_count(&self) -> usize {
        self.faces.len()
    }
    fn triangle(&self, ndx:usize) -> Triangle {
        self.faces[ndx].vertices.map(|v|{
            let vertex = self.vertices[v];
            Point3::new(vertex[0],vertex[1],vertex[2])
        })
    }
}
impl Mesh for [Triangle] {
    fn triangle_count(&self) -> usize {
        self.len()
    }
    fn triangle(&self, ndx:usize) -> Triangle {
        self[ndx]
    }
}
impl Mesh for Vec<Triangle> {
    fn triangle_count(&self) -> usize {
        self.len()
    }
    fn triangle(&self, ndx:usize) -> Triangle {
        self[ndx]
    }
}

/// How a triangle meets a cutting plane. The indices refer to the
/// triangle's vertices.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum TriangleClass{
    /// Entirely above, entirely below, touching in a single vertex, or lying
    /// in the plane (its outline comes from the neighbouring triangles).
    Skip,
    /// Two vertices lie on the plane.
    EdgeOnPlane([usize;2]),
    /// One vertex lies on the plane and the other two are on opposite sides.
    SingleVertexCross{on_plane:usize},
    /// One vertex is on the opposite side of the other two.
    GenericCross{isolated:usize},
}

/// Classifies a triangle against the plane at height `z`.
/// Returns None when the vertex offsets fit no case, which only happens for
/// non finite coordinates.
pub fn classify(triangle:&Triangle, z:f32, epsilon:f32) -> Option<TriangleClass> {
    let offsets = triangle.map(|v| v.z - z);
    if offsets.iter().any(|d| !d.is_finite()) { return None }

    let on_plane = offsets.map(|d| d.abs() <= epsilon);
    let mut zeros = [0usize;3];
    let mut n_zeros = 0;
    for i in (0..3).filter(|i| on_plane[*i]) {
        zeros[n_zeros] = i;
        n_zeros += 1;
    }
    let sign = |i:usize| offsets[i].signum();

    match zeros[..n_zeros] {
        [_,_,_] => Some(TriangleClass::Skip),
        [a,b] => Some(TriangleClass::EdgeOnPlane([a,b])),
        [on] => {
            let (a,b) = ((on+1)%3,(on+2)%3);
            if sign(a) == sign(b) { Some(TriangleClass::Skip) }
            else { Some(TriangleClass::SingleVertexCross{on_plane:on}) }
        },
        [] => {
            if (0..3).all(|i| sign(i) > 0.0) || (0..3).all(|i| sign(i) < 0.0) {
                return Some(TriangleClass::Skip)
            }
            // the isolated vertex is the one whose sign equals the product of all three
            let product = sign(0)*sign(1)*sign(2);
            (0..3).find(|i| sign(*i) == product)
                .map(|isolated| TriangleClass::GenericCross{isolated})
        },
        _ => None,
    }
}

/// The boundary contributed by one triangle to the slice.
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Segment{
    pub start: Point2<f32>,
    pub end: Point2<f32>,
}

/// Point where the edge a-b crosses the plane at height `z`.
pub fn intersect(a:&Point3<f32>, b:&Point3<f32>, z:f32) -> Point3<f32> {
    let t = (z - a.z)/(b.z - a.z);
    Point3::new(
        a.x + t*(b.x - a.x),
        a.y + t*(b.y - a.y),
        a.z + t*(b.z - a.z),
    )
}

/// Segment of a classified triangle, None for skipped triangles.
pub fn extract_segment(triangle:&Triangle, class:TriangleClass, z:f32) -> Option<Segment> {
    match class {
        TriangleClass::Skip => None,
        TriangleClass::EdgeOnPlane([a,b]) => Some(Segment{
            start: triangle[a].xy(),
            end: triangle[b].xy(),
        }),
        TriangleClass::SingleVertexCross{on_plane} => {
            let a = &triangle[(on_plane+1)%3];
            let b = &triangle[(on_plane+2)%3];
            Some(Segment{
                start: triangle[on_plane].xy(),
                end: intersect(a, b, z).xy(),
            })
        },
        TriangleClass::GenericCross{isolated} => {
            let v = &triangle[isolated];
            Some(Segment{
                start: intersect(v, &triangle[(isolated+1)%3], z).xy(),
                end: intersect(v, &triangle[(isolated+2)%3], z).xy(),
            })
        },
    }
}

/// All segments of the plane at height `z`, in triangle order.
pub fn plane_segments<M:Mesh + ?Sized>(mesh:&M, z:f32, epsilon:f32) -> Result<Vec<Segment>,SliceError> {
    let mut segments = Vec::new();
    for (ndx,triangle) in mesh.triangles().enumerate() {
        let class = classify(&triangle, z, epsilon)
            .ok_or_else(|| SliceError::Classification{
                triangle: ndx,
                z,
                offsets: triangle.map(|v| v.z - z),
            })?;
        segments.extend(extract_segment(&triangle, class, z));
    }
    Ok(segments)
}

/// Cuts the mesh with the plane at height `z` and returns the closed loops.
pub fn slice_plane<M:Mesh + ?Sized>(mesh:&M, z:f32, s:&Settings) -> Result<Vec<Loop>,SliceError> {
    let segments = plane_segments(mesh, z, s.plane_epsilon)?;
    debug!("z={z}: {} segments",segments.len());
    assemble_loops(&segments, s.max_err, z)
}

/// Heights of the cutting planes: the first half a thickness above the
/// bottom of the mesh, then one every thickness up to the top.
pub fn cut_heights<M:Mesh + ?Sized>(mesh:&M, thickness:f32) -> Vec<f32> {
    let Some((z_min,z_max)) = mesh.z_range() else { return Vec::new() };
    if !(thickness > 0.0) { return Vec::new() }
    (0..)
        .map(|i| z_min + thickness*(i as f32 + 0.5))
        .take_while(|z| *z < z_max)
        .collect()
}

/// The layers of a sliced mesh. A plane that could not be assembled keeps
/// its place in `layers` as an empty layer and its error in `failed`.
#[derive(Debug)]
pub struct SlicedMesh{
    pub layers: Vec<Layer>,
    pub failed: Vec<SliceError>,
}

/// Slices the mesh at every height. Classification errors abort, topology
/// errors are recorded and the remaining planes are still sliced.
pub fn slice_layers<M:Mesh + ?Sized>(mesh:&M, heights:&[f32], s:&Settings) -> Result<SlicedMesh,SliceError> {
    info!("slicing {} triangles at {} planes",mesh.triangle_count(),heights.len());
    let mut sliced = SlicedMesh{ layers: Vec::with_capacity(heights.len()), failed: Vec::new() };

    for (layer_nr,&z) in heights.iter().enumerate() {
        match slice_plane(mesh, z, s) {
            Ok(loops) => {
                let contours = loops.into_iter()
                    .map(|l| l.into_contour(s.max_err))
                    .collect();
                let layer = Layer::from_contours(z, contours, s.min_area);
                debug!("layer {layer_nr:03}: {} polygons",layer.polygons.len());
                sliced.layers.push(layer);
            },
            Err(err) if !err.is_fatal() => {
                error!("layer {layer_nr:03}: {err}");
                sliced.layers.push(Layer::new(z, Vec::new()));
                sliced.failed.push(err);
            },
            Err(err) => return Err(err),
        }
    }
    Ok(sliced)
}
