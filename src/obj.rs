use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{MeshError, MeshResult};
use crate::geometry::BoundingBox;
use crate::model::{BoundsPolicy, Model};
use crate::point3d::Point3D;
use crate::triangle::Triangle3D;

/// Triangular face, 0-based vertex indices.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 3],
}

/// Where and how big the loaded mesh should be.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoadOptions {
    /// Target position of the bounding box center.
    pub center: Point3D,
    /// Uniform scale applied to raw coordinates before centering.
    pub scale: f64,
    pub bounds: BoundsPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions { center: Point3D::default(), scale: 1.0, bounds: BoundsPolicy::default() }
    }
}

pub fn load_obj<P: AsRef<Path>>(path: P, options: &LoadOptions) -> MeshResult<Model> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MeshError::Open { path: path.to_path_buf(), source })?;
    debug!("loading mesh from {}", path.display());
    parse_obj(BufReader::new(file), options)
}

/// Parse `v`, `o` and `f` records, then scale and center the vertices.
pub fn parse_obj<R: BufRead>(reader: R, options: &LoadOptions) -> MeshResult<Model> {
    let mut name = String::new();
    let mut vertices: Vec<Point3D> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() || tokens[0].starts_with('#') {
            continue
        }

        match tokens[0] {
            "v" => {
                if tokens.len() < 4 {
                    return Err(malformed(line_no, "vertex needs x, y and z"));
                }
                let x = parse_coord(tokens[1], line_no)?;
                let y = parse_coord(tokens[2], line_no)?;
                let z = parse_coord(tokens[3], line_no)?;
                vertices.push(Point3D { x, y, z })
            }
            "o" => {
                let object = tokens.get(1).ok_or_else(|| malformed(line_no, "object record without a name"))?;
                name = object.to_string();
            }
            "f" => {
                if tokens.len() != 4 {
                    return Err(malformed(
                        line_no,
                        format!("expected a triangular face, got {} vertices", tokens.len() - 1),
                    ));
                }
                let mut indices = [0usize; 3];
                for (slot, part) in indices.iter_mut().zip(&tokens[1..]) {
                    *slot = parse_face_vertex(part, line_no)?;
                }
                faces.push(Face { indices })
            }
            _ => {}
        }
    }

    let raw_len = vertices.len();
    for v in &mut vertices {
        *v = *v * options.scale;
    }
    let scaled_bbox = BoundingBox::from_points(vertices.iter().copied()).ok_or(MeshError::NoVertices)?;
    let center = scaled_bbox.center();
    let offset = options.center - center;
    for v in &mut vertices {
        *v = *v + offset;
    }

    let bbox = match options.bounds {
        BoundsPolicy::PerAxis => scaled_bbox,
        BoundsPolicy::Recompute => BoundingBox::new(scaled_bbox.min + offset, scaled_bbox.max + offset),
    };

    debug!(
        "parsed mesh {name:?}: {raw_len} vertices, {} faces, scale {}, offset {:?}",
        faces.len(),
        options.scale,
        offset
    );

    Ok(Model {
        name,
        vertices,
        faces,
        triangles: Vec::new(),
        bbox,
        center,
        scale: options.scale,
        offset,
        bounds_policy: options.bounds,
    })
}

fn malformed(line: usize, reason: impl Into<String>) -> MeshError {
    MeshError::Malformed { line, reason: reason.into() }
}

fn parse_coord(token: &str, line: usize) -> MeshResult<f64> {
    let value: f64 = token.parse().map_err(|_| malformed(line, format!("invalid coordinate {token:?}")))?;
    if !value.is_finite() {
        return Err(malformed(line, format!("non-finite coordinate {token:?}")));
    }
    Ok(value)
}

/// `v`, `v/t`, `v//n` or `v/t/n`; only the 1-based vertex index matters.
fn parse_face_vertex(s: &str, line: usize) -> MeshResult<usize> {
    let v = s.split('/').next().unwrap_or_default();
    let index: i64 = v.parse().map_err(|_| malformed(line, format!("invalid vertex index {s:?}")))?;
    if index < 1 {
        return Err(malformed(line, format!("vertex index {index} is not 1-based")));
    }
    Ok(index as usize - 1)
}

/// Expand faces into standalone triangles, copying vertex data, and drop the
/// shared vertex list. On error the model is left untouched.
pub fn triangulate(model: &mut Model) -> MeshResult<()> {
    let count = model.vertices.len();
    let mut triangles: Vec<Triangle3D> = Vec::with_capacity(model.faces.len());

    for (face_no, face) in model.faces.iter().enumerate() {
        let mut corners = [Point3D::default(); 3];
        for (corner, &index) in corners.iter_mut().zip(&face.indices) {
            *corner = *model
                .vertices
                .get(index)
                .ok_or(MeshError::FaceIndexOutOfRange { face: face_no, index, count })?;
        }
        triangles.push(Triangle3D::new(corners[0], corners[1], corners[2]));
    }

    debug!("triangulated {} faces from {count} vertices", triangles.len());
    model.triangles = triangles;
    model.vertices = Vec::new();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
# a single face
o first
o tri
v 0 0 0
v 2.0 0 0
v 0 2 0 1.0
vn 0 0 1
vt 0.5 0.5
f 1/1/1 2//1 3
";

    fn parse(src: &str, options: &LoadOptions) -> MeshResult<Model> {
        parse_obj(src.as_bytes(), options)
    }

    #[test]
    fn parses_records_and_ignores_others() {
        let model = parse(TRIANGLE, &LoadOptions::default()).unwrap();
        assert_eq!(model.name, "tri");
        assert_eq!(model.vertices.len(), 3);
        assert_eq!(model.faces, vec![Face { indices: [0, 1, 2] }]);
        assert!(model.triangles.is_empty());
    }

    #[test]
    fn scales_then_centers() {
        let options = LoadOptions { center: Point3D::new(10.0, 10.0, 0.0), scale: 3.0, bounds: BoundsPolicy::PerAxis };
        let model = parse(TRIANGLE, &options).unwrap();
        // scaled bbox [0,6]x[0,6]x[0,0], center (3,3,0)
        assert_eq!(model.center, Point3D::new(3.0, 3.0, 0.0));
        assert_eq!(model.offset, Point3D::new(7.0, 7.0, 0.0));
        assert_eq!(model.vertices[1], Point3D::new(13.0, 7.0, 0.0));
        assert_eq!(model.scale, 3.0);
        // legacy policy keeps the pre-offset box
        assert_eq!(model.bbox.min, Point3D::new(0.0, 0.0, 0.0));
        assert_eq!(model.bbox.max, Point3D::new(6.0, 6.0, 0.0));
    }

    #[test]
    fn recompute_policy_stores_centered_bbox() {
        let options = LoadOptions { center: Point3D::new(10.0, 10.0, 0.0), scale: 3.0, bounds: BoundsPolicy::Recompute };
        let model = parse(TRIANGLE, &options).unwrap();
        assert_eq!(model.bbox.min, Point3D::new(7.0, 7.0, 0.0));
        assert_eq!(model.bbox.max, Point3D::new(13.0, 13.0, 0.0));
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_obj("/nonexistent/dir/mesh.obj", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, MeshError::Open { .. }));
    }

    #[test]
    fn unreadable_line_is_an_io_error() {
        let src: &[u8] = b"v 0 0 0\nv 1 \xff 0\nv 0 1 0\n";
        let err = parse_obj(src, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, MeshError::Io(ref e) if e.kind() == std::io::ErrorKind::InvalidData), "{err}");
    }

    #[test]
    fn empty_vertex_list_is_rejected() {
        let err = parse("o empty\n# nothing here\n", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, MeshError::NoVertices));
    }

    #[test]
    fn bad_records_report_their_line() {
        let cases = [
            "v 1 2\n",
            "v 1 two 3\n",
            "v 1 2 3\nf 1 2\n",
            "v 1 2 3\nv 1 2 3\nv 1 2 3\nv 1 2 3\nf 1 2 3 4\n",
            "v 1 2 3\nf 0 1 1\n",
            "v 1 2 3\nf a/1 1 1\n",
            "o\n",
            "v 1 inf 3\n",
        ];
        for src in cases {
            match parse(src, &LoadOptions::default()) {
                Err(MeshError::Malformed { line, .. }) => assert_eq!(line, src.lines().count(), "{src:?}"),
                other => panic!("expected malformed error for {src:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn triangulate_copies_vertices_per_face() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3\nf 2 4 3\n";
        let mut model = parse(src, &LoadOptions::default()).unwrap();
        let shared = model.vertices[1];
        triangulate(&mut model).unwrap();
        assert!(model.vertices.is_empty());
        assert_eq!(model.triangles.len(), 2);
        assert_eq!(model.triangles[0].b, shared);
        assert_eq!(model.triangles[1].a, shared);
    }

    #[test]
    fn triangulate_rejects_out_of_range_index() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 2 9\n";
        let mut model = parse(src, &LoadOptions::default()).unwrap();
        let before = model.clone();
        let err = triangulate(&mut model).unwrap_err();
        assert!(matches!(err, MeshError::FaceIndexOutOfRange { face: 1, index: 8, count: 3 }));
        assert_eq!(model, before);
    }
}
