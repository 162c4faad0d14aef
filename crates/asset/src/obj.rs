//! Wavefront OBJ parser producing interleaved, GPU-ready vertex data.
//!
//! OBJ stores positions and normals as two separately-indexed arrays; a face
//! vertex references one index into each, so the same position can pair with
//! different normals across faces. [`resolve_index_pairs`] reconciles the two
//! streams into index-aligned arrays, which [`interleave`] then merges into a
//! single `[px,py,pz,nx,ny,nz]` buffer.
//!
//! Supported subset: `v`, `vn` and `f` lines (triangles and quads, texture
//! slot ignored). Comments and unknown tags are skipped.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::error::{ObjError, Result};
use crate::material::Material;
use crate::mesh::MeshData;

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ObjError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = load_obj_from_reader(BufReader::new(file))?;
    log::info!(
        "Loaded OBJ {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<MeshData> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<MeshData> {
    parse_obj(io::Cursor::new(contents))
}

fn parse_obj<R: BufRead>(reader: R) -> Result<MeshData> {
    let mut positions: Vec<f32> = Vec::new();
    let mut normals: Vec<f32> = Vec::new();
    let mut position_indices: Vec<u32> = Vec::new();
    let mut normal_indices: Vec<u32> = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line.map_err(|e| ObjError::Parse {
            line: line_no,
            message: format!("failed to read line: {e}"),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match trimmed.split_whitespace().next() {
            Some("v") => positions.extend(parse_vec3(trimmed, line_no)?),
            Some("vn") => normals.extend(parse_vec3(trimmed, line_no)?),
            Some("f") => {
                position_indices.extend(parse_face(trimmed, FaceField::Position, line_no)?);
                normal_indices.extend(parse_face(trimmed, FaceField::Normal, line_no)?);
            }
            // o/g/s/usemtl/vt and friends carry nothing we render
            _ => {}
        }
    }

    if positions.is_empty() || position_indices.is_empty() {
        return Err(ObjError::EmptyMesh);
    }

    normalize_positions(&mut positions)?;

    let (resolved_positions, resolved_normals, indices) =
        resolve_index_pairs(&positions, &normals, &position_indices, &normal_indices)?;

    let vertex_data = interleave(&resolved_positions, &resolved_normals);

    Ok(MeshData::new(vertex_data, indices, Material::default()))
}

/// Parse a `<tag> f0 f1 f2` record, ignoring the tag. Extra trailing tokens
/// (an optional `w` component) are ignored.
pub fn parse_vec3(line: &str, line_no: usize) -> Result<[f32; 3]> {
    let mut parts = line.split_whitespace();
    parts.next(); // tag
    let x = parse_component(parts.next(), line_no, "x")?;
    let y = parse_component(parts.next(), line_no, "y")?;
    let z = parse_component(parts.next(), line_no, "z")?;
    Ok([x, y, z])
}

fn parse_component(token: Option<&str>, line_no: usize, axis: &str) -> Result<f32> {
    let token = token.ok_or_else(|| ObjError::Parse {
        line: line_no,
        message: format!("missing {axis} component"),
    })?;
    token.parse::<f32>().map_err(|_| ObjError::Parse {
        line: line_no,
        message: format!("invalid {axis} component '{token}'"),
    })
}

/// Which slash-delimited slot of a `pos/tex/norm` face vertex to extract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceField {
    Position,
    Normal,
}

impl FaceField {
    fn slot(self) -> usize {
        match self {
            FaceField::Position => 0,
            FaceField::Normal => 2,
        }
    }

    fn name(self) -> &'static str {
        match self {
            FaceField::Position => "position",
            FaceField::Normal => "normal",
        }
    }
}

/// Parse one slot of a face line `f i0/t0/n0 i1/t1/n1 i2/t2/n2 [i3/t3/n3]`
/// into 0-based indices: 3 for a triangle, 6 for a triangulated quad.
pub fn parse_face(line: &str, field: FaceField, line_no: usize) -> Result<Vec<u32>> {
    let vertices: Vec<&str> = line.split_whitespace().skip(1).collect();
    if !matches!(vertices.len(), 3 | 4) {
        return Err(ObjError::UnsupportedFaceArity {
            line: line_no,
            count: vertices.len(),
        });
    }

    let mut indices = Vec::with_capacity(vertices.len());
    for token in &vertices {
        let slot = token
            .split('/')
            .nth(field.slot())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ObjError::Parse {
                line: line_no,
                message: format!("missing {} index in '{token}'", field.name()),
            })?;
        let raw = slot.parse::<u32>().map_err(|_| ObjError::Parse {
            line: line_no,
            message: format!("invalid {} index '{slot}'", field.name()),
        })?;
        if raw == 0 {
            return Err(ObjError::Parse {
                line: line_no,
                message: format!("{} indices are 1-based, found 0", field.name()),
            });
        }
        indices.push(raw - 1);
    }

    if let [a, b, c, d] = indices[..] {
        return Ok(triangulate_quad([a, b, c, d]));
    }
    Ok(indices)
}

/// Split a quad `[a,b,c,d]` along the 0-3 diagonal: `(a,b,d)` and `(b,c,d)`.
/// Downstream winding depends on this exact split.
fn triangulate_quad([a, b, c, d]: [u32; 4]) -> Vec<u32> {
    vec![a, b, d, b, c, d]
}

/// Remap every position component into [-1, 1] using the global min/max over
/// ALL components pooled together. Not per-axis: an elongated mesh keeps its
/// proportions relative to the pooled extent.
pub fn normalize_positions(positions: &mut [f32]) -> Result<()> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in positions.iter() {
        min = min.min(v);
        max = max.max(v);
    }

    let extent = max - min;
    if !(extent > 0.0) {
        return Err(ObjError::DegenerateMesh);
    }

    for v in positions.iter_mut() {
        *v = 2.0 * ((*v - min) / extent) - 1.0;
    }
    Ok(())
}

/// Reconcile independently-indexed position/normal streams into index-aligned
/// arrays plus a unified index stream.
///
/// Every face-vertex occurrence becomes its own output vertex, so the output
/// index stream is the identity `[0..N)` and both float arrays are `3 * N`
/// long. Repeated `(position, normal)` pairs are duplicated rather than
/// shared; a hash of the pair could reuse indices and shrink the buffers
/// without changing the rendered geometry.
pub fn resolve_index_pairs(
    positions: &[f32],
    normals: &[f32],
    position_indices: &[u32],
    normal_indices: &[u32],
) -> Result<(Vec<f32>, Vec<f32>, Vec<u32>)> {
    if position_indices.len() != normal_indices.len() {
        return Err(ObjError::IndexCountMismatch {
            positions: position_indices.len(),
            normals: normal_indices.len(),
        });
    }

    let entries = position_indices.len();
    let mut out_positions = Vec::with_capacity(3 * entries);
    let mut out_normals = Vec::with_capacity(3 * entries);
    let mut out_indices = Vec::with_capacity(entries);

    for (i, (&pi, &ni)) in position_indices.iter().zip(normal_indices).enumerate() {
        out_positions.extend_from_slice(fetch_triple(positions, pi, "position")?);
        out_normals.extend_from_slice(fetch_triple(normals, ni, "normal")?);
        out_indices.push(i as u32);
    }

    if out_positions.len() != out_normals.len() {
        return Err(ObjError::Postcondition(
            "resolved position and normal arrays differ in length",
        ));
    }

    Ok((out_positions, out_normals, out_indices))
}

fn fetch_triple<'a>(values: &'a [f32], index: u32, what: &'static str) -> Result<&'a [f32]> {
    let start = index as usize * 3;
    values
        .get(start..start + 3)
        .ok_or(ObjError::IndexOutOfBounds {
            what,
            index,
            count: values.len() / 3,
        })
}

/// Merge index-aligned position/normal streams into one flat buffer with
/// blocks of 6 floats per vertex: `[px,py,pz,nx,ny,nz]`.
pub fn interleave(positions: &[f32], normals: &[f32]) -> Vec<f32> {
    debug_assert_eq!(positions.len(), normals.len());
    let mut vertex_data = Vec::with_capacity(positions.len() * 2);
    for (p, n) in positions.chunks_exact(3).zip(normals.chunks_exact(3)) {
        vertex_data.extend_from_slice(p);
        vertex_data.extend_from_slice(n);
    }
    vertex_data
}
