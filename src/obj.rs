//! OBJ mesh loading
//!
//! Supports the subset the renderer needs: vertex positions (`v`), texture
//! coordinates (`vt`), and faces (`f`) with optional texture-coordinate
//! references. Malformed lines are skipped with a warning; a face index that
//! does not resolve to a loaded vertex is a hard load error.

use crate::renderer::{Color, Face, Mesh, Vec2, Vec3};
use std::path::Path;

/// OBJ file importer
pub struct ObjImporter;

#[derive(Debug, Clone, PartialEq)]
pub enum ObjError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ObjError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ObjError::Io(e) => write!(f, "IO error: {}", e),
            ObjError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ObjError {}

impl ObjImporter {
    /// Load an OBJ file and convert it to a renderer mesh.
    pub fn load_from_file(path: &Path) -> Result<Mesh, ObjError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ObjError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::parse(&contents)
    }

    /// Parse OBJ file contents.
    ///
    /// Lines that fail to parse are skipped with a warning so a partially
    /// damaged asset still loads; out-of-range face indices abort the load,
    /// since silently keeping them would mean reading past the vertex
    /// sequence at render time.
    pub fn parse(contents: &str) -> Result<Mesh, ObjError> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut tex_coords: Vec<Vec2> = Vec::new();
        let mut faces: Vec<Face> = Vec::new();

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" => match Self::parse_vec3(&parts) {
                    Some(v) => positions.push(v),
                    None => {
                        eprintln!("Warning: line {}: skipping malformed vertex", line_num + 1)
                    }
                },

                "vt" => match Self::parse_vec2(&parts) {
                    // OBJ v grows upward; texture rows grow downward.
                    Some(uv) => tex_coords.push(Vec2::new(uv.x, 1.0 - uv.y)),
                    None => eprintln!(
                        "Warning: line {}: skipping malformed texture coordinate",
                        line_num + 1
                    ),
                },

                "f" => {
                    if parts.len() < 4 {
                        eprintln!(
                            "Warning: line {}: skipping face with fewer than 3 vertices",
                            line_num + 1
                        );
                        continue;
                    }

                    let mut corners = Vec::with_capacity(parts.len() - 1);
                    let mut ok = true;
                    for spec in &parts[1..] {
                        match Self::parse_corner(spec, line_num, positions.len(), &tex_coords)? {
                            Some(corner) => corners.push(corner),
                            None => {
                                ok = false;
                                break;
                            }
                        }
                    }
                    if !ok {
                        eprintln!("Warning: line {}: skipping malformed face", line_num + 1);
                        continue;
                    }

                    // Fan-triangulate quads and larger polygons.
                    for i in 1..(corners.len() - 1) {
                        let (a, uv_a) = corners[0];
                        let (b, uv_b) = corners[i];
                        let (c, uv_c) = corners[i + 1];
                        let uvs = match (uv_a, uv_b, uv_c) {
                            (Some(ua), Some(ub), Some(uc)) => Some([ua, ub, uc]),
                            _ => None,
                        };
                        faces.push(Face { a, b, c, uvs, color: Color::WHITE });
                    }
                }

                // Other OBJ commands (vn, o, g, s, usemtl, ...) are ignored.
                _ => {}
            }
        }

        let mesh = Mesh::new(positions, faces);
        if mesh.vertices.is_empty() || mesh.faces.is_empty() {
            return Err(ObjError::Parse(
                "No usable vertices or faces found in OBJ data".to_string(),
            ));
        }

        Ok(mesh)
    }

    fn parse_vec3(parts: &[&str]) -> Option<Vec3> {
        if parts.len() < 4 {
            return None;
        }
        Some(Vec3::new(
            parts[1].parse().ok()?,
            parts[2].parse().ok()?,
            parts[3].parse().ok()?,
        ))
    }

    fn parse_vec2(parts: &[&str]) -> Option<Vec2> {
        if parts.len() < 3 {
            return None;
        }
        Some(Vec2::new(parts[1].parse().ok()?, parts[2].parse().ok()?))
    }

    /// Parse one face corner like `7/3`, `7//2`, or `7`. Returns the 1-based
    /// vertex index plus the referenced UV, if any.
    ///
    /// `Ok(None)` means a malformed corner (the face is skipped); `Err` means
    /// an index pointing outside the loaded data.
    fn parse_corner(
        spec: &str,
        line_num: usize,
        vertex_count: usize,
        tex_coords: &[Vec2],
    ) -> Result<Option<(usize, Option<Vec2>)>, ObjError> {
        let mut fields = spec.split('/');

        let index: usize = match fields.next().and_then(|s| s.parse().ok()) {
            Some(i) => i,
            None => return Ok(None),
        };
        if index < 1 || index > vertex_count {
            return Err(ObjError::Parse(format!(
                "Line {}: vertex index {} out of range (have {} vertices)",
                line_num + 1,
                index,
                vertex_count
            )));
        }

        let uv = match fields.next() {
            Some("") | None => None,
            Some(s) => {
                let uv_index: usize = match s.parse().ok() {
                    Some(i) => i,
                    None => return Ok(None),
                };
                if uv_index < 1 || uv_index > tex_coords.len() {
                    return Err(ObjError::Parse(format!(
                        "Line {}: texture coordinate index {} out of range (have {})",
                        line_num + 1,
                        uv_index,
                        tex_coords.len()
                    )));
                }
                Some(tex_coords[uv_index - 1])
            }
        };

        Ok(Some((index, uv)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TRIANGLE_OBJ: &str = "\
# simple triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
f 1/1 2/2 3/3
";

    #[test]
    fn test_parse_triangle() {
        let mesh = ObjImporter::parse(TRIANGLE_OBJ).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.faces.len(), 1);
        assert_eq!(mesh.faces[0].a, 1);
        assert_eq!(mesh.faces[0].c, 3);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_uv_v_axis_flipped() {
        let mesh = ObjImporter::parse(TRIANGLE_OBJ).unwrap();
        let uvs = mesh.faces[0].uvs.unwrap();
        // vt 0 0 becomes (0, 1); vt 0 1 becomes (0, 0)
        assert_eq!(uvs[0], Vec2::new(0.0, 1.0));
        assert_eq!(uvs[2], Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_face_without_uvs() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = ObjImporter::parse(src).unwrap();
        assert!(mesh.faces[0].uvs.is_none());
    }

    #[test]
    fn test_quad_fan_triangulated() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = ObjImporter::parse(src).unwrap();
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!((mesh.faces[0].a, mesh.faces[0].b, mesh.faces[0].c), (1, 2, 3));
        assert_eq!((mesh.faces[1].a, mesh.faces[1].b, mesh.faces[1].c), (1, 3, 4));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv not numbers here\nf 1 2 3\nf 1 2\n";
        let mesh = ObjImporter::parse(src).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.faces.len(), 1);
    }

    #[test]
    fn test_out_of_range_index_is_error() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 99\n";
        let err = ObjImporter::parse(src).unwrap_err();
        assert!(matches!(err, ObjError::Parse(_)));
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(ObjImporter::parse("# nothing\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TRIANGLE_OBJ.as_bytes()).unwrap();
        let mesh = ObjImporter::load_from_file(file.path()).unwrap();
        assert_eq!(mesh.faces.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ObjImporter::load_from_file(Path::new("/nonexistent/mesh.obj")).unwrap_err();
        assert!(matches!(err, ObjError::Io(_)));
    }
}
