//! Wavefront OBJ with a companion MTL material library.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use globe_mesh::Triangle;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::ExportError;
use crate::vertices::VertexTable;

/// File name of the geometry written by [`MaterialObj::write_dir`].
pub const OBJECT_FILE: &str = "object.obj";

/// File name of the material library, referenced by `mtllib` in the OBJ.
pub const MATERIAL_FILE: &str = "material.mtl";

/// An OBJ document and the MTL library it references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialObj {
    pub obj: String,
    pub mtl: String,
}

impl MaterialObj {
    /// Writes [`OBJECT_FILE`] and [`MATERIAL_FILE`] into `dir`, creating it if
    /// needed.
    pub fn write_dir(&self, dir: impl AsRef<Path>) -> Result<(), ExportError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| ExportError::File {
            path: dir.to_path_buf(),
            source,
        })?;
        for (name, contents) in [(OBJECT_FILE, &self.obj), (MATERIAL_FILE, &self.mtl)] {
            let path = dir.join(name);
            fs::write(&path, contents).map_err(|source| ExportError::File { path, source })?;
        }
        debug!(dir = %dir.display(), "Wrote OBJ and MTL");
        Ok(())
    }
}

/// Encodes `triangles` as an OBJ document grouped by material, one material per
/// distinct face color.
///
/// `color` returns RGB in `[0, 1]`. Materials are numbered `mat0`, `mat1`, ...
/// in order of first use, and faces are written grouped under their material in
/// that order.
pub fn encode_material_obj<F>(triangles: &[Triangle], mut color: F) -> MaterialObj
where
    F: FnMut(&Triangle) -> [f64; 3],
{
    let table = VertexTable::from_triangles(triangles);

    let mut materials: Vec<([f64; 3], Vec<&Triangle>)> = Vec::new();
    let mut by_color: FxHashMap<[u64; 3], usize> = FxHashMap::default();
    for t in triangles {
        let c = color(t);
        let slot = *by_color.entry(c.map(f64::to_bits)).or_insert_with(|| {
            materials.push((c, Vec::new()));
            materials.len() - 1
        });
        materials[slot].1.push(t);
    }

    let mut obj = format!("mtllib {MATERIAL_FILE}\n");
    for v in &table.vertices {
        let _ = writeln!(obj, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z);
    }
    let mut mtl = String::new();
    for (id, (c, faces)) in materials.iter().enumerate() {
        let [r, g, b] = c;
        let _ = writeln!(
            mtl,
            "newmtl mat{id}\nillum 1\nKa {r:.6} {g:.6} {b:.6}\nKd {r:.6} {g:.6} {b:.6}"
        );
        let _ = writeln!(obj, "usemtl mat{id}");
        for t in faces {
            let [i, j, k] = table.face(t).map(|i| i + 1);
            let _ = writeln!(obj, "f {i} {j} {k}");
        }
    }

    MaterialObj { obj, mtl }
}
