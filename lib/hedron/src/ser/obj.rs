//! Utilities for serializing [Meshes](crate::Mesh) to [Wavefront OBJ](https://paulbourke.net/dataformats/obj/).
//!
//! # Notes
//!
//! ## OBJ Structure
//!
//! An OBJ file is a list of statements, one per line. Only the statements below are written:
//!
//! * `o name`: start of a named object
//! * `v x y z`: vertex position
//! * `vt u v`: texture coordinate
//! * `vn x y z`: vertex normal; not necessarily unit length
//! * `f v/vt/vn ...`: face; references are 1-based and count from the start of the *file*, not
//!   the current object. `vt` and `vn` may be omitted (`v//vn`, `v/vt`, `v`).
//! * `l v v`: line element
//!
//! Texture coordinates and normals are only written if *every* vertex in the mesh has them,
//! since OBJ can't express a reference to a missing one.
//!
//! Colors are dropped; OBJ has no standard per-vertex color.

use std::io::{self, Write};

use crate::{AttributeUsage, Mesh};

/// Write `mesh` as a complete OBJ document.
pub fn write(mesh: &Mesh, out: impl Write) -> io::Result<()> {
    let mut w = ObjWriter::new(out);
    w.write_object(None, mesh)?;
    w.finish().map(|_| ())
}

/// Writes several meshes into one OBJ document, tracking the running index base between them.
#[derive(Debug)]
pub struct ObjWriter<W: Write> {
    out: W,
    /// number of `v` lines written so far
    positions: usize,
    /// number of `vt` lines written so far
    texcoords: usize,
    /// number of `vn` lines written so far
    normals: usize,
}

impl<W: Write> ObjWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            positions: 0,
            texcoords: 0,
            normals: 0,
        }
    }

    /// Append `mesh`, as an `o` object if `name` is given.
    pub fn write_object(&mut self, name: Option<&str>, mesh: &Mesh) -> io::Result<()> {
        let out = &mut self.out;
        if let Some(name) = name {
            writeln!(out, "o {name}")?;
        }

        let with_uv = !mesh.is_empty() && mesh.all_have(AttributeUsage::Texcoord);
        let with_normal = !mesh.is_empty() && mesh.all_have(AttributeUsage::Normal);

        for v in mesh.vertices() {
            let p = v.position;
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        }
        if with_uv {
            for uv in mesh.vertices().iter().filter_map(|v| v.uv) {
                writeln!(out, "vt {} {}", uv.x, uv.y)?;
            }
        }
        if with_normal {
            for n in mesh.vertices().iter().filter_map(|v| v.normal) {
                writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
            }
        }

        for face in mesh.faces() {
            out.write_all(b"f")?;
            for &i in face.indices() {
                let i = i as usize;
                let v = self.positions + i + 1;
                match (with_uv, with_normal) {
                    (false, false) => write!(out, " {v}")?,
                    (true, false) => write!(out, " {v}/{}", self.texcoords + i + 1)?,
                    (false, true) => write!(out, " {v}//{}", self.normals + i + 1)?,
                    (true, true) => write!(
                        out,
                        " {v}/{}/{}",
                        self.texcoords + i + 1,
                        self.normals + i + 1
                    )?,
                }
            }
            out.write_all(b"\n")?;
        }

        for [a, b] in mesh.edges() {
            writeln!(
                out,
                "l {} {}",
                self.positions + *a as usize + 1,
                self.positions + *b as usize + 1
            )?;
        }

        self.positions += mesh.vertex_count();
        if with_uv {
            self.texcoords += mesh.vertex_count();
        }
        if with_normal {
            self.normals += mesh.vertex_count();
        }
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
