use std::io::{self, Write};

use d3d::{Mesh, MeshSink};
use hedron::ser::obj::ObjWriter;

/// Streams meshes into an OBJ document as objects named `{name}` (merged) or `{name}.{n}`.
#[derive(Debug)]
pub struct ObjSink<W: Write> {
    writer: ObjWriter<W>,
    name: String,
    numbered: bool,
    count: usize,
}

impl<W: Write> ObjSink<W> {
    pub fn new(out: W, name: impl Into<String>, numbered: bool) -> Self {
        Self {
            writer: ObjWriter::new(out),
            name: name.into(),
            numbered,
            count: 0,
        }
    }

    #[inline]
    pub fn finish(self) -> io::Result<W> {
        self.writer.finish()
    }
}

impl<W: Write> MeshSink for ObjSink<W> {
    type Error = io::Error;

    fn submit(&mut self, mesh: Mesh) -> Result<(), Self::Error> {
        let name = match self.numbered {
            true => format!("{}.{}", self.name, self.count),
            false => self.name.clone(),
        };
        self.count += 1;
        self.writer.write_object(Some(&name), &mesh)
    }
}
