//! Explicit vertex-list primitives (`begin`, vertices, `end`) and the state machine that
//! dispatches every record.

use std::fmt;

use hedron::{Face, Mesh, Vertex};
use num_traits::ToPrimitive;

use crate::{
    builder::{Fragment, MeshBuilder, MeshSink, Source},
    error::Truncation,
    record::{Command, Record},
    solid, Error,
};

/// How a primitive's vertex list becomes elements, by GameMaker's `pr_*` constants.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillType {
    PointList = 1,
    LineList = 2,
    LineStrip = 3,
    TriangleList = 4,
    TriangleStrip = 5,
    TriangleFan = 6,
}

impl FillType {
    /// Look up a fill type by its `pr_*` code.
    ///
    /// `0` (the value a zero-padded or bare `begin` record carries) reads as a triangle list.
    pub fn from_code(code: f64) -> Option<Self> {
        Some(match code.to_u8()? {
            0 | 4 => Self::TriangleList,
            1 => Self::PointList,
            2 => Self::LineList,
            3 => Self::LineStrip,
            5 => Self::TriangleStrip,
            6 => Self::TriangleFan,
            _ => return None,
        })
    }

    /// True if this fill type produces points or lines rather than faces.
    #[inline]
    pub fn is_loose(self) -> bool {
        matches!(self, Self::PointList | Self::LineList | Self::LineStrip)
    }
}

impl fmt::Display for FillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PointList => "pr_pointlist",
            Self::LineList => "pr_linelist",
            Self::LineStrip => "pr_linestrip",
            Self::TriangleList => "pr_trianglelist",
            Self::TriangleStrip => "pr_trianglestrip",
            Self::TriangleFan => "pr_trianglefan",
        })
    }
}

/// The vertices of a primitive that has been begun but not yet ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    /// line of the `begin` record
    pub line: usize,
    pub fill: FillType,
    pub vertices: Vec<Vertex>,
}

impl Accumulator {
    pub fn new(line: usize, fill: FillType) -> Self {
        Self {
            line,
            fill,
            vertices: Vec::new(),
        }
    }

    /// Assemble the accumulated vertices into a fragment, per the fill type.
    ///
    /// * Triangle lists take vertices three at a time.
    /// * Strips alternate winding so every triangle faces the same way: `(i, i+1, i+2)` for even
    ///   `i`, `(i+1, i, i+2)` for odd.
    /// * Fans pivot on the first vertex: `(0, i, i+1)`.
    /// * Line lists pair vertices up; line strips join each to the next.
    /// * Point lists are just the vertices.
    ///
    /// Strips and fans of fewer than 3 vertices produce no faces.
    ///
    /// # Errors
    ///
    /// * [`MalformedRecord`](Error::MalformedRecord) (reported at `end_line`) if a triangle list
    ///   isn't a multiple of 3 vertices or a line list isn't a multiple of 2.
    pub fn close(self, end_line: usize) -> Result<Fragment, Error> {
        let count = self.vertices.len();
        let n = u32::try_from(count).map_err(|_| hedron::Error::IndexOverflow(count))?;
        let group = match self.fill {
            FillType::TriangleList => 3,
            FillType::LineList => 2,
            _ => 1,
        };
        if count % group != 0 {
            return Err(Error::malformed(
                end_line,
                format!(
                    "{} begun on line {} has {count} vertices, which isn't a multiple of {group}",
                    self.fill, self.line
                ),
            ));
        }

        let mut faces = Vec::new();
        let mut edges = Vec::new();
        match self.fill {
            FillType::PointList => {}
            FillType::LineList => edges.extend((0..n).step_by(2).map(|i| [i, i + 1])),
            FillType::LineStrip => edges.extend((1..n).map(|i| [i - 1, i])),
            FillType::TriangleList => {
                faces.extend((0..n).step_by(3).map(|i| Face::tri([i, i + 1, i + 2])))
            }
            FillType::TriangleStrip => faces.extend((2..n).map(|i| {
                if i % 2 == 0 {
                    Face::tri([i - 2, i - 1, i])
                } else {
                    Face::tri([i - 1, i - 2, i])
                }
            })),
            FillType::TriangleFan => faces.extend((2..n).map(|i| Face::tri([0, i - 1, i]))),
        }

        Ok(Fragment {
            line: self.line,
            source: Source::Primitive(self.fill),
            mesh: Mesh::from_parts(self.vertices, faces, edges)?,
        })
    }
}

/// Consumes records in order, tracking the open primitive (if any) and handing finished
/// geometry to a [MeshBuilder].
#[derive(Debug)]
pub struct PrimitiveMachine<'s, S: MeshSink + ?Sized> {
    builder: MeshBuilder<'s, S>,
    open: Option<Accumulator>,
    records: usize,
}

impl<'s, S: MeshSink + ?Sized> PrimitiveMachine<'s, S> {
    pub fn new(builder: MeshBuilder<'s, S>) -> Self {
        Self {
            builder,
            open: None,
            records: 0,
        }
    }

    /// The primitive currently being accumulated.
    #[inline]
    pub fn open_primitive(&self) -> Option<&Accumulator> {
        self.open.as_ref()
    }

    /// Process one record.
    pub fn feed(&mut self, record: &Record, command: Command) -> Result<(), Error> {
        let line = record.line;
        tracing::debug!(line, kind = %record.kind, "record");
        self.records += 1;
        match command {
            Command::Begin(fill) => {
                if let Some(open) = &self.open {
                    return Err(Error::NestedPrimitive {
                        line,
                        open: open.line,
                    });
                }
                self.open = Some(Accumulator::new(line, fill));
            }
            Command::End => {
                let open = self.open.take().ok_or(Error::NoOpenPrimitive {
                    line,
                    kind: record.kind,
                })?;
                self.builder.push(open.close(line)?)?;
            }
            Command::Vertex(vertex) => self
                .open
                .as_mut()
                .ok_or(Error::NoOpenPrimitive {
                    line,
                    kind: record.kind,
                })?
                .vertices
                .push(vertex),
            Command::Block(p) => self.solid(record, solid::block(&p))?,
            Command::Cylinder(p) => self.solid(record, solid::cylinder(&p))?,
            Command::Cone(p) => self.solid(record, solid::cone(&p))?,
            Command::Ellipsoid(p) => self.solid(record, solid::ellipsoid(&p))?,
            Command::Wall(p) | Command::Floor(p) => self.solid(record, solid::grid(&p))?,
        }
        Ok(())
    }

    fn solid(
        &mut self,
        record: &Record,
        generated: Result<Mesh, solid::GeometryError>,
    ) -> Result<(), Error> {
        let mesh = generated.map_err(|source| Error::InvalidParameters {
            line: record.line,
            source,
        })?;
        self.builder.push(Fragment {
            line: record.line,
            source: Source::Solid(record.kind),
            mesh,
        })
    }

    /// End of input: fails if a primitive is still open, otherwise flushes the builder.
    pub fn finish(self) -> Result<crate::Report, Error> {
        if let Some(open) = self.open {
            return Err(Error::TruncatedInput(Truncation::UnmatchedBegin {
                line: open.line,
            }));
        }
        let mut report = self.builder.finish()?;
        report.records = self.records;
        Ok(report)
    }
}
