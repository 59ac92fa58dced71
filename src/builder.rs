//! Collects finished fragments and hands meshes to a [MeshSink].

use std::{convert::Infallible, fmt};

use hedron::Mesh;

use crate::{primitive::FillType, record::RecordKind, Error, ImportConfig};

/// Receives meshes as the decoder produces them.
pub trait MeshSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn submit(&mut self, mesh: Mesh) -> Result<(), Self::Error>;

    /// Whether point and line primitives should be delivered at all.
    ///
    /// Sinks that only understand triangles return `false`; such primitives are then dropped
    /// with a [Warning::LooseGeometryDropped].
    #[inline]
    fn accepts_loose_geometry(&self) -> bool {
        true
    }
}

impl MeshSink for Vec<Mesh> {
    type Error = Infallible;

    #[inline]
    fn submit(&mut self, mesh: Mesh) -> Result<(), Self::Error> {
        self.push(mesh);
        Ok(())
    }
}

impl<S: MeshSink + ?Sized> MeshSink for &mut S {
    type Error = S::Error;

    #[inline]
    fn submit(&mut self, mesh: Mesh) -> Result<(), Self::Error> {
        (**self).submit(mesh)
    }

    #[inline]
    fn accepts_loose_geometry(&self) -> bool {
        (**self).accepts_loose_geometry()
    }
}

/// What produced a [Fragment].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primitive(FillType),
    Solid(RecordKind),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Primitive(fill) => write!(f, "{fill} primitive"),
            Source::Solid(kind) => write!(f, "{kind}"),
        }
    }
}

/// Geometry from one primitive or solid record, indexed from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// line of the `begin` or solid record
    pub line: usize,
    pub source: Source,
    pub mesh: Mesh,
}

impl Fragment {
    /// True if the fragment contributes nothing: no vertices, or a triangle primitive that
    /// produced no faces.
    pub fn is_empty(&self) -> bool {
        match self.source {
            _ if self.mesh.vertices().is_empty() => true,
            Source::Primitive(fill) if !fill.is_loose() => self.mesh.faces().is_empty(),
            _ => false,
        }
    }
}

/// Something worth knowing about that didn't stop the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// A point or line primitive was skipped because the sink only takes triangles.
    LooseGeometryDropped { line: usize, fill: FillType },
    /// A primitive produced no geometry.
    EmptyPrimitive { line: usize, fill: FillType },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::LooseGeometryDropped { line, fill } => {
                write!(f, "line {line}: dropped {fill} primitive; sink only takes triangles")
            }
            Warning::EmptyPrimitive { line, fill } => {
                write!(f, "line {line}: {fill} primitive has no geometry")
            }
        }
    }
}

/// Summary of a successful decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// number of records processed
    pub records: usize,
    /// number of meshes submitted to the sink
    pub meshes: usize,
    pub warnings: Vec<Warning>,
}

/// Turns fragments into submitted meshes, either one per fragment or merged into one.
#[derive(Debug)]
pub struct MeshBuilder<'s, S: MeshSink + ?Sized> {
    config: ImportConfig,
    sink: &'s mut S,
    merged: Option<Mesh>,
    report: Report,
}

impl<'s, S: MeshSink + ?Sized> MeshBuilder<'s, S> {
    pub fn new(config: ImportConfig, sink: &'s mut S) -> Self {
        Self {
            config,
            sink,
            merged: config.merge_primitives.then(Mesh::new),
            report: Report::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Warnings recorded so far.
    #[inline]
    pub fn warnings(&self) -> &[Warning] {
        &self.report.warnings
    }

    pub fn push(&mut self, mut fragment: Fragment) -> Result<(), Error> {
        let line = fragment.line;
        if let Source::Primitive(fill) = fragment.source {
            if fragment.is_empty() {
                self.warn(Warning::EmptyPrimitive { line, fill });
                return Ok(());
            }
            if fill.is_loose() && !self.sink.accepts_loose_geometry() {
                self.warn(Warning::LooseGeometryDropped { line, fill });
                return Ok(());
            }
        }

        if self.config.triangulate {
            fragment.mesh.triangulate();
        }
        match &mut self.merged {
            Some(merged) => {
                tracing::trace!(line, source = %fragment.source, "merging fragment");
                merged.append(fragment.mesh)?;
            }
            None => self.submit(fragment.mesh)?,
        }
        Ok(())
    }

    fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.report.warnings.push(warning);
    }

    fn submit(&mut self, mesh: Mesh) -> Result<(), Error> {
        tracing::debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            edges = mesh.edges().len(),
            "submitting mesh"
        );
        self.sink
            .submit(mesh)
            .map_err(|e| Error::Sink(Box::new(e)))?;
        self.report.meshes += 1;
        Ok(())
    }

    /// Submit the merged mesh, if merging, and return the report.
    pub fn finish(mut self) -> Result<Report, Error> {
        if let Some(merged) = self.merged.take() {
            self.submit(merged)?;
        }
        Ok(self.report)
    }
}
