//! Decoder for GameMaker's legacy D3D model format (`d3d_model_save`), producing indexed
//! [meshes](Mesh).
//!
//! ```
//! let meshes = d3d::decode_str("100\n1\n10\n", d3d::ImportConfig::default()).unwrap();
//! assert_eq!(meshes[0].vertex_count(), 8);
//! ```
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod builder;
pub mod error;
pub mod primitive;
pub mod record;
pub mod solid;

pub use builder::{MeshSink, Report, Warning};
pub use error::Error;
pub use hedron::{Face, Mesh, Vertex};

use std::io::BufRead;

use builder::MeshBuilder;
use primitive::PrimitiveMachine;

/// The only D3D format version there is.
pub const FORMAT_VERSION: i64 = 100;

/// Options for a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImportConfig {
    /// Put every primitive into one mesh instead of one mesh each. On by default.
    pub merge_primitives: bool,
    /// Split quads and larger faces into triangle fans.
    pub triangulate: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            merge_primitives: true,
            triangulate: false,
        }
    }
}

/// Decode a D3D model, collecting its meshes.
///
/// With [`merge_primitives`](ImportConfig::merge_primitives) this is always exactly one mesh.
pub fn decode(reader: impl BufRead, config: ImportConfig) -> Result<Vec<Mesh>, Error> {
    let mut meshes = Vec::new();
    decode_into(reader, config, &mut meshes)?;
    Ok(meshes)
}

/// [decode] from a string.
#[inline]
pub fn decode_str(text: &str, config: ImportConfig) -> Result<Vec<Mesh>, Error> {
    decode(text.as_bytes(), config)
}

/// Decode a D3D model, handing each mesh to `sink` as soon as it's complete.
///
/// Every record is read and checked before any geometry is built, so a malformed line anywhere
/// means nothing reaches the sink. Errors found while building (unbalanced `begin`/`end`,
/// degenerate solids) are reported after earlier meshes have already been submitted when
/// primitives aren't merged; those meshes are not taken back.
pub fn decode_into<S: MeshSink + ?Sized>(
    reader: impl BufRead,
    config: ImportConfig,
    sink: &mut S,
) -> Result<Report, Error> {
    let records = record::lex(reader)?;
    let commands = records
        .iter()
        .map(|r| r.command())
        .collect::<Result<Vec<_>, _>>()?;

    let mut machine = PrimitiveMachine::new(MeshBuilder::new(config, sink));
    for (record, command) in records.iter().zip(commands) {
        machine.feed(record, command)?;
    }
    let report = machine.finish()?;
    tracing::info!(
        records = report.records,
        meshes = report.meshes,
        warnings = report.warnings.len(),
        "decoded D3D model"
    );
    Ok(report)
}
