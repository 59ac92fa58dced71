//! Splitting D3D text into a header and [Records](Record).
//!
//! # Notes
//!
//! ## File Structure
//!
//! ```text
//! 100                       <- format version; only 100 exists
//! 3                         <- number of records that follow
//! 0 4 0 0 0 0 0 0 0 0 0     <- record: kind, then parameters
//! 2 0 0 0 0 0 0 0 0 0 0
//! 1 0 0 0 0 0 0 0 0 0 0
//! ```
//!
//! Every number on a record line is written as a float, the kind included. GameMaker pads each
//! record to 10 parameters with zeros, but hand-written files often don't, so only the
//! parameters a kind actually needs are required.

mod command;
pub use command::*;

use std::{fmt, io::BufRead};

use num_traits::ToPrimitive;

use crate::{error::Truncation, Error, FORMAT_VERSION};

/// The most parameters a record line may carry.
pub const MAX_PARAMS: usize = 10;

/// What a [Record] describes, by its leading number.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Begin = 0,
    End = 1,
    Vertex = 2,
    VertexColor = 3,
    VertexTexture = 4,
    VertexTextureColor = 5,
    VertexNormal = 6,
    VertexNormalColor = 7,
    VertexNormalTexture = 8,
    VertexNormalTextureColor = 9,
    Block = 10,
    Cylinder = 11,
    Cone = 12,
    Ellipsoid = 13,
    Wall = 14,
    Floor = 15,
}

impl RecordKind {
    /// Every kind, in code order.
    pub const ALL: [Self; 16] = [
        Self::Begin,
        Self::End,
        Self::Vertex,
        Self::VertexColor,
        Self::VertexTexture,
        Self::VertexTextureColor,
        Self::VertexNormal,
        Self::VertexNormalColor,
        Self::VertexNormalTexture,
        Self::VertexNormalTextureColor,
        Self::Block,
        Self::Cylinder,
        Self::Cone,
        Self::Ellipsoid,
        Self::Wall,
        Self::Floor,
    ];

    /// Look up a kind by its code, truncated toward zero as GameMaker does.
    pub fn from_code(code: f64) -> Option<Self> {
        Self::ALL.get(code.to_usize()?).copied()
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The GameMaker function that writes this kind of record.
    pub fn name(self) -> &'static str {
        match self {
            Self::Begin => "primitive_begin",
            Self::End => "primitive_end",
            Self::Vertex => "vertex",
            Self::VertexColor => "vertex_color",
            Self::VertexTexture => "vertex_texture",
            Self::VertexTextureColor => "vertex_texture_color",
            Self::VertexNormal => "vertex_normal",
            Self::VertexNormalColor => "vertex_normal_color",
            Self::VertexNormalTexture => "vertex_normal_texture",
            Self::VertexNormalTextureColor => "vertex_normal_texture_color",
            Self::Block => "block",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Ellipsoid => "ellipsoid",
            Self::Wall => "wall",
            Self::Floor => "floor",
        }
    }

    /// True for the kinds that append a vertex to the open primitive.
    #[inline]
    pub fn is_vertex(self) -> bool {
        (2..=9).contains(&self.code())
    }

    /// True for the single-record parametric solids.
    #[inline]
    pub fn is_solid(self) -> bool {
        self.code() >= 10
    }

    /// Vertex kinds carry position, then normal, then texture coordinates, then color.
    #[inline]
    pub(crate) fn has_normal(self) -> bool {
        (6..=9).contains(&self.code())
    }

    #[inline]
    pub(crate) fn has_texture(self) -> bool {
        matches!(self.code(), 4 | 5 | 8 | 9)
    }

    #[inline]
    pub(crate) fn has_color(self) -> bool {
        self.is_vertex() && self.code() % 2 == 1
    }

    /// The number of leading parameters a record of this kind must carry.
    ///
    /// Solids are special: they take either none (a unit solid) or at least 6.
    pub fn required_params(self) -> usize {
        if !self.is_vertex() {
            return 0;
        }
        3 + 3 * self.has_normal() as usize
            + 2 * self.has_texture() as usize
            + 2 * self.has_color() as usize
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One line of a D3D file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number within the input
    pub line: usize,
    pub kind: RecordKind,
    pub params: Vec<f64>,
}

impl Record {
    /// Parse a record line.
    ///
    /// # Errors
    ///
    /// * [`MalformedRecord`](Error::MalformedRecord) if the line is empty, holds something other
    ///   than finite numbers, names an unknown kind, or has the wrong number of parameters.
    pub fn parse(line: usize, text: &str) -> Result<Self, Error> {
        let mut numbers = text.split_whitespace().map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| Error::malformed(line, format!("`{token}` is not a finite number")))
        });
        let code = numbers
            .next()
            .ok_or_else(|| Error::malformed(line, "empty record"))??;
        let kind = RecordKind::from_code(code)
            .ok_or_else(|| Error::malformed(line, format!("unknown record kind {code}")))?;
        let params = numbers.collect::<Result<Vec<_>, _>>()?;

        if params.len() > MAX_PARAMS {
            return Err(Error::malformed(
                line,
                format!(
                    "`{kind}` record has {} parameters; at most {MAX_PARAMS} are allowed",
                    params.len()
                ),
            ));
        }
        let required = kind.required_params();
        if params.len() < required {
            return Err(Error::malformed(
                line,
                format!(
                    "`{kind}` record needs {required} parameters; got {}",
                    params.len()
                ),
            ));
        }
        if kind.is_solid() && (1..6).contains(&params.len()) {
            return Err(Error::malformed(
                line,
                format!(
                    "`{kind}` record needs both corners (6 parameters) or none; got {}",
                    params.len()
                ),
            ));
        }
        Ok(Self { line, kind, params })
    }

    /// Parameter `i`, or `default` if the line stopped short of it.
    #[inline]
    pub fn param_or(&self, i: usize, default: f64) -> f64 {
        self.params.get(i).copied().unwrap_or(default)
    }
}

/// Read a whole D3D document, returning its records in order.
///
/// The version is checked as soon as the first line is read; nothing after it is looked at if
/// it isn't [FORMAT_VERSION]. Lines past the declared record count are ignored.
pub fn lex(reader: impl BufRead) -> Result<Vec<Record>, Error> {
    let mut lines = reader.split(b'\n').enumerate().map(|(i, l)| (i + 1, l));

    let version = header(&mut lines, "version")?;
    if version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }
    let count = header(&mut lines, "record count")?;
    let count = usize::try_from(count)
        .map_err(|_| Error::malformed(2, format!("negative record count {count}")))?;
    tracing::trace!(count, "lexing D3D records");

    // don't trust the header with an allocation
    let mut records = Vec::with_capacity(count.min(1 << 16));
    for (line, bytes) in lines.take(count) {
        records.push(Record::parse(line, &text(line, bytes)?)?);
    }
    if records.len() < count {
        return Err(Error::TruncatedInput(Truncation::MissingRecords {
            expected: count,
            found: records.len(),
        }));
    }
    Ok(records)
}

/// A raw line as text. Read failures stay [Io](Error::Io); bytes that aren't UTF-8 make the line
/// malformed.
fn text(line: usize, bytes: std::io::Result<Vec<u8>>) -> Result<String, Error> {
    String::from_utf8(bytes?).map_err(|e| {
        Error::malformed(
            line,
            format!("invalid UTF-8 after byte {}", e.utf8_error().valid_up_to()),
        )
    })
}

fn header(
    lines: &mut impl Iterator<Item = (usize, std::io::Result<Vec<u8>>)>,
    field: &'static str,
) -> Result<i64, Error> {
    let (line, bytes) = lines
        .next()
        .ok_or(Error::TruncatedInput(Truncation::MissingHeader(field)))?;
    let text = text(line, bytes)?;
    text.trim()
        .parse()
        .map_err(|_| Error::malformed(line, format!("{field} `{}` is not an integer", text.trim())))
}
