use hedron::{Rgba, Vertex};
use nalgebra::{Point3, Vector3};
use num_traits::ToPrimitive;

use crate::{
    primitive::FillType,
    solid::{
        segment_param, BlockParams, EllipsoidParams, FrustumParams, GridParams, TexRepeat,
        MAX_ELLIPSOID_STEPS, MAX_SEGMENTS,
    },
    Error,
};

use super::{Record, RecordKind};

/// A [Record] with its parameters interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Begin(FillType),
    End,
    Vertex(Vertex),
    Block(BlockParams),
    Cylinder(FrustumParams),
    Cone(FrustumParams),
    Ellipsoid(EllipsoidParams),
    Wall(GridParams),
    Floor(GridParams),
}

/// Parameters a solid record falls back on past the end of its line.
const SOLID_DEFAULTS: [f64; 10] = [-0.5, -0.5, -0.5, 0.5, 0.5, 0.5, 1.0, 1.0, 1.0, 12.0];

impl Record {
    /// Interpret this record's parameters.
    ///
    /// # Errors
    ///
    /// * [`MalformedRecord`](Error::MalformedRecord) for an unknown fill type or a color outside
    ///   `0..=0xFFFFFF`
    /// * [`InvalidParameters`](Error::InvalidParameters) for a segment count that can't make a
    ///   solid
    pub fn command(&self) -> Result<Command, Error> {
        let p = |i: usize| self.param_or(i, SOLID_DEFAULTS[i]);
        let corners = || (Point3::new(p(0), p(1), p(2)), Point3::new(p(3), p(4), p(5)));
        let repeat = || TexRepeat {
            horizontal: p(6),
            vertical: p(7),
        };
        let frustum = || -> Result<FrustumParams, Error> {
            let (from, to) = corners();
            Ok(FrustumParams {
                from,
                to,
                repeat: repeat(),
                closed: p(8) != 0.0,
                steps: self.steps(p(9), MAX_SEGMENTS)?,
            })
        };

        Ok(match self.kind {
            RecordKind::Begin => {
                let code = self.param_or(0, 0.0);
                Command::Begin(FillType::from_code(code).ok_or_else(|| {
                    Error::malformed(self.line, format!("unknown primitive type {code}"))
                })?)
            }
            RecordKind::End => Command::End,
            RecordKind::Block => {
                let (from, to) = corners();
                Command::Block(BlockParams {
                    from,
                    to,
                    repeat: repeat(),
                })
            }
            RecordKind::Cylinder => Command::Cylinder(frustum()?),
            RecordKind::Cone => Command::Cone(frustum()?),
            RecordKind::Ellipsoid => {
                let (from, to) = corners();
                Command::Ellipsoid(EllipsoidParams {
                    from,
                    to,
                    repeat: repeat(),
                    // no `closed` flag, so `steps` sits one slot earlier
                    steps: self
                        .steps(self.param_or(8, SOLID_DEFAULTS[9]), MAX_ELLIPSOID_STEPS)?,
                })
            }
            RecordKind::Wall => {
                let (from, to) = corners();
                Command::Wall(GridParams::wall(from, to, repeat()))
            }
            RecordKind::Floor => {
                let (from, to) = corners();
                Command::Floor(GridParams::floor(from, to, repeat()))
            }
            _ => Command::Vertex(self.vertex()?),
        })
    }

    fn steps(&self, value: f64, max: u32) -> Result<u32, Error> {
        segment_param("steps", value, 3, max).map_err(|source| Error::InvalidParameters {
            line: self.line,
            source,
        })
    }

    /// Build the vertex a `vertex_*` record describes. Arity was checked by [Record::parse].
    fn vertex(&self) -> Result<Vertex, Error> {
        let p = &self.params;
        let mut vert = Vertex::at(p[0], p[1], p[2]);
        let mut rest = &p[3..];
        if self.kind.has_normal() {
            vert = vert.with_normal(Vector3::new(rest[0], rest[1], rest[2]));
            rest = &rest[3..];
        }
        if self.kind.has_texture() {
            vert = vert.with_uv(rest[0], rest[1]);
            rest = &rest[2..];
        }
        if self.kind.has_color() {
            vert = vert.with_color(gm_color(rest[0], rest[1]).ok_or_else(|| {
                Error::malformed(self.line, format!("color {} is not a BGR value", rest[0]))
            })?);
        }
        Ok(vert)
    }
}

/// Convert a GameMaker color (`0xBBGGRR`) and alpha to [Rgba].
pub fn gm_color(bgr: f64, alpha: f64) -> Option<Rgba> {
    let bgr = bgr.to_u32().filter(|c| *c <= 0xFF_FF_FF)?;
    let channel = |shift: u32| ((bgr >> shift) & 0xFF) as f32 / 255.0;
    Some(Rgba::new(
        channel(0),
        channel(8),
        channel(16),
        alpha.clamp(0.0, 1.0) as f32,
    ))
}
