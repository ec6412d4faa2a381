//! CLI Commands
//!
//! All vortex CLI commands organized as separate modules.

mod crypt;
mod sample;

pub use crypt::{crypt, keystream};
pub use sample::sample;

use clap::ValueEnum;
use vortex::MapKind;

/// Chaotic map selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Map {
    /// Rotate-fold tent map (1D)
    Tent,
    /// Multiply-high logistic map (1D)
    Logistic,
    /// Rational sine map (1D)
    Sine,
    /// Henon map (2D)
    Henon,
    /// Lorenz flow (3D)
    Lorenz,
    /// Chen flow (3D)
    Chen,
}

impl From<Map> for MapKind {
    fn from(map: Map) -> Self {
        match map {
            Map::Tent => Self::Tent,
            Map::Logistic => Self::Logistic,
            Map::Sine => Self::Sine,
            Map::Henon => Self::Henon,
            Map::Lorenz => Self::Lorenz,
            Map::Chen => Self::Chen,
        }
    }
}
