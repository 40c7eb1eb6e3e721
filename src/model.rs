use serde::{Deserialize, Serialize};

/// A single cuttable shape, in sheet-relative coordinates before placement.
///
/// Rotation is always in whole degrees. Rectangles only ever carry 0 or 90;
/// circles never rotate; diamonds sweep 0..=90 in steps of 10.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "tipo", rename_all = "lowercase")]
pub enum Part {
    #[serde(rename = "retangular")]
    Rectangular {
        largura: u32,
        altura: u32,
        #[serde(default)]
        rotacao: u32,
    },
    #[serde(rename = "circular")]
    Circular { r: u32 },
    #[serde(rename = "diamante")]
    Diamond {
        largura: u32,
        altura: u32,
        #[serde(default)]
        rotacao: u32,
    },
}

impl Part {
    pub fn rotation(&self) -> u32 {
        match self {
            Part::Rectangular { rotacao, .. } => *rotacao,
            Part::Circular { .. } => 0,
            Part::Diamond { rotacao, .. } => *rotacao,
        }
    }

    pub fn with_rotation(mut self, rotation: u32) -> Self {
        match &mut self {
            Part::Rectangular { rotacao, .. } => *rotacao = rotation,
            Part::Circular { .. } => {}
            Part::Diamond { rotacao, .. } => *rotacao = rotation,
        }
        self
    }

    /// Rotations this part may be tried at, current rotation first for
    /// diamonds so the packer prefers to keep whatever rotation it was
    /// handed before sweeping the rest.
    pub fn candidate_rotations(&self) -> Vec<u32> {
        match self {
            Part::Rectangular { .. } => vec![0, 90],
            Part::Circular { .. } => vec![0],
            Part::Diamond { rotacao, .. } => {
                let mut out = vec![*rotacao];
                out.extend((0..=90).step_by(10).filter(|r| r != rotacao));
                out
            }
        }
    }
}

/// A [`Part`] that has been given a position by the packer.
///
/// `x, y` is the top-left corner of the part's *unrotated* bounding box in
/// sheet coordinates (origin top-left, +x right, +y down). For circles this
/// is the top-left of the enclosing square.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlacedPart {
    pub part: Part,
    pub x: i64,
    pub y: i64,
}

impl PlacedPart {
    pub fn new(part: Part, x: i64, y: i64) -> Self {
        Self { part, x, y }
    }
}

/// Rectangular stock the parts are cut from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sheet {
    pub width: u32,
    pub height: u32,
}

impl Sheet {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }
}

/// The four scan-direction choices the flexible packer can be configured
/// with, plus the integer safety margin it inflates every placement by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ScanConfig {
    pub left_to_right: bool,
    pub top_to_bottom: bool,
    pub horizontal_priority: bool,
    pub margin: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            left_to_right: true,
            top_to_bottom: true,
            horizontal_priority: true,
            margin: 0,
        }
    }
}

impl ScanConfig {
    pub fn new(
        left_to_right: bool,
        top_to_bottom: bool,
        horizontal_priority: bool,
        margin: u32,
    ) -> Self {
        Self {
            left_to_right,
            top_to_bottom,
            horizontal_priority,
            margin,
        }
    }

    /// The four ScanConfigs the ACO pheromone table over scan choices is
    /// defined over (margin is not part of the learned choice; it is
    /// supplied separately by the driver).
    pub fn all_directions(margin: u32) -> [ScanConfig; 4] {
        [
            ScanConfig::new(true, true, true, margin),
            ScanConfig::new(true, false, true, margin),
            ScanConfig::new(false, true, true, margin),
            ScanConfig::new(false, false, true, margin),
        ]
    }
}

/// An ordered sequence of successfully placed parts. Order matches the
/// order pieces were placed in, not necessarily input order (pieces that
/// did not fit are simply absent).
pub type Layout = Vec<PlacedPart>;
