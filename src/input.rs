//! Ingestion and validation of parts and sheets at the library boundary.
//!
//! [`Part`] already deserializes directly from the tagged wire record via
//! `serde`; this module adds the fail-fast validation the wire format
//! cannot express as a type (positive dimensions, allowed rotation steps).

use crate::error::{CutLayError, Result};
use crate::model::{Part, Sheet};

/// Parses and validates a JSON array of tagged part records, rejecting the
/// whole batch on the first offender (fail fast, per-index message).
pub fn parse_parts(json: &str) -> Result<Vec<Part>> {
    let raw: Vec<Part> = serde_json::from_str(json)
        .map_err(|e| CutLayError::InvalidPart {
            index: 0,
            reason: format!("malformed input: {e}"),
        })?;

    for (index, part) in raw.iter().enumerate() {
        validate_part(index, part)?;
    }

    Ok(raw)
}

/// Validates a single part: positive dimensions/radius, and a rotation
/// step allowed for its shape (0/90 for rectangles, 0 for circles, any
/// multiple of 10 in 0..=90 for diamonds).
pub fn validate_part(index: usize, part: &Part) -> Result<()> {
    match part {
        Part::Rectangular {
            largura,
            altura,
            rotacao,
        } => {
            if *largura == 0 || *altura == 0 {
                return Err(CutLayError::InvalidPart {
                    index,
                    reason: "rectangular part must have positive largura and altura".into(),
                });
            }
            if *rotacao != 0 && *rotacao != 90 {
                return Err(CutLayError::InvalidPart {
                    index,
                    reason: format!("rectangular part rotation must be 0 or 90, got {rotacao}"),
                });
            }
        }
        Part::Circular { r } => {
            if *r == 0 {
                return Err(CutLayError::InvalidPart {
                    index,
                    reason: "circular part must have positive radius".into(),
                });
            }
        }
        Part::Diamond {
            largura,
            altura,
            rotacao,
        } => {
            if *largura == 0 || *altura == 0 {
                return Err(CutLayError::InvalidPart {
                    index,
                    reason: "diamond part must have positive largura and altura".into(),
                });
            }
            if *rotacao > 90 || *rotacao % 10 != 0 {
                return Err(CutLayError::InvalidPart {
                    index,
                    reason: format!(
                        "diamond part rotation must be a multiple of 10 in 0..=90, got {rotacao}"
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Validates sheet dimensions, rejecting non-positive width/height.
pub fn validate_sheet(sheet: Sheet) -> Result<Sheet> {
    if sheet.width == 0 || sheet.height == 0 {
        return Err(CutLayError::InvalidSheet {
            width: i64::from(sheet.width),
            height: i64::from(sheet.height),
        });
    }
    Ok(sheet)
}
