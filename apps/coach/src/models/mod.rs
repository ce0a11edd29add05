//! Data model shared by the gateway, the flow controllers and the tier gate.
//!
//! Each AI reply has two shapes: a `*Reply` struct that mirrors the JSON schema
//! sent to the model, and the domain type callers see. Conversion is where
//! scores are normalized.

use tracing::warn;

pub mod evaluation;
pub mod resume;
pub mod simulation;

/// Rounds a model-reported score and clamps it into `0..=max`.
///
/// Scores are trusted as reported except for range: out-of-range values are
/// pulled to the nearest bound and logged.
pub(crate) fn normalize_score(field: &str, raw: f64, max: u8) -> u8 {
    let rounded = raw.round();
    let clamped = rounded.clamp(0.0, f64::from(max));
    if clamped != rounded {
        warn!("Model returned {field}={raw}, outside 0..={max}; clamped to {clamped}");
    }
    clamped as u8
}
