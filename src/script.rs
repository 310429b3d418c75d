//! Replay script: a JSON array of pointer and form events.
//!
//! The script stands in for the browser: `create_template` is the creation
//! form, `canvas`/`unmount` report the canvas rectangle, and the pointer
//! events carry raw screen coordinates.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use canvas::doc::BoxFields;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Submit the template-creation form.
    CreateTemplate { width: i64, height: i64, color: String },
    /// The canvas is mounted with its top-left corner at this screen point.
    Canvas { left: f64, top: f64 },
    /// The canvas is no longer measurable.
    Unmount,
    /// Pointer-down on a box the host rendered.
    DownBox { key: u64, x: f64, y: f64 },
    /// Pointer-down on a sidebar template.
    DownTemplate { key: u64, x: f64, y: f64 },
    /// Pointer-down at a bare screen point; the engine hit-tests it.
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// Log the current templates.
    DebugTemplates,
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns `InvalidJson` for malformed JSON or unknown ops.
pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>, CliError> {
    Ok(serde_json::from_str(text)?)
}

/// Form-side validation for `create_template`. The engine trusts its input.
///
/// # Errors
///
/// Returns `InvalidTemplateSize` unless both sides are positive and fit in
/// `u32`, and `EmptyColor` for a blank color.
pub fn template_fields(index: usize, width: i64, height: i64, color: &str) -> Result<BoxFields, CliError> {
    let size_err = || CliError::InvalidTemplateSize { index, width, height };
    if width <= 0 || height <= 0 {
        return Err(size_err());
    }
    let w = u32::try_from(width).map_err(|_| size_err())?;
    let h = u32::try_from(height).map_err(|_| size_err())?;

    let color = color.trim();
    if color.is_empty() {
        return Err(CliError::EmptyColor { index });
    }
    Ok(BoxFields { width: w, height: h, color: color.to_owned() })
}

/// The two worked gestures: a box pulled off a template and dropped outside
/// the canvas (deleted), then a second one dropped inside (kept).
#[must_use]
pub fn demo_script() -> Vec<ScriptEvent> {
    vec![
        ScriptEvent::Canvas { left: 20.0, top: 20.0 },
        ScriptEvent::CreateTemplate { width: 50, height: 50, color: "#fff".into() },
        ScriptEvent::DownTemplate { key: 0, x: 100.0, y: 100.0 },
        ScriptEvent::Move { x: 130.0, y: 100.0 },
        ScriptEvent::Up { x: 10.0, y: 10.0 },
        ScriptEvent::DownTemplate { key: 0, x: 100.0, y: 100.0 },
        ScriptEvent::Move { x: 60.0, y: 60.0 },
        ScriptEvent::Up { x: 60.0, y: 60.0 },
        ScriptEvent::DebugTemplates,
    ]
}
