//! Shared numeric constants for the canvas crate.

// ── Stacking order ──────────────────────────────────────────────

/// Stacking order of the template sidebar while no drag is in progress.
///
/// Also the floor of the z-order allocator: every value handed out during a
/// drag is strictly greater than this.
pub const SIDEBAR_REST_Z: i64 = 1000;

// ── Coordinates ─────────────────────────────────────────────────

/// Canvas-local coordinate reported when the canvas cannot be measured.
///
/// Negative on both axes so any bounds check treats it as outside.
pub const OUT_OF_BOUNDS: f64 = -1.0;
