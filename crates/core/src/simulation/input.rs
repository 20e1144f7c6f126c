//! Pointer input events

/// Pointer input delivered to the world between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to `(x, y)` in viewport px
    Move { x: f64, y: f64 },
    /// Primary button clicked at `(x, y)` in viewport px
    Click { x: f64, y: f64 },
}
