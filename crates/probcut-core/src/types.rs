//! Common type aliases used throughout the crate.

/// Search depth in plies.
pub type Depth = u32;

/// Search value as seen by the alpha-beta window.
pub type Score = i32;
