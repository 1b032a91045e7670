//! Configuration constants and default values.

// === Finger Counts ===

/// Largest cohort size that has a dedicated handler key (`five`).
pub const MAX_KEYED_FINGERS: usize = 5;

// === Defaults ===

/// Mouse emulation is off unless requested.
pub const DEFAULT_HANDLE_MOUSE: bool = false;

// === Handler Keys ===

/// Names of the handler keys, `any` first, then one per finger count.
pub const HANDLER_NAMES: [&str; 6] = ["any", "one", "two", "three", "four", "five"];
