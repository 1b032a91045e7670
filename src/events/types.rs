//! Lifecycle event names shared by fingers and hands.
//!
//! Pure Rust, no platform dependencies.

use std::fmt;

/// The three lifecycle stages every finger and hand goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lifecycle {
    /// Contact (or group of contacts) began.
    Start,
    /// At least one contact moved.
    Move,
    /// Contact lifted off, or the group it belonged to dissolved.
    End,
}

impl Lifecycle {
    /// All stages in the order they occur.
    pub const ALL: [Lifecycle; 3] = [Lifecycle::Start, Lifecycle::Move, Lifecycle::End];

    /// Event name as used in logs and trace output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Start => "start",
            Lifecycle::Move => "move",
            Lifecycle::End => "end",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Lifecycle::Start.as_str(), "start");
        assert_eq!(Lifecycle::Move.as_str(), "move");
        assert_eq!(Lifecycle::End.as_str(), "end");
    }

    #[test]
    fn test_display_matches_name() {
        for stage in Lifecycle::ALL {
            assert_eq!(stage.to_string(), stage.as_str());
        }
    }

    #[test]
    fn test_order_follows_lifecycle() {
        assert!(Lifecycle::Start < Lifecycle::Move);
        assert!(Lifecycle::Move < Lifecycle::End);
    }
}
