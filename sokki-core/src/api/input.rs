//! Host input event types.

use serde::{Deserialize, Serialize};

/// Navigation and deletion keys the host reports separately from text
/// mutations.
///
/// Only [`DeleteBackward`](Self::DeleteBackward) can trigger a reversal;
/// every other key merely invalidates whatever reversal was pending. Hosts
/// that cannot distinguish individual keys can report [`Other`](Self::Other)
/// and lose nothing but undo coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKey {
    DeleteBackward,
    DeleteForward,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Other,
}
