//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s so every host
//! binds the same keys. Event wiring and `preventDefault` stay with the host.

use stagekit_core::ArrowDirection;

/// Nudge distance per arrow press.
pub const NUDGE_STEP: f64 = 1.0;
/// Nudge distance per arrow press with Shift held.
pub const NUDGE_STEP_LARGE: f64 = 10.0;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShortcutAction {
    // ── Edit ──
    Delete,
    Duplicate,
    Nudge {
        direction: ArrowDirection,
        amount: f64,
    },

    // ── Z-order ──
    SendBackward,
    BringForward,
    SendToBack,
    BringToFront,

    // ── Selection ──
    Deselect,
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"d"`, `"ArrowUp"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        // Arrows nudge regardless of ⌘; Shift picks the large step.
        if let Ok(direction) = key.parse::<ArrowDirection>() {
            let amount = if shift { NUDGE_STEP_LARGE } else { NUDGE_STEP };
            return Some(ShortcutAction::Nudge { direction, amount });
        }

        if cmd && shift {
            return match key {
                "[" | "{" => Some(ShortcutAction::SendToBack),
                "]" | "}" => Some(ShortcutAction::BringToFront),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "[" => Some(ShortcutAction::SendBackward),
                "]" => Some(ShortcutAction::BringForward),
                "Delete" | "Backspace" => Some(ShortcutAction::Delete),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
