//! Key bindings

use crate::sim::Command;

/// Command bound to a key, by its DOM-style key name
///
/// Arrows and WASD push the ball, `g` toggles gravity, `f` toggles air
/// resistance and `r` starts a new run.
pub fn command_for_key(key: &str) -> Option<Command> {
    let command = match key {
        "ArrowUp" | "w" | "W" => Command::PushUp,
        "ArrowDown" | "s" | "S" => Command::PushDown,
        "ArrowLeft" | "a" | "A" => Command::PushLeft,
        "ArrowRight" | "d" | "D" => Command::PushRight,
        "g" | "G" => Command::ToggleGravity,
        "f" | "F" => Command::ToggleDamping,
        "r" | "R" => Command::Rerun,
        _ => return None,
    };
    Some(command)
}
