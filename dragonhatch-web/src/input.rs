//! Keyboard bindings. Commands fire when a key is released, so holding a key
//! never repeats a move.

use dragonhatch_core::{Command, Direction};
use macroquad::prelude::{KeyCode, is_key_released};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Submit(Command),
    None,
}

const BOUND_KEYS: [KeyCode; 13] = [
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::Up,
    KeyCode::Left,
    KeyCode::Down,
    KeyCode::Right,
    KeyCode::R,
    KeyCode::Space,
    KeyCode::Key1,
    KeyCode::Kp1,
    KeyCode::Escape,
];

pub fn key_action(key: KeyCode) -> KeyAction {
    match key {
        KeyCode::W | KeyCode::Up => KeyAction::Submit(Command::Move(Direction::Up)),
        KeyCode::A | KeyCode::Left => KeyAction::Submit(Command::Move(Direction::Left)),
        KeyCode::S | KeyCode::Down => KeyAction::Submit(Command::Move(Direction::Down)),
        KeyCode::D | KeyCode::Right => KeyAction::Submit(Command::Move(Direction::Right)),
        KeyCode::R => KeyAction::Submit(Command::Wait),
        KeyCode::Space => KeyAction::Submit(Command::Use),
        KeyCode::Key1 | KeyCode::Kp1 => KeyAction::Submit(Command::SkipLevel),
        KeyCode::Escape => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

/// First bound key released this frame, if any.
pub fn poll() -> KeyAction {
    BOUND_KEYS
        .iter()
        .copied()
        .find(|&key| is_key_released(key))
        .map_or(KeyAction::None, key_action)
}
