/// Keyboard key identifier.
///
/// The runtime maps platform keycodes into these variants; a key without a
/// variant carries its platform code in `Key::Unknown` so no press is ever
/// dropped on the floor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not represented above.
    Unknown(u32),
}

/// Gating input events.
///
/// These are the four channels that can open the session's gesture gate;
/// once the session runs they forward to the game's permanent handlers.
/// Pointer input never gates and is not represented here.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// A gamepad appeared; the payload is the host's pad index.
    GamepadConnected(usize),
    /// A gamepad went away.
    GamepadDisconnected(usize),
}
