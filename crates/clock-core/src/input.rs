/// Keyboard actions understood by the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleControlPanel,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "h" | "H" => Some(KeyAction::ToggleControlPanel),
        _ => None,
    }
}
