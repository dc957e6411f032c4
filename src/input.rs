/// Actions a key press can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Close the window, which ends the application.
    Quit,
}

/// Map a gpui key name to an action. Unmapped keys return `None` and should
/// be left to the default handling.
///
/// `shifted` tells whether shift was held: shift turns `q` into `Q`, which
/// does not quit, while escape quits either way.
pub fn action_for_key(key: &str, shifted: bool) -> Option<InputAction> {
    match key {
        "q" if !shifted => Some(InputAction::Quit),
        "escape" => Some(InputAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        assert_eq!(action_for_key("q", false), Some(InputAction::Quit));
        assert_eq!(action_for_key("escape", false), Some(InputAction::Quit));
        assert_eq!(action_for_key("escape", true), Some(InputAction::Quit));
    }

    #[test]
    fn shift_q_does_not_quit() {
        assert_eq!(action_for_key("q", true), None);
    }

    #[test]
    fn other_keys_are_unhandled() {
        for key in ["a", "Q", "space", "enter", "f", "l", "tab", ""] {
            assert_eq!(action_for_key(key, false), None, "{key}");
        }
    }
}
