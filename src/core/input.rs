use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    MouseLeft,
    MouseRight,
    MouseMiddle,
    MouseBack,
    MouseForward,
    /// Any further button the platform reports by index
    MouseOther,
}

impl Button {
    pub fn is_mouse(self) -> bool {
        matches!(
            self,
            Button::MouseLeft
                | Button::MouseRight
                | Button::MouseMiddle
                | Button::MouseBack
                | Button::MouseForward
                | Button::MouseOther
        )
    }
}

/// Discrete input delivered to demos; carries nothing but which button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Button),
}

/// Translate a winit window event into a press event.
///
/// Releases are ignored. Keyboard auto-repeat is forwarded so a held arrow key
/// keeps moving the camera.
pub fn translate(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
            match event.physical_key {
                PhysicalKey::Code(code) => button_for_key(code).map(InputEvent::Pressed),
                PhysicalKey::Unidentified(_) => None,
            }
        }
        WindowEvent::MouseInput {
            state: ElementState::Pressed,
            button,
            ..
        } => button_for_mouse(*button).map(InputEvent::Pressed),
        _ => None,
    }
}

/// Map winit KeyCode to Button
pub fn button_for_key(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::ArrowLeft => Some(Button::ArrowLeft),
        KeyCode::ArrowRight => Some(Button::ArrowRight),
        KeyCode::ArrowUp => Some(Button::ArrowUp),
        KeyCode::ArrowDown => Some(Button::ArrowDown),
        KeyCode::Escape => Some(Button::Escape),
        _ => None,
    }
}

/// Map winit MouseButton to Button; every mouse button has one
pub fn button_for_mouse(button: MouseButton) -> Option<Button> {
    Some(match button {
        MouseButton::Left => Button::MouseLeft,
        MouseButton::Right => Button::MouseRight,
        MouseButton::Middle => Button::MouseMiddle,
        MouseButton::Back => Button::MouseBack,
        MouseButton::Forward => Button::MouseForward,
        MouseButton::Other(_) => Button::MouseOther,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // KeyEvent has private fields, so translate() itself is exercised through
    // the mapping helpers it delegates to.

    #[test]
    fn arrows_map_to_buttons() {
        assert_eq!(button_for_key(KeyCode::ArrowLeft), Some(Button::ArrowLeft));
        assert_eq!(button_for_key(KeyCode::ArrowRight), Some(Button::ArrowRight));
        assert_eq!(button_for_key(KeyCode::ArrowUp), Some(Button::ArrowUp));
        assert_eq!(button_for_key(KeyCode::ArrowDown), Some(Button::ArrowDown));
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        assert_eq!(button_for_key(KeyCode::KeyW), None);
        assert_eq!(button_for_key(KeyCode::Space), None);
    }

    #[test]
    fn mouse_buttons_map() {
        assert_eq!(button_for_mouse(MouseButton::Left), Some(Button::MouseLeft));
        assert_eq!(button_for_mouse(MouseButton::Right), Some(Button::MouseRight));
        assert_eq!(button_for_mouse(MouseButton::Back), Some(Button::MouseBack));
        assert_eq!(button_for_mouse(MouseButton::Forward), Some(Button::MouseForward));
        assert_eq!(button_for_mouse(MouseButton::Other(7)), Some(Button::MouseOther));
    }

    #[test]
    fn mouse_buttons_are_flagged() {
        assert!(Button::MouseMiddle.is_mouse());
        assert!(Button::MouseForward.is_mouse());
        assert!(Button::MouseOther.is_mouse());
        assert!(!Button::ArrowUp.is_mouse());
    }

    #[test]
    fn button_variants_unique() {
        let all = [
            Button::ArrowLeft,
            Button::ArrowRight,
            Button::ArrowUp,
            Button::ArrowDown,
            Button::Escape,
            Button::MouseLeft,
            Button::MouseRight,
            Button::MouseMiddle,
            Button::MouseBack,
            Button::MouseForward,
            Button::MouseOther,
        ];
        let set: HashSet<_> = all.iter().collect();
        assert_eq!(set.len(), 11);
    }
}
