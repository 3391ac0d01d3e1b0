use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Action, Controller};

/// Pixels of trackpad scroll that count as one wheel line
const PIXELS_PER_LINE: f32 = 40.0;

/// Turns winit window events into held camera actions plus per-frame
/// pointer motion and scroll
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    held: HashSet<Action>,
    /// Same actions as `held`, oldest first
    order: Vec<Action>,
    cursor: Option<(f32, f32)>,
    motion: (f32, f32),
    /// Positive away from the user
    scroll_lines: f32,
}

impl WinitController {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_active(&mut self, action: Action, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.held.insert(action) {
                    self.order.push(action);
                }
            }
            ElementState::Released => {
                if self.held.remove(&action) {
                    self.order.retain(|&a| a != action);
                }
            }
        }
    }

    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(action) = Self::key_action(keycode) {
                        self.set_active(action, event.state);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(action) = Self::mouse_action(*button) {
                    self.set_active(action, *state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current = (position.x as f32, position.y as f32);
                if let Some(previous) = self.cursor {
                    self.motion.0 += current.0 - previous.0;
                    self.motion.1 += current.1 - previous.1;
                }
                self.cursor = Some(current);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_lines += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
            }
            // Releases are not delivered to an unfocused window
            WindowEvent::Focused(false) => {
                self.held.clear();
                self.order.clear();
            }
            _ => {}
        }
    }

    /// Forget motion and scroll; call once per frame after applying them
    pub fn reset_deltas(&mut self) {
        self.motion = (0.0, 0.0);
        self.scroll_lines = 0.0;
    }

    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    /// Pointer motion in pixels since the last reset
    pub fn motion(&self) -> (f32, f32) {
        self.motion
    }

    pub fn scroll_lines(&self) -> f32 {
        self.scroll_lines
    }

    /// The drag in progress and the motion it covered this frame.
    ///
    /// When both buttons are held the one pressed first wins.
    pub fn drag(&self) -> Option<(Action, (f32, f32))> {
        self.order
            .iter()
            .copied()
            .find(|action| action.is_drag())
            .map(|action| (action, self.motion))
    }

    fn key_action(keycode: KeyCode) -> Option<Action> {
        match keycode {
            KeyCode::KeyQ => Some(Action::OrbitLeft),
            KeyCode::KeyE => Some(Action::OrbitRight),
            KeyCode::KeyW => Some(Action::ZoomIn),
            KeyCode::KeyS => Some(Action::ZoomOut),
            _ => None,
        }
    }

    fn mouse_action(button: MouseButton) -> Option<Action> {
        match button {
            MouseButton::Left => Some(Action::OrbitDrag),
            MouseButton::Right => Some(Action::PanDrag),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_active(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn active_actions(&self) -> &[Action] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Winit events carry platform-specific device ids that tests cannot build,
    // so these exercise the state handling directly.

    #[test]
    fn test_starts_idle() {
        let controller = WinitController::new();
        assert!(controller.active_actions().is_empty());
        assert_eq!(controller.cursor(), None);
        assert_eq!(controller.motion(), (0.0, 0.0));
        assert_eq!(controller.scroll_lines(), 0.0);
        assert_eq!(controller.drag(), None);
    }

    #[test]
    fn test_repeat_press_counts_once() {
        let mut controller = WinitController::new();
        controller.set_active(Action::OrbitDrag, ElementState::Pressed);
        controller.set_active(Action::OrbitDrag, ElementState::Pressed);
        assert_eq!(controller.active_actions(), &[Action::OrbitDrag]);

        controller.set_active(Action::OrbitDrag, ElementState::Released);
        assert!(!controller.is_active(Action::OrbitDrag));
        assert!(controller.active_actions().is_empty());
    }

    #[test]
    fn test_first_drag_wins() {
        let mut controller = WinitController::new();
        controller.motion = (4.0, -2.0);
        controller.set_active(Action::ZoomIn, ElementState::Pressed);
        controller.set_active(Action::PanDrag, ElementState::Pressed);
        controller.set_active(Action::OrbitDrag, ElementState::Pressed);
        assert_eq!(controller.drag(), Some((Action::PanDrag, (4.0, -2.0))));

        controller.set_active(Action::PanDrag, ElementState::Released);
        assert_eq!(controller.drag(), Some((Action::OrbitDrag, (4.0, -2.0))));
    }

    #[test]
    fn test_reset_keeps_cursor() {
        let mut controller = WinitController::new();
        controller.motion = (10.0, 5.0);
        controller.scroll_lines = 2.0;
        controller.cursor = Some((100.0, 200.0));

        controller.reset_deltas();
        assert_eq!(controller.motion(), (0.0, 0.0));
        assert_eq!(controller.scroll_lines(), 0.0);
        assert_eq!(controller.cursor(), Some((100.0, 200.0)));
    }

    #[test]
    fn test_bindings() {
        assert_eq!(WinitController::key_action(KeyCode::KeyQ), Some(Action::OrbitLeft));
        assert_eq!(WinitController::key_action(KeyCode::KeyS), Some(Action::ZoomOut));
        assert_eq!(WinitController::key_action(KeyCode::KeyR), None);
        assert_eq!(
            WinitController::mouse_action(MouseButton::Right),
            Some(Action::PanDrag)
        );
        assert_eq!(WinitController::mouse_action(MouseButton::Middle), None);
    }
}
