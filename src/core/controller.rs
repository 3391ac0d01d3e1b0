/// Camera action bound to a held key or mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Q
    OrbitLeft,
    /// E
    OrbitRight,
    /// W
    ZoomIn,
    /// S
    ZoomOut,
    /// Left mouse button held: mouse motion rotates around the target
    OrbitDrag,
    /// Right mouse button held: mouse motion slides the target
    PanDrag,
}

impl Action {
    /// Drag actions only matter together with pointer motion
    pub const fn is_drag(self) -> bool {
        matches!(self, Action::OrbitDrag | Action::PanDrag)
    }
}

/// Source of held camera actions
pub trait Controller {
    fn is_active(&self, action: Action) -> bool;

    /// Actions in the order they were started
    fn active_actions(&self) -> &[Action];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_drag_actions() {
        assert!(Action::OrbitDrag.is_drag());
        assert!(Action::PanDrag.is_drag());
        assert!(!Action::ZoomIn.is_drag());
        assert!(!Action::OrbitLeft.is_drag());
    }

    #[test]
    fn test_actions_hash_distinctly() {
        let set: HashSet<_> = [
            Action::OrbitLeft,
            Action::OrbitRight,
            Action::ZoomIn,
            Action::ZoomOut,
            Action::OrbitDrag,
            Action::PanDrag,
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 6);
    }

    struct Held(Vec<Action>);

    impl Controller for Held {
        fn is_active(&self, action: Action) -> bool {
            self.0.contains(&action)
        }

        fn active_actions(&self) -> &[Action] {
            &self.0
        }
    }

    #[test]
    fn test_controller_reports_held_actions() {
        let controller = Held(vec![Action::PanDrag, Action::OrbitRight]);
        assert!(controller.is_active(Action::PanDrag));
        assert!(!controller.is_active(Action::OrbitDrag));
        assert_eq!(controller.active_actions().len(), 2);
        assert!(!Held(vec![]).is_active(Action::ZoomOut));
    }
}
