use crate::domain::TaskId;

/// Keys handled on a focused task card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKey {
    ArrowLeft,
    ArrowRight,
    Delete,
}

/// Pick mode: select a task, then select a destination column.
///
/// At most one task is armed at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickState {
    armed: Option<TaskId>,
}

impl PickState {
    pub fn armed(&self) -> Option<&TaskId> {
        self.armed.as_ref()
    }

    /// Picking the armed task again disarms it; picking another replaces it.
    pub fn toggle(&mut self, id: TaskId) {
        if self.armed.as_ref() == Some(&id) {
            self.armed = None;
        } else {
            self.armed = Some(id);
        }
    }

    pub fn take(&mut self) -> Option<TaskId> {
        self.armed.take()
    }

    pub fn clear(&mut self) {
        self.armed = None;
    }
}

/// Native drag-and-drop bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    dragging: Option<TaskId>,
}

impl DragState {
    pub fn start(&mut self, id: TaskId) {
        self.dragging = Some(id);
    }

    pub fn end(&mut self) {
        self.dragging = None;
    }

    pub fn dragging(&self) -> Option<&TaskId> {
        self.dragging.as_ref()
    }
}

/// Works out which task a drop on a column refers to.
///
/// Order: explicit drag payload, then the task being dragged, then the
/// armed task. The armed task is consumed only when it is the one used.
pub fn resolve_drop(
    payload: Option<TaskId>,
    drag: &DragState,
    pick: &mut PickState,
) -> Option<TaskId> {
    payload
        .or_else(|| drag.dragging().cloned())
        .or_else(|| pick.take())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_toggle_same_task_disarms() {
        let mut pick = PickState::default();
        pick.toggle(TaskId::new("a"));
        assert_eq!(pick.armed(), Some(&TaskId::new("a")));

        pick.toggle(TaskId::new("a"));
        assert_eq!(pick.armed(), None);
    }

    #[test]
    fn test_pick_second_task_replaces_first() {
        let mut pick = PickState::default();
        pick.toggle(TaskId::new("a"));
        pick.toggle(TaskId::new("b"));
        assert_eq!(pick.armed(), Some(&TaskId::new("b")));
    }

    #[test]
    fn test_resolve_drop_prefers_payload() {
        let mut drag = DragState::default();
        drag.start(TaskId::new("dragged"));
        let mut pick = PickState::default();
        pick.toggle(TaskId::new("armed"));

        let resolved = resolve_drop(Some(TaskId::new("payload")), &drag, &mut pick);

        assert_eq!(resolved, Some(TaskId::new("payload")));
        assert_eq!(pick.armed(), Some(&TaskId::new("armed")));
    }

    #[test]
    fn test_resolve_drop_falls_back_to_drag_then_pick() {
        let mut drag = DragState::default();
        let mut pick = PickState::default();
        pick.toggle(TaskId::new("armed"));

        drag.start(TaskId::new("dragged"));
        assert_eq!(resolve_drop(None, &drag, &mut pick), Some(TaskId::new("dragged")));
        assert!(pick.armed().is_some());

        drag.end();
        assert_eq!(resolve_drop(None, &drag, &mut pick), Some(TaskId::new("armed")));
        assert!(pick.armed().is_none());

        assert_eq!(resolve_drop(None, &drag, &mut pick), None);
    }
}
