//! Board DragDrop Utilities
//!
//! Pointer gesture tracking for draggable board elements (lists and tasks).
//! Uses a movement threshold to distinguish click from drag, and a `HitTest`
//! capability to find out what the pointer was released over.

/// Squared movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_SQ_PX: i64 = 50;

/// Pointer position in view coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Element being dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragSubject {
    List(u32),
    Task { list_id: u32, task_id: u32 },
}

/// Element found under the pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// A list header or card
    List(u32),
    /// A task card inside a list
    Task { list_id: u32, task_id: u32 },
    /// The area of a list that is not covered by a task
    ListArea(u32),
}

impl DropTarget {
    pub fn list_id(&self) -> u32 {
        match *self {
            DropTarget::List(id) | DropTarget::ListArea(id) => id,
            DropTarget::Task { list_id, .. } => list_id,
        }
    }
}

/// Resolves what lies under a pointer position.
///
/// Returns every droppable element under `point`, topmost first. The dragged
/// element itself may be among them; the tracker skips it.
pub trait HitTest {
    fn hit_test(&self, point: Point) -> Vec<DropTarget>;
}

impl<F> HitTest for F
where
    F: Fn(Point) -> Vec<DropTarget>,
{
    fn hit_test(&self, point: Point) -> Vec<DropTarget> {
        self(point)
    }
}

/// Per-gesture state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer down on a drag handle, not moved past the threshold yet
    Armed { subject: DragSubject, origin: Point },
    Dragging { subject: DragSubject, origin: Point, current: Point },
}

/// Result of releasing the pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released without dragging: edit intent on the element
    Click(DragSubject),
    /// Released over a valid target
    Drop { subject: DragSubject, target: DropTarget },
    /// Dragged, but released over nothing usable
    Cancelled(DragSubject),
}

/// Tracks one pointer gesture at a time
#[derive(Debug, Default)]
pub struct DragTracker {
    state: DragState,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Subject currently being dragged (past the threshold)
    pub fn dragging(&self) -> Option<DragSubject> {
        match self.state {
            DragState::Dragging { subject, .. } => Some(subject),
            _ => None,
        }
    }

    /// Translation to render the dragged element with
    pub fn offset(&self) -> Option<(i32, i32)> {
        match self.state {
            DragState::Dragging { origin, current, .. } => Some((
                current.x.saturating_sub(origin.x),
                current.y.saturating_sub(origin.y),
            )),
            _ => None,
        }
    }

    /// Pointer pressed on `subject`. Only arms when pressed on its drag handle.
    pub fn pointer_down(&mut self, subject: DragSubject, point: Point, on_handle: bool) -> bool {
        if !on_handle {
            return false;
        }
        self.state = DragState::Armed { subject, origin: point };
        true
    }

    /// Pointer moved. Returns true when this move started the drag.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        match self.state {
            DragState::Armed { subject, origin } => {
                let dx = i64::from(point.x) - i64::from(origin.x);
                let dy = i64::from(point.y) - i64::from(origin.y);
                if dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy)) > DRAG_THRESHOLD_SQ_PX {
                    self.state = DragState::Dragging { subject, origin, current: point };
                    return true;
                }
                false
            }
            DragState::Dragging { subject, origin, .. } => {
                self.state = DragState::Dragging { subject, origin, current: point };
                false
            }
            DragState::Idle => false,
        }
    }

    /// Pointer released. Always returns the tracker to `Idle`.
    pub fn pointer_up<H: HitTest + ?Sized>(&mut self, point: Point, hits: &H) -> Option<DragOutcome> {
        let state = std::mem::take(&mut self.state);
        match state {
            DragState::Idle => None,
            DragState::Armed { subject, .. } => Some(DragOutcome::Click(subject)),
            DragState::Dragging { subject, .. } => {
                let under = hits.hit_test(point);
                let outcome = match resolve_target(subject, &under) {
                    Some(target) => DragOutcome::Drop { subject, target },
                    None => DragOutcome::Cancelled(subject),
                };
                log::debug!("[DND] {:?} released at {:?}: {:?}", subject, point, outcome);
                Some(outcome)
            }
        }
    }

    /// Abort the gesture (pointer capture lost, view torn down)
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Pick the drop target for `subject` from the elements under the pointer.
///
/// Lists only land on lists: a task or list area under the pointer counts as
/// its owning list. Tasks prefer another task, then fall back to the area of a
/// list. The subject itself is never a target.
pub fn resolve_target(subject: DragSubject, under: &[DropTarget]) -> Option<DropTarget> {
    match subject {
        DragSubject::List(id) => under
            .iter()
            .map(|t| DropTarget::List(t.list_id()))
            .find(|t| t.list_id() != id),
        DragSubject::Task { task_id, .. } => {
            let on_task = under.iter().copied().find(|t| {
                matches!(t, DropTarget::Task { task_id: other, .. } if *other != task_id)
            });
            on_task.or_else(|| {
                under.iter().find_map(|t| match *t {
                    DropTarget::List(list_id) | DropTarget::ListArea(list_id) => Some(DropTarget::ListArea(list_id)),
                    DropTarget::Task { .. } => None,
                })
            })
        }
    }
}
