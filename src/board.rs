//! Board View
//!
//! Optimistic coordinator over one board. Every mutation is applied to the
//! cached lists first, then the durable write is spawned on the runtime.
//! Failed writes are never rolled back: they mark the view stale and the
//! next `reload` replaces the cache with the store's snapshot.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use board_dnd::{DragOutcome, DragSubject, DropTarget};
use tokio::task::JoinHandle;

use crate::api::{ApiError, ApiResult, BoardApi};
use crate::models::{Board, BoardSnapshot, Task, TaskList};
use crate::position::{index_of, is_dense, renumber, sort_by_position, Positioned};
use crate::reorder;
use crate::transfer;
use crate::undo::{PendingDeletion, UndoTick, UndoTimer};

/// What a finished pointer gesture did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEffect {
    /// Released without dragging; the UI opens the element for editing
    Edit(DragSubject),
    Applied,
    Ignored,
}

pub struct BoardView {
    board: Board,
    lists: Vec<TaskList>,
    api: Arc<dyn BoardApi>,
    stale: Arc<AtomicBool>,
    writes: Vec<JoinHandle<()>>,
    undo: UndoTimer,
}

fn is_dense_sorted<T: Positioned>(items: &mut [T]) -> bool {
    sort_by_position(items);
    is_dense(items)
}

impl BoardView {
    pub async fn load(api: Arc<dyn BoardApi>, board_id: u32) -> ApiResult<Self> {
        let snapshot = api.fetch_board_snapshot(board_id).await?;
        let mut view = Self {
            board: snapshot.board.clone(),
            lists: Vec::new(),
            api,
            stale: Arc::new(AtomicBool::new(false)),
            writes: Vec::new(),
            undo: UndoTimer::new(),
        };
        if !view.ingest(snapshot) {
            view.stale.store(true, Ordering::SeqCst);
        }
        log::info!("Loaded board {} with {} lists", board_id, view.lists.len());
        Ok(view)
    }

    /// Replace the cached board with the store's snapshot and clear the stale flag.
    /// A snapshot with position gaps is renumbered and leaves the view stale.
    pub async fn reload(&mut self) -> ApiResult<()> {
        let snapshot = self.api.fetch_board_snapshot(self.board.id).await?;
        let dense = self.ingest(snapshot);
        self.stale.store(!dense, Ordering::SeqCst);

        if let Some(pending) = self.undo.pending() {
            if self.task(pending.list_id, pending.task_id).is_none() {
                log::debug!("Pending deletion of task {} vanished on reload", pending.task_id);
                self.undo.cancel();
            }
        }
        Ok(())
    }

    /// Returns false when the snapshot had to be renumbered.
    fn ingest(&mut self, snapshot: BoardSnapshot) -> bool {
        let BoardSnapshot { board, mut lists } = snapshot;
        let mut dense = is_dense_sorted(&mut lists);
        for list in lists.iter_mut() {
            dense &= is_dense_sorted(&mut list.tasks);
        }
        if !dense {
            log::warn!("Snapshot of board {} has gaps in its positions, renumbered", board.id);
            renumber(&mut lists);
            for list in lists.iter_mut() {
                renumber(&mut list.tasks);
            }
        }
        self.board = board;
        self.lists = lists;
        dense
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    pub fn list(&self, list_id: u32) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    fn list_mut(&mut self, list_id: u32) -> Option<&mut TaskList> {
        self.lists.iter_mut().find(|l| l.id == list_id)
    }

    pub fn task(&self, list_id: u32, task_id: u32) -> Option<&Task> {
        self.list(list_id)?.task(task_id)
    }

    /// True when a durable write failed since the last load
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Wait for every spawned durable write to finish
    pub async fn settle(&mut self) {
        for write in std::mem::take(&mut self.writes) {
            if let Err(e) = write.await {
                log::warn!("Durable write task did not complete: {}", e);
                self.stale.store(true, Ordering::SeqCst);
            }
        }
    }

    fn spawn_write<F>(&mut self, label: String, write: F)
    where
        F: Future<Output = ApiResult<()>> + Send + 'static,
    {
        let stale = self.stale.clone();
        self.writes.retain(|w| !w.is_finished());
        self.writes.push(tokio::spawn(async move {
            match write.await {
                Ok(()) => log::debug!("{} persisted", label),
                Err(e) => {
                    log::warn!("{} failed, view is stale: {}", label, e);
                    stale.store(true, Ordering::SeqCst);
                }
            }
        }));
    }

    // ========================
    // Reordering
    // ========================

    pub fn swap_lists(&mut self, a: u32, b: u32) -> bool {
        let Some(outcome) = reorder::swap(&mut self.lists, a, b) else {
            log::debug!("Ignored swap of lists {} and {}", a, b);
            return false;
        };
        let api = self.api.clone();
        let board_id = self.board.id;
        self.spawn_write(format!("Swap of lists {} and {}", a, b), async move {
            api.swap_list_positions(board_id, outcome.position_a, outcome.position_b)
                .await
        });
        true
    }

    pub fn swap_tasks(&mut self, list_id: u32, a: u32, b: u32) -> bool {
        let outcome = self
            .list_mut(list_id)
            .and_then(|list| reorder::swap(&mut list.tasks, a, b));
        let Some(outcome) = outcome else {
            log::debug!("Ignored swap of tasks {} and {} in list {}", a, b, list_id);
            return false;
        };
        let api = self.api.clone();
        self.spawn_write(format!("Swap of tasks {} and {}", a, b), async move {
            api.swap_task_positions(list_id, outcome.position_a, outcome.position_b)
                .await
        });
        true
    }

    /// Move a task into another list at `index` (clamped to the list length)
    pub fn move_task(&mut self, task_id: u32, from_list: u32, to_list: u32, index: i32) -> bool {
        if self.is_marked(task_id) {
            log::debug!("Task {} is pending deletion, move refused", task_id);
            return false;
        }
        let Some(outcome) = transfer::move_task(&mut self.lists, task_id, from_list, to_list, index)
        else {
            log::debug!("Ignored move of task {} from list {} to {}", task_id, from_list, to_list);
            return false;
        };

        let api = self.api.clone();
        let board_id = self.board.id;
        let landed = outcome.task.position;
        let payload = outcome.task;
        self.spawn_write(
            format!("Move of task {} to list {}", task_id, to_list),
            async move {
                api.delete_task(board_id, from_list, task_id).await?;
                api.insert_task_at(board_id, to_list, landed, payload)
                    .await
                    .map(|_| ())
            },
        );
        true
    }

    /// Route a resolved drop to a swap or a move.
    pub fn apply_drop(&mut self, subject: DragSubject, target: DropTarget) -> bool {
        match (subject, target) {
            (DragSubject::List(a), DropTarget::List(b)) => self.swap_lists(a, b),
            (
                DragSubject::Task { list_id: from, task_id },
                DropTarget::Task { list_id: to, task_id: other },
            ) => {
                if from == to {
                    self.swap_tasks(from, task_id, other)
                } else {
                    let index = self
                        .list(to)
                        .and_then(|l| index_of(&l.tasks, other))
                        .map(|i| i as i32);
                    match index {
                        Some(index) => self.move_task(task_id, from, to, index),
                        None => false,
                    }
                }
            }
            (DragSubject::Task { list_id: from, task_id }, DropTarget::ListArea(to)) => {
                if from == to {
                    return false;
                }
                let end = self.list(to).map(|l| l.tasks.len() as i32).unwrap_or(0);
                self.move_task(task_id, from, to, end)
            }
            _ => false,
        }
    }

    pub fn apply_gesture(&mut self, outcome: DragOutcome) -> GestureEffect {
        match outcome {
            DragOutcome::Click(subject) => GestureEffect::Edit(subject),
            DragOutcome::Drop { subject, target } => {
                if self.apply_drop(subject, target) {
                    GestureEffect::Applied
                } else {
                    GestureEffect::Ignored
                }
            }
            DragOutcome::Cancelled(_) => GestureEffect::Ignored,
        }
    }

    // ========================
    // Lists
    // ========================

    pub async fn create_list(&mut self, name: &str) -> ApiResult<TaskList> {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidInput("List name must not be empty".into()));
        }
        let list = self
            .api
            .create_task_list(self.board.id, name.to_string())
            .await?;
        self.lists.push(list.clone());
        sort_by_position(&mut self.lists);
        if !is_dense(&self.lists) {
            log::warn!("Created list {} does not line up with the cached board", list.id);
            self.stale.store(true, Ordering::SeqCst);
        }
        Ok(list)
    }

    pub fn rename_list(&mut self, list_id: u32, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        let Some(list) = self.list_mut(list_id) else {
            return false;
        };
        list.name = name.to_string();

        let api = self.api.clone();
        let board_id = self.board.id;
        let name = name.to_string();
        self.spawn_write(format!("Rename of list {}", list_id), async move {
            api.rename_task_list(board_id, list_id, name).await.map(|_| ())
        });
        true
    }

    /// Remove a list with its tasks; later lists move up one position
    pub fn delete_list(&mut self, list_id: u32) -> bool {
        if reorder::remove(&mut self.lists, list_id).is_none() {
            log::debug!("Ignored delete of unknown list {}", list_id);
            return false;
        }
        if self.undo.pending().is_some_and(|p| p.list_id == list_id) {
            self.undo.cancel();
        }

        let api = self.api.clone();
        let board_id = self.board.id;
        self.spawn_write(format!("Delete of list {}", list_id), async move {
            api.delete_task_list(board_id, list_id).await
        });
        true
    }

    // ========================
    // Tasks
    // ========================

    pub async fn create_task(&mut self, list_id: u32, name: &str) -> ApiResult<Task> {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidInput("Task name must not be empty".into()));
        }
        if self.list(list_id).is_none() {
            return Err(ApiError::NotFound(format!("List {} not found", list_id)));
        }
        let task = self
            .api
            .create_task(list_id, self.board.id, name.to_string())
            .await?;

        let mut misaligned = false;
        if let Some(list) = self.list_mut(list_id) {
            list.tasks.push(task.clone());
            sort_by_position(&mut list.tasks);
            misaligned = !is_dense(&list.tasks);
        }
        if misaligned {
            log::warn!("Created task {} does not line up with list {}", task.id, list_id);
            self.stale.store(true, Ordering::SeqCst);
        }
        Ok(task)
    }

    pub fn rename_task(&mut self, list_id: u32, task_id: u32, name: &str) -> bool {
        if name.trim().is_empty() || self.is_marked(task_id) {
            return false;
        }
        let Some(task) = self
            .list_mut(list_id)
            .and_then(|l| l.tasks.iter_mut().find(|t| t.id == task_id))
        else {
            return false;
        };
        task.name = name.to_string();

        let api = self.api.clone();
        let board_id = self.board.id;
        let name = name.to_string();
        self.spawn_write(format!("Rename of task {}", task_id), async move {
            api.rename_task(board_id, list_id, task_id, name).await.map(|_| ())
        });
        true
    }

    pub fn set_task_completed(&mut self, list_id: u32, task_id: u32, completed: bool) -> bool {
        if self.is_marked(task_id) {
            return false;
        }
        let Some(task) = self
            .list_mut(list_id)
            .and_then(|l| l.tasks.iter_mut().find(|t| t.id == task_id))
        else {
            return false;
        };
        task.completed = completed;

        let api = self.api.clone();
        let board_id = self.board.id;
        self.spawn_write(format!("Completion of task {}", task_id), async move {
            api.set_task_completed(board_id, list_id, task_id, completed)
                .await
                .map(|_| ())
        });
        true
    }

    // ========================
    // Undo delete
    // ========================

    /// Mark a task for deletion behind the undo window.
    /// A deletion already pending is finalized immediately.
    pub fn schedule_task_delete(&mut self, list_id: u32, task_id: u32) -> bool {
        if self.task(list_id, task_id).is_none() || self.is_marked(task_id) {
            return false;
        }
        let deletion = PendingDeletion {
            board_id: self.board.id,
            list_id,
            task_id,
        };
        if let Some(displaced) = self.undo.schedule(deletion) {
            self.finalize_deletion(displaced);
        }
        true
    }

    /// Restore the marked task. Returns false when nothing was pending.
    pub fn undo_delete(&mut self) -> bool {
        match self.undo.cancel() {
            Some(deletion) => {
                log::debug!("Restored task {}", deletion.task_id);
                true
            }
            None => false,
        }
    }

    pub fn is_marked(&self, task_id: u32) -> bool {
        self.undo.pending().is_some_and(|p| p.task_id == task_id)
    }

    pub fn pending_deletion(&self) -> Option<PendingDeletion> {
        self.undo.pending()
    }

    pub fn undo_remaining(&self) -> Option<u32> {
        self.undo.remaining()
    }

    /// Wait for the next undo tick; on expiry the deletion is carried out.
    /// Returns `None` immediately when no deletion is pending.
    pub async fn undo_tick(&mut self) -> Option<UndoTick> {
        let tick = self.undo.next_tick().await?;
        if let UndoTick::Expired(deletion) = tick {
            self.finalize_deletion(deletion);
        }
        Some(tick)
    }

    fn finalize_deletion(&mut self, deletion: PendingDeletion) {
        let PendingDeletion {
            board_id,
            list_id,
            task_id,
        } = deletion;
        if let Some(list) = self.list_mut(list_id) {
            reorder::remove(&mut list.tasks, task_id);
        }

        let api = self.api.clone();
        self.spawn_write(format!("Delete of task {}", task_id), async move {
            api.delete_task(board_id, list_id, task_id).await
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::undo::UNDO_SECONDS;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicU32;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        SwapLists(i32, i32),
        SwapTasks(u32, i32, i32),
        DeleteList(u32),
        DeleteTask(u32, u32),
        Insert(u32, i32, u32),
        RenameList(u32, String),
        RenameTask(u32, String),
        Complete(u32, bool),
        CreateList(String),
        CreateTask(u32, String),
    }

    /// Records every call; answers from a fixed snapshot
    struct RecordingApi {
        snapshot: Mutex<BoardSnapshot>,
        calls: Mutex<Vec<Call>>,
        failing: AtomicBool,
        next_id: AtomicU32,
    }

    impl RecordingApi {
        fn new(snapshot: BoardSnapshot) -> Arc<Self> {
            Arc::new(Self {
                snapshot: Mutex::new(snapshot),
                calls: Mutex::new(Vec::new()),
                failing: AtomicBool::new(false),
                next_id: AtomicU32::new(100),
            })
        }

        fn record(&self, call: Call) -> ApiResult<()> {
            self.calls.lock().unwrap().push(call);
            if self.failing.load(Ordering::SeqCst) {
                Err(ApiError::Transport("connection reset".into()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn deletes_of(&self, task_id: u32) -> usize {
            self.calls()
                .iter()
                .filter(|c| matches!(c, Call::DeleteTask(_, id) if *id == task_id))
                .count()
        }
    }

    #[async_trait]
    impl BoardApi for RecordingApi {
        async fn fetch_board_snapshot(&self, _board_id: u32) -> ApiResult<BoardSnapshot> {
            Ok(self.snapshot.lock().unwrap().clone())
        }

        async fn create_task_list(&self, board_id: u32, name: String) -> ApiResult<TaskList> {
            self.record(Call::CreateList(name.clone()))?;
            let mut snapshot = self.snapshot.lock().unwrap();
            let list = TaskList {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                board_id,
                name,
                position: snapshot.lists.len() as i32,
                tasks: Vec::new(),
            };
            snapshot.lists.push(list.clone());
            Ok(list)
        }

        async fn rename_task_list(&self, board_id: u32, list_id: u32, name: String) -> ApiResult<TaskList> {
            self.record(Call::RenameList(list_id, name.clone()))?;
            Ok(TaskList {
                id: list_id,
                board_id,
                name,
                position: 0,
                tasks: Vec::new(),
            })
        }

        async fn delete_task_list(&self, _board_id: u32, list_id: u32) -> ApiResult<()> {
            self.record(Call::DeleteList(list_id))
        }

        async fn swap_list_positions(&self, _board_id: u32, a: i32, b: i32) -> ApiResult<()> {
            self.record(Call::SwapLists(a, b))
        }

        async fn create_task(&self, list_id: u32, _board_id: u32, name: String) -> ApiResult<Task> {
            self.record(Call::CreateTask(list_id, name.clone()))?;
            let snapshot = self.snapshot.lock().unwrap();
            let position = snapshot
                .lists
                .iter()
                .find(|l| l.id == list_id)
                .map(|l| l.tasks.len() as i32)
                .unwrap_or(0);
            Ok(task(self.next_id.fetch_add(1, Ordering::SeqCst), list_id, position))
        }

        async fn rename_task(&self, _: u32, list_id: u32, task_id: u32, name: String) -> ApiResult<Task> {
            self.record(Call::RenameTask(task_id, name))?;
            Ok(task(task_id, list_id, 0))
        }

        async fn set_task_completed(&self, _: u32, list_id: u32, task_id: u32, completed: bool) -> ApiResult<Task> {
            self.record(Call::Complete(task_id, completed))?;
            Ok(task(task_id, list_id, 0))
        }

        async fn delete_task(&self, _board_id: u32, list_id: u32, task_id: u32) -> ApiResult<()> {
            self.record(Call::DeleteTask(list_id, task_id))
        }

        async fn insert_task_at(&self, _: u32, list_id: u32, index: i32, payload: Task) -> ApiResult<Task> {
            self.record(Call::Insert(list_id, index, payload.id))?;
            Ok(payload)
        }

        async fn swap_task_positions(&self, list_id: u32, a: i32, b: i32) -> ApiResult<()> {
            self.record(Call::SwapTasks(list_id, a, b))
        }
    }

    fn task(id: u32, list_id: u32, position: i32) -> Task {
        Task {
            id,
            list_id,
            name: format!("Task {}", id),
            completed: false,
            position,
        }
    }

    fn list(id: u32, position: i32, task_ids: &[u32]) -> TaskList {
        TaskList {
            id,
            board_id: 1,
            name: format!("List {}", id),
            position,
            tasks: task_ids
                .iter()
                .enumerate()
                .map(|(p, &tid)| task(tid, id, p as i32))
                .collect(),
        }
    }

    /// Board 1: list 10 = [1, 2, 3], list 20 = [4]
    fn snapshot() -> BoardSnapshot {
        BoardSnapshot {
            board: Board {
                id: 1,
                title: "Board".to_string(),
                created_at: 0,
            },
            // out of order on purpose: the view sorts on load
            lists: vec![list(20, 1, &[4]), list(10, 0, &[1, 2, 3])],
        }
    }

    async fn setup() -> (Arc<RecordingApi>, BoardView) {
        let api = RecordingApi::new(snapshot());
        let view = BoardView::load(api.clone(), 1).await.expect("load");
        (api, view)
    }

    fn layout(view: &BoardView, list_id: u32) -> Vec<(u32, i32)> {
        view.list(list_id)
            .map(|l| l.tasks.iter().map(|t| (t.id, t.position)).collect())
            .unwrap_or_default()
    }

    async fn run_out_undo(view: &mut BoardView) {
        while view.undo_tick().await.is_some() {}
    }

    #[tokio::test]
    async fn test_load_sorts_lists() {
        let (_api, view) = setup().await;
        let ids: Vec<u32> = view.lists().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![10, 20]);
        assert_eq!(view.board().title, "Board");
        assert!(!view.is_stale());
    }

    #[tokio::test(start_paused = true)]
    async fn test_swap_remove_move_scenario() {
        let (api, mut view) = setup().await;

        assert!(view.swap_tasks(10, 1, 3));
        assert_eq!(layout(&view, 10), vec![(3, 0), (2, 1), (1, 2)]);

        assert!(view.schedule_task_delete(10, 2));
        run_out_undo(&mut view).await;
        assert_eq!(layout(&view, 10), vec![(3, 0), (1, 1)]);

        assert!(view.move_task(1, 10, 20, 0));
        assert_eq!(layout(&view, 10), vec![(3, 0)]);
        assert_eq!(layout(&view, 20), vec![(1, 0), (4, 1)]);

        view.settle().await;
        assert_eq!(
            api.calls(),
            vec![
                Call::SwapTasks(10, 0, 2),
                Call::DeleteTask(10, 2),
                Call::DeleteTask(10, 1),
                Call::Insert(20, 0, 1),
            ]
        );
        assert!(!view.is_stale());
    }

    #[tokio::test]
    async fn test_swap_lists_sends_positions() {
        let (api, mut view) = setup().await;
        assert!(view.swap_lists(10, 20));
        assert!(!view.swap_lists(10, 99));
        view.settle().await;

        let ids: Vec<(u32, i32)> = view.lists().iter().map(|l| (l.id, l.position)).collect();
        assert_eq!(ids, vec![(20, 0), (10, 1)]);
        assert_eq!(api.calls(), vec![Call::SwapLists(0, 1)]);
    }

    #[tokio::test]
    async fn test_failed_write_marks_stale_without_rollback() {
        let (api, mut view) = setup().await;
        api.failing.store(true, Ordering::SeqCst);

        assert!(view.swap_tasks(10, 1, 2));
        view.settle().await;
        assert!(view.is_stale());
        assert_eq!(layout(&view, 10), vec![(2, 0), (1, 1), (3, 2)]);

        view.reload().await.unwrap();
        assert!(!view.is_stale());
        assert_eq!(layout(&view, 10), vec![(1, 0), (2, 1), (3, 2)]);
    }

    #[tokio::test]
    async fn test_failed_delete_skips_insert() {
        let (api, mut view) = setup().await;
        api.failing.store(true, Ordering::SeqCst);

        assert!(view.move_task(3, 10, 20, 5));
        view.settle().await;

        assert_eq!(api.calls(), vec![Call::DeleteTask(10, 3)]);
        assert!(view.is_stale());
    }

    #[tokio::test(start_paused = true)]
    async fn test_undo_before_expiry_deletes_nothing() {
        let (api, mut view) = setup().await;
        assert!(view.schedule_task_delete(10, 2));
        assert_eq!(view.undo_remaining(), Some(UNDO_SECONDS));
        assert!(view.is_marked(2));

        view.undo_tick().await;
        view.undo_tick().await;
        assert_eq!(view.undo_remaining(), Some(3));

        assert!(view.undo_delete());
        assert!(!view.is_marked(2));
        assert_eq!(view.undo_tick().await, None);
        view.settle().await;

        assert_eq!(api.deletes_of(2), 0);
        assert_eq!(layout(&view, 10), vec![(1, 0), (2, 1), (3, 2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_delete_finalizes_first() {
        let (api, mut view) = setup().await;
        assert!(view.schedule_task_delete(10, 1));
        view.undo_tick().await;

        assert!(view.schedule_task_delete(20, 4));
        assert_eq!(view.undo_remaining(), Some(UNDO_SECONDS));
        assert_eq!(layout(&view, 10), vec![(2, 0), (3, 1)]);
        view.settle().await;
        assert_eq!(api.deletes_of(1), 1);
        assert_eq!(api.deletes_of(4), 0);

        run_out_undo(&mut view).await;
        view.settle().await;
        assert_eq!(api.deletes_of(4), 1);
        assert_eq!(layout(&view, 20), vec![]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_marked_task_refuses_edits() {
        let (api, mut view) = setup().await;
        assert!(view.schedule_task_delete(10, 3));

        assert!(!view.schedule_task_delete(10, 3));
        assert!(!view.rename_task(10, 3, "renamed"));
        assert!(!view.set_task_completed(10, 3, true));
        assert!(!view.move_task(3, 10, 20, 0));
        view.settle().await;
        assert_eq!(api.calls(), vec![]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_list_compacts_and_drops_pending() {
        let (api, mut view) = setup().await;
        assert!(view.schedule_task_delete(10, 1));

        assert!(view.delete_list(10));
        assert_eq!(view.pending_deletion(), None);
        let ids: Vec<(u32, i32)> = view.lists().iter().map(|l| (l.id, l.position)).collect();
        assert_eq!(ids, vec![(20, 0)]);

        view.settle().await;
        assert_eq!(api.calls(), vec![Call::DeleteList(10)]);
    }

    #[tokio::test]
    async fn test_drop_routing() {
        let (api, mut view) = setup().await;
        let task_3 = DragSubject::Task { list_id: 10, task_id: 3 };

        let click = view.apply_gesture(DragOutcome::Click(task_3));
        assert_eq!(click, GestureEffect::Edit(task_3));

        let own_area = view.apply_gesture(DragOutcome::Drop {
            subject: task_3,
            target: DropTarget::ListArea(10),
        });
        assert_eq!(own_area, GestureEffect::Ignored);

        let other_area = view.apply_gesture(DragOutcome::Drop {
            subject: task_3,
            target: DropTarget::ListArea(20),
        });
        assert_eq!(other_area, GestureEffect::Applied);
        assert_eq!(layout(&view, 20), vec![(4, 0), (3, 1)]);

        let onto_task = view.apply_drop(
            DragSubject::Task { list_id: 10, task_id: 1 },
            DropTarget::Task { list_id: 20, task_id: 3 },
        );
        assert!(onto_task);
        assert_eq!(layout(&view, 10), vec![(2, 0)]);
        assert_eq!(layout(&view, 20), vec![(4, 0), (1, 1), (3, 2)]);

        view.settle().await;
        assert_eq!(
            api.calls(),
            vec![
                Call::DeleteTask(10, 3),
                Call::Insert(20, 1, 3),
                Call::DeleteTask(10, 1),
                Call::Insert(20, 1, 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_appends_from_store() {
        let (api, mut view) = setup().await;

        let list = view.create_list("Done").await.unwrap();
        assert_eq!(list.position, 2);
        assert_eq!(view.lists().last().map(|l| l.id), Some(list.id));

        let task = view.create_task(20, "Ship").await.unwrap();
        assert_eq!(layout(&view, 20), vec![(4, 0), (task.id, 1)]);

        assert!(matches!(view.create_task(20, "  ").await, Err(ApiError::InvalidInput(_))));
        assert!(matches!(view.create_task(99, "x").await, Err(ApiError::NotFound(_))));
        assert!(!view.is_stale());
        assert_eq!(
            api.calls(),
            vec![Call::CreateList("Done".into()), Call::CreateTask(20, "Ship".into())]
        );
    }

    #[tokio::test]
    async fn test_rename_and_complete_are_optimistic() {
        let (api, mut view) = setup().await;

        assert!(view.rename_list(20, "Doing"));
        assert!(view.rename_task(10, 2, "Review"));
        assert!(view.set_task_completed(10, 2, true));
        assert!(!view.rename_list(20, ""));

        assert_eq!(view.list(20).map(|l| l.name.as_str()), Some("Doing"));
        let renamed = view.task(10, 2).cloned().unwrap();
        assert_eq!(renamed.name, "Review");
        assert!(renamed.completed);

        view.settle().await;
        assert_eq!(
            api.calls(),
            vec![
                Call::RenameList(20, "Doing".into()),
                Call::RenameTask(2, "Review".into()),
                Call::Complete(2, true),
            ]
        );
    }

    #[tokio::test]
    async fn test_gapped_snapshot_is_renumbered_on_load() {
        let mut gapped = snapshot();
        for (task, position) in gapped.lists[1].tasks.iter_mut().zip([0, 2, 5]) {
            task.position = position;
        }
        gapped.lists[0].position = 4;
        let api = RecordingApi::new(gapped);
        let mut view = BoardView::load(api.clone(), 1).await.unwrap();

        assert_eq!(layout(&view, 10), vec![(1, 0), (2, 1), (3, 2)]);
        let lists: Vec<(u32, i32)> = view.lists().iter().map(|l| (l.id, l.position)).collect();
        assert_eq!(lists, vec![(10, 0), (20, 1)]);
        assert!(view.is_stale());

        assert!(view.swap_tasks(10, 1, 3));
        assert_eq!(layout(&view, 10), vec![(3, 0), (2, 1), (1, 2)]);
        view.settle().await;
        assert_eq!(api.calls(), vec![Call::SwapTasks(10, 0, 2)]);

        // a dense snapshot clears the flag again
        *api.snapshot.lock().unwrap() = snapshot();
        view.reload().await.unwrap();
        assert!(!view.is_stale());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_view_cancels_pending_delete() {
        let (api, mut view) = setup().await;
        assert!(view.schedule_task_delete(10, 2));
        view.undo_tick().await;
        drop(view);

        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        assert_eq!(api.deletes_of(2), 0);
        assert_eq!(api.calls(), vec![]);
    }
}
