//! Deferred task execution
//!
//! Route callbacks never run inside the call that triggered the dispatch.
//! They are handed to a [`Scheduler`], which runs them on a later turn of the
//! event loop. Whatever runs the loop (the browser, a test, a demo) decides
//! when that turn happens.

use crate::trace_log;
use std::cell::RefCell;
use std::collections::VecDeque;

/// A unit of deferred work
pub type Task = Box<dyn FnOnce()>;

/// Defers tasks to a later turn
///
/// Implementations must run tasks in the order they were deferred and must
/// never run a task from inside `defer` itself.
pub trait Scheduler {
    /// Queue `task` to run after the current turn
    fn defer(&self, task: Task);
}

/// In-memory FIFO scheduler
///
/// Nothing runs until the owner drains the queue, which makes dispatch
/// ordering fully deterministic.
///
/// # Example
///
/// ```
/// use spa_navigator::{Scheduler, TaskQueue};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let queue = TaskQueue::new();
/// let ran = Rc::new(Cell::new(false));
///
/// let flag = ran.clone();
/// queue.defer(Box::new(move || flag.set(true)));
/// assert!(!ran.get());
///
/// queue.run_until_idle();
/// assert!(ran.get());
/// ```
#[derive(Default)]
pub struct TaskQueue {
    tasks: RefCell<VecDeque<Task>>,
}

impl TaskQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Check if nothing is waiting
    pub fn is_idle(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Run the oldest task, if any
    ///
    /// Returns `false` when the queue was empty.
    pub fn run_next(&self) -> bool {
        // The borrow ends before the task runs so it can defer more work.
        let next = self.tasks.borrow_mut().pop_front();
        match next {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run tasks until the queue is empty, including tasks deferred by tasks
    ///
    /// Returns how many tasks ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        trace_log!("Task queue idle after {} task(s)", ran);
        ran
    }

    /// Drop every waiting task without running it
    pub fn clear(&self) {
        // Dropping tasks can run guards that defer again; take them out first.
        let dropped = std::mem::take(&mut *self.tasks.borrow_mut());
        drop(dropped);
    }
}

impl Scheduler for TaskQueue {
    fn defer(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_fifo_order() {
        let queue = TaskQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let log = log.clone();
            queue.defer(Box::new(move || log.borrow_mut().push(i)));
        }
        assert_eq!(queue.pending(), 3);

        assert_eq!(queue.run_until_idle(), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_tasks_can_defer_tasks() {
        let queue = Rc::new(TaskQueue::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_queue = queue.clone();
        let inner_log = log.clone();
        queue.defer(Box::new(move || {
            inner_log.borrow_mut().push("outer");
            let log = inner_log.clone();
            inner_queue.defer(Box::new(move || log.borrow_mut().push("inner")));
        }));

        assert!(queue.run_next());
        assert_eq!(*log.borrow(), vec!["outer"]);
        assert_eq!(queue.pending(), 1);

        assert_eq!(queue.run_until_idle(), 1);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_run_next_on_empty_queue() {
        let queue = TaskQueue::new();
        assert!(!queue.run_next());
        assert_eq!(queue.run_until_idle(), 0);
    }

    #[test]
    fn test_clear_drops_tasks() {
        let queue = TaskQueue::new();
        let token = Rc::new(());

        let held = token.clone();
        queue.defer(Box::new(move || drop(held)));
        assert_eq!(Rc::strong_count(&token), 2);

        queue.clear();
        assert!(queue.is_idle());
        assert_eq!(Rc::strong_count(&token), 1);
    }
}
