//! Deferred values and the loader task queue
//!
//! Optional subsystems (camera controls, the debug panel widget) and assets
//! are loaded without blocking the frame that requested them. A request
//! hands back a [`Deferred`] that starts unresolved; the loader itself runs
//! later as a task on a [`TaskQueue`] and fills the slot through its
//! [`Resolver`]. Consumers check readiness with [`Deferred::poll`] at the
//! start of a tick and never assume the value exists right after asking.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::error::SceneError;

type Slot<T> = Rc<RefCell<Option<Result<T, SceneError>>>>;

enum State<T> {
    Pending(Slot<T>),
    Ready(T),
    Failed(SceneError),
}

/// A value that becomes available at some later tick
pub struct Deferred<T> {
    state: State<T>,
}

/// Write end of a [`Deferred`]
pub struct Resolver<T> {
    slot: Slot<T>,
}

impl<T> Deferred<T> {
    /// Create an unresolved value together with its resolver
    pub fn pending() -> (Self, Resolver<T>) {
        let slot: Slot<T> = Rc::new(RefCell::new(None));
        let deferred = Self {
            state: State::Pending(Rc::clone(&slot)),
        };
        (deferred, Resolver { slot })
    }
    
    /// Create an already resolved value
    pub fn ready(value: T) -> Self {
        Self {
            state: State::Ready(value),
        }
    }
    
    /// Check for resolution and return the value once it is available
    pub fn poll(&mut self) -> Option<&mut T> {
        let resolved = match &self.state {
            State::Pending(slot) => slot.borrow_mut().take(),
            _ => None,
        };
        match resolved {
            Some(Ok(value)) => self.state = State::Ready(value),
            Some(Err(error)) => self.state = State::Failed(error),
            None => {}
        }
        
        match &mut self.state {
            State::Ready(value) => Some(value),
            _ => None,
        }
    }
    
    /// Whether the value has resolved successfully (as of the last poll)
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }
    
    /// The load error, if resolution failed
    pub fn error(&self) -> Option<&SceneError> {
        match &self.state {
            State::Failed(error) => Some(error),
            _ => None,
        }
    }
    
    /// Borrow the value if it has already been observed by [`Deferred::poll`]
    pub fn get(&self) -> Option<&T> {
        match &self.state {
            State::Ready(value) => Some(value),
            _ => None,
        }
    }
    
    /// Mutable counterpart of [`Deferred::get`]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            State::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Pending(_) => "pending",
            State::Ready(_) => "ready",
            State::Failed(_) => "failed",
        };
        f.debug_struct("Deferred").field("state", &state).finish()
    }
}

impl<T> Resolver<T> {
    /// Fill the slot; the paired [`Deferred`] observes it on its next poll
    pub fn resolve(self, result: Result<T, SceneError>) {
        *self.slot.borrow_mut() = Some(result);
    }
}

type Task = Box<dyn FnOnce()>;

/// Single-threaded queue of loader tasks
///
/// Clones share the same queue. The orchestrator drains it once per tick,
/// after the frame has been rendered.
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.len())
            .finish()
    }
}

impl TaskQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Schedule a task to run on the next drain
    pub fn spawn(&self, task: impl FnOnce() + 'static) {
        self.tasks.borrow_mut().push_back(Box::new(task));
    }
    
    /// Schedule `load` and return a [`Deferred`] for its result
    pub fn defer<T: 'static>(
        &self,
        load: impl FnOnce() -> Result<T, SceneError> + 'static,
    ) -> Deferred<T> {
        let (deferred, resolver) = Deferred::pending();
        self.spawn(move || resolver.resolve(load()));
        deferred
    }
    
    /// Number of tasks waiting to run
    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }
    
    /// Whether no tasks are waiting
    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }
    
    /// Run every task queued so far
    ///
    /// Tasks spawned while draining wait for the next drain. Returns the
    /// number of tasks that ran.
    pub fn run_pending(&self) -> usize {
        let batch: Vec<Task> = self.tasks.borrow_mut().drain(..).collect();
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }
}
