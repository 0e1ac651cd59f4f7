//! Completion notifications and the observer lists that deliver them

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Emitted once for every step whose work finished without error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepCompleted {
    pub index: usize,
    pub name: String,
}

/// Emitted once after the last registered step has been attempted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineCompleted {
    pub run_id: Uuid,
    pub steps: usize,
}

/// Handle returned by [`Observers::attach`], used to detach the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Type for event listeners
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// An explicit list of listeners for one kind of event
pub struct Observers<E> {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<E>)>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn attach<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns false if the listener was not attached
    pub fn detach(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Deliver the event to every currently attached listener, in attach order
    pub fn emit(&self, event: &E) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
