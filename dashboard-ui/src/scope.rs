//! Component-scoped async guards
//!
//! A spawned future can outlive the component that started it, or be
//! overtaken by a newer request for the same slot (the user switched
//! course before the old roster arrived). Every completion checks its
//! token before touching a signal; a stale token means the result is
//! dropped without any state write.

use std::cell::Cell;
use std::rc::Rc;

/// Guard owned by one component. Hook `retire` into `use_drop`; every
/// in-flight future for this scope then no-ops on completion.
#[derive(Clone)]
pub struct TaskScope {
    alive: Rc<Cell<bool>>,
    generation: Rc<Cell<u64>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Start a new load for the slot this scope guards. Tokens handed
    /// out for earlier loads turn stale immediately.
    pub fn begin(&self) -> ScopeToken {
        let issued = self.generation.get() + 1;
        self.generation.set(issued);
        ScopeToken {
            alive: self.alive.clone(),
            generation: self.generation.clone(),
            issued,
        }
    }

    /// Mark the owning component as gone. Call from `use_drop`.
    pub fn retire(&self) {
        self.alive.set(false);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }
}

impl Default for TaskScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that a completion belongs to the newest request of a live
/// component. Cheap to clone into spawned futures.
#[derive(Clone)]
pub struct ScopeToken {
    alive: Rc<Cell<bool>>,
    generation: Rc<Cell<u64>>,
    issued: u64,
}

impl ScopeToken {
    pub fn is_live(&self) -> bool {
        self.alive.get() && self.generation.get() == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_live() {
        let scope = TaskScope::new();
        let token = scope.begin();
        assert!(token.is_live());
        assert!(scope.is_alive());
    }

    #[test]
    fn newer_begin_invalidates_older_token() {
        let scope = TaskScope::new();
        let first = scope.begin();
        let second = scope.begin();
        assert!(!first.is_live());
        assert!(second.is_live());
    }

    #[test]
    fn retire_kills_every_token() {
        let scope = TaskScope::new();
        let token = scope.begin();
        scope.retire();
        assert!(!token.is_live());
        assert!(!scope.is_alive());
        // A token minted after retirement is dead on arrival too
        assert!(!scope.begin().is_live());
    }

    #[test]
    fn clones_share_state() {
        let scope = TaskScope::new();
        let clone = scope.clone();
        let token = scope.begin();
        clone.retire();
        assert!(!token.is_live());
    }

    #[test]
    fn token_clone_tracks_the_same_request() {
        let scope = TaskScope::new();
        let token = scope.begin();
        let carried_into_future = token.clone();
        assert!(carried_into_future.is_live());
        scope.begin();
        assert!(!carried_into_future.is_live());
    }
}
