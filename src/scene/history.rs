use std::collections::VecDeque;

use crate::scene::model::{Device, Scene, Viewport};

/// Maximum entries kept per stack; the oldest are evicted first.
pub const HISTORY_CAPACITY: usize = 50;

/// A captured copy of the undoable scene state.
///
/// Annotations are deliberately not captured — only device placement and the
/// viewport participate in undo. Device clones share their immutable screen
/// image pixels via `Arc`, so a snapshot never aliases mutable state with the
/// live scene.
#[derive(Clone, Debug)]
pub struct Snapshot {
    devices: Vec<Device>,
    viewport: Viewport,
}

impl Snapshot {
    fn capture(scene: &Scene) -> Self {
        Self {
            devices: scene.devices.clone(),
            viewport: scene.viewport,
        }
    }

    fn restore(self, scene: &mut Scene) {
        scene.devices = self.devices;
        scene.viewport = self.viewport;
    }
}

/// Bounded undo/redo stacks of scene snapshots.
///
/// Caller contract: call [`History::snapshot`] with the state about to be
/// replaced, exactly once per logical edit, then apply the mutation.
#[derive(Debug, Default)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: VecDeque<Snapshot>,
}

impl History {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current state on the undo stack, ahead of a mutation, and
    /// clear the redo stack.
    pub fn snapshot(&mut self, scene: &Scene) {
        self.undo.push_back(Snapshot::capture(scene));
        while self.undo.len() > HISTORY_CAPACITY {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Restore the most recent snapshot. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        let Some(snapshot) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push_back(Snapshot::capture(scene));
        while self.redo.len() > HISTORY_CAPACITY {
            self.redo.pop_front();
        }
        snapshot.restore(scene);
        scene.clear_selection();
        true
    }

    /// Reapply the most recently undone snapshot. Returns `false` when there
    /// is nothing to redo.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        let Some(snapshot) = self.redo.pop_back() else {
            return false;
        };
        self.undo.push_back(Snapshot::capture(scene));
        while self.undo.len() > HISTORY_CAPACITY {
            self.undo.pop_front();
        }
        snapshot.restore(scene);
        scene.clear_selection();
        true
    }

    /// True when an undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// True when a redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undo entries currently held.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/history.rs"]
mod tests;
