//! Per-step change sets handed to observers.

/// Direction of a cell's state change between two generations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    Born,
    Died,
}

/// A single cell that changed state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellChange {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub transition: Transition,
}

impl CellChange {
    pub const fn new(x: usize, y: usize, z: usize, transition: Transition) -> Self {
        Self { x, y, z, transition }
    }

    pub const fn position(&self) -> (usize, usize, usize) {
        (self.x, self.y, self.z)
    }
}

/// Cells that changed during one step, in x-major scan order.
/// Created fresh per step; the engine keeps no history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeRecord {
    changes: Vec<CellChange>,
}

impl ChangeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_changes(changes: Vec<CellChange>) -> Self {
        Self { changes }
    }

    pub fn push(&mut self, change: CellChange) {
        self.changes.push(change);
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CellChange> {
        self.changes.iter()
    }

    pub fn as_slice(&self) -> &[CellChange] {
        &self.changes
    }

    /// Cells that came alive
    pub fn born(&self) -> impl Iterator<Item = &CellChange> + '_ {
        self.changes.iter().filter(|c| c.transition == Transition::Born)
    }

    /// Cells that died
    pub fn died(&self) -> impl Iterator<Item = &CellChange> + '_ {
        self.changes.iter().filter(|c| c.transition == Transition::Died)
    }

    /// Net population change
    pub fn net(&self) -> isize {
        self.changes
            .iter()
            .map(|c| match c.transition {
                Transition::Born => 1,
                Transition::Died => -1,
            })
            .sum()
    }
}

impl IntoIterator for ChangeRecord {
    type Item = CellChange;
    type IntoIter = std::vec::IntoIter<CellChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangeRecord {
    type Item = &'a CellChange;
    type IntoIter = std::slice::Iter<'a, CellChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
