//! A single-owner resource holder with observable ownership transfer.
//!
//! Rust already rules out touching a binding after it has been moved. The cell
//! covers the other case: a transfer out of a place that stays alive (a struct
//! field, a slot in a slice), where the leftover husk must report that it no
//! longer holds anything meaningful.
//!
//! The type is neither `Clone` nor `Copy`, so duplication does not compile:
//!
//! ```compile_fail
//! use cursor_ownership::OwnershipCell;
//!
//! let andy = OwnershipCell::new(15445, vec!["andy".into(), "pavlo".into()]);
//! let copy = andy.clone();
//! ```
//!
//! A plain move leaves nothing behind to misuse:
//!
//! ```compile_fail
//! use cursor_ownership::OwnershipCell;
//!
//! let andy = OwnershipCell::new(15445, vec!["andy".into()]);
//! let moved = andy;
//! println!("{}", andy.is_valid());
//! ```
//!
//! And a cell cannot be handed itself as the source of an assignment:
//!
//! ```compile_fail
//! use cursor_ownership::OwnershipCell;
//!
//! let mut andy = OwnershipCell::new(15445, vec!["andy".into()]);
//! andy.assign_from(&mut andy);
//! ```

use std::mem;

use log::debug;

/// Whether a cell still holds the resources it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Valid,
    Invalidated,
}

#[derive(Debug)]
pub struct OwnershipCell {
    age: u32,
    tags: Vec<String>,
    state: CellState,
}

impl Default for OwnershipCell {
    fn default() -> Self {
        OwnershipCell {
            age: 0,
            tags: Vec::new(),
            state: CellState::Valid,
        }
    }
}

impl OwnershipCell {
    /// Takes ownership of `tags` as-is; its buffer is reused, not copied.
    pub fn new(age: u32, tags: Vec<String>) -> Self {
        OwnershipCell {
            age,
            tags,
            state: CellState::Valid,
        }
    }

    /// Builds a new cell out of `source`, leaving `source` invalidated.
    ///
    /// `age` is copied; the tag storage moves over without reallocation.
    pub fn transfer_from(source: &mut OwnershipCell) -> Self {
        debug!(
            "transfer-constructing cell (age {}, {} tags)",
            source.age,
            source.tags.len()
        );

        let tags = mem::take(&mut source.tags);
        source.state = CellState::Invalidated;

        OwnershipCell {
            age: source.age,
            tags,
            state: CellState::Valid,
        }
    }

    /// Replaces this cell's contents with `source`'s, releasing the old tags.
    ///
    /// The receiver becomes valid again even if it was itself invalidated
    /// earlier. `source` is left invalidated.
    pub fn assign_from(&mut self, source: &mut OwnershipCell) {
        debug!(
            "transfer-assigning cell (age {}, {} tags) over {} tags",
            source.age,
            source.tags.len(),
            self.tags.len()
        );

        self.age = source.age;
        self.tags = mem::take(&mut source.tags);
        self.state = CellState::Valid;
        source.state = CellState::Invalidated;
    }

    /// Transfer-assigns `cells[source]` into `cells[target]`.
    ///
    /// `source == target` is a no-op that leaves the cell untouched.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn transfer_within(cells: &mut [OwnershipCell], source: usize, target: usize) {
        let len = cells.len();
        assert!(
            source < len && target < len,
            "transfer index out of range: source {source}, target {target}, len {len}"
        );

        if source == target {
            debug!("self-transfer of cell {} is a no-op", source);
            return;
        }

        let (from, to) = if source < target {
            let (front, back) = cells.split_at_mut(target);
            (&mut front[source], &mut back[0])
        } else {
            let (front, back) = cells.split_at_mut(source);
            (&mut back[0], &mut front[target])
        };
        to.assign_from(from);
    }

    /// Consumes the cell and hands its parts to the caller.
    pub fn into_parts(self) -> (u32, Vec<String>) {
        (self.age, self.tags)
    }

    pub fn is_valid(&self) -> bool {
        self.state == CellState::Valid
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn tag(&self, i: usize) -> Option<&str> {
        self.tags.get(i).map(String::as_str)
    }

    /// Mutable access to the `i`th tag, in place.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range. The tag list never grows implicitly.
    pub fn tag_at(&mut self, i: usize) -> &mut String {
        let len = self.tags.len();
        match self.tags.get_mut(i) {
            Some(tag) => tag,
            None => panic!("tag index {i} out of range for a cell with {len} tags"),
        }
    }
}
