//! Head-inserting linked list with owning forward links and observing back links.
//!
//! Each node owns its successor through a `Box`; the list head owns the first
//! node. The back link is a `NonNull` that is only ever compared, never
//! dereferenced and never freed, so ownership always flows forward.

use std::alloc::{self, Layout};
use std::fmt;
use std::iter::FusedIterator;
use std::ptr::NonNull;

use log::{debug, trace};

use crate::cursor::Cursor;
use crate::error::{Error, Result};

// =============================================================================
// Node
// =============================================================================

pub(crate) struct Node {
    pub(crate) value: i32,
    pub(crate) next: Option<Box<Node>>,
    prev: Option<NonNull<Node>>,
}

impl Node {
    /// Allocates a detached node, reporting exhaustion instead of aborting.
    fn allocate(value: i32) -> Result<Box<Node>> {
        let layout = Layout::new::<Node>();

        // SAFETY: `Node` is not zero-sized, so `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) } as *mut Node;
        let Some(ptr) = NonNull::new(raw) else {
            return Err(Error::Allocation {
                bytes: layout.size(),
            });
        };

        // SAFETY: `ptr` is a fresh global allocation with the layout of `Node`,
        // which is exactly what `Box::from_raw` expects to take over.
        unsafe {
            ptr.as_ptr().write(Node {
                value,
                next: None,
                prev: None,
            });
            Ok(Box::from_raw(ptr.as_ptr()))
        }
    }

    fn prev_addr(&self) -> Option<*const Node> {
        self.prev.map(|p| p.as_ptr() as *const Node)
    }
}

// =============================================================================
// LinkedList
// =============================================================================

/// A chain of `i32` values grown by inserting at the head.
///
/// ```
/// use cursor_ownership::LinkedList;
///
/// let mut list = LinkedList::new();
/// for value in [6, 5, 4, 3, 2, 1] {
///     list.insert_at_head(value);
/// }
///
/// let mut seen = Vec::new();
/// let mut cursor = list.start();
/// while cursor.not_equal(&list.end()) {
///     seen.push(cursor.dereference());
///     cursor.advance_one();
/// }
/// assert_eq!(seen, [1, 2, 3, 4, 5, 6]);
/// ```
///
/// A list cannot be mutated while a cursor into it is alive:
///
/// ```compile_fail
/// use cursor_ownership::LinkedList;
///
/// let mut list = LinkedList::new();
/// list.insert_at_head(1);
/// let cursor = list.start();
/// list.insert_at_head(2);
/// let _ = cursor.dereference();
/// ```
#[derive(Default)]
pub struct LinkedList {
    head: Option<Box<Node>>,
    size: usize,
}

impl LinkedList {
    pub fn new() -> Self {
        LinkedList {
            head: None,
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Links `value` in front of the current head.
    ///
    /// Allocation failure is fatal here; use [`LinkedList::try_insert_at_head`]
    /// to observe it as an error instead.
    pub fn insert_at_head(&mut self, value: i32) {
        if self.try_insert_at_head(value).is_err() {
            alloc::handle_alloc_error(Layout::new::<Node>());
        }
    }

    pub fn try_insert_at_head(&mut self, value: i32) -> Result<()> {
        let mut node = Node::allocate(value)?;
        let node_ptr = NonNull::from(&mut *node);

        if let Some(old_head) = self.head.as_mut() {
            old_head.prev = Some(node_ptr);
        }
        node.next = self.head.take();
        self.head = Some(node);
        self.size += 1;

        trace!("inserted {} at head, size is now {}", value, self.size);
        Ok(())
    }

    /// Cursor at the first node, or the end cursor when the list is empty.
    pub fn start(&self) -> Cursor<'_> {
        Cursor::new(self.head.as_deref())
    }

    /// The end sentinel. Equal to any cursor that has walked off the chain.
    pub fn end(&self) -> Cursor<'_> {
        Cursor::new(None)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            cursor: self.start(),
            remaining: self.size,
        }
    }

    /// Checks the chain bookkeeping: every back link names the node in front
    /// of it, the head has none, and `len()` matches the reachable count.
    pub fn links_consistent(&self) -> bool {
        let mut expected_prev: Option<*const Node> = None;
        let mut reachable = 0;
        let mut current = self.head.as_deref();

        while let Some(node) = current {
            if node.prev_addr() != expected_prev {
                return false;
            }
            expected_prev = Some(node as *const Node);
            reachable += 1;
            current = node.next.as_deref();
        }

        reachable == self.size
    }
}

impl Drop for LinkedList {
    fn drop(&mut self) {
        // Detach the chain first so nothing can reach a half-released node.
        let mut current = self.head.take();
        let mut released = 0usize;

        while let Some(mut node) = current {
            current = node.next.take();
            trace!("releasing node holding {}", node.value);
            released += 1;
        }

        debug!("released {} of {} nodes", released, self.size);
        self.size = 0;
    }
}

impl fmt::Debug for LinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Extend<i32> for LinkedList {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for value in iter {
            self.insert_at_head(value);
        }
    }
}

impl FromIterator<i32> for LinkedList {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a LinkedList {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iter
// =============================================================================

/// Forward-only walk from `start()` to `end()`; restart by calling `iter()` again.
pub struct Iter<'a> {
    cursor: Cursor<'a>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.cursor.value()?;
        self.cursor.advance_one();
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn build(values: &[i32]) -> LinkedList {
        let mut list = LinkedList::new();
        for &value in values {
            list.insert_at_head(value);
        }
        list
    }

    #[test]
    fn test_new_list_is_empty() {
        let list = LinkedList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(!list.start().not_equal(&list.end()));
        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn test_insert_reverses_order() {
        let list = build(&[6, 5, 4, 3, 2, 1]);
        assert_eq!(list.len(), 6);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_range_style_loop() {
        let list = build(&[3, 2, 1]);
        let mut sum = 0;
        for value in &list {
            sum += value;
        }
        assert_eq!(sum, 6);
    }

    #[test]
    fn test_iter_is_restartable() {
        let list = build(&[2, 1]);
        let first: Vec<i32> = list.iter().collect();
        let second: Vec<i32> = list.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_iter_exact_size_and_fused() {
        let list = build(&[3, 2, 1]);
        let mut iter = list.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        iter.next();
        iter.next();
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_try_insert_succeeds() {
        let mut list = LinkedList::new();
        list.try_insert_at_head(7).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.start().dereference(), 7);
    }

    #[test]
    fn test_back_links_track_predecessor() {
        let list = build(&[4, 3, 2, 1]);
        assert!(list.links_consistent());

        let head = list.head.as_deref().unwrap();
        assert!(head.prev.is_none());
        let second = head.next.as_deref().unwrap();
        assert_eq!(second.prev_addr(), Some(head as *const Node));
    }

    #[test]
    fn test_extend_and_collect() {
        let mut list: LinkedList = [1, 2].into_iter().collect();
        list.extend([3, 4]);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
        assert!(list.links_consistent());
    }

    #[test]
    fn test_debug_lists_values() {
        let list = build(&[2, 1]);
        assert_eq!(format!("{:?}", list), "[1, 2]");
    }

    #[test]
    fn test_drop_long_chain_does_not_recurse() {
        let list: LinkedList = (0..200_000).collect();
        assert_eq!(list.len(), 200_000);
        drop(list);
    }

    #[test]
    fn test_random_insertions_reverse_and_reach_end() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..50 {
            let count = rng.gen_range(0..64);
            let values: Vec<i32> = (0..count).map(|_| rng.gen()).collect();
            let list = build(&values);

            assert_eq!(list.len(), values.len());
            assert!(list.links_consistent());

            let mut expected = values.clone();
            expected.reverse();
            assert_eq!(list.iter().collect::<Vec<_>>(), expected);

            let mut cursor = list.start();
            let mut steps = 0;
            while cursor.not_equal(&list.end()) {
                cursor.advance_one();
                steps += 1;
            }
            assert_eq!(steps, list.len());
            assert_eq!(list.start().not_equal(&list.end()), !list.is_empty());
        }
    }
}
