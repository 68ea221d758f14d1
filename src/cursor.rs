use std::fmt;
use std::ops::Add;
use std::ptr;

use crate::node_list::Node;

/// A non-owning position in a [`LinkedList`](crate::LinkedList).
///
/// The borrow ties the cursor to its list, so it cannot outlive it:
///
/// ```compile_fail
/// use cursor_ownership::LinkedList;
///
/// let cursor = {
///     let mut list = LinkedList::new();
///     list.insert_at_head(1);
///     list.start()
/// };
/// let _ = cursor.dereference();
/// ```
///
/// Stepping off the end or reading the end position panics; nothing here
/// returns a stale or made-up value.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    current: Option<&'a Node>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(current: Option<&'a Node>) -> Self {
        Cursor { current }
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next node.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end.
    pub fn advance_one(&mut self) -> &mut Self {
        match self.current {
            Some(node) => self.current = node.next.as_deref(),
            None => panic!("cannot advance a cursor that is already at the end"),
        }
        self
    }

    /// Calls [`Cursor::advance_one`] exactly `offset` times.
    ///
    /// There is no up-front length check. Landing exactly on the end is fine;
    /// asking for more steps than remain panics at the first step past it.
    ///
    /// ```
    /// use cursor_ownership::LinkedList;
    ///
    /// let list: LinkedList = [6, 5, 4, 3, 2, 1].into_iter().collect();
    /// assert_eq!(list.start().advance_by(2).dereference(), 3);
    /// ```
    pub fn advance_by(&mut self, offset: usize) -> &mut Self {
        for _ in 0..offset {
            self.advance_one();
        }
        self
    }

    /// Identity comparison: true when the cursors sit on different nodes.
    pub fn not_equal(&self, other: &Cursor<'_>) -> bool {
        self != other
    }

    /// # Panics
    ///
    /// Panics at the end position.
    pub fn dereference(&self) -> i32 {
        match self.current {
            Some(node) => node.value,
            None => panic!("cannot dereference the end cursor"),
        }
    }

    /// Value at the current position, `None` at the end.
    pub fn value(&self) -> Option<i32> {
        self.current.map(|node| node.value)
    }
}

impl PartialEq<Cursor<'_>> for Cursor<'_> {
    fn eq(&self, other: &Cursor<'_>) -> bool {
        match (self.current, other.current) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for Cursor<'_> {}

impl<'a> Add<usize> for Cursor<'a> {
    type Output = Cursor<'a>;

    fn add(mut self, offset: usize) -> Self::Output {
        self.advance_by(offset);
        self
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current {
            Some(node) => f.debug_tuple("Cursor").field(&node.value).finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}
