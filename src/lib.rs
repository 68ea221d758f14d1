//! Two small ownership exercises with real invariants:
//!
//! - [`LinkedList`] and [`Cursor`]: a head-inserting chain whose nodes own
//!   their successors, walked by an external cursor (advance, bulk advance,
//!   identity compare, dereference).
//! - [`OwnershipCell`]: a non-duplicable resource holder whose transfers leave
//!   the source visibly invalidated.
//!
//! [`tour`] strings both together into the walkthrough printed by the
//! `ownership_tour` binary.

pub mod config;
pub mod cursor;
pub mod error;
pub mod node_list;
pub mod ownership_cell;
pub mod tour;

pub use config::TourConfig;
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use node_list::{Iter, LinkedList};
pub use ownership_cell::{CellState, OwnershipCell};
