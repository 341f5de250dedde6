//! Task-editing core for the tasklane kanban board.
//!
//! The crate is split along a ports-and-adapters seam. The pure pieces
//! ([`catalog`], [`selection`], [`validate`], [`changes`], [`payload`])
//! never perform I/O; everything that touches the network, the clock,
//! or the user goes through the port traits in [`ports`]. The
//! [`editor`] session wires the two halves together, and [`cassette`]
//! plus the recording/replaying adapters let whole editor flows be
//! captured once and replayed deterministically.

pub mod adapters;
pub mod cassette;
pub mod catalog;
pub mod changes;
pub mod context;
pub mod editor;
pub mod error;
pub mod form;
pub mod payload;
pub mod ports;
pub mod selection;
pub mod validate;
