//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the editing core and an
//! external system (time, the category endpoint, the task endpoints,
//! the notification surface). Implementations live in `src/adapters/`.

pub mod categories;
pub mod clock;
pub mod notify;
pub mod tasks;

pub use categories::{CatalogFuture, CategoryDirectory};
pub use clock::Clock;
pub use notify::{NoticeLevel, Notifier};
pub use tasks::{GatewayFuture, SavedTask, TaskGateway};
