//! # taskot-core
//!
//! Operations on task records and the transform that reconciles two of them
//! when they were produced concurrently on different replicas.
//!
//! This crate provides:
//! - `Operation`: create, delete, or set/clear one property of a task
//! - `transform`: pairwise conflict resolution so replicas converge
//! - `TimeSource`: the clock capability used to stamp updates
//!
//! Applying operations to stored state and sequencing whole logs are left
//! to the storage and sync layers.
//!
//! ## Example
//!
//! ```rust
//! use taskot_core::{transform, FixedTimeSource, Operation};
//!
//! let earlier = Operation::new_update("abc", "description", "hello", &FixedTimeSource::new(10_000));
//! let later = Operation::new_update("abc", "description", "world", &FixedTimeSource::new(20_000));
//!
//! let (a, b) = transform(earlier, later.clone());
//! assert_eq!(a, None);
//! assert_eq!(b, Some(later));
//! ```

pub mod error;
pub mod operation;
pub mod time;
pub mod transform;

pub use error::{OperationError, Result};
pub use operation::{Operation, OperationKind, Timestamp, UpdateRef};
pub use time::{FixedTimeSource, ManualTimeSource, SystemTimeSource, TimeSource};
pub use transform::{commutes, transform, Transformed};
