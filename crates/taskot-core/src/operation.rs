//! Operations: atomic, immutable edits to a task record.
//!
//! There are three forms of operation:
//!  - `Create(task_id)`: bring a new, empty task into existence
//!  - `Delete(task_id)`: remove a task and all of its properties
//!  - `Update(task_id, property, value, timestamp)`: set a property, or clear
//!    it when the value is absent
//!
//! Operations stay simple and always applicable. Richer task features (tags,
//! dependencies, recurrence) are expressed on top of plain property updates.
//! Only `Update` carries a property, value and timestamp, so a create or
//! delete without them is the only shape that can exist.

use crate::error::{OperationError, Result};
use crate::time::TimeSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds since the Unix epoch.
///
/// Used only to break ties between conflicting updates of one property.
pub type Timestamp = i64;

/// The kind of an operation, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Create,
    Delete,
    Update,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Create => write!(f, "Create"),
            OperationKind::Delete => write!(f, "Delete"),
            OperationKind::Update => write!(f, "Update"),
        }
    }
}

/// A single change to the task store.
///
/// Equality is field-wise: same kind and task, and for updates the same
/// property, value and timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Operation {
    Create {
        task_id: String,
    },
    Delete {
        task_id: String,
    },
    Update {
        task_id: String,
        property: String,
        /// `None` removes the property.
        value: Option<String>,
        timestamp: Timestamp,
    },
}

/// Borrowed view of an update's fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateRef<'a> {
    pub task_id: &'a str,
    pub property: &'a str,
    pub value: Option<&'a str>,
    pub timestamp: Timestamp,
}

impl Operation {
    pub fn new_create(task_id: impl Into<String>) -> Self {
        Operation::Create {
            task_id: task_id.into(),
        }
    }

    pub fn new_delete(task_id: impl Into<String>) -> Self {
        Operation::Delete {
            task_id: task_id.into(),
        }
    }

    /// Set `property` to `value`, stamped with the current time of `clock`.
    pub fn new_update(
        task_id: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
        clock: &impl TimeSource,
    ) -> Self {
        Self::new_update_at(task_id, property, Some(value.into()), clock.now())
    }

    /// Clear `property`, stamped with the current time of `clock`.
    pub fn new_update_remove(
        task_id: impl Into<String>,
        property: impl Into<String>,
        clock: &impl TimeSource,
    ) -> Self {
        Self::new_update_at(task_id, property, None, clock.now())
    }

    /// Build an update with an explicit timestamp, e.g. when rebuilding an
    /// operation received from another replica.
    pub fn new_update_at(
        task_id: impl Into<String>,
        property: impl Into<String>,
        value: Option<String>,
        timestamp: Timestamp,
    ) -> Self {
        Operation::Update {
            task_id: task_id.into(),
            property: property.into(),
            value,
            timestamp,
        }
    }

    /// Clear `property` at an explicit timestamp.
    pub fn new_update_remove_at(
        task_id: impl Into<String>,
        property: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self::new_update_at(task_id, property, None, timestamp)
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Create { .. } => OperationKind::Create,
            Operation::Delete { .. } => OperationKind::Delete,
            Operation::Update { .. } => OperationKind::Update,
        }
    }

    pub fn task_id(&self) -> &str {
        match self {
            Operation::Create { task_id }
            | Operation::Delete { task_id }
            | Operation::Update { task_id, .. } => task_id,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Operation::Update { .. })
    }

    /// The update's fields, or `None` for a create or delete.
    pub fn as_update(&self) -> Option<UpdateRef<'_>> {
        match self {
            Operation::Update {
                task_id,
                property,
                value,
                timestamp,
            } => Some(UpdateRef {
                task_id,
                property,
                value: value.as_deref(),
                timestamp: *timestamp,
            }),
            Operation::Create { .. } | Operation::Delete { .. } => None,
        }
    }

    pub fn property(&self) -> Result<&str> {
        self.update_field("property").map(|u| u.property)
    }

    /// The new value, or `Ok(None)` when the update clears the property.
    pub fn value(&self) -> Result<Option<&str>> {
        self.update_field("value").map(|u| u.value)
    }

    pub fn timestamp(&self) -> Result<Timestamp> {
        self.update_field("timestamp").map(|u| u.timestamp)
    }

    fn update_field(&self, field: &'static str) -> Result<UpdateRef<'_>> {
        self.as_update().ok_or(OperationError::InvalidAccess {
            field,
            kind: self.kind(),
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create { task_id } => write!(f, "Create({})", task_id),
            Operation::Delete { task_id } => write!(f, "Delete({})", task_id),
            Operation::Update {
                task_id,
                property,
                value,
                timestamp,
            } => write!(
                f,
                "Update({}, \"{}\", \"{}\", {})",
                task_id,
                property,
                value.as_deref().unwrap_or("null"),
                timestamp
            ),
        }
    }
}
