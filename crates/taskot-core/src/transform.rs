//! Pairwise transform of concurrent operations.
//!
//! Given `op1` and `op2`, produced on different replicas without either
//! having seen the other, `transform` returns `(op1', op2')` such that
//!
//! ```text
//! apply(apply(state, op1), op2') == apply(apply(state, op2), op1')
//! ```
//!
//! Either output may be `None`, meaning the operation is redundant once the
//! other has been applied. Rebasing a whole log is done by the sync layer
//! through repeated calls.
//!
//! For operations on the same task, subsumption runs Create < Update < Delete,
//! except that a Create always beats a Delete. Conflicting updates of one
//! property keep the later timestamp; on an exact tie the first argument
//! wins, so only that case is not symmetric under argument swap.

use crate::operation::Operation;
use tracing::{debug, trace};

/// Output of `transform`: the rewritten `(op1', op2')`.
pub type Transformed = (Option<Operation>, Option<Operation>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Resolution {
    KeepBoth,
    DropBoth,
    KeepFirst,
    KeepSecond,
}

/// The rule that decided a pair, logged with every decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rule {
    DifferentTasks,
    SameKind,
    CreateOverDelete,
    UpdateOverCreate,
    DeleteOverUpdate,
    DifferentProperties,
    SameValue,
    LaterTimestamp,
    TimestampTie,
}

/// Decide which of two operations survives, and by which rule.
fn resolve(op1: &Operation, op2: &Operation) -> (Resolution, Rule) {
    use Operation::*;

    if op1.task_id() != op2.task_id() {
        return (Resolution::KeepBoth, Rule::DifferentTasks);
    }

    match (op1, op2) {
        // Both already reach the same end state.
        (Create { .. }, Create { .. }) | (Delete { .. }, Delete { .. }) => {
            (Resolution::DropBoth, Rule::SameKind)
        }

        // Existence wins over removal.
        (Create { .. }, Delete { .. }) => (Resolution::KeepFirst, Rule::CreateOverDelete),
        (Delete { .. }, Create { .. }) => (Resolution::KeepSecond, Rule::CreateOverDelete),

        // An update implies the task exists.
        (Create { .. }, Update { .. }) => (Resolution::KeepSecond, Rule::UpdateOverCreate),
        (Update { .. }, Create { .. }) => (Resolution::KeepFirst, Rule::UpdateOverCreate),

        // A delete removes every property anyway.
        (Delete { .. }, Update { .. }) => (Resolution::KeepFirst, Rule::DeleteOverUpdate),
        (Update { .. }, Delete { .. }) => (Resolution::KeepSecond, Rule::DeleteOverUpdate),

        (
            Update {
                property: p1,
                value: v1,
                timestamp: t1,
                ..
            },
            Update {
                property: p2,
                value: v2,
                timestamp: t2,
                ..
            },
        ) => {
            if p1 != p2 {
                (Resolution::KeepBoth, Rule::DifferentProperties)
            } else if v1 == v2 {
                (Resolution::DropBoth, Rule::SameValue)
            } else if t2 > t1 {
                (Resolution::KeepSecond, Rule::LaterTimestamp)
            } else if t1 > t2 {
                (Resolution::KeepFirst, Rule::LaterTimestamp)
            } else {
                // A tie goes to op1.
                (Resolution::KeepFirst, Rule::TimestampTie)
            }
        }
    }
}

/// Transform two concurrent operations so they can be applied in either
/// order and reach the same state.
///
/// Total over all operations. Operations that survive are returned as-is.
pub fn transform(op1: Operation, op2: Operation) -> Transformed {
    let (resolution, rule) = resolve(&op1, &op2);

    match resolution {
        Resolution::KeepBoth => {
            trace!(op1 = %op1, op2 = %op2, ?rule, "operations are independent");
            (Some(op1), Some(op2))
        }
        Resolution::DropBoth => {
            debug!(op1 = %op1, op2 = %op2, ?rule, "operations are redundant, dropping both");
            (None, None)
        }
        Resolution::KeepFirst => {
            debug!(kept = %op1, dropped = %op2, ?rule, "operation conflict resolved");
            (Some(op1), None)
        }
        Resolution::KeepSecond => {
            debug!(kept = %op2, dropped = %op1, ?rule, "operation conflict resolved");
            (None, Some(op2))
        }
    }
}

/// Whether `transform(op1, op2)` would return both operations unchanged.
///
/// Lets a sync process skip rewriting a pair without giving up ownership.
pub fn commutes(op1: &Operation, op2: &Operation) -> bool {
    resolve(op1, op2).0 == Resolution::KeepBoth
}

impl Operation {
    /// Method form of [`transform`], with `self` as the first argument.
    pub fn transform(self, other: Operation) -> Transformed {
        transform(self, other)
    }
}
