//! Position assignment for new tasks and the stage-grouped board view.

use crate::models::{StageGroups, Task, TaskStage};

/// `(order, index)` for a task appended to `existing`.
///
/// `order` is the list length at insertion time and is never renumbered, so
/// it can repeat after deletions. `index` is one past the highest index ever
/// still present, which keeps it strictly increasing.
pub fn next_position(existing: &[Task]) -> (i64, i64) {
    let order = existing.len() as i64;
    let index = existing
        .iter()
        .map(|t| t.index)
        .max()
        .map_or(0, |max| max + 1);
    (order, index)
}

pub fn group_by_stage(tasks: &[Task]) -> StageGroups {
    let mut groups = StageGroups::default();
    for task in tasks {
        let group = match task.stage {
            TaskStage::Requested => &mut groups.requested,
            TaskStage::ToDo => &mut groups.todo,
            TaskStage::InProgress => &mut groups.in_progress,
            TaskStage::Completed => &mut groups.completed,
        };
        group.push(task.clone());
    }
    groups
}
