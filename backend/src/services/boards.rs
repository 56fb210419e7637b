//! View state of the two dashboards.
//!
//! Each dashboard keeps its own copy of the tasks it fetched on mount. The
//! admin copy is filtered locally; the member copy is patched in place after
//! a successful status change.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use taskboard_adapters::{Task, TaskId, TaskStatus};

/// Session key of the admin dashboard's copy.
pub const ADMIN_VIEW: &str = "view.admin";
/// Session key of the member dashboard's copy.
pub const MEMBER_VIEW: &str = "view.member";

/// Status filter of the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    /// Options in the order the filter control lists them.
    pub const OPTIONS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(TaskStatus::InProgress),
        StatusFilter::Only(TaskStatus::Completed),
        StatusFilter::Only(TaskStatus::Pending),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Tasks",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => task.status == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = taskboard_adapters::models::UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminBoard {
    pub tasks: Vec<Task>,
}

impl AdminBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Tasks shown under `filter`, in fetch order.
    pub fn visible(&self, filter: StatusFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.matches(task)).collect()
    }

    pub fn find(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == task_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBoard {
    pub tasks: Vec<Task>,
}

impl MemberBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Patch the local copy after the API accepted a status change. Returns
    /// false when the task is not part of this copy.
    pub fn apply_status(&mut self, task_id: &TaskId, status: TaskStatus) -> bool {
        match self.tasks.iter_mut().find(|task| &task.id == task_id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        }
    }
}

/// Status changes offered for a task: every status except its current one.
pub fn status_actions(task: &Task) -> impl Iterator<Item = TaskStatus> + '_ {
    TaskStatus::ALL
        .into_iter()
        .filter(move |&status| status != task.status)
}
