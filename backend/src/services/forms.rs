//! Task form state for the create and edit screens.
//!
//! Forms arrive as `application/x-www-form-urlencoded` bodies. The only
//! validation done here is required-field presence; everything else is the
//! remote API's business.

use serde::{Deserialize, Serialize};
use taskboard_adapters::{Assignee, NewTask, Task, TaskId, TaskStatus, TaskUpdate, User, UserId};
use url::form_urlencoded;

/// Session key of the create screen's user list.
pub const CREATE_VIEW: &str = "view.create";

/// Status choices the forms offer.
pub const FORM_STATUSES: [TaskStatus; 2] = [TaskStatus::Pending, TaskStatus::Completed];

/// The controlled fields shared by both task forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub name: String,
    pub description: String,
    pub due_date: String,
    /// `None` when the submitted value named no known status.
    pub status: Option<TaskStatus>,
}

impl Default for TaskFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            due_date: String::new(),
            status: Some(TaskStatus::Pending),
        }
    }
}

impl TaskFields {
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            status: Some(task.status).filter(|status| TaskStatus::ALL.contains(status)),
        }
    }

    /// Labels of the required fields left empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("Task Name");
        }
        if self.description.trim().is_empty() {
            missing.push("Description");
        }
        if self.due_date.trim().is_empty() {
            missing.push("Due Date");
        }
        if self.status.is_none() {
            missing.push("Status");
        }
        missing
    }

    /// Message for a form with missing fields, `None` when complete.
    pub fn validation_message(&self) -> Option<String> {
        let missing = self.missing();
        if missing.is_empty() {
            None
        } else {
            Some(format!("Please fill in: {}", missing.join(", ")))
        }
    }

    /// Apply one submitted pair; unknown keys are ignored.
    fn set(&mut self, key: &str, value: String) {
        match key {
            "name" => self.name = value,
            "description" => self.description = value,
            "dueDate" => self.due_date = value,
            "status" => self.status = value.parse().ok(),
            _ => {}
        }
    }

    /// Start from blank fields so an absent key counts as missing.
    fn blank() -> Self {
        Self {
            status: None,
            ..Self::default()
        }
    }
}

/// The create screen's copy of the assignable users, fetched on mount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateScreen {
    pub users: Vec<User>,
}

/// A submitted create-task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskForm {
    pub fields: TaskFields,
    /// Checked assignees, in submission order.
    pub selected: Vec<UserId>,
}

impl CreateTaskForm {
    pub fn parse(body: &[u8]) -> Self {
        let mut form = CreateTaskForm {
            fields: TaskFields::blank(),
            selected: Vec::new(),
        };

        for (key, value) in form_urlencoded::parse(body) {
            if key == "assignee" {
                let id = UserId::new(value.into_owned());
                if !form.selected.contains(&id) {
                    form.selected.push(id);
                }
            } else {
                form.fields.set(&key, value.into_owned());
            }
        }
        form
    }

    pub fn is_selected(&self, user_id: &UserId) -> bool {
        self.selected.contains(user_id)
    }

    /// Selected users as both id list and assignee records, in the order
    /// `users` lists them. Ids missing from `users` are dropped.
    pub fn assignment(&self, users: &[User]) -> (Vec<UserId>, Vec<Assignee>) {
        users
            .iter()
            .filter(|user| self.is_selected(&user.id))
            .map(|user| (user.id.clone(), Assignee::from(user)))
            .unzip()
    }

    /// The creation request. `None` while a required field is missing.
    pub fn to_new_task(&self, users: &[User], creator: &UserId) -> Option<NewTask> {
        let status = self.fields.status?;
        if !self.fields.missing().is_empty() {
            return None;
        }

        let (assigned_users, assigned_names) = self.assignment(users);
        Some(NewTask {
            name: self.fields.name.clone(),
            description: self.fields.description.clone(),
            due_date: self.fields.due_date.clone(),
            status,
            user_id: creator.clone(),
            assigned_users,
            assigned_names,
        })
    }
}

/// A submitted edit-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskForm {
    pub fields: TaskFields,
}

impl EditTaskForm {
    pub fn parse(body: &[u8]) -> Self {
        let mut fields = TaskFields::blank();
        for (key, value) in form_urlencoded::parse(body) {
            fields.set(&key, value.into_owned());
        }
        Self { fields }
    }

    /// The update request. `None` while a required field is missing.
    pub fn to_update(&self, task_id: &TaskId) -> Option<TaskUpdate> {
        let status = self.fields.status?;
        if !self.fields.missing().is_empty() {
            return None;
        }

        Some(TaskUpdate {
            task_id: task_id.clone(),
            name: self.fields.name.clone(),
            description: self.fields.description.clone(),
            due_date: self.fields.due_date.clone(),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> User {
        User {
            id: UserId::new(id),
            name: name.into(),
            email: format!("{id}@example.com"),
        }
    }

    #[test]
    fn parse_reads_fields_and_repeated_assignees() {
        let form = CreateTaskForm::parse(
            b"name=Ship+it&description=Release%201.0&dueDate=2024-06-01&status=Completed&assignee=u2&assignee=u1&assignee=u2",
        );

        assert_eq!(form.fields.name, "Ship it");
        assert_eq!(form.fields.description, "Release 1.0");
        assert_eq!(form.fields.status, Some(TaskStatus::Completed));
        assert_eq!(form.selected, [UserId::new("u2"), UserId::new("u1")]);
    }

    #[test]
    fn assignment_follows_user_list_order() {
        let users = [user("u1", "Ada"), user("u2", "Bob"), user("u3", "Cy")];
        let form = CreateTaskForm::parse(b"assignee=u3&assignee=u1&assignee=ghost");

        let (ids, names) = form.assignment(&users);
        assert_eq!(ids, [UserId::new("u1"), UserId::new("u3")]);
        assert_eq!(names[1].name, "Cy");
        assert_eq!(names[1].email, "u3@example.com");
    }

    #[test]
    fn missing_fields_block_the_request() {
        let form = CreateTaskForm::parse(b"name=Only+a+name&status=Pending");
        assert_eq!(form.fields.missing(), ["Description", "Due Date"]);
        assert!(form.to_new_task(&[], &UserId::new("admin")).is_none());

        let form = CreateTaskForm::parse(b"name=a&description=b&dueDate=c&status=Bogus");
        assert_eq!(form.fields.missing(), ["Status"]);
    }

    #[test]
    fn complete_form_builds_new_task() {
        let users = [user("u1", "Ada")];
        let form = CreateTaskForm::parse(b"name=a&description=b&dueDate=2024-01-01&status=Pending&assignee=u1");

        let task = form.to_new_task(&users, &UserId::new("admin")).unwrap();
        assert_eq!(task.user_id.as_str(), "admin");
        assert_eq!(task.assigned_users, [UserId::new("u1")]);
        assert_eq!(task.assigned_names[0].name, "Ada");
    }

    #[test]
    fn default_fields_are_the_initial_values() {
        let fields = TaskFields::default();
        assert!(fields.name.is_empty());
        assert!(fields.description.is_empty());
        assert!(fields.due_date.is_empty());
        assert_eq!(fields.status, Some(TaskStatus::Pending));
    }

    #[test]
    fn unknown_status_is_not_prefilled() {
        let task = Task {
            id: TaskId::new("t9"),
            name: "Odd".into(),
            description: "d".into(),
            due_date: "2024-03-03".into(),
            status: TaskStatus::Unknown,
            assigned_to: Vec::new(),
        };
        let fields = TaskFields::from_task(&task);
        assert_eq!(fields.name, "Odd");
        assert_eq!(fields.status, None);
    }

    #[test]
    fn edit_form_builds_update() {
        let form = EditTaskForm::parse(b"name=n&description=d&dueDate=2024-02-02&status=In+Progress");
        let update = form.to_update(&TaskId::new("t1")).unwrap();
        assert_eq!(update.status, TaskStatus::InProgress);
        assert_eq!(update.task_id.as_str(), "t1");
    }
}
