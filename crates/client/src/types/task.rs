//! Tasks, the status board and the due-date calendar.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use workpro_core::{TaskId, UserId};

/// Error returned when a task status name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid task status: {0} (expected todo, in-progress, review or done)")]
pub struct TaskStatusParseError(pub String);

/// Board column a task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    #[serde(alias = "in_progress")]
    InProgress,
    Review,
    #[serde(alias = "completed")]
    Done,
}

impl TaskStatus {
    /// Columns in board order.
    pub const COLUMNS: [Self; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];

    /// Column heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = TaskStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" | "completed" => Ok(Self::Done),
            _ => Err(TaskStatusParseError(s.to_owned())),
        }
    }
}

/// Statuses this client does not know land in the first column.
fn known_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaskStatus, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(TaskStatus::default());
    };
    Ok(raw.parse().unwrap_or_else(|e: TaskStatusParseError| {
        tracing::warn!(status = %e.0, "Unknown task status, showing it as todo");
        TaskStatus::default()
    }))
}

/// A task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "known_status")]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub assigned_to: Vec<UserId>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Whether `user` is among the assignees.
    #[must_use]
    pub fn is_assigned_to(&self, user: &UserId) -> bool {
        self.assigned_to.contains(user)
    }

    /// Due day in UTC.
    #[must_use]
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.map(|due| due.date_naive())
    }
}

/// Fields for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assigned_to: Vec<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Tasks grouped into status columns.
///
/// Every column is present even when empty. Inside a column tasks are ordered
/// by due date, undated tasks last, ties kept in fetch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoard {
    columns: BTreeMap<TaskStatus, Vec<Task>>,
}

impl TaskBoard {
    /// Group `tasks` by status.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut columns: BTreeMap<TaskStatus, Vec<Task>> = TaskStatus::COLUMNS
            .into_iter()
            .map(|status| (status, Vec::new()))
            .collect();

        for task in tasks {
            columns.entry(task.status).or_default().push(task);
        }
        for column in columns.values_mut() {
            column.sort_by_key(|task| (task.due_date.is_none(), task.due_date));
        }

        Self { columns }
    }

    /// Tasks in one column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        self.columns.get(&status).map(Vec::as_slice).unwrap_or_default()
    }

    /// Columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        self.columns
            .iter()
            .map(|(status, tasks)| (*status, tasks.as_slice()))
    }

    /// Total number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Whether the board has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One calendar week, Sunday first. `None` pads days outside the month.
pub type CalendarWeek = [Option<NaiveDate>; 7];

/// Month grid with the tasks due on each day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    first: NaiveDate,
    weeks: Vec<CalendarWeek>,
    due: BTreeMap<NaiveDate, Vec<Task>>,
}

impl CalendarMonth {
    /// Lay out `year`/`month` and place every task due within it.
    ///
    /// Returns `None` for an invalid month.
    #[must_use]
    pub fn build(year: i32, month: u32, tasks: impl IntoIterator<Item = Task>) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = first.checked_add_months(Months::new(1))?.pred_opt()?;

        let mut weeks = Vec::new();
        let mut week: CalendarWeek = [None; 7];
        let mut slot = first.weekday().num_days_from_sunday() as usize;
        for day in first.iter_days().take_while(|day| *day <= last) {
            if let Some(cell) = week.get_mut(slot) {
                *cell = Some(day);
            }
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
        }
        if slot > 0 {
            weeks.push(week);
        }

        let mut due: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
        for task in tasks {
            if let Some(day) = task.due_day()
                && day >= first
                && day <= last
            {
                due.entry(day).or_default().push(task);
            }
        }

        Some(Self { first, weeks, due })
    }

    /// Year shown.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month shown (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Weeks of the grid.
    #[must_use]
    pub fn weeks(&self) -> &[CalendarWeek] {
        &self.weeks
    }

    /// Tasks due on `day`.
    #[must_use]
    pub fn tasks_on(&self, day: NaiveDate) -> &[Task] {
        self.due.get(&day).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn task(id: &str, status: TaskStatus, due: Option<(i32, u32, u32)>) -> Task {
        Task {
            id: TaskId::new(id),
            title: format!("Task {id}"),
            description: None,
            status,
            priority: None,
            assigned_to: vec![],
            due_date: due.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_status_wire_names() {
        let parsed: Vec<TaskStatus> =
            serde_json::from_str(r#"["todo","in-progress","in_progress","review","completed"]"#).unwrap();
        assert_eq!(
            parsed,
            [
                TaskStatus::Todo,
                TaskStatus::InProgress,
                TaskStatus::InProgress,
                TaskStatus::Review,
                TaskStatus::Done
            ]
        );
        assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"in-progress\"");
        assert_eq!("In_Progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!(
            "pending".parse::<TaskStatus>().unwrap_err(),
            TaskStatusParseError("pending".to_owned())
        );
    }

    #[test]
    fn test_unknown_status_does_not_reject_the_list() {
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[{"_id":"t1","title":"A","status":"pending"},{"_id":"t2","title":"B","status":"review"},{"_id":"t3","title":"C","status":null},{"_id":"t4","title":"D"}]"#,
        )
        .unwrap();

        let statuses: Vec<_> = tasks.iter().map(|t| t.status).collect();
        assert_eq!(
            statuses,
            [TaskStatus::Todo, TaskStatus::Review, TaskStatus::Todo, TaskStatus::Todo]
        );
    }

    #[test]
    fn test_board_groups_by_status_and_keeps_empty_columns() {
        let board = TaskBoard::from_tasks([
            task("a", TaskStatus::Todo, None),
            task("b", TaskStatus::Done, Some((2024, 5, 2))),
            task("c", TaskStatus::Todo, Some((2024, 5, 9))),
            task("d", TaskStatus::Todo, Some((2024, 5, 1))),
        ]);

        let todo: Vec<_> = board.column(TaskStatus::Todo).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(todo, ["d", "c", "a"]);
        assert_eq!(board.column(TaskStatus::Done).len(), 1);
        assert!(board.column(TaskStatus::Review).is_empty());
        assert_eq!(board.columns().count(), 4);
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn test_board_column_order() {
        let board = TaskBoard::from_tasks(Vec::new());
        let order: Vec<_> = board.columns().map(|(status, _)| status).collect();
        assert_eq!(order, TaskStatus::COLUMNS);
        assert!(board.is_empty());
    }

    #[test]
    fn test_calendar_grid_layout() {
        // February 2024 starts on a Thursday and has 29 days.
        let calendar = CalendarMonth::build(2024, 2, Vec::new()).unwrap();
        let weeks = calendar.weeks();

        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][..4], [None, None, None, None]);
        assert_eq!(weeks[0][4], NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(weeks[4][4], NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(weeks[4][5], None);

        let days = weeks.iter().flatten().flatten().count();
        assert_eq!(days, 29);
    }

    #[test]
    fn test_calendar_places_tasks_in_month_only() {
        let calendar = CalendarMonth::build(
            2024,
            5,
            [
                task("in", TaskStatus::Todo, Some((2024, 5, 15))),
                task("also-in", TaskStatus::Done, Some((2024, 5, 15))),
                task("before", TaskStatus::Todo, Some((2024, 4, 30))),
                task("undated", TaskStatus::Todo, None),
            ],
        )
        .unwrap();

        let may_15 = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        assert_eq!(calendar.tasks_on(may_15).len(), 2);
        assert!(calendar.tasks_on(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()).is_empty());
        assert_eq!((calendar.year(), calendar.month()), (2024, 5));
    }

    #[test]
    fn test_calendar_rejects_invalid_month() {
        assert!(CalendarMonth::build(2024, 13, Vec::new()).is_none());
    }

    #[test]
    fn test_new_task_omits_empty_fields() {
        let body = serde_json::to_value(NewTask {
            title: "Task A".to_owned(),
            ..NewTask::default()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"title": "Task A"}));
    }
}
