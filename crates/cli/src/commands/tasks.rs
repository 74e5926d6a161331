//! Task commands.
//!
//! # Usage
//!
//! ```bash
//! wp-cli tasks board
//! wp-cli tasks calendar --year 2026 --month 10
//! wp-cli tasks create "Write report" --due 2026-10-20 --assign 64f1c2
//! wp-cli tasks status 6501ab in-progress
//! ```

use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use workpro_client::{CalendarMonth, CompanyScoped, NewTask, Task, TaskBoard, TaskStatus};
use workpro_core::{TaskId, UserId};

use super::{CliError, Context, action_failed};

/// Arguments of `tasks create`.
pub struct CreateInput {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub assignees: Vec<String>,
}

/// Load tasks for a view. Failures are logged and shown as no tasks;
/// `None` means no company is selected.
async fn load(ctx: &Context, mine: bool) -> Option<Vec<Task>> {
    let result = if mine {
        ctx.client.my_tasks().await
    } else {
        ctx.client.list_tasks().await
    };

    match result {
        Ok(CompanyScoped::Ready(tasks)) => Some(tasks),
        Ok(CompanyScoped::NoCompany) => {
            tracing::info!("No company selected. Create or join one to see tasks.");
            None
        }
        Err(e) => {
            tracing::warn!("Failed to load tasks: {e}");
            Some(Vec::new())
        }
    }
}

fn describe(task: &Task) -> String {
    let mut line = format!("{} [{}] {}", task.id, task.status.label(), task.title);
    if let Some(priority) = &task.priority {
        line.push_str(&format!(" !{priority}"));
    }
    if let Some(day) = task.due_day() {
        line.push_str(&format!(" (due {day})"));
    }
    line
}

fn show_list(tasks: &[Task]) {
    if tasks.is_empty() {
        tracing::info!("No tasks");
        return;
    }
    for task in tasks {
        tracing::info!("{}", describe(task));
    }
}

/// List every task of the selected company.
pub async fn list(ctx: &Context) {
    if let Some(tasks) = load(ctx, false).await {
        show_list(&tasks);
    }
}

/// List tasks assigned to the signed-in user.
pub async fn mine(ctx: &Context) {
    if let Some(tasks) = load(ctx, true).await {
        show_list(&tasks);
    }
}

/// Show tasks grouped by status column.
pub async fn board(ctx: &Context) {
    let Some(tasks) = load(ctx, false).await else {
        return;
    };

    let board = TaskBoard::from_tasks(tasks);
    for (status, column) in board.columns() {
        tracing::info!("== {} ({}) ==", status.label(), column.len());
        for task in column {
            tracing::info!("  {}", describe(task));
        }
    }
}

/// Show a month grid with the days that have tasks due.
pub async fn calendar(ctx: &Context, year: Option<i32>, month: Option<u32>) -> Result<(), CliError> {
    let today = Utc::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());
    if !(1..=12).contains(&month) {
        return Err(CliError::InvalidArgument(format!("month must be 1-12, got {month}")));
    }

    let Some(tasks) = load(ctx, false).await else {
        return Ok(());
    };
    let calendar = CalendarMonth::build(year, month, tasks)
        .ok_or_else(|| CliError::InvalidArgument(format!("no such month: {year}-{month}")))?;

    for line in render_calendar(&calendar) {
        tracing::info!("{line}");
    }
    for day in calendar.weeks().iter().flatten().flatten() {
        for task in calendar.tasks_on(*day) {
            tracing::info!("{day}: {}", describe(task));
        }
    }
    Ok(())
}

/// Text rows of the month grid; days with tasks are starred.
fn render_calendar(calendar: &CalendarMonth) -> Vec<String> {
    let mut lines = vec![
        format!("{:04}-{:02}", calendar.year(), calendar.month()),
        " Su  Mo  Tu  We  Th  Fr  Sa".to_owned(),
    ];
    for week in calendar.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let mark = if calendar.tasks_on(*day).is_empty() { ' ' } else { '*' };
                    format!("{:>3}{mark}", day.day())
                }
                None => "    ".to_owned(),
            })
            .collect();
        lines.push(row.concat().trim_end().to_owned());
    }
    lines
}

/// Create a task in the selected company.
pub async fn create(ctx: &Context, input: CreateInput) -> Result<(), CliError> {
    let title = input.title.trim().to_owned();
    if title.is_empty() {
        return Err(CliError::InvalidArgument("title cannot be empty".to_owned()));
    }
    let due_date = input
        .due
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|day| day.and_time(NaiveTime::MIN).and_utc())
                .map_err(|_| CliError::InvalidArgument(format!("due date must be YYYY-MM-DD, got {raw}")))
        })
        .transpose()?;
    ctx.require_company()?;

    let task = NewTask {
        title,
        description: input.description,
        priority: input.priority,
        assigned_to: input.assignees.into_iter().map(UserId::new).collect(),
        due_date,
    };
    let created = ctx
        .client
        .create_task(&task)
        .await
        .map_err(action_failed("Could not create task"))?;
    tracing::info!("Created {}", describe(&created));
    Ok(())
}

/// Move a task to another column.
pub async fn set_status(ctx: &Context, id: &str, status: &str) -> Result<(), CliError> {
    let status: TaskStatus = status.parse()?;

    let task = ctx
        .client
        .update_task_status(&TaskId::new(id.trim()), status)
        .await
        .map_err(action_failed("Could not update task"))?;
    tracing::info!("Updated {}", describe(&task));
    Ok(())
}

/// Delete a task.
pub async fn delete(ctx: &Context, id: &str) -> Result<(), CliError> {
    ctx.client
        .delete_task(&TaskId::new(id.trim()))
        .await
        .map_err(action_failed("Could not delete task"))?;
    tracing::info!("Deleted task {}", id.trim());
    Ok(())
}
