//! Company tasks.

use serde::Serialize;
use tracing::{debug, instrument};
use workpro_core::TaskId;

use super::{CompanyScoped, segment};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{NewTask, Task, TaskStatus};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskRequest<'a> {
    #[serde(flatten)]
    task: &'a NewTask,
    company_id: &'a str,
}

#[derive(Serialize)]
struct UpdateStatusRequest {
    status: TaskStatus,
}

impl ApiClient {
    /// All tasks of the selected company.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unreadable or the API request fails.
    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> Result<CompanyScoped<Vec<Task>>, ApiError> {
        let Some(company_id) = self.scoped_company("tasks")? else {
            return Ok(CompanyScoped::NoCompany);
        };

        let tasks: Vec<Task> = self
            .send_json(self.get("/api/tasks").query("companyId", company_id.as_str()))
            .await?;
        debug!(count = tasks.len(), "Loaded tasks");
        Ok(CompanyScoped::Ready(tasks))
    }

    /// Tasks of the selected company assigned to the signed-in user.
    ///
    /// Signed out, this is an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unreadable or the API request fails.
    #[instrument(skip(self))]
    pub async fn my_tasks(&self) -> Result<CompanyScoped<Vec<Task>>, ApiError> {
        let user_id = self.session().user_id()?;
        let scoped = self.list_tasks().await?;

        Ok(scoped.map(|tasks| match user_id {
            Some(user_id) => tasks
                .into_iter()
                .filter(|task| task.is_assigned_to(&user_id))
                .collect(),
            None => Vec::new(),
        }))
    }

    /// Create a task in the selected company.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Setup` if no company is selected, or an error if the
    /// API request fails.
    #[instrument(skip(self, task), fields(title = %task.title))]
    pub async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        let company_id = self.required_company()?;
        let request = self.post("/api/tasks").json(&CreateTaskRequest {
            task,
            company_id: company_id.as_str(),
        });
        self.send_json(request).await
    }

    /// Move a task to another board column.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn update_task_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> Result<Task, ApiError> {
        let path = format!("/api/tasks/{}", segment(id.as_str()));
        self.send_json(self.patch(path).json(&UpdateStatusRequest { status }))
            .await
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        let path = format!("/api/tasks/{}", segment(id.as_str()));
        self.send(self.delete(path)).await?;
        Ok(())
    }
}
