//! Departments inside a company.

use serde::{Deserialize, Serialize};
use workpro_core::{DepartmentId, UserId};

/// A department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(rename = "_id", alias = "id")]
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manager: Option<UserId>,
    #[serde(default)]
    pub members: Vec<UserId>,
}

/// Fields for creating a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
