//! Backend records as the client sees them.
//!
//! Records keep unknown fields in a flattened `extra` map where the client
//! only models part of the backend document.

pub mod admin;
pub mod company;
pub mod department;
pub mod pricing;
pub mod task;

pub use admin::{AdminConsole, PlatformAnalytics};
pub use company::{Company, InvitationAcceptance};
pub use department::{Department, NewDepartment};
pub use pricing::PricingPlan;
pub use task::{CalendarMonth, NewTask, Task, TaskBoard, TaskStatus, TaskStatusParseError};
