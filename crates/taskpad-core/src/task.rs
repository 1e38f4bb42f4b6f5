use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Completed => "completed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Completed => "Completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Status::Pending),
            "completed" => Some(Status::Completed),
            _ => None,
        }
    }

    /// The other status: pending becomes completed and vice versa.
    pub fn toggled(&self) -> Self {
        match self {
            Status::Pending => Status::Completed,
            Status::Completed => Status::Pending,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A task as the server stores it. `id` and `created_at` are assigned by
/// the server and never written by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    pub created_at: String,
}

impl Task {
    /// Clone with only `status` replaced. This is the payload of a status
    /// toggle: a full-record replace where every other field is unchanged.
    pub fn with_status(&self, status: Status) -> Task {
        Task {
            status,
            ..self.clone()
        }
    }

    /// Date portion of `created_at` for display. The server's timestamp
    /// format is not part of the contract, so parsing is best-effort and
    /// falls back to the raw string.
    pub fn created_date(&self) -> String {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.created_at) {
            return dt.format("%Y-%m-%d").to_string();
        }
        let date_part = self.created_at.get(..10).unwrap_or(&self.created_at);
        if NaiveDate::parse_from_str(date_part, "%Y-%m-%d").is_ok() {
            return date_part.to_string();
        }
        self.created_at.clone()
    }
}

/// POST body for creating a task. User-initiated creates always send
/// `status: pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
}

/// PUT body for a form-driven edit: a full replace of the mutable fields.
/// `status` carries the task's current status unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
}
