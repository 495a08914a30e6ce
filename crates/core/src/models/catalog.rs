use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SchoolError, SchoolResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub credits: i32,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> SchoolResult<()> {
        if self.code.trim().is_empty() {
            return Err(SchoolError::Validation("Course code is required".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(SchoolError::Validation("Course name is required".to_string()));
        }
        if self.credits < 0 {
            return Err(SchoolError::Validation(
                "Credits cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> SchoolResult<()> {
        if matches!(&self.code, Some(code) if code.trim().is_empty()) {
            return Err(SchoolError::Validation("Course code cannot be blank".to_string()));
        }
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(SchoolError::Validation("Course name cannot be blank".to_string()));
        }
        if matches!(self.credits, Some(credits) if credits < 0) {
            return Err(SchoolError::Validation(
                "Credits cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// List filter shared by the catalog endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub search: Option<String>,
    pub limit: Option<i64>,
}

impl CatalogFilter {
    /// `ILIKE` pattern for the search term, if any.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                let escaped = s
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                format!("%{}%", escaped)
            })
    }

    pub fn limit_or_default(&self) -> i64 {
        self.limit.unwrap_or(100).clamp(1, 500)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub name: String,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
}
