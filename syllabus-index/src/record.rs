//! Raw ingested rows and their conversion into [`Course`] records.

use serde::{Deserialize, Serialize};
use syllabus_core::errors::IndexError;
use syllabus_core::Course;
use tracing::warn;

use crate::normalize::normalize_code;

/// One row of the cleaned course table, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseRecord {
    pub course_id: Option<u64>,
    pub code: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub term: Option<String>,
    pub instructors: Vec<String>,
    pub description: Option<String>,
    pub requirements_text: Option<String>,
    pub mean_weekly_hours: Option<f64>,
    pub overall_rating: Option<f64>,
    pub student_comments: Vec<String>,
}

impl CourseRecord {
    /// Validate and normalize this row. `row` is only used in error messages.
    ///
    /// Missing id or code rejects the row. Out-of-range ratings and negative
    /// hours are dropped to `None` rather than rejecting the row.
    pub fn into_course(self, row: usize) -> Result<Course, IndexError> {
        let course_id = self.course_id.ok_or_else(|| IndexError::RowRejected {
            row,
            reason: "missing course_id".to_string(),
        })?;
        let code = self
            .code
            .as_deref()
            .and_then(normalize_code)
            .ok_or_else(|| IndexError::RowRejected {
                row,
                reason: "missing course code".to_string(),
            })?;

        let overall_rating = match self.overall_rating {
            Some(r) if r.is_finite() && (0.0..=5.0).contains(&r) => Some(r),
            Some(r) => {
                warn!(row, code = %code, rating = r, "rating outside 0-5, treated as missing");
                None
            }
            None => None,
        };
        let mean_weekly_hours = match self.mean_weekly_hours {
            Some(h) if h.is_finite() && h >= 0.0 => Some(h),
            Some(h) => {
                warn!(row, code = %code, hours = h, "invalid weekly hours, treated as missing");
                None
            }
            None => None,
        };

        let department = self
            .department
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| code.split(' ').next().unwrap_or_default().to_string());

        Ok(Course {
            course_id,
            department,
            title: self.title.unwrap_or_default().trim().to_string(),
            term: self.term.unwrap_or_default().trim().to_string(),
            instructors: self.instructors,
            description: self.description.unwrap_or_default(),
            requirements_text: self.requirements_text.unwrap_or_default(),
            mean_weekly_hours,
            overall_rating,
            student_comments: self.student_comments,
            code,
        })
    }
}

impl From<Course> for CourseRecord {
    fn from(c: Course) -> Self {
        Self {
            course_id: Some(c.course_id),
            code: Some(c.code),
            department: Some(c.department),
            title: Some(c.title),
            term: Some(c.term),
            instructors: c.instructors,
            description: Some(c.description),
            requirements_text: Some(c.requirements_text),
            mean_weekly_hours: c.mean_weekly_hours,
            overall_rating: c.overall_rating,
            student_comments: c.student_comments,
        }
    }
}
