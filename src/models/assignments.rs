//! 授课安排：某教师在某学年为某班级教授某学科

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub class_id: i64,
    pub class_name: String,
    pub subject_id: i64,
    pub subject_name: String,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub year: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentQuery {
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub class_id: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub teacher_id: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub subject_id: Option<i64>,
}
