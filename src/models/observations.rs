use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师对学生的评语
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/observation.ts")]
pub struct Observation {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/observation.ts")]
pub struct CreateObservationRequest {
    pub student_id: i64,
    pub class_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/observation.ts")]
pub struct UpdateObservationRequest {
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/observation.ts")]
pub struct ObservationQuery {
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub student_id: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub class_id: Option<i64>,
}
