use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
    pub enum EnrollmentStatus {
        Active => "active",
        Transferred => "transferred",
        Cancelled => "cancelled",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub class_id: i64,
    pub class_name: String,
    pub status: EnrollmentStatus,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct CreateEnrollmentRequest {
    pub student_id: i64,
    pub class_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct UpdateEnrollmentRequest {
    pub status: EnrollmentStatus,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentQuery {
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub class_id: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub student_id: Option<i64>,
    pub status: Option<EnrollmentStatus>,
}
