use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考勤记录，(student_id, class_id, date) 唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    pub present: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceRequest {
    pub student_id: i64,
    pub class_id: i64,
    pub date: String,
    pub present: bool,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RollCallEntry {
    pub student_id: i64,
    pub present: bool,
}

// 点名：整班一次提交，重复提交不会产生重复记录
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RollCallRequest {
    pub class_id: i64,
    pub date: String,
    pub entries: Vec<RollCallEntry>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RollCallResponse {
    pub class_id: i64,
    pub date: String,
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceQuery {
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
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummaryQuery {
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

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummary {
    pub total: i64,
    pub present: i64,
    pub absences: i64,
    /// 百分比；没有记录时为空
    pub attendance_rate: Option<f64>,
}

impl AttendanceSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a AttendanceRecord>,
    {
        let (total, present) = records
            .into_iter()
            .fold((0_i64, 0_i64), |(total, present), record| {
                (total + 1, present + i64::from(record.present))
            });
        Self {
            total,
            present,
            absences: total - present,
            attendance_rate: crate::utils::grade_calc::attendance_rate(
                present as u64,
                total as u64,
            ),
        }
    }
}
