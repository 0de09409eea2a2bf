use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;
use crate::utils::roster_filter::RosterRecord;

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
    pub enum TeacherStatus {
        Active => "active",
        OnLeave => "on_leave",
        Inactive => "inactive",
    }
}

// 教师实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// 任教学科
    pub specialization: Option<String>,
    pub status: TeacherStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl RosterRecord for Teacher {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        fields.extend(self.specialization.as_deref());
        fields
    }
}
