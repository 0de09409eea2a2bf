use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;
use crate::utils::roster_filter::RosterRecord;

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
    pub enum StudentStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

// 学生实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub registration_number: String,
    pub birth_date: Option<String>,
    pub address: Option<String>,
    pub status: StudentStatus,
    /// 当前有效入班记录对应的班级
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl RosterRecord for Student {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        fields.extend(self.class_name.as_deref());
        fields
    }
}
