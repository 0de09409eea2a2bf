use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;
use crate::utils::roster_filter::RosterRecord;

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
    pub enum Shift {
        Morning => "morning",
        Afternoon => "afternoon",
        Night => "night",
    }
}

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
    pub enum ClassStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

// 班级实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub grade_level: String,
    pub shift: Shift,
    pub year: i32,
    pub capacity: Option<i32>,
    pub classroom: Option<String>,
    pub status: ClassStatus,
    /// 班主任
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    /// 有效入班学生数
    pub total_students: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Class {
    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.total_students >= i64::from(capacity))
    }
}

impl RosterRecord for Class {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.teacher_name.as_deref());
        fields.push(self.grade_level.as_str());
        fields
    }
}
