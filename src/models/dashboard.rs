use serde::Serialize;
use ts_rs::TS;

/// 未知角色的仪表盘提示
pub const UNRECOGNIZED_ROLE_MESSAGE: &str = "Unrecognized user type";

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AdminDashboard {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_classes: i64,
    pub active_classes: i64,
    /// 有平均分的成绩条目中及格的比例（百分比）
    pub approval_rate: Option<f64>,
    pub attendance_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherDashboard {
    pub classes: i64,
    pub students: i64,
    pub grades_recorded: i64,
    /// 每个授课安排 × 入班学生 × 4 学期，减去已录入
    pub grades_pending: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboard {
    pub general_average: Option<f64>,
    pub attendance_rate: Option<f64>,
    pub approved_subjects: i64,
    pub remedial_subjects: i64,
}

// 按角色区分的仪表盘
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "variant", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub enum DashboardResponse {
    Admin(AdminDashboard),
    Teacher(TeacherDashboard),
    Student(StudentDashboard),
    Unrecognized { message: String },
}

impl DashboardResponse {
    pub fn unrecognized() -> Self {
        DashboardResponse::Unrecognized {
            message: UNRECOGNIZED_ROLE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_variant_shape() {
        let json = serde_json::to_value(DashboardResponse::unrecognized()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"variant": "unrecognized", "message": "Unrecognized user type"})
        );
    }

    #[test]
    fn role_variants_are_tagged() {
        let json = serde_json::to_value(DashboardResponse::Teacher(TeacherDashboard {
            classes: 2,
            students: 40,
            grades_recorded: 100,
            grades_pending: 60,
        }))
        .unwrap();
        assert_eq!(json["variant"], "teacher");
        assert_eq!(json["grades_pending"], 60);
    }
}
