use serde::Serialize;
use ts_rs::TS;

use super::entities::{GradeEntry, GradeStatus};
use crate::models::{assignments::Assignment, observations::Observation, students::entities::Student};

// 成绩录入表的一行
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSheetRow {
    pub student_id: i64,
    pub student_name: String,
    pub registration_number: String,
    /// 所选学期的成绩
    pub score: Option<f64>,
    pub period_status: Option<GradeStatus>,
    pub entry: GradeEntry,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSheetResponse {
    pub assignment: Assignment,
    pub bimester: i32,
    pub rows: Vec<GradeSheetRow>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StudentGradesResponse {
    pub student_id: i64,
    pub entries: Vec<GradeEntry>,
}

// 成绩单
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ReportCard {
    pub student: Student,
    pub class_name: Option<String>,
    pub lines: Vec<GradeEntry>,
    /// 各科平均分（有平均分的科目）的平均
    pub general_average: Option<f64>,
    pub approved_subjects: i64,
    pub remedial_subjects: i64,
    pub total_absences: i64,
    pub attendance_rate: Option<f64>,
    pub overall_status: Option<GradeStatus>,
    pub observations: Vec<Observation>,
}
