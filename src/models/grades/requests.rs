use serde::Deserialize;
use ts_rs::TS;

// 录入/清除某学期成绩，score 为空表示缺省
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct RecordGradeRequest {
    pub assignment_id: i64,
    pub student_id: i64,
    pub bimester: i32,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSheetQuery {
    pub assignment_id: i64,
    pub bimester: i32,
}
