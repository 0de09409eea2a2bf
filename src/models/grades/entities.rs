use serde::Serialize;
use ts_rs::TS;

use crate::define_string_enum;
use crate::errors::Result;
use crate::utils::grade_calc::{self, PERIODS};

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
    pub enum GradeStatus {
        Approved => "approved",
        Remedial => "remedial",
    }
}

/// 单个学期成绩行（存储快照）
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodScore {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub bimester: i32,
    pub score: Option<f64>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 某学生某门课的成绩条目
///
/// 平均分和状态只在构造或修改学期成绩时由 `grade_calc` 重新计算，从不落库。
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeEntry {
    pub assignment_id: i64,
    pub subject_id: i64,
    pub subject_name: String,
    pub teacher_name: String,
    pub student_id: i64,
    periods: [Option<f64>; PERIODS],
    average: Option<f64>,
    status: Option<GradeStatus>,
}

impl GradeEntry {
    pub fn new(
        assignment_id: i64,
        subject_id: i64,
        subject_name: String,
        teacher_name: String,
        student_id: i64,
    ) -> Self {
        Self {
            assignment_id,
            subject_id,
            subject_name,
            teacher_name,
            student_id,
            periods: [None; PERIODS],
            average: None,
            status: None,
        }
    }

    /// 写入一个学期成绩（1..=4），越界或非法成绩被拒绝，条目保持不变
    pub fn set_period(&mut self, bimester: i32, score: Option<f64>) -> Result<()> {
        let index = grade_calc::validate_bimester(bimester)?;
        let score = grade_calc::validate_period_score(score)?;
        self.periods[index] = score;
        self.recompute();
        Ok(())
    }

    /// 从存储快照装配；快照中的非法值直接忽略
    pub fn with_scores<'a, I>(mut self, scores: I) -> Self
    where
        I: IntoIterator<Item = &'a PeriodScore>,
    {
        for row in scores {
            if let Err(e) = self.set_period(row.bimester, row.score) {
                tracing::warn!(
                    "Ignoring stored grade {} for assignment {}: {}",
                    row.id,
                    row.assignment_id,
                    e
                );
            }
        }
        self
    }

    fn recompute(&mut self) {
        self.average = grade_calc::average(&self.periods);
        self.status = grade_calc::status_of(self.average);
    }

    pub fn periods(&self) -> &[Option<f64>; PERIODS] {
        &self.periods
    }

    pub fn period(&self, bimester: i32) -> Option<f64> {
        grade_calc::validate_bimester(bimester)
            .ok()
            .and_then(|index| self.periods[index])
    }

    pub fn average(&self) -> Option<f64> {
        self.average
    }

    pub fn status(&self) -> Option<GradeStatus> {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> GradeEntry {
        GradeEntry::new(1, 2, "Mathematics".into(), "Maria Santos".into(), 3)
    }

    #[test]
    fn average_follows_every_period_change() {
        let mut e = entry();
        assert_eq!(e.average(), None);
        assert_eq!(e.status(), None);

        e.set_period(1, Some(6.0)).unwrap();
        assert_eq!(e.average(), Some(6.0));
        assert_eq!(e.status(), Some(GradeStatus::Remedial));

        e.set_period(2, Some(8.0)).unwrap();
        assert_eq!(e.average(), Some(7.0));
        assert_eq!(e.status(), Some(GradeStatus::Approved));

        e.set_period(1, None).unwrap();
        assert_eq!(e.average(), Some(8.0));
    }

    #[test]
    fn rejected_score_leaves_entry_untouched() {
        let mut e = entry();
        e.set_period(3, Some(9.0)).unwrap();
        assert!(e.set_period(3, Some(10.5)).is_err());
        assert!(e.set_period(5, Some(5.0)).is_err());
        assert_eq!(e.period(3), Some(9.0));
        assert_eq!(e.average(), Some(9.0));
    }

    #[test]
    fn serializes_derived_fields() {
        let mut e = entry();
        e.set_period(4, Some(6.8)).unwrap();
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["periods"], serde_json::json!([null, null, null, 6.8]));
        assert_eq!(json["average"], 6.8);
        assert_eq!(json["status"], "remedial");
    }
}
