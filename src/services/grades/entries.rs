//! 从存储快照装配成绩条目和成绩单

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{
    assignments::{Assignment, AssignmentQuery},
    attendance::{AttendanceQuery, AttendanceSummary},
    grades::{
        entities::{GradeEntry, GradeStatus, PeriodScore},
        responses::ReportCard,
    },
    observations::ObservationQuery,
    students::entities::Student,
};
use crate::storage::Storage;
use crate::utils::grade_calc;

/// 按授课安排分组装配条目
pub(crate) fn entries_from(
    assignments: &[Assignment],
    student_id: i64,
    scores: &[PeriodScore],
) -> Vec<GradeEntry> {
    let mut by_assignment: HashMap<i64, Vec<&PeriodScore>> = HashMap::new();
    for score in scores.iter().filter(|s| s.student_id == student_id) {
        by_assignment.entry(score.assignment_id).or_default().push(score);
    }

    let mut entries: Vec<GradeEntry> = assignments
        .iter()
        .map(|a| {
            GradeEntry::new(
                a.id,
                a.subject_id,
                a.subject_name.clone(),
                a.teacher_name.clone(),
                student_id,
            )
            .with_scores(by_assignment.remove(&a.id).unwrap_or_default())
        })
        .collect();
    entries.sort_by(|a, b| a.subject_name.cmp(&b.subject_name));
    entries
}

/// 学生当前班级所有科目的成绩条目
pub(crate) async fn student_grade_entries(
    storage: &Arc<dyn Storage>,
    student: &Student,
) -> Result<Vec<GradeEntry>> {
    let Some(class_id) = student.class_id else {
        return Ok(Vec::new());
    };

    let assignments = storage
        .list_assignments(AssignmentQuery {
            class_id: Some(class_id),
            ..Default::default()
        })
        .await?;
    let scores = storage.list_period_scores(None, Some(student.id)).await?;

    Ok(entries_from(&assignments, student.id, &scores))
}

pub(crate) fn count_status(entries: &[GradeEntry], status: GradeStatus) -> i64 {
    entries.iter().filter(|e| e.status() == Some(status)).count() as i64
}

pub(crate) async fn build_report_card(
    storage: &Arc<dyn Storage>,
    student: Student,
) -> Result<ReportCard> {
    let lines = student_grade_entries(storage, &student).await?;

    let attendance = storage
        .list_attendance(AttendanceQuery {
            student_id: Some(student.id),
            ..Default::default()
        })
        .await?;
    let summary = AttendanceSummary::from_records(&attendance);

    let observations = storage
        .list_observations(ObservationQuery {
            student_id: Some(student.id),
            class_id: None,
        })
        .await?;

    Ok(ReportCard {
        class_name: student.class_name.clone(),
        general_average: grade_calc::general_average(lines.iter().map(|l| l.average())),
        approved_subjects: count_status(&lines, GradeStatus::Approved),
        remedial_subjects: count_status(&lines, GradeStatus::Remedial),
        overall_status: grade_calc::overall_status(lines.iter().map(|l| l.status())),
        total_absences: summary.absences,
        attendance_rate: summary.attendance_rate,
        observations,
        lines,
        student,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(id: i64, subject: &str) -> Assignment {
        Assignment {
            id,
            class_id: 1,
            class_name: "9A".into(),
            subject_id: id * 10,
            subject_name: subject.into(),
            teacher_id: 1,
            teacher_name: "Maria".into(),
            year: 2025,
            created_at: chrono::Utc::now(),
        }
    }

    fn score(assignment_id: i64, student_id: i64, bimester: i32, value: Option<f64>) -> PeriodScore {
        PeriodScore {
            id: assignment_id * 100 + bimester as i64,
            assignment_id,
            student_id,
            bimester,
            score: value,
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn groups_scores_per_subject_and_ignores_other_students() {
        let assignments = [assignment(1, "Science"), assignment(2, "Mathematics")];
        let scores = [
            score(1, 5, 1, Some(8.5)),
            score(1, 5, 2, Some(7.8)),
            score(1, 5, 3, Some(9.0)),
            score(1, 5, 4, Some(8.2)),
            score(2, 5, 1, Some(6.8)),
            score(2, 6, 1, Some(10.0)),
        ];

        let entries = entries_from(&assignments, 5, &scores);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].subject_name, "Mathematics");
        assert_eq!(entries[0].average(), Some(6.8));
        assert_eq!(entries[0].status(), Some(GradeStatus::Remedial));
        assert!((entries[1].average().unwrap() - 8.375).abs() < 1e-9);
        assert_eq!(count_status(&entries, GradeStatus::Approved), 1);
    }

    #[test]
    fn subject_without_scores_is_pending() {
        let entries = entries_from(&[assignment(1, "Art")], 5, &[]);
        assert_eq!(entries[0].average(), None);
        assert_eq!(entries[0].status(), None);
    }
}
