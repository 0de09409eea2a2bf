//! 仪表盘统计（纯函数，输入为存储快照）

use std::collections::{HashMap, HashSet};

use crate::models::{
    assignments::Assignment,
    grades::entities::{GradeStatus, PeriodScore},
    students::entities::Student,
};
use crate::utils::grade_calc::{self, PERIODS};

/// 有平均分的成绩条目中及格的百分比
pub(crate) fn approval_rate(scores: &[PeriodScore]) -> Option<f64> {
    let mut by_entry: HashMap<(i64, i64), Vec<Option<f64>>> = HashMap::new();
    for score in scores {
        // 与成绩单一致，存储中的非法值不参与统计
        let Ok(value) = grade_calc::validate_bimester(score.bimester)
            .and_then(|_| grade_calc::validate_period_score(score.score))
        else {
            continue;
        };
        by_entry
            .entry((score.assignment_id, score.student_id))
            .or_default()
            .push(value);
    }

    let (graded, approved) = by_entry
        .values()
        .filter_map(|periods| grade_calc::status_of(grade_calc::average(periods)))
        .fold((0_u64, 0_u64), |(graded, approved), status| {
            (graded + 1, approved + u64::from(status == GradeStatus::Approved))
        });

    (graded > 0).then(|| approved as f64 / graded as f64 * 100.0)
}

/// 教师视角的成绩进度：(已录入, 待录入)
///
/// 每个授课安排对班上每名有效学生期望 4 个学期成绩；
/// 只统计当前仍在该班级的学生。
pub(crate) fn grade_progress(
    assignments: &[Assignment],
    students: &[Student],
    scores: &[PeriodScore],
) -> (i64, i64) {
    let mut roster: HashMap<i64, HashSet<i64>> = HashMap::new();
    for student in students {
        if let Some(class_id) = student.class_id {
            roster.entry(class_id).or_default().insert(student.id);
        }
    }
    let class_of: HashMap<i64, i64> = assignments.iter().map(|a| (a.id, a.class_id)).collect();

    let expected: i64 = assignments
        .iter()
        .map(|a| roster.get(&a.class_id).map_or(0, |s| s.len() as i64) * PERIODS as i64)
        .sum();

    let recorded = scores
        .iter()
        .filter(|s| s.score.is_some())
        .filter(|s| {
            class_of
                .get(&s.assignment_id)
                .and_then(|class_id| roster.get(class_id))
                .is_some_and(|ids| ids.contains(&s.student_id))
        })
        .count() as i64;

    (recorded, (expected - recorded).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{grades::entities::GradeEntry, students::entities::StudentStatus};

    fn score(assignment_id: i64, student_id: i64, bimester: i32, value: Option<f64>) -> PeriodScore {
        PeriodScore {
            id: assignment_id * 1000 + student_id * 10 + bimester as i64,
            assignment_id,
            student_id,
            bimester,
            score: value,
            updated_at: chrono::Utc::now(),
        }
    }

    fn assignment(id: i64, class_id: i64) -> Assignment {
        Assignment {
            id,
            class_id,
            class_name: format!("class-{class_id}"),
            subject_id: id,
            subject_name: format!("subject-{id}"),
            teacher_id: 1,
            teacher_name: "Maria".into(),
            year: 2025,
            created_at: chrono::Utc::now(),
        }
    }

    fn student(id: i64, class_id: Option<i64>) -> Student {
        let now = chrono::Utc::now();
        Student {
            id,
            user_id: None,
            name: format!("student-{id}"),
            email: format!("s{id}@school.test"),
            phone: None,
            registration_number: format!("R-{id:04}"),
            birth_date: None,
            address: None,
            status: StudentStatus::Active,
            class_id,
            class_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn approval_rate_ignores_entries_without_average() {
        let scores = vec![
            score(1, 1, 1, Some(8.0)),
            score(1, 1, 2, Some(9.0)),
            score(1, 2, 1, Some(5.0)),
            score(1, 3, 1, None),
        ];
        let rate = approval_rate(&scores).unwrap();
        assert!((rate - 50.0).abs() < 1e-9);
        assert_eq!(approval_rate(&[score(1, 1, 1, None)]), None);
        assert_eq!(approval_rate(&[]), None);
    }

    #[test]
    fn approval_rate_skips_invalid_stored_scores() {
        let scores = vec![
            // 42 不在 [0, 10]，平均分只剩 5.0
            score(1, 1, 1, Some(42.0)),
            score(1, 1, 2, Some(5.0)),
            score(1, 2, 1, Some(f64::NAN)),
            score(1, 3, 9, Some(10.0)),
        ];
        assert_eq!(approval_rate(&scores), Some(0.0));

        let entry = GradeEntry::new(1, 1, "Mathematics".into(), "Maria".into(), 1)
            .with_scores(scores.iter().filter(|s| s.student_id == 1));
        assert_eq!(entry.average(), Some(5.0));
        assert_eq!(entry.status(), Some(GradeStatus::Remedial));
    }

    #[test]
    fn grade_progress_counts_only_current_roster() {
        let assignments = vec![assignment(1, 10), assignment(2, 20)];
        let students = vec![student(1, Some(10)), student(2, Some(10)), student(3, Some(20)), student(4, None)];
        let scores = vec![
            score(1, 1, 1, Some(7.0)),
            score(1, 2, 1, Some(6.0)),
            score(1, 2, 2, None),
            score(2, 3, 4, Some(9.5)),
            // 已转出的学生不计入
            score(2, 9, 1, Some(9.5)),
        ];
        let (recorded, pending) = grade_progress(&assignments, &students, &scores);
        assert_eq!(recorded, 3);
        assert_eq!(pending, 3 * 4 - 3);
    }

    #[test]
    fn grade_progress_without_students_has_nothing_pending() {
        let (recorded, pending) = grade_progress(&[assignment(1, 10)], &[], &[]);
        assert_eq!((recorded, pending), (0, 0));
    }
}
