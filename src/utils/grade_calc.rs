//! 成绩汇总
//!
//! 每门课最多四个学期（bimester）成绩，每个成绩在 [0, 10] 内或缺省。
//! 平均分只由已录入的成绩计算，缺省成绩既不计入分子也不计入分母；
//! 平均分不落库，每次读取时重新计算。

use crate::errors::{Result, SchoolHubError};
use crate::models::grades::entities::GradeStatus;

/// 及格线（固定业务常量）
pub const PASSING_AVERAGE: f64 = 7.0;

/// 每学年的学期数
pub const PERIODS: usize = 4;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// 已录入成绩的算术平均；全部缺省时为 `None`
pub fn average(scores: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = scores
        .iter()
        .flatten()
        .fold((0.0_f64, 0_u32), |(sum, count), score| (sum + score, count + 1));

    (count > 0).then(|| sum / f64::from(count))
}

pub fn classify(average: f64) -> GradeStatus {
    if average >= PASSING_AVERAGE {
        GradeStatus::Approved
    } else {
        GradeStatus::Remedial
    }
}

/// 无平均分时状态为待定（`None`）
pub fn status_of(average: Option<f64>) -> Option<GradeStatus> {
    average.map(classify)
}

/// 校验单个学期成绩，超出范围直接拒绝，不做截断
pub fn validate_period_score(score: Option<f64>) -> Result<Option<f64>> {
    match score {
        None => Ok(None),
        Some(value) if !value.is_finite() => Err(SchoolHubError::score_out_of_range(
            "Score must be a finite number",
        )),
        Some(value) if !(MIN_SCORE..=MAX_SCORE).contains(&value) => {
            Err(SchoolHubError::score_out_of_range(format!(
                "Score {value} is outside [{MIN_SCORE}, {MAX_SCORE}]"
            )))
        }
        Some(value) => Ok(Some(value)),
    }
}

/// 学期编号为 1..=4，返回其数组下标
pub fn validate_bimester(bimester: i32) -> Result<usize> {
    if (1..=PERIODS as i32).contains(&bimester) {
        Ok((bimester - 1) as usize)
    } else {
        Err(SchoolHubError::validation(format!(
            "Bimester must be between 1 and {PERIODS}, got {bimester}"
        )))
    }
}

/// 总平均：各科平均分（仅计有平均分的科目）的平均
pub fn general_average<I>(subject_averages: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let averages: Vec<Option<f64>> = subject_averages.into_iter().collect();
    average(&averages)
}

/// 总体状态：任一科目需补考则为补考；没有任何平均分时为待定
pub fn overall_status<I>(statuses: I) -> Option<GradeStatus>
where
    I: IntoIterator<Item = Option<GradeStatus>>,
{
    let mut overall = None;
    for status in statuses.into_iter().flatten() {
        match status {
            GradeStatus::Remedial => return Some(GradeStatus::Remedial),
            GradeStatus::Approved => overall = Some(GradeStatus::Approved),
        }
    }
    overall
}

/// 出勤率（百分比）；没有记录时为 `None`
pub fn attendance_rate(present: u64, total: u64) -> Option<f64> {
    (total > 0).then(|| present as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn average_of_four_periods() {
        let avg = average(&[Some(8.5), Some(7.8), Some(9.0), Some(8.2)]).unwrap();
        assert!(approx(avg, 8.375));
        assert_eq!(classify(avg), GradeStatus::Approved);
    }

    #[test]
    fn single_present_score() {
        let avg = average(&[Some(6.8), None, None, None]).unwrap();
        assert!(approx(avg, 6.8));
        assert_eq!(classify(avg), GradeStatus::Remedial);
    }

    #[test]
    fn absent_scores_are_excluded_not_zero() {
        let avg = average(&[Some(8.0), None, Some(6.0), None]).unwrap();
        assert!(approx(avg, 7.0));
    }

    #[test]
    fn no_scores_yields_none() {
        assert_eq!(average(&[None, None, None, None]), None);
        assert_eq!(average(&[]), None);
        assert_eq!(status_of(None), None);
    }

    #[test]
    fn every_subset_is_the_arithmetic_mean() {
        let scores = [9.5, 3.0, 7.25, 10.0];
        for mask in 0u8..16 {
            let periods: Vec<Option<f64>> = (0..4)
                .map(|i| (mask & (1 << i) != 0).then_some(scores[i]))
                .collect();
            let present: Vec<f64> = periods.iter().flatten().copied().collect();
            match average(&periods) {
                None => assert!(present.is_empty()),
                Some(avg) => {
                    let expected = present.iter().sum::<f64>() / present.len() as f64;
                    assert!(approx(avg, expected), "mask {mask:04b}");
                }
            }
        }
    }

    #[test]
    fn average_is_order_independent() {
        let a = average(&[Some(2.0), Some(9.0), None, Some(4.5)]);
        let b = average(&[Some(4.5), None, Some(2.0), Some(9.0)]);
        assert!(approx(a.unwrap(), b.unwrap()));
    }

    #[test]
    fn threshold_boundary() {
        assert_eq!(classify(7.0), GradeStatus::Approved);
        assert_eq!(classify(6.999), GradeStatus::Remedial);
        assert_eq!(classify(10.0), GradeStatus::Approved);
        assert_eq!(classify(0.0), GradeStatus::Remedial);
    }

    #[test]
    fn out_of_range_scores_are_rejected() {
        assert!(validate_period_score(Some(-0.1)).is_err());
        assert!(validate_period_score(Some(10.01)).is_err());
        assert!(validate_period_score(Some(f64::NAN)).is_err());
        assert!(validate_period_score(Some(f64::INFINITY)).is_err());
        assert_eq!(validate_period_score(Some(0.0)).unwrap(), Some(0.0));
        assert_eq!(validate_period_score(Some(10.0)).unwrap(), Some(10.0));
        assert_eq!(validate_period_score(None).unwrap(), None);

        let err = validate_period_score(Some(11.0)).unwrap_err();
        assert_eq!(err.code(), "E014");
    }

    #[test]
    fn bimester_range() {
        assert_eq!(validate_bimester(1).unwrap(), 0);
        assert_eq!(validate_bimester(4).unwrap(), 3);
        assert!(validate_bimester(0).is_err());
        assert!(validate_bimester(5).is_err());
    }

    #[test]
    fn general_average_skips_subjects_without_average() {
        let avg = general_average([Some(8.0), None, Some(6.0)]).unwrap();
        assert!(approx(avg, 7.0));
        assert_eq!(general_average([None, None]), None);
    }

    #[test]
    fn overall_status_rules() {
        use GradeStatus::*;
        assert_eq!(overall_status([Some(Approved), None]), Some(Approved));
        assert_eq!(
            overall_status([Some(Approved), Some(Remedial)]),
            Some(Remedial)
        );
        assert_eq!(overall_status([None, None]), None);
    }

    #[test]
    fn attendance_rate_percentage() {
        assert!(approx(attendance_rate(3, 4).unwrap(), 75.0));
        assert_eq!(attendance_rate(0, 0), None);
    }
}
