//! 学期成绩存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{Result, SchoolHubError};
use crate::models::grades::entities::PeriodScore;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 写入某学期成绩，(授课安排, 学生, 学期) 已存在时覆盖
    pub async fn upsert_grade_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        bimester: i32,
        score: Option<f64>,
    ) -> Result<PeriodScore> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            bimester: Set(bimester),
            score: Set(score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Grades::insert(model)
            .on_conflict(
                OnConflict::columns([Column::AssignmentId, Column::StudentId, Column::Bimester])
                    .update_columns([Column::Score, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| write_error("保存成绩失败", e))?;

        let saved = Grades::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Bimester.eq(bimester))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询成绩失败: {e}")))?
            .ok_or_else(|| SchoolHubError::not_found("成绩保存后未找到"))?;

        Ok(saved.into_period_score())
    }

    /// 按授课安排和/或学生列出学期成绩
    pub async fn list_period_scores_impl(
        &self,
        assignment_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<PeriodScore>> {
        let mut select = Grades::find();

        if let Some(assignment_id) = assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }
        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let models = select
            .order_by_asc(Column::AssignmentId)
            .order_by_asc(Column::StudentId)
            .order_by_asc(Column::Bimester)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_period_score()).collect())
    }

    /// 一次取出多个授课安排的全部成绩
    pub async fn list_period_scores_for_assignments_impl(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<PeriodScore>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Grades::find()
            .filter(Column::AssignmentId.is_in(assignment_ids.iter().copied()))
            .order_by_asc(Column::AssignmentId)
            .order_by_asc(Column::StudentId)
            .order_by_asc(Column::Bimester)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_period_score()).collect())
    }
}
