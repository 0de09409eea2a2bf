//! 考勤存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::errors::{Result, SchoolHubError};
use crate::models::attendance::{AttendanceQuery, AttendanceRecord};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 记录考勤，同一 (学生, 班级, 日期) 只保留一条
    pub async fn upsert_attendance_impl(
        &self,
        student_id: i64,
        class_id: i64,
        date: &str,
        present: bool,
    ) -> Result<AttendanceRecord> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            class_id: Set(class_id),
            date: Set(date.to_string()),
            present: Set(present),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Attendance::insert(model)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::ClassId, Column::Date])
                    .update_columns([Column::Present, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| write_error("保存考勤失败", e))?;

        let saved = Attendance::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询考勤失败: {e}")))?
            .ok_or_else(|| SchoolHubError::not_found("考勤保存后未找到"))?;

        Ok(saved.into_record())
    }

    /// 整班点名：同一事务内逐条写入，任一失败则全部回滚
    pub async fn upsert_attendance_batch_impl(
        &self,
        class_id: i64,
        date: &str,
        entries: &[(i64, bool)],
    ) -> Result<Vec<AttendanceRecord>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("开启事务失败: {e}")))?;

        for &(student_id, present) in entries {
            let model = ActiveModel {
                student_id: Set(student_id),
                class_id: Set(class_id),
                date: Set(date.to_string()),
                present: Set(present),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            // 出错时 txn 被丢弃，已写入的条目随之回滚
            Attendance::insert(model)
                .on_conflict(
                    OnConflict::columns([Column::StudentId, Column::ClassId, Column::Date])
                        .update_columns([Column::Present, Column::UpdatedAt])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(|e| write_error("保存考勤失败", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("提交事务失败: {e}")))?;

        let student_ids: Vec<i64> = entries.iter().map(|(id, _)| *id).collect();
        let models = Attendance::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Date.eq(date))
            .filter(Column::StudentId.is_in(student_ids))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_record()).collect())
    }

    /// 列出考勤，按日期、学生排序
    pub async fn list_attendance_impl(&self, query: AttendanceQuery) -> Result<Vec<AttendanceRecord>> {
        let mut select = Attendance::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }

        let models = select
            .order_by_asc(Column::Date)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_record()).collect())
    }
}
