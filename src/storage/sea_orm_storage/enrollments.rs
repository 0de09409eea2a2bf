//! 入班记录存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::entity::from_timestamp;
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolHubError};
use crate::models::enrollments::{Enrollment, EnrollmentQuery, EnrollmentStatus};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 学生入班
    ///
    /// 学生同一时间只在一个班级有效：其它有效记录转为 transferred。
    /// 已有 (学生, 班级) 记录时重新激活而不是新建。
    pub async fn create_enrollment_impl(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("开启事务失败: {e}")))?;

        Enrollments::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(EnrollmentStatus::Transferred.to_string()),
            )
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassId.ne(class_id))
            .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .exec(&txn)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("转出原班级失败: {e}")))?;

        let existing = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassId.eq(class_id))
            .one(&txn)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询入班记录失败: {e}")))?;

        let model = match existing {
            Some(existing) => {
                let mut model: ActiveModel = existing.into();
                model.status = Set(EnrollmentStatus::Active.to_string());
                model.enrolled_at = Set(now);
                model
                    .update(&txn)
                    .await
                    .map_err(|e| write_error("更新入班记录失败", e))?
            }
            None => ActiveModel {
                student_id: Set(student_id),
                class_id: Set(class_id),
                status: Set(EnrollmentStatus::Active.to_string()),
                enrolled_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| write_error("创建入班记录失败", e))?,
        };

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("提交事务失败: {e}")))?;

        self.assemble_enrollments(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolHubError::not_found("入班记录创建后未找到"))
    }

    pub async fn get_enrollment_by_id_impl(&self, id: i64) -> Result<Option<Enrollment>> {
        let Some(model) = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询入班记录失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.assemble_enrollments(vec![model]).await?.pop())
    }

    pub async fn list_enrollments_impl(&self, query: EnrollmentQuery) -> Result<Vec<Enrollment>> {
        let mut select = Enrollments::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let models = select
            .order_by_desc(Column::EnrolledAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolHubError::database_operation(format!("查询入班记录列表失败: {e}"))
            })?;

        self.assemble_enrollments(models).await
    }

    pub async fn update_enrollment_status_impl(
        &self,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        let Some(existing) = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询入班记录失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(status.to_string());
        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新入班记录失败", e))?;

        Ok(self.assemble_enrollments(vec![result]).await?.pop())
    }

    pub async fn delete_enrollment_impl(&self, id: i64) -> Result<bool> {
        let result = Enrollments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除入班记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生当前所在班级：学生ID → (班级ID, 班级名)
    pub(super) async fn active_classes_for(
        &self,
        student_ids: &[i64],
    ) -> Result<HashMap<i64, (i64, String)>> {
        if student_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let enrollments = Enrollments::find()
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .order_by_asc(Column::EnrolledAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询入班记录失败: {e}")))?;

        if enrollments.is_empty() {
            return Ok(HashMap::new());
        }

        let class_names: HashMap<i64, String> = Classes::find()
            .filter(ClassColumn::Id.is_in(enrollments.iter().map(|e| e.class_id)))
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级信息失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        // 按入班时间升序写入，最近一次覆盖较早的
        let mut result = HashMap::new();
        for enrollment in enrollments {
            if let Some(name) = class_names.get(&enrollment.class_id) {
                result.insert(enrollment.student_id, (enrollment.class_id, name.clone()));
            }
        }
        Ok(result)
    }

    async fn assemble_enrollments(&self, models: Vec<Model>) -> Result<Vec<Enrollment>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let student_names: HashMap<i64, String> = Students::find()
            .filter(StudentColumn::Id.is_in(models.iter().map(|m| m.student_id)))
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询学生信息失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let class_names: HashMap<i64, String> = Classes::find()
            .filter(ClassColumn::Id.is_in(models.iter().map(|m| m.class_id)))
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级信息失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| Enrollment {
                id: m.id,
                student_id: m.student_id,
                student_name: student_names.get(&m.student_id).cloned().unwrap_or_default(),
                class_id: m.class_id,
                class_name: class_names.get(&m.class_id).cloned().unwrap_or_default(),
                status: m.status.parse().unwrap_or(EnrollmentStatus::Active),
                enrolled_at: from_timestamp(m.enrolled_at),
            })
            .collect())
    }
}
