//! 班级存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes, Model as ClassModel};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::teachers::{Column as TeacherColumn, Entity as Teachers};
use crate::errors::{Result, SchoolHubError};
use crate::models::{
    classes::{
        entities::{Class, ClassStatus},
        requests::{ClassScope, CreateClassRequest, UpdateClassRequest},
    },
    enrollments::EnrollmentStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::{HashMap, HashSet};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        // year 必须由服务层确保已设置
        let year = req.year.ok_or_else(|| {
            SchoolHubError::database_operation("year must be set before calling create_class")
        })?;

        let model = ActiveModel {
            name: Set(req.name),
            grade_level: Set(req.grade_level),
            shift: Set(req.shift.to_string()),
            year: Set(year),
            capacity: Set(req.capacity),
            classroom: Set(req.classroom),
            status: Set(req.status.unwrap_or(ClassStatus::Active).to_string()),
            teacher_id: Set(req.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建班级失败", e))?;

        let mut classes = self.decorate_classes(vec![result]).await?;
        classes
            .pop()
            .ok_or_else(|| SchoolHubError::not_found("班级创建后未找到"))
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let Some(model) = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.decorate_classes(vec![model]).await?.pop())
    }

    /// 按范围列出班级，按名称排序
    pub async fn list_classes_impl(&self, scope: ClassScope) -> Result<Vec<Class>> {
        let mut select = Classes::find();

        match scope {
            ClassScope::All => {}
            ClassScope::TaughtBy(teacher_id) => {
                let class_ids: Vec<i64> = Assignments::find()
                    .filter(AssignmentColumn::TeacherId.eq(teacher_id))
                    .all(&self.db)
                    .await
                    .map_err(|e| {
                        SchoolHubError::database_operation(format!("查询授课安排失败: {e}"))
                    })?
                    .into_iter()
                    .map(|a| a.class_id)
                    .collect();

                select = select.filter(
                    Condition::any()
                        .add(Column::TeacherId.eq(teacher_id))
                        .add(Column::Id.is_in(class_ids)),
                );
            }
            ClassScope::EnrolledStudent(student_id) => {
                let class_ids: Vec<i64> = Enrollments::find()
                    .filter(EnrollmentColumn::StudentId.eq(student_id))
                    .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()))
                    .all(&self.db)
                    .await
                    .map_err(|e| {
                        SchoolHubError::database_operation(format!("查询入班记录失败: {e}"))
                    })?
                    .into_iter()
                    .map(|e| e.class_id)
                    .collect();

                if class_ids.is_empty() {
                    return Ok(Vec::new());
                }
                select = select.filter(Column::Id.is_in(class_ids));
            }
        }

        let models = select
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级列表失败: {e}")))?;

        self.decorate_classes(models).await
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let Some(existing) = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(grade_level) = update.grade_level {
            model.grade_level = Set(grade_level);
        }
        if let Some(shift) = update.shift {
            model.shift = Set(shift.to_string());
        }
        if let Some(year) = update.year {
            model.year = Set(year);
        }
        if let Some(capacity) = update.capacity {
            model.capacity = Set(Some(capacity));
        }
        if let Some(classroom) = update.classroom {
            model.classroom = Set(Some(classroom));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新班级失败", e))?;

        Ok(self.decorate_classes(vec![result]).await?.pop())
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量补全班主任姓名与在读人数
    async fn decorate_classes(&self, models: Vec<ClassModel>) -> Result<Vec<Class>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let class_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let teacher_ids: Vec<i64> = models
            .iter()
            .filter_map(|m| m.teacher_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let teacher_names: HashMap<i64, String> = if teacher_ids.is_empty() {
            HashMap::new()
        } else {
            Teachers::find()
                .filter(TeacherColumn::Id.is_in(teacher_ids))
                .all(&self.db)
                .await
                .map_err(|e| SchoolHubError::database_operation(format!("查询教师信息失败: {e}")))?
                .into_iter()
                .map(|t| (t.id, t.name))
                .collect()
        };

        let mut totals: HashMap<i64, i64> = HashMap::new();
        for enrollment in Enrollments::find()
            .filter(EnrollmentColumn::ClassId.is_in(class_ids))
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("统计班级人数失败: {e}")))?
        {
            *totals.entry(enrollment.class_id).or_default() += 1;
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let teacher_name = m.teacher_id.and_then(|id| teacher_names.get(&id).cloned());
                let total = totals.get(&m.id).copied().unwrap_or(0);
                m.into_class(teacher_name, total)
            })
            .collect())
    }
}
