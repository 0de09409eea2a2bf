//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod attendance;
mod classes;
mod enrollments;
mod grades;
mod observations;
mod students;
mod subjects;
mod teachers;
mod users;

#[cfg(test)]
mod tests;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, SchoolHubError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::with_database_config(&AppConfig::get().database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn with_database_config(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（文件库使用 WAL + pragma 优化，内存库只用单连接）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存库的每个连接都是独立的数据库，必须固定为一个且不回收
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 写操作错误映射：唯一约束冲突 → Conflict，外键约束 → Validation
pub(crate) fn write_error(action: &str, err: DbErr) -> SchoolHubError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            SchoolHubError::conflict(format!("{action}: {detail}"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            SchoolHubError::validation(format!("{action}: referenced record missing ({detail})"))
        }
        _ => SchoolHubError::database_operation(format!("{action}: {err}")),
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{Assignment, AssignmentQuery},
    attendance::{AttendanceQuery, AttendanceRecord},
    classes::{
        entities::Class,
        requests::{ClassScope, CreateClassRequest, UpdateClassRequest},
    },
    enrollments::{Enrollment, EnrollmentQuery, EnrollmentStatus},
    grades::entities::PeriodScore,
    observations::{CreateObservationRequest, Observation, ObservationQuery},
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentFilter, UpdateStudentRequest},
    },
    subjects::{CreateSubjectRequest, Subject},
    teachers::{
        entities::{Teacher, TeacherStatus},
        requests::{CreateTeacherRequest, UpdateTeacherRequest},
    },
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学生模块
    async fn create_student(
        &self,
        student: CreateStudentRequest,
        user_id: Option<i64>,
    ) -> Result<Student> {
        self.create_student_impl(student, user_id).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn list_students(&self, filter: StudentFilter) -> Result<Vec<Student>> {
        self.list_students_impl(filter).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 教师模块
    async fn create_teacher(
        &self,
        teacher: CreateTeacherRequest,
        user_id: Option<i64>,
    ) -> Result<Teacher> {
        self.create_teacher_impl(teacher, user_id).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn list_teachers(&self, status: Option<TeacherStatus>) -> Result<Vec<Teacher>> {
        self.list_teachers_impl(status).await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn list_classes(&self, scope: ClassScope) -> Result<Vec<Class>> {
        self.list_classes_impl(scope).await
    }

    async fn update_class(&self, id: i64, update: UpdateClassRequest) -> Result<Option<Class>> {
        self.update_class_impl(id, update).await
    }

    async fn delete_class(&self, id: i64) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    // 学科模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 授课安排模块
    async fn create_assignment(
        &self,
        class_id: i64,
        subject_id: i64,
        teacher_id: i64,
        year: i32,
    ) -> Result<Assignment> {
        self.create_assignment_impl(class_id, subject_id, teacher_id, year)
            .await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments(&self, query: AssignmentQuery) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(query).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 入班模块
    async fn create_enrollment(&self, student_id: i64, class_id: i64) -> Result<Enrollment> {
        self.create_enrollment_impl(student_id, class_id).await
    }

    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_by_id_impl(id).await
    }

    async fn list_enrollments(&self, query: EnrollmentQuery) -> Result<Vec<Enrollment>> {
        self.list_enrollments_impl(query).await
    }

    async fn update_enrollment_status(
        &self,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        self.update_enrollment_status_impl(id, status).await
    }

    async fn delete_enrollment(&self, id: i64) -> Result<bool> {
        self.delete_enrollment_impl(id).await
    }

    // 成绩模块
    async fn upsert_grade(
        &self,
        assignment_id: i64,
        student_id: i64,
        bimester: i32,
        score: Option<f64>,
    ) -> Result<PeriodScore> {
        self.upsert_grade_impl(assignment_id, student_id, bimester, score)
            .await
    }

    async fn list_period_scores(
        &self,
        assignment_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<PeriodScore>> {
        self.list_period_scores_impl(assignment_id, student_id)
            .await
    }

    async fn list_period_scores_for_assignments(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<PeriodScore>> {
        self.list_period_scores_for_assignments_impl(assignment_ids)
            .await
    }

    // 考勤模块
    async fn upsert_attendance(
        &self,
        student_id: i64,
        class_id: i64,
        date: &str,
        present: bool,
    ) -> Result<AttendanceRecord> {
        self.upsert_attendance_impl(student_id, class_id, date, present)
            .await
    }

    async fn upsert_attendance_batch(
        &self,
        class_id: i64,
        date: &str,
        entries: &[(i64, bool)],
    ) -> Result<Vec<AttendanceRecord>> {
        self.upsert_attendance_batch_impl(class_id, date, entries)
            .await
    }

    async fn list_attendance(&self, query: AttendanceQuery) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_impl(query).await
    }

    // 评语模块
    async fn create_observation(
        &self,
        teacher_id: i64,
        observation: CreateObservationRequest,
    ) -> Result<Observation> {
        self.create_observation_impl(teacher_id, observation).await
    }

    async fn get_observation_by_id(&self, id: i64) -> Result<Option<Observation>> {
        self.get_observation_by_id_impl(id).await
    }

    async fn list_observations(&self, query: ObservationQuery) -> Result<Vec<Observation>> {
        self.list_observations_impl(query).await
    }

    async fn update_observation(&self, id: i64, content: String) -> Result<Option<Observation>> {
        self.update_observation_impl(id, content).await
    }

    async fn delete_observation(&self, id: i64) -> Result<bool> {
        self.delete_observation_impl(id).await
    }
}
