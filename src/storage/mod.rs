use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 唯一的数据访问层
///
/// 所有读取都返回快照，服务层不保留名册或成绩的副本。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 登录账号
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    /// 学生
    async fn create_student(
        &self,
        student: CreateStudentRequest,
        user_id: Option<i64>,
    ) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    // 按 id 升序返回完整名册
    async fn list_students(&self, filter: StudentFilter) -> Result<Vec<Student>>;
    async fn update_student(&self, id: i64, update: UpdateStudentRequest)
    -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 教师
    async fn create_teacher(
        &self,
        teacher: CreateTeacherRequest,
        user_id: Option<i64>,
    ) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(&self, status: Option<TeacherStatus>) -> Result<Vec<Teacher>>;
    async fn update_teacher(&self, id: i64, update: UpdateTeacherRequest)
    -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 班级，`class.year` 必须已由服务层确定
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn list_classes(&self, scope: ClassScope) -> Result<Vec<Class>>;
    async fn update_class(&self, id: i64, update: UpdateClassRequest) -> Result<Option<Class>>;
    async fn delete_class(&self, id: i64) -> Result<bool>;

    /// 学科
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 授课安排
    async fn create_assignment(
        &self,
        class_id: i64,
        subject_id: i64,
        teacher_id: i64,
        year: i32,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments(&self, query: AssignmentQuery) -> Result<Vec<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 入班记录
    // 已存在但非有效的记录会被重新激活
    async fn create_enrollment(&self, student_id: i64, class_id: i64) -> Result<Enrollment>;
    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>>;
    async fn list_enrollments(&self, query: EnrollmentQuery) -> Result<Vec<Enrollment>>;
    async fn update_enrollment_status(
        &self,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>>;
    async fn delete_enrollment(&self, id: i64) -> Result<bool>;

    /// 学期成绩：按 (assignment_id, student_id, bimester) 写入或覆盖
    async fn upsert_grade(
        &self,
        assignment_id: i64,
        student_id: i64,
        bimester: i32,
        score: Option<f64>,
    ) -> Result<PeriodScore>;
    async fn list_period_scores(
        &self,
        assignment_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<PeriodScore>>;
    async fn list_period_scores_for_assignments(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<PeriodScore>>;

    /// 考勤：按 (student_id, class_id, date) 写入或覆盖
    async fn upsert_attendance(
        &self,
        student_id: i64,
        class_id: i64,
        date: &str,
        present: bool,
    ) -> Result<AttendanceRecord>;
    /// 整班点名，全部成功或全部不写入
    async fn upsert_attendance_batch(
        &self,
        class_id: i64,
        date: &str,
        entries: &[(i64, bool)],
    ) -> Result<Vec<AttendanceRecord>>;
    async fn list_attendance(&self, query: AttendanceQuery) -> Result<Vec<AttendanceRecord>>;

    /// 评语
    async fn create_observation(
        &self,
        teacher_id: i64,
        observation: CreateObservationRequest,
    ) -> Result<Observation>;
    async fn get_observation_by_id(&self, id: i64) -> Result<Option<Observation>>;
    async fn list_observations(&self, query: ObservationQuery) -> Result<Vec<Observation>>;
    async fn update_observation(&self, id: i64, content: String) -> Result<Option<Observation>>;
    async fn delete_observation(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
