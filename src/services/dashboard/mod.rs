pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{
    ApiResponse,
    assignments::AssignmentQuery,
    attendance::{AttendanceQuery, AttendanceSummary},
    classes::{entities::ClassStatus, requests::ClassScope},
    dashboard::{AdminDashboard, DashboardResponse, StudentDashboard, TeacherDashboard},
    grades::entities::GradeStatus,
    students::{entities::Student, requests::StudentFilter},
    teachers::entities::Teacher,
};
use crate::services::grades::entries::{count_status, student_grade_entries};
use crate::services::{Actor, error_response, resolve_actor};
use crate::storage::Storage;
use crate::utils::grade_calc;

super::lazy_service!(DashboardService);

impl DashboardService {
    // 按角色返回仪表盘
    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        let actor = match resolve_actor(&storage, request).await {
            Ok(actor) => actor,
            Err(resp) => return Ok(resp),
        };

        let result = match actor {
            Actor::Admin(_) => admin_dashboard(&storage).await.map(DashboardResponse::Admin),
            Actor::Teacher(_, teacher) => teacher_dashboard(&storage, &teacher)
                .await
                .map(DashboardResponse::Teacher),
            Actor::Student(_, student) => student_dashboard(&storage, &student)
                .await
                .map(DashboardResponse::Student),
            Actor::Unrecognized(_) => Ok(DashboardResponse::unrecognized()),
        };

        match result {
            Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                dashboard,
                "Dashboard retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e, "Failed to build dashboard")),
        }
    }
}

async fn admin_dashboard(storage: &Arc<dyn Storage>) -> Result<AdminDashboard> {
    let students = storage.list_students(StudentFilter::default()).await?;
    let teachers = storage.list_teachers(None).await?;
    let classes = storage.list_classes(ClassScope::All).await?;
    let scores = storage.list_period_scores(None, None).await?;
    let attendance = storage.list_attendance(AttendanceQuery::default()).await?;

    Ok(AdminDashboard {
        total_students: students.len() as i64,
        total_teachers: teachers.len() as i64,
        total_classes: classes.len() as i64,
        active_classes: classes
            .iter()
            .filter(|c| c.status == ClassStatus::Active)
            .count() as i64,
        approval_rate: stats::approval_rate(&scores),
        attendance_rate: AttendanceSummary::from_records(&attendance).attendance_rate,
    })
}

async fn teacher_dashboard(
    storage: &Arc<dyn Storage>,
    teacher: &Teacher,
) -> Result<TeacherDashboard> {
    let classes = storage.list_classes(ClassScope::TaughtBy(teacher.id)).await?;
    let class_ids: HashSet<i64> = classes.iter().map(|c| c.id).collect();

    let mut students = storage.list_students(StudentFilter::default()).await?;
    students.retain(|s| s.class_id.is_some_and(|id| class_ids.contains(&id)));

    let assignments = storage
        .list_assignments(AssignmentQuery {
            teacher_id: Some(teacher.id),
            ..Default::default()
        })
        .await?;

    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let scores = storage
        .list_period_scores_for_assignments(&assignment_ids)
        .await?;

    let (grades_recorded, grades_pending) = stats::grade_progress(&assignments, &students, &scores);

    Ok(TeacherDashboard {
        classes: classes.len() as i64,
        students: students.len() as i64,
        grades_recorded,
        grades_pending,
    })
}

async fn student_dashboard(
    storage: &Arc<dyn Storage>,
    student: &Student,
) -> Result<StudentDashboard> {
    let entries = student_grade_entries(storage, student).await?;
    let attendance = storage
        .list_attendance(AttendanceQuery {
            student_id: Some(student.id),
            ..Default::default()
        })
        .await?;

    Ok(StudentDashboard {
        general_average: grade_calc::general_average(entries.iter().map(|e| e.average())),
        attendance_rate: AttendanceSummary::from_records(&attendance).attendance_rate,
        approved_subjects: count_status(&entries, GradeStatus::Approved),
        remedial_subjects: count_status(&entries, GradeStatus::Remedial),
    })
}
