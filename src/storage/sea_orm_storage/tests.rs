use super::SeaOrmStorage;
use crate::config::DatabaseConfig;
use crate::errors::SchoolHubError;
use crate::models::{
    attendance::AttendanceQuery,
    classes::{
        entities::Shift,
        requests::{ClassScope, CreateClassRequest},
    },
    enrollments::{EnrollmentQuery, EnrollmentStatus},
    students::requests::{CreateStudentRequest, StudentFilter},
    subjects::CreateSubjectRequest,
    teachers::requests::CreateTeacherRequest,
};

async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::with_database_config(&config)
        .await
        .expect("memory database")
}

fn student(name: &str, email: &str, registration: &str, class_id: Option<i64>) -> CreateStudentRequest {
    CreateStudentRequest {
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        registration_number: registration.to_string(),
        birth_date: None,
        address: None,
        status: None,
        class_id,
        password: None,
    }
}

fn teacher(name: &str, email: &str) -> CreateTeacherRequest {
    CreateTeacherRequest {
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        specialization: Some("Mathematics".to_string()),
        status: None,
        password: None,
    }
}

fn class(name: &str, teacher_id: Option<i64>) -> CreateClassRequest {
    CreateClassRequest {
        name: name.to_string(),
        grade_level: "9th".to_string(),
        shift: Shift::Morning,
        year: Some(2025),
        capacity: Some(30),
        classroom: None,
        status: None,
        teacher_id,
    }
}

#[tokio::test]
async fn student_carries_current_class_name() {
    let storage = memory_storage().await;
    let class_a = storage.create_class_impl(class("9A", None)).await.unwrap();
    let created = storage
        .create_student_impl(student("Ana", "ana@school.test", "R-1", Some(class_a.id)), None)
        .await
        .unwrap();

    assert_eq!(created.class_id, Some(class_a.id));
    assert_eq!(created.class_name.as_deref(), Some("9A"));

    let class_a = storage.get_class_by_id_impl(class_a.id).await.unwrap().unwrap();
    assert_eq!(class_a.total_students, 1);
}

#[tokio::test]
async fn enrolling_elsewhere_transfers_previous_class() {
    let storage = memory_storage().await;
    let class_a = storage.create_class_impl(class("9A", None)).await.unwrap();
    let class_b = storage.create_class_impl(class("9B", None)).await.unwrap();
    let ana = storage
        .create_student_impl(student("Ana", "ana@school.test", "R-1", Some(class_a.id)), None)
        .await
        .unwrap();

    storage.create_enrollment_impl(ana.id, class_b.id).await.unwrap();

    let ana = storage.get_student_by_id_impl(ana.id).await.unwrap().unwrap();
    assert_eq!(ana.class_name.as_deref(), Some("9B"));

    let history = storage
        .list_enrollments_impl(EnrollmentQuery {
            student_id: Some(ana.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    let old = history.iter().find(|e| e.class_id == class_a.id).unwrap();
    assert_eq!(old.status, EnrollmentStatus::Transferred);

    let in_a = storage
        .list_students_impl(StudentFilter {
            class_id: Some(class_a.id),
            status: None,
        })
        .await
        .unwrap();
    assert!(in_a.is_empty());
}

#[tokio::test]
async fn attendance_upsert_keeps_one_record_per_day() {
    let storage = memory_storage().await;
    let class_a = storage.create_class_impl(class("9A", None)).await.unwrap();
    let ana = storage
        .create_student_impl(student("Ana", "ana@school.test", "R-1", Some(class_a.id)), None)
        .await
        .unwrap();

    storage
        .upsert_attendance_impl(ana.id, class_a.id, "2025-03-10", true)
        .await
        .unwrap();
    let second = storage
        .upsert_attendance_impl(ana.id, class_a.id, "2025-03-10", false)
        .await
        .unwrap();
    assert!(!second.present);

    let records = storage
        .list_attendance_impl(AttendanceQuery {
            class_id: Some(class_a.id),
            student_id: None,
            date: Some("2025-03-10".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert!(!records[0].present);
}

#[tokio::test]
async fn roll_call_batch_overwrites_and_keeps_one_row_per_student() {
    let storage = memory_storage().await;
    let class_a = storage.create_class_impl(class("9A", None)).await.unwrap();
    let ana = storage
        .create_student_impl(student("Ana", "ana@school.test", "R-1", Some(class_a.id)), None)
        .await
        .unwrap();
    let bia = storage
        .create_student_impl(student("Bia", "bia@school.test", "R-2", Some(class_a.id)), None)
        .await
        .unwrap();

    storage
        .upsert_attendance_batch_impl(class_a.id, "2025-03-10", &[(ana.id, true), (bia.id, true)])
        .await
        .unwrap();
    let records = storage
        .upsert_attendance_batch_impl(class_a.id, "2025-03-10", &[(ana.id, true), (bia.id, false)])
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().any(|r| r.student_id == bia.id && !r.present));

    let stored = storage
        .list_attendance_impl(AttendanceQuery {
            class_id: Some(class_a.id),
            student_id: None,
            date: Some("2025-03-10".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn roll_call_batch_rolls_back_when_an_entry_fails() {
    let storage = memory_storage().await;
    let class_a = storage.create_class_impl(class("9A", None)).await.unwrap();
    let ana = storage
        .create_student_impl(student("Ana", "ana@school.test", "R-1", Some(class_a.id)), None)
        .await
        .unwrap();

    // 第二条引用不存在的学生，外键失败
    let err = storage
        .upsert_attendance_batch_impl(class_a.id, "2025-03-11", &[(ana.id, true), (9_999, false)])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SchoolHubError::Validation(_) | SchoolHubError::DatabaseOperation(_)
    ));

    let stored = storage
        .list_attendance_impl(AttendanceQuery {
            class_id: Some(class_a.id),
            student_id: None,
            date: Some("2025-03-11".to_string()),
        })
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn grade_upsert_overwrites_period_score() {
    let storage = memory_storage().await;
    let maria = storage
        .create_teacher_impl(teacher("Maria", "maria@school.test"), None)
        .await
        .unwrap();
    let class_a = storage.create_class_impl(class("9A", Some(maria.id))).await.unwrap();
    let math = storage
        .create_subject_impl(CreateSubjectRequest {
            code: "MAT".to_string(),
            name: "Mathematics".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let assignment = storage
        .create_assignment_impl(class_a.id, math.id, maria.id, 2025)
        .await
        .unwrap();
    assert_eq!(assignment.subject_name, "Mathematics");
    assert_eq!(assignment.teacher_name, "Maria");

    let ana = storage
        .create_student_impl(student("Ana", "ana@school.test", "R-1", Some(class_a.id)), None)
        .await
        .unwrap();

    storage
        .upsert_grade_impl(assignment.id, ana.id, 1, Some(6.0))
        .await
        .unwrap();
    storage
        .upsert_grade_impl(assignment.id, ana.id, 1, Some(8.5))
        .await
        .unwrap();
    storage
        .upsert_grade_impl(assignment.id, ana.id, 2, Some(7.0))
        .await
        .unwrap();

    let scores = storage
        .list_period_scores_impl(Some(assignment.id), Some(ana.id))
        .await
        .unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].bimester, 1);
    assert_eq!(scores[0].score, Some(8.5));
}

#[tokio::test]
async fn period_scores_load_for_several_assignments_at_once() {
    let storage = memory_storage().await;
    let maria = storage
        .create_teacher_impl(teacher("Maria", "maria@school.test"), None)
        .await
        .unwrap();
    let class_a = storage.create_class_impl(class("9A", Some(maria.id))).await.unwrap();
    let mut assignment_ids = Vec::new();
    for code in ["MAT", "HIS", "GEO"] {
        let subject = storage
            .create_subject_impl(CreateSubjectRequest {
                code: code.to_string(),
                name: code.to_string(),
                description: None,
            })
            .await
            .unwrap();
        let assignment = storage
            .create_assignment_impl(class_a.id, subject.id, maria.id, 2025)
            .await
            .unwrap();
        assignment_ids.push(assignment.id);
    }
    let ana = storage
        .create_student_impl(student("Ana", "ana@school.test", "R-1", Some(class_a.id)), None)
        .await
        .unwrap();
    for &assignment_id in &assignment_ids {
        storage
            .upsert_grade_impl(assignment_id, ana.id, 1, Some(7.5))
            .await
            .unwrap();
    }

    let scores = storage
        .list_period_scores_for_assignments_impl(&assignment_ids[..2])
        .await
        .unwrap();
    let loaded: Vec<i64> = scores.iter().map(|s| s.assignment_id).collect();
    assert_eq!(loaded, assignment_ids[..2].to_vec());

    assert!(
        storage
            .list_period_scores_for_assignments_impl(&[])
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let storage = memory_storage().await;
    storage
        .create_teacher_impl(teacher("Maria", "maria@school.test"), None)
        .await
        .unwrap();
    let err = storage
        .create_teacher_impl(teacher("Other", "maria@school.test"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolHubError::Conflict(_)));
}

#[tokio::test]
async fn teacher_scope_includes_homeroom_and_assigned_classes() {
    let storage = memory_storage().await;
    let maria = storage
        .create_teacher_impl(teacher("Maria", "maria@school.test"), None)
        .await
        .unwrap();
    let joao = storage
        .create_teacher_impl(teacher("Joao", "joao@school.test"), None)
        .await
        .unwrap();
    let homeroom = storage.create_class_impl(class("9A", Some(maria.id))).await.unwrap();
    let assigned = storage.create_class_impl(class("9B", Some(joao.id))).await.unwrap();
    storage.create_class_impl(class("9C", None)).await.unwrap();
    let math = storage
        .create_subject_impl(CreateSubjectRequest {
            code: "MAT".to_string(),
            name: "Mathematics".to_string(),
            description: None,
        })
        .await
        .unwrap();
    storage
        .create_assignment_impl(assigned.id, math.id, maria.id, 2025)
        .await
        .unwrap();

    let classes = storage
        .list_classes_impl(ClassScope::TaughtBy(maria.id))
        .await
        .unwrap();
    let ids: Vec<i64> = classes.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![homeroom.id, assigned.id]);
    assert_eq!(classes[0].teacher_name.as_deref(), Some("Maria"));
}
