pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod enrollments;
pub mod grades;
pub mod navigation;
pub mod observations;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use assignments::configure_assignment_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use enrollments::configure_enrollment_routes;
pub use grades::configure_grade_routes;
pub use navigation::configure_navigation_routes;
pub use observations::configure_observation_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use teachers::configure_teacher_routes;
