use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use super::entries::entries_from;
use super::record::load_assignment_for;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{
        requests::GradeSheetQuery,
        responses::{GradeSheetResponse, GradeSheetRow},
    },
    students::requests::StudentFilter,
};
use crate::services::{bad_request, error_response, resolve_actor};
use crate::utils::grade_calc;

pub async fn grade_sheet(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeSheetQuery,
) -> ActixResult<HttpResponse> {
    if let Err(e) = grade_calc::validate_bimester(query.bimester) {
        return Ok(bad_request(ErrorCode::GradeBimesterInvalid, e.message()));
    }

    let storage = service.get_storage(request);
    let actor = match resolve_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    let assignment = match load_assignment_for(&storage, &actor, query.assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return Ok(resp),
    };

    let students = match storage
        .list_students(StudentFilter {
            class_id: Some(assignment.class_id),
            status: None,
        })
        .await
    {
        Ok(students) => students,
        Err(e) => return Ok(error_response(&e, "Failed to load class roster")),
    };

    let scores = match storage.list_period_scores(Some(assignment.id), None).await {
        Ok(scores) => scores,
        Err(e) => return Ok(error_response(&e, "Failed to load grades")),
    };

    let rows = students
        .into_iter()
        .filter_map(|student| {
            let entry =
                entries_from(std::slice::from_ref(&assignment), student.id, &scores).pop()?;
            let score = entry.period(query.bimester);
            Some(GradeSheetRow {
                student_id: student.id,
                student_name: student.name,
                registration_number: student.registration_number,
                score,
                period_status: grade_calc::status_of(score),
                entry,
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradeSheetResponse {
            assignment,
            bimester: query.bimester,
            rows,
        },
        "Grade sheet retrieved successfully",
    )))
}
