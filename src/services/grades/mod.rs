pub mod entries;
pub mod me;
pub mod record;
pub mod report_card;
pub mod sheet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::grades::requests::{GradeSheetQuery, RecordGradeRequest};

super::lazy_service!(GradeService);

impl GradeService {
    // 录入或清除某学期成绩
    pub async fn record_grade(
        &self,
        request: &HttpRequest,
        body: RecordGradeRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_grade(self, request, body).await
    }

    // 教师成绩表
    pub async fn grade_sheet(
        &self,
        request: &HttpRequest,
        query: GradeSheetQuery,
    ) -> ActixResult<HttpResponse> {
        sheet::grade_sheet(self, request, query).await
    }

    // 学生本人成绩
    pub async fn my_grades(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::my_grades(self, request).await
    }

    pub async fn my_report_card(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        report_card::my_report_card(self, request).await
    }

    pub async fn report_card(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        report_card::report_card(self, request, student_id).await
    }
}
