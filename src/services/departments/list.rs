use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_departments(
    service: &DepartmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_departments().await {
        Ok(departments) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(departments, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询部门列表失败: {e}"),
            )),
        ),
    }
}
