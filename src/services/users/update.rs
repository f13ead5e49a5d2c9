use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 设为直属上级的员工必须存在
    if let Some(manager_id) = update_data.manager_id {
        match storage.get_user_by_id(manager_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                    ErrorCode::ValidationFailed,
                    format!("直属上级不存在: {manager_id}"),
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("校验直属上级失败: {e}"),
                    )),
                );
            }
        }
    }

    // 分配的部门必须存在
    if let Some(department_id) = update_data.department_id {
        match storage.get_department_by_id(department_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::DepartmentNotFound,
                    format!("部门不存在: {department_id}"),
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("校验部门失败: {e}"),
                    )),
                );
            }
        }
    }

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            tracing::info!("Updated user {}", user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "员工信息更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "员工不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StoreFailure,
                format!("更新员工信息失败: {e}"),
            )),
        ),
    }
}
