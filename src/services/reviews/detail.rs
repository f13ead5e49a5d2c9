use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReviewService, can_access_review};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_review(
    service: &ReviewService,
    request: &HttpRequest,
    review_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(caller) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        )));
    };

    let review = match storage.get_review_by_id(review_id).await {
        Ok(Some(review)) => review,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ReviewNotFound,
                "绩效评估不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评估失败: {e}"),
                )),
            );
        }
    };

    if !can_access_review(&review, &caller) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "只能查看本人或直属下级的绩效评估",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(review, "查询成功")))
}
