use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReviewService, rules};
use crate::middlewares::RequireJWT;
use crate::models::reviews::requests::CreateReviewRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_period;

pub async fn create_review(
    service: &ReviewService,
    request: &HttpRequest,
    req: CreateReviewRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(caller) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        )));
    };

    // 周期格式校验
    if validate_period(&req.period).is_err() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::PeriodFormatInvalid,
            "考核周期格式必须为 YYYY-MM",
        )));
    }

    // 绩效项校验
    if let Err(e) = rules::validate_items(&req.items) {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            e.message(),
        )));
    }

    // 同一员工同一周期至多一份评估
    match storage
        .get_review_by_user_and_period(caller.id, &req.period)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ReviewAlreadyExists,
                "该周期的绩效评估已存在",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评估失败: {e}"),
                )),
            );
        }
    }

    match storage
        .create_review(caller.id, &req.period, &req.items)
        .await
    {
        Ok(review) => {
            tracing::info!(
                "User {} created review for period {}",
                caller.id,
                review.period
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(review, "创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StoreFailure,
                format!("创建评估失败: {e}"),
            )),
        ),
    }
}
