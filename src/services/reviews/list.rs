use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReviewService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_period;

pub async fn list_my_reviews(
    service: &ReviewService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(caller_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        )));
    };

    match storage.list_reviews_by_user(caller_id).await {
        Ok(reviews) => Ok(HttpResponse::Ok().json(ApiResponse::success(reviews, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评估列表失败: {e}"),
            )),
        ),
    }
}

pub async fn get_my_review_by_period(
    service: &ReviewService,
    request: &HttpRequest,
    period: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(caller_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        )));
    };

    if validate_period(&period).is_err() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::PeriodFormatInvalid,
            "考核周期格式必须为 YYYY-MM",
        )));
    }

    match storage
        .get_review_by_user_and_period(caller_id, &period)
        .await
    {
        Ok(Some(review)) => Ok(HttpResponse::Ok().json(ApiResponse::success(review, "查询成功"))),
        // 该周期还没有评估是正常状态，返回 200 + null 而不是 404
        Ok(None) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("该周期暂无评估"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评估失败: {e}"),
            )),
        ),
    }
}

pub async fn list_team_reviews(
    service: &ReviewService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(caller_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        )));
    };

    match storage.list_reviews_by_manager(caller_id).await {
        Ok(reviews) => Ok(HttpResponse::Ok().json(ApiResponse::success(reviews, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评估列表失败: {e}"),
            )),
        ),
    }
}

pub async fn list_all_submitted_reviews(
    service: &ReviewService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(role) = RequireJWT::extract_user_role(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        )));
    };

    if !role.is_hr() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "您没有权限查看所有已提交的绩效评估",
        )));
    }

    match storage.list_all_submitted_reviews().await {
        Ok(reviews) => Ok(HttpResponse::Ok().json(ApiResponse::success(reviews, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评估列表失败: {e}"),
            )),
        ),
    }
}

pub async fn list_all_reviews_by_period(
    service: &ReviewService,
    request: &HttpRequest,
    period: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(role) = RequireJWT::extract_user_role(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        )));
    };

    if !role.is_hr() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "您没有权限按周期查看全部绩效评估",
        )));
    }

    if validate_period(&period).is_err() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::PeriodFormatInvalid,
            "考核周期格式必须为 YYYY-MM",
        )));
    }

    match storage.list_reviews_by_period(&period).await {
        Ok(reviews) => Ok(HttpResponse::Ok().json(ApiResponse::success(reviews, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评估列表失败: {e}"),
            )),
        ),
    }
}
