use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReviewService;
use crate::middlewares::RequireJWT;
use crate::models::reviews::entities::ReviewStatus;
use crate::models::{ApiResponse, ErrorCode};

pub async fn submit_review(
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

    // 只有本人可以提交
    if review.user_id != caller.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "您无权提交此绩效评估",
        )));
    }

    // 只有草稿可以提交（被驳回的评估需先编辑回到草稿）
    if review.status != ReviewStatus::Draft {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::InvalidReviewState,
            "只有草稿状态的绩效评估才能提交",
        )));
    }

    match storage
        .update_status_and_append_approval(
            review_id,
            ReviewStatus::PendingApproval,
            caller.id,
            Some("提交审批".to_string()),
        )
        .await
    {
        Ok(()) => {
            tracing::info!("User {} submitted review {}", caller.id, review_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("提交成功，等待审批")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StoreFailure,
                format!("提交评估失败: {e}"),
            )),
        ),
    }
}
