use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReviewService, rules};
use crate::middlewares::RequireJWT;
use crate::models::reviews::entities::ReviewStatus;
use crate::models::reviews::requests::ApprovalActionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn approve_review(
    service: &ReviewService,
    request: &HttpRequest,
    review_id: i64,
    req: ApprovalActionRequest,
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

    let Some(next_status) = rules::next_status_on_approve(review.status) else {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::InvalidReviewState,
            "当前状态的绩效评估不能被批准",
        )));
    };

    // 待人事确认的评估由人事审批归档，其余环节由直属上级审批
    let authorized = if review.status == ReviewStatus::PendingHrConfirmation {
        caller.role.is_hr()
    } else {
        matches!(
            review.user.as_ref().and_then(|owner| owner.manager_id),
            Some(manager_id) if manager_id == caller.id
        )
    };

    if !authorized {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "您无权审批此绩效评估",
        )));
    }

    match storage
        .update_status_and_append_approval(review_id, next_status, caller.id, req.comment)
        .await
    {
        Ok(()) => {
            tracing::info!(
                "User {} approved review {} -> {}",
                caller.id,
                review_id,
                next_status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("审批通过")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StoreFailure,
                format!("审批评估失败: {e}"),
            )),
        ),
    }
}
