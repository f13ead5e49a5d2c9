use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReviewService, rules};
use crate::middlewares::RequireJWT;
use crate::models::reviews::entities::ReviewStatus;
use crate::models::reviews::requests::ApprovalActionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn reject_review(
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

    if !rules::can_reject(review.status) {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::InvalidReviewState,
            "当前状态的绩效评估不能被驳回",
        )));
    }

    // 直属上级或人事才能驳回
    let is_direct_manager = matches!(
        review.user.as_ref().and_then(|owner| owner.manager_id),
        Some(manager_id) if manager_id == caller.id
    );
    if !is_direct_manager && !caller.role.is_hr() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "您无权驳回此绩效评估",
        )));
    }

    match storage
        .update_status_and_append_approval(review_id, ReviewStatus::Rejected, caller.id, req.comment)
        .await
    {
        Ok(()) => {
            tracing::info!("User {} rejected review {}", caller.id, review_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("已驳回")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StoreFailure,
                format!("驳回评估失败: {e}"),
            )),
        ),
    }
}
