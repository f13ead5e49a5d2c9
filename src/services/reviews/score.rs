use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReviewService, rules};
use crate::errors::CepmError;
use crate::middlewares::RequireJWT;
use crate::models::reviews::entities::ReviewStatus;
use crate::models::reviews::requests::ScoreReviewRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn score_review(
    service: &ReviewService,
    request: &HttpRequest,
    review_id: i64,
    req: ScoreReviewRequest,
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

    if review.status != ReviewStatus::PendingScore {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::InvalidReviewState,
            "只有待打分状态的绩效评估才能打分",
        )));
    }

    // 本人自评或直属上级评分
    let is_direct_manager = matches!(
        review.user.as_ref().and_then(|owner| owner.manager_id),
        Some(manager_id) if manager_id == caller.id
    );
    if review.user_id != caller.id && !is_direct_manager {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "您无权给此绩效评估打分",
        )));
    }

    // 任一项校验失败则整个操作不落任何写入
    let total_score = match rules::aggregate_total_score(&review.items, &req.items) {
        Ok(total) => total,
        Err(CepmError::NotFound(msg)) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ReviewItemNotFound,
                msg,
            )));
        }
        Err(e) => {
            return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::ScoreOutOfRange,
                e.message(),
            )));
        }
    };

    let grade_point = rules::calculate_grade_point(total_score);

    match storage
        .apply_review_scores(
            review_id,
            &req.items,
            total_score,
            grade_point,
            req.final_comment,
            ReviewStatus::Completed,
        )
        .await
    {
        Ok(review) => {
            tracing::info!(
                "User {} scored review {} (total {:.2}, grade point {:.3})",
                caller.id,
                review_id,
                total_score,
                grade_point
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(review, "打分完成")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StoreFailure,
                format!("保存评分失败: {e}"),
            )),
        ),
    }
}
