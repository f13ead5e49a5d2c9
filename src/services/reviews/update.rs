use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReviewService, rules};
use crate::middlewares::RequireJWT;
use crate::models::reviews::requests::UpdateReviewRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_period;

pub async fn update_review(
    service: &ReviewService,
    request: &HttpRequest,
    review_id: i64,
    req: UpdateReviewRequest,
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

    // 只有本人可以编辑自己的评估（管理员除外）
    if review.user_id != caller.id && !caller.role.is_admin() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "只能编辑本人的绩效评估",
        )));
    }

    // 只有草稿或已驳回状态可以编辑
    if !review.status.is_editable() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::InvalidReviewState,
            "只有草稿或已驳回状态的绩效评估才能被修改",
        )));
    }

    if let Some(ref period) = req.period
        && validate_period(period).is_err()
    {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::PeriodFormatInvalid,
            "考核周期格式必须为 YYYY-MM",
        )));
    }

    if let Err(e) = rules::validate_items(&req.items) {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            e.message(),
        )));
    }

    // 变更周期后仍需满足同一员工同一周期至多一份评估
    if let Some(ref period) = req.period
        && *period != review.period
    {
        match storage
            .get_review_by_user_and_period(review.user_id, period)
            .await
        {
            Ok(Some(existing)) if existing.id != review_id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::ReviewAlreadyExists,
                    "该周期的绩效评估已存在",
                )));
            }
            Ok(_) => {}
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询评估失败: {e}"),
                    )),
                );
            }
        }
    }

    match storage
        .replace_review_items(review_id, req.period, &req.items)
        .await
    {
        Ok(review) => {
            tracing::info!("User {} updated review {}", caller.id, review_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(review, "更新成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StoreFailure,
                format!("更新评估失败: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reviews::entities::ItemCategory;
    use crate::models::reviews::requests::ReviewItemInput;
    use crate::models::users::{entities::UserRole, requests::WechatUserProfile};
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use actix_web::{HttpMessage, http::StatusCode, test, web};
    use migration::{Migrator, MigratorTrait};
    use std::sync::Arc;

    async fn memory_storage() -> SeaOrmStorage {
        let mut opt = sea_orm::ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = sea_orm::Database::connect(opt)
            .await
            .expect("内存数据库连接失败");
        Migrator::up(&db, None).await.expect("迁移执行失败");
        SeaOrmStorage { db }
    }

    fn plan_items() -> Vec<ReviewItemInput> {
        vec![ReviewItemInput {
            category: ItemCategory::WorkPerformance,
            title: "季度交付".to_string(),
            description: "完成季度迭代目标".to_string(),
            weight: 80.0,
            target: "按期上线".to_string(),
        }]
    }

    #[tokio::test]
    async fn test_update_to_occupied_period_conflicts() {
        let storage = memory_storage().await;

        let profile = WechatUserProfile {
            wechat_userid: "zhaoliu".to_string(),
            name: "赵六".to_string(),
            email: None,
            avatar_url: None,
        };
        let owner = storage
            .create_user_impl(profile, UserRole::Employee)
            .await
            .unwrap();

        storage
            .create_review_impl(owner.id, "2025-07", &plan_items())
            .await
            .unwrap();
        let target = storage
            .create_review_impl(owner.id, "2025-08", &plan_items())
            .await
            .unwrap();

        let storage: Arc<dyn Storage> = Arc::new(storage);
        let request = test::TestRequest::default()
            .app_data(web::Data::new(storage))
            .to_http_request();
        request.extensions_mut().insert(owner);

        let service = ReviewService::new_lazy();
        let response = update_review(
            &service,
            &request,
            target.id,
            UpdateReviewRequest {
                period: Some("2025-07".to_string()),
                items: plan_items(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_keeping_own_period_is_not_a_conflict() {
        let storage = memory_storage().await;

        let profile = WechatUserProfile {
            wechat_userid: "sunqi".to_string(),
            name: "孙七".to_string(),
            email: None,
            avatar_url: None,
        };
        let owner = storage
            .create_user_impl(profile, UserRole::Employee)
            .await
            .unwrap();

        let target = storage
            .create_review_impl(owner.id, "2025-08", &plan_items())
            .await
            .unwrap();

        let storage: Arc<dyn Storage> = Arc::new(storage);
        let request = test::TestRequest::default()
            .app_data(web::Data::new(storage))
            .to_http_request();
        request.extensions_mut().insert(owner);

        let service = ReviewService::new_lazy();
        let response = update_review(
            &service,
            &request,
            target.id,
            UpdateReviewRequest {
                period: Some("2025-08".to_string()),
                items: plan_items(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
