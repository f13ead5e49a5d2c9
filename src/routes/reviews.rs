use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::reviews::requests::{
    ApprovalActionRequest, CreateReviewRequest, PeriodQuery, ScoreReviewRequest,
    UpdateReviewRequest,
};
use crate::services::ReviewService;

// 懒加载的全局 ReviewService 实例
static REVIEW_SERVICE: Lazy<ReviewService> = Lazy::new(ReviewService::new_lazy);

// 创建评估（草稿）
pub async fn create_review(
    req: HttpRequest,
    body: web::Json<CreateReviewRequest>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.create_review(&req, body.into_inner()).await
}

// 我的评估列表
pub async fn list_my_reviews(req: HttpRequest) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.list_my_reviews(&req).await
}

// 我的某周期评估
pub async fn get_my_review_by_period(
    req: HttpRequest,
    query: web::Query<PeriodQuery>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .get_my_review_by_period(&req, query.into_inner().period)
        .await
}

// 全部已提交评估（人事）
pub async fn list_all_submitted_reviews(req: HttpRequest) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.list_all_submitted_reviews(&req).await
}

// 某周期的全部评估（人事）
pub async fn list_all_reviews_by_period(
    req: HttpRequest,
    query: web::Query<PeriodQuery>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .list_all_reviews_by_period(&req, query.into_inner().period)
        .await
}

// 评估详情
pub async fn get_review(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.get_review(&req, path.into_inner()).await
}

// 编辑评估
pub async fn update_review(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateReviewRequest>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .update_review(&req, path.into_inner(), body.into_inner())
        .await
}

// 提交评估进入审批流
pub async fn submit_review(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.submit_review(&req, path.into_inner()).await
}

// 审批通过
pub async fn approve_review(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ApprovalActionRequest>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .approve_review(&req, path.into_inner(), body.into_inner())
        .await
}

// 驳回
pub async fn reject_review(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ApprovalActionRequest>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .reject_review(&req, path.into_inner(), body.into_inner())
        .await
}

// 打分
pub async fn score_review(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ScoreReviewRequest>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .score_review(&req, path.into_inner(), body.into_inner())
        .await
}

// 直属下级的已提交评估
pub async fn list_team_reviews(req: HttpRequest) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.list_team_reviews(&req).await
}

// 配置路由
pub fn configure_review_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reviews")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_review))
            .route("", web::get().to(list_my_reviews))
            .route("/by-period", web::get().to(get_my_review_by_period))
            .route("/all-submitted", web::get().to(list_all_submitted_reviews))
            .route("/all-by-period", web::get().to(list_all_reviews_by_period))
            .route("/{id}", web::get().to(get_review))
            .route("/{id}", web::put().to(update_review))
            .route("/{id}/submit", web::post().to(submit_review))
            .route("/{id}/approve", web::post().to(approve_review))
            .route("/{id}/reject", web::post().to(reject_review))
            .route("/{id}/score", web::post().to(score_review)),
    );

    // 团队视角的评估路由
    cfg.service(
        web::scope("/api/v1/team")
            .wrap(middlewares::RequireJWT)
            .route("/reviews", web::get().to(list_team_reviews)),
    );
}
