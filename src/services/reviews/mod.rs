pub mod approve;
pub mod create;
pub mod detail;
pub mod list;
pub mod reject;
pub mod rules;
pub mod score;
pub mod submit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::reviews::entities::PerformanceReview;
use crate::models::reviews::requests::{
    ApprovalActionRequest, CreateReviewRequest, ScoreReviewRequest, UpdateReviewRequest,
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct ReviewService {
    storage: Option<Arc<dyn Storage>>,
}

/// 当前员工能否查看该评估：本人、直属上级或人事
pub(crate) fn can_access_review(review: &PerformanceReview, caller: &User) -> bool {
    if caller.role.is_hr() || review.user_id == caller.id {
        return true;
    }
    matches!(
        review.user.as_ref().and_then(|owner| owner.manager_id),
        Some(manager_id) if manager_id == caller.id
    )
}

impl ReviewService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 创建评估（草稿）
    pub async fn create_review(
        &self,
        request: &HttpRequest,
        req: CreateReviewRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_review(self, request, req).await
    }

    /// 获取评估详情
    pub async fn get_review(
        &self,
        request: &HttpRequest,
        review_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_review(self, request, review_id).await
    }

    /// 我的评估列表
    pub async fn list_my_reviews(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_reviews(self, request).await
    }

    /// 我的某周期评估（无则返回空结果）
    pub async fn get_my_review_by_period(
        &self,
        request: &HttpRequest,
        period: String,
    ) -> ActixResult<HttpResponse> {
        list::get_my_review_by_period(self, request, period).await
    }

    /// 直属下级的已提交评估
    pub async fn list_team_reviews(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_team_reviews(self, request).await
    }

    /// 全部已提交评估（人事）
    pub async fn list_all_submitted_reviews(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_all_submitted_reviews(self, request).await
    }

    /// 某周期的全部评估（人事）
    pub async fn list_all_reviews_by_period(
        &self,
        request: &HttpRequest,
        period: String,
    ) -> ActixResult<HttpResponse> {
        list::list_all_reviews_by_period(self, request, period).await
    }

    /// 编辑评估（整体替换绩效项）
    pub async fn update_review(
        &self,
        request: &HttpRequest,
        review_id: i64,
        req: UpdateReviewRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_review(self, request, review_id, req).await
    }

    /// 提交评估进入审批流
    pub async fn submit_review(
        &self,
        request: &HttpRequest,
        review_id: i64,
    ) -> ActixResult<HttpResponse> {
        submit::submit_review(self, request, review_id).await
    }

    /// 审批通过
    pub async fn approve_review(
        &self,
        request: &HttpRequest,
        review_id: i64,
        req: ApprovalActionRequest,
    ) -> ActixResult<HttpResponse> {
        approve::approve_review(self, request, review_id, req).await
    }

    /// 驳回
    pub async fn reject_review(
        &self,
        request: &HttpRequest,
        review_id: i64,
        req: ApprovalActionRequest,
    ) -> ActixResult<HttpResponse> {
        reject::reject_review(self, request, review_id, req).await
    }

    /// 打分
    pub async fn score_review(
        &self,
        request: &HttpRequest,
        review_id: i64,
        req: ScoreReviewRequest,
    ) -> ActixResult<HttpResponse> {
        score::score_review(self, request, review_id, req).await
    }
}
