use std::sync::Arc;

use crate::models::{
    departments::{entities::Department, requests::CreateDepartmentRequest},
    reviews::{
        entities::{PerformanceReview, ReviewStatus},
        requests::{ReviewItemInput, ScoreItemInput},
    },
    system::entities::SystemSetting,
    users::{
        entities::{User, UserRole},
        requests::{UpdateUserRequest, WechatUserProfile},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 员工管理方法
    // 创建员工（指定角色，用于初始管理员播种）
    async fn create_user(&self, profile: WechatUserProfile, role: UserRole) -> Result<User>;
    // 通过ID获取员工信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过企业微信 userid 获取员工信息
    async fn get_user_by_wechat_userid(&self, wechat_userid: &str) -> Result<Option<User>>;
    // 列出全部员工
    async fn list_users(&self) -> Result<Vec<User>>;
    // 更新员工信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 员工总数（用于判断是否需要播种管理员）
    async fn count_users(&self) -> Result<u64>;

    /// 绩效评估方法
    // 创建评估（连同绩效项，事务内完成）
    async fn create_review(
        &self,
        user_id: i64,
        period: &str,
        items: &[ReviewItemInput],
    ) -> Result<PerformanceReview>;
    // 获取评估详情（含归属人、绩效项与审批记录）
    async fn get_review_by_id(&self, id: i64) -> Result<Option<PerformanceReview>>;
    // 获取某员工某周期的评估
    async fn get_review_by_user_and_period(
        &self,
        user_id: i64,
        period: &str,
    ) -> Result<Option<PerformanceReview>>;
    // 某员工的全部评估
    async fn list_reviews_by_user(&self, user_id: i64) -> Result<Vec<PerformanceReview>>;
    // 直属下级的已提交评估（不含草稿）
    async fn list_reviews_by_manager(&self, manager_id: i64) -> Result<Vec<PerformanceReview>>;
    // 全部已提交评估（不含草稿）
    async fn list_all_submitted_reviews(&self) -> Result<Vec<PerformanceReview>>;
    // 某周期的全部已提交评估（不含草稿）
    async fn list_reviews_by_period(&self, period: &str) -> Result<Vec<PerformanceReview>>;
    // 整体替换绩效项，回到草稿状态并清空已有评分（事务内完成）
    async fn replace_review_items(
        &self,
        id: i64,
        period: Option<String>,
        items: &[ReviewItemInput],
    ) -> Result<PerformanceReview>;
    // 仅变更状态（提交）
    async fn update_review_status(&self, id: i64, status: ReviewStatus) -> Result<()>;
    // 变更状态并追加审批记录（审批/驳回，事务内完成）
    async fn update_status_and_append_approval(
        &self,
        id: i64,
        status: ReviewStatus,
        approver_id: i64,
        comment: Option<String>,
    ) -> Result<()>;
    // 写入打分结果：逐项更新 + 总分/绩点/总评 + 状态（事务内完成）
    #[allow(clippy::too_many_arguments)]
    async fn apply_review_scores(
        &self,
        id: i64,
        items: &[ScoreItemInput],
        total_score: f64,
        grade_point: f64,
        final_comment: Option<String>,
        status: ReviewStatus,
    ) -> Result<PerformanceReview>;

    /// 部门管理方法
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    async fn list_departments(&self) -> Result<Vec<Department>>;

    /// 系统设置方法
    async fn get_setting(&self, key: &str) -> Result<Option<SystemSetting>>;
    async fn upsert_setting(
        &self,
        key: &str,
        value: &str,
        updated_by: Option<i64>,
    ) -> Result<SystemSetting>;
    async fn list_settings(&self) -> Result<Vec<SystemSetting>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
