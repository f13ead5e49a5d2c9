//! 绩效评估存储操作
//!
//! 涉及多表写入的操作（创建、整体替换、打分、审批流转）
//! 全部在事务内完成，任意一步失败则整体回滚。

use super::SeaOrmStorage;
use crate::entity::approval_histories;
use crate::entity::performance_items;
use crate::entity::performance_reviews::{
    ActiveModel, Column, Entity as PerformanceReviews, Model as ReviewModel,
};
use crate::entity::users::Entity as Users;
use crate::errors::{CepmError, Result};
use crate::models::reviews::{
    entities::{PerformanceReview, ReviewOwner, ReviewStatus},
    requests::{ReviewItemInput, ScoreItemInput},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 在给定连接上批量写入绩效项
async fn insert_items<C: ConnectionTrait>(
    conn: &C,
    review_id: i64,
    items: &[ReviewItemInput],
    now: i64,
) -> Result<()> {
    for item in items {
        let model = performance_items::ActiveModel {
            review_id: Set(review_id),
            category: Set(item.category.to_string()),
            title: Set(item.title.clone()),
            description: Set(item.description.clone()),
            weight: Set(item.weight),
            target: Set(item.target.clone()),
            completion_details: Set(None),
            score: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        model
            .insert(conn)
            .await
            .map_err(|e| CepmError::database_operation(format!("写入绩效项失败: {e}")))?;
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 组装完整评估：归属人摘要 + 绩效项 + 审批记录
    async fn load_review_aggregate(&self, model: ReviewModel) -> Result<PerformanceReview> {
        let owner = Users::find_by_id(model.user_id)
            .one(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询评估归属人失败: {e}")))?;

        let items = performance_items::Entity::find()
            .filter(performance_items::Column::ReviewId.eq(model.id))
            .order_by_asc(performance_items::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询绩效项失败: {e}")))?;

        let approvals = approval_histories::Entity::find()
            .filter(approval_histories::Column::ReviewId.eq(model.id))
            .order_by_asc(approval_histories::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询审批记录失败: {e}")))?;

        let mut review = model.into_review();
        review.user = owner.map(|u| ReviewOwner {
            id: u.id,
            name: u.name,
            english_name: u.english_name,
            department_id: u.department_id,
            manager_id: u.manager_id,
        });
        review.items = items.into_iter().map(|m| m.into_item()).collect();
        review.approvals = approvals.into_iter().map(|m| m.into_approval()).collect();

        Ok(review)
    }

    async fn load_review_aggregates(
        &self,
        models: Vec<ReviewModel>,
    ) -> Result<Vec<PerformanceReview>> {
        let mut reviews = Vec::with_capacity(models.len());
        for model in models {
            reviews.push(self.load_review_aggregate(model).await?);
        }
        Ok(reviews)
    }

    /// 创建评估（草稿状态，连同绩效项）
    pub async fn create_review_impl(
        &self,
        user_id: i64,
        period: &str,
        items: &[ReviewItemInput],
    ) -> Result<PerformanceReview> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CepmError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            user_id: Set(user_id),
            period: Set(period.to_string()),
            status: Set(ReviewStatus::Draft.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let review = model
            .insert(&txn)
            .await
            .map_err(|e| CepmError::database_operation(format!("创建评估失败: {e}")))?;

        insert_items(&txn, review.id, items, now).await?;

        txn.commit()
            .await
            .map_err(|e| CepmError::database_operation(format!("提交事务失败: {e}")))?;

        self.load_review_aggregate(review).await
    }

    /// 通过 ID 获取评估详情
    pub async fn get_review_by_id_impl(&self, id: i64) -> Result<Option<PerformanceReview>> {
        let result = PerformanceReviews::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询评估失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.load_review_aggregate(model).await?)),
            None => Ok(None),
        }
    }

    /// 获取某员工某周期的评估
    pub async fn get_review_by_user_and_period_impl(
        &self,
        user_id: i64,
        period: &str,
    ) -> Result<Option<PerformanceReview>> {
        let result = PerformanceReviews::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Period.eq(period))
            .one(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询评估失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.load_review_aggregate(model).await?)),
            None => Ok(None),
        }
    }

    /// 某员工的全部评估（按周期倒序）
    pub async fn list_reviews_by_user_impl(&self, user_id: i64) -> Result<Vec<PerformanceReview>> {
        let models = PerformanceReviews::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::Period)
            .all(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询评估列表失败: {e}")))?;

        self.load_review_aggregates(models).await
    }

    /// 直属下级的已提交评估（不含草稿）
    pub async fn list_reviews_by_manager_impl(
        &self,
        manager_id: i64,
    ) -> Result<Vec<PerformanceReview>> {
        use crate::entity::users::Column as UserColumn;

        let subordinate_ids: Vec<i64> = Users::find()
            .filter(UserColumn::ManagerId.eq(manager_id))
            .all(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询下级员工失败: {e}")))?
            .into_iter()
            .map(|u| u.id)
            .collect();

        if subordinate_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = PerformanceReviews::find()
            .filter(Column::UserId.is_in(subordinate_ids))
            .filter(Column::Status.ne(ReviewStatus::Draft.to_string()))
            .order_by_desc(Column::Period)
            .order_by_asc(Column::UserId)
            .all(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询评估列表失败: {e}")))?;

        self.load_review_aggregates(models).await
    }

    /// 全部已提交评估（不含草稿）
    pub async fn list_all_submitted_reviews_impl(&self) -> Result<Vec<PerformanceReview>> {
        let models = PerformanceReviews::find()
            .filter(Column::Status.ne(ReviewStatus::Draft.to_string()))
            .order_by_desc(Column::Period)
            .order_by_asc(Column::UserId)
            .all(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询评估列表失败: {e}")))?;

        self.load_review_aggregates(models).await
    }

    /// 某周期的全部已提交评估（不含草稿）
    pub async fn list_reviews_by_period_impl(
        &self,
        period: &str,
    ) -> Result<Vec<PerformanceReview>> {
        let models = PerformanceReviews::find()
            .filter(Column::Period.eq(period))
            .filter(Column::Status.ne(ReviewStatus::Draft.to_string()))
            .order_by_asc(Column::UserId)
            .all(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询评估列表失败: {e}")))?;

        self.load_review_aggregates(models).await
    }

    /// 整体替换绩效项，回到草稿状态并清空已有评分结果
    pub async fn replace_review_items_impl(
        &self,
        id: i64,
        period: Option<String>,
        items: &[ReviewItemInput],
    ) -> Result<PerformanceReview> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CepmError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = PerformanceReviews::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询评估失败: {e}")))?
            .ok_or_else(|| CepmError::not_found(format!("评估不存在: {id}")))?;

        let mut model = existing.into_active_model();
        if let Some(period) = period {
            model.period = Set(period);
        }
        // 编辑后回到草稿状态，被驳回的评估由此重新进入提交流程
        model.status = Set(ReviewStatus::Draft.to_string());
        model.total_score = Set(None);
        model.grade_point = Set(None);
        model.final_comment = Set(None);
        model.updated_at = Set(now);

        let review = model
            .update(&txn)
            .await
            .map_err(|e| CepmError::database_operation(format!("更新评估失败: {e}")))?;

        performance_items::Entity::delete_many()
            .filter(performance_items::Column::ReviewId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| CepmError::database_operation(format!("删除旧绩效项失败: {e}")))?;

        insert_items(&txn, id, items, now).await?;

        txn.commit()
            .await
            .map_err(|e| CepmError::database_operation(format!("提交事务失败: {e}")))?;

        self.load_review_aggregate(review).await
    }

    /// 仅变更评估状态
    pub async fn update_review_status_impl(&self, id: i64, status: ReviewStatus) -> Result<()> {
        let existing = PerformanceReviews::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询评估失败: {e}")))?
            .ok_or_else(|| CepmError::not_found(format!("评估不存在: {id}")))?;

        let mut model = existing.into_active_model();
        model.status = Set(status.to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("更新评估状态失败: {e}")))?;

        Ok(())
    }

    /// 变更状态并追加审批记录
    pub async fn update_status_and_append_approval_impl(
        &self,
        id: i64,
        status: ReviewStatus,
        approver_id: i64,
        comment: Option<String>,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CepmError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = PerformanceReviews::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询评估失败: {e}")))?
            .ok_or_else(|| CepmError::not_found(format!("评估不存在: {id}")))?;

        let mut model = existing.into_active_model();
        model.status = Set(status.to_string());
        model.updated_at = Set(now);
        model
            .update(&txn)
            .await
            .map_err(|e| CepmError::database_operation(format!("更新评估状态失败: {e}")))?;

        let approval = approval_histories::ActiveModel {
            review_id: Set(id),
            approver_id: Set(approver_id),
            status: Set(status.to_string()),
            comment: Set(comment),
            created_at: Set(now),
            ..Default::default()
        };
        approval
            .insert(&txn)
            .await
            .map_err(|e| CepmError::database_operation(format!("写入审批记录失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CepmError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 写入打分结果
    ///
    /// items 中任何一项不属于该评估时整体回滚，不产生部分写入。
    pub async fn apply_review_scores_impl(
        &self,
        id: i64,
        items: &[ScoreItemInput],
        total_score: f64,
        grade_point: f64,
        final_comment: Option<String>,
        status: ReviewStatus,
    ) -> Result<PerformanceReview> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CepmError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = PerformanceReviews::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询评估失败: {e}")))?
            .ok_or_else(|| CepmError::not_found(format!("评估不存在: {id}")))?;

        for input in items {
            let item = performance_items::Entity::find_by_id(input.id)
                .filter(performance_items::Column::ReviewId.eq(id))
                .one(&txn)
                .await
                .map_err(|e| CepmError::database_operation(format!("查询绩效项失败: {e}")))?
                .ok_or_else(|| {
                    CepmError::not_found(format!("绩效项 {} 不属于评估 {id}", input.id))
                })?;

            let mut model = item.into_active_model();
            if let Some(ref details) = input.completion_details {
                model.completion_details = Set(Some(details.clone()));
            }
            if let Some(score) = input.score {
                model.score = Set(Some(score));
            }
            model.updated_at = Set(now);
            model
                .update(&txn)
                .await
                .map_err(|e| CepmError::database_operation(format!("更新绩效项失败: {e}")))?;
        }

        let mut model = existing.into_active_model();
        model.total_score = Set(Some(total_score));
        model.grade_point = Set(Some(grade_point));
        if let Some(comment) = final_comment {
            model.final_comment = Set(Some(comment));
        }
        model.status = Set(status.to_string());
        model.updated_at = Set(now);

        let review = model
            .update(&txn)
            .await
            .map_err(|e| CepmError::database_operation(format!("更新评估失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CepmError::database_operation(format!("提交事务失败: {e}")))?;

        self.load_review_aggregate(review).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reviews::entities::ItemCategory;
    use crate::models::users::{entities::UserRole, requests::WechatUserProfile};
    use migration::{Migrator, MigratorTrait};

    // 内存库限制单连接，保证所有操作落在同一个 SQLite 实例上
    async fn memory_storage() -> SeaOrmStorage {
        let mut opt = sea_orm::ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = sea_orm::Database::connect(opt)
            .await
            .expect("内存数据库连接失败");
        Migrator::up(&db, None).await.expect("迁移执行失败");
        SeaOrmStorage { db }
    }

    async fn seed_user(storage: &SeaOrmStorage, wechat_userid: &str) -> i64 {
        let profile = WechatUserProfile {
            wechat_userid: wechat_userid.to_string(),
            name: wechat_userid.to_string(),
            email: None,
            avatar_url: None,
        };
        storage
            .create_user_impl(profile, UserRole::Employee)
            .await
            .expect("创建员工失败")
            .id
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
    async fn test_list_by_period_excludes_draft() {
        let storage = memory_storage().await;
        let drafter = seed_user(&storage, "zhangsan").await;
        let submitter = seed_user(&storage, "lisi").await;

        storage
            .create_review_impl(drafter, "2025-07", &plan_items())
            .await
            .unwrap();
        let submitted = storage
            .create_review_impl(submitter, "2025-07", &plan_items())
            .await
            .unwrap();
        storage
            .update_status_and_append_approval_impl(
                submitted.id,
                ReviewStatus::PendingApproval,
                submitter,
                None,
            )
            .await
            .unwrap();

        let listed = storage
            .list_reviews_by_period_impl("2025-07")
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, submitted.id);
        assert!(listed.iter().all(|r| r.status != ReviewStatus::Draft));
    }

    #[tokio::test]
    async fn test_update_review_status_does_not_append_approval() {
        let storage = memory_storage().await;
        let owner = seed_user(&storage, "wangwu").await;
        let review = storage
            .create_review_impl(owner, "2025-08", &plan_items())
            .await
            .unwrap();

        storage
            .update_review_status_impl(review.id, ReviewStatus::PendingApproval)
            .await
            .unwrap();

        let reloaded = storage
            .get_review_by_id_impl(review.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.status, ReviewStatus::PendingApproval);
        assert!(reloaded.approvals.is_empty());
    }
}
