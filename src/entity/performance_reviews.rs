//! 绩效评估主表实体
//!
//! (user_id, period) 上有唯一索引，同一员工同一周期至多一份评估。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "performance_reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub period: String,
    pub status: String,
    pub total_score: Option<f64>,
    pub grade_point: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub final_comment: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::performance_items::Entity")]
    Items,
    #[sea_orm(has_many = "super::approval_histories::Entity")]
    Approvals,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::performance_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::approval_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Approvals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型（不含子集合，由 storage 层组装）
impl Model {
    pub fn into_review(self) -> crate::models::reviews::entities::PerformanceReview {
        use crate::models::reviews::entities::{PerformanceReview, ReviewStatus};
        use chrono::{DateTime, Utc};

        PerformanceReview {
            id: self.id,
            user_id: self.user_id,
            user: None,
            period: self.period,
            status: self
                .status
                .parse::<ReviewStatus>()
                .unwrap_or(ReviewStatus::Draft),
            total_score: self.total_score,
            grade_point: self.grade_point,
            final_comment: self.final_comment,
            items: Vec::new(),
            approvals: Vec::new(),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
