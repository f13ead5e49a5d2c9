//! 审批流转历史实体
//!
//! 追加写入，创建后不再修改或删除。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "approval_histories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub review_id: i64,
    pub approver_id: i64,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::performance_reviews::Entity",
        from = "Column::ReviewId",
        to = "super::performance_reviews::Column::Id"
    )]
    Review,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ApproverId",
        to = "super::users::Column::Id"
    )]
    Approver,
}

impl Related<super::performance_reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Approver.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_approval(self) -> crate::models::reviews::entities::ApprovalRecord {
        use crate::models::reviews::entities::{ApprovalRecord, ReviewStatus};
        use chrono::{DateTime, Utc};

        ApprovalRecord {
            id: self.id,
            review_id: self.review_id,
            approver_id: self.approver_id,
            status: self
                .status
                .parse::<ReviewStatus>()
                .unwrap_or(ReviewStatus::Draft),
            comment: self.comment,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
