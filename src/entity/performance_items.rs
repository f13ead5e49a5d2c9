//! 绩效项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "performance_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub review_id: i64,
    pub category: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub weight: f64,
    #[sea_orm(column_type = "Text")]
    pub target: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub completion_details: Option<String>,
    pub score: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::performance_reviews::Entity",
        from = "Column::ReviewId",
        to = "super::performance_reviews::Column::Id"
    )]
    Review,
}

impl Related<super::performance_reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_item(self) -> crate::models::reviews::entities::PerformanceItem {
        use crate::models::reviews::entities::{ItemCategory, PerformanceItem};
        use chrono::{DateTime, Utc};

        PerformanceItem {
            id: self.id,
            review_id: self.review_id,
            category: self
                .category
                .parse::<ItemCategory>()
                .unwrap_or(ItemCategory::WorkPerformance),
            title: self.title,
            description: self.description,
            weight: self.weight,
            target: self.target,
            completion_details: self.completion_details,
            score: self.score,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
