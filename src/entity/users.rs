//! 员工实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub wechat_userid: String,
    pub name: String,
    pub english_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub department_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::performance_reviews::Entity")]
    PerformanceReviews,
    #[sea_orm(has_many = "super::approval_histories::Entity")]
    ApprovalHistories,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::performance_reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerformanceReviews.def()
    }
}

impl Related<super::approval_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApprovalHistories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserRole};
        use chrono::{DateTime, Utc};

        User {
            id: self.id,
            wechat_userid: self.wechat_userid,
            name: self.name,
            english_name: self.english_name,
            email: self.email,
            avatar_url: self.avatar_url,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Employee),
            department_id: self.department_id,
            manager_id: self.manager_id,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
