use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{CepmError, Result};
use crate::models::users::{
    entities::{User, UserRole},
    requests::{UpdateUserRequest, WechatUserProfile},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建员工
    pub async fn create_user_impl(
        &self,
        profile: WechatUserProfile,
        role: UserRole,
    ) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            wechat_userid: Set(profile.wechat_userid),
            name: Set(profile.name),
            email: Set(profile.email),
            avatar_url: Set(profile.avatar_url),
            role: Set(role.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("创建员工失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取员工
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询员工失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过企业微信 userid 获取员工
    pub async fn get_user_by_wechat_userid_impl(
        &self,
        wechat_userid: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::WechatUserid.eq(wechat_userid))
            .one(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询员工失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 列出全部员工
    pub async fn list_users_impl(&self) -> Result<Vec<User>> {
        let result = Users::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询员工列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_user()).collect())
    }

    /// 更新员工信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let existing = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询员工失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(english_name) = update.english_name {
            model.english_name = Set(Some(english_name));
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(department_id) = update.department_id {
            model.department_id = Set(Some(department_id));
        }
        if let Some(manager_id) = update.manager_id {
            model.manager_id = Set(Some(manager_id));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("更新员工失败: {e}")))?;

        Ok(Some(result.into_user()))
    }

    /// 员工总数
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("统计员工数量失败: {e}")))
    }
}
