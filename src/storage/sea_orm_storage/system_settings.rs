use super::SeaOrmStorage;
use crate::entity::prelude::SystemSettings;
use crate::entity::system_settings::{ActiveModel, Column};
use crate::errors::{CepmError, Result};
use crate::models::system::entities::SystemSetting;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 获取单个系统设置
    pub async fn get_setting_impl(&self, key: &str) -> Result<Option<SystemSetting>> {
        let result = SystemSettings::find()
            .filter(Column::Key.eq(key))
            .one(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询系统设置失败: {e}")))?;

        Ok(result.map(|m| m.into_setting()))
    }

    /// 写入系统设置（存在则覆盖）
    pub async fn upsert_setting_impl(
        &self,
        key: &str,
        value: &str,
        updated_by: Option<i64>,
    ) -> Result<SystemSetting> {
        let now = chrono::Utc::now().timestamp();

        let existing = SystemSettings::find()
            .filter(Column::Key.eq(key))
            .one(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询系统设置失败: {e}")))?;

        let result = match existing {
            Some(model) => {
                let mut model = model.into_active_model();
                model.value = Set(value.to_string());
                model.updated_by = Set(updated_by);
                model.updated_at = Set(now);
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| CepmError::database_operation(format!("更新系统设置失败: {e}")))?
            }
            None => {
                let model = ActiveModel {
                    key: Set(key.to_string()),
                    value: Set(value.to_string()),
                    updated_by: Set(updated_by),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| CepmError::database_operation(format!("写入系统设置失败: {e}")))?
            }
        };

        Ok(result.into_setting())
    }

    /// 列出全部系统设置
    pub async fn list_settings_impl(&self) -> Result<Vec<SystemSetting>> {
        let result = SystemSettings::find()
            .order_by_asc(Column::Key)
            .all(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询系统设置列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_setting()).collect())
    }
}
