use super::SeaOrmStorage;
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::errors::{CepmError, Result};
use crate::models::departments::{entities::Department, requests::CreateDepartmentRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建部门
    pub async fn create_department_impl(&self, req: CreateDepartmentRequest) -> Result<Department> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            parent_id: Set(req.parent_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("创建部门失败: {e}")))?;

        Ok(result.into_department())
    }

    /// 通过 ID 获取部门
    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询部门失败: {e}")))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 列出全部部门
    pub async fn list_departments_impl(&self) -> Result<Vec<Department>> {
        let result = Departments::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CepmError::database_operation(format!("查询部门列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_department()).collect())
    }
}
