use serde::Deserialize;
use ts_rs::TS;

/// 创建部门请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct CreateDepartmentRequest {
    pub name: String,
    pub parent_id: Option<i64>,
}
