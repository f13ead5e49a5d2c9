use serde::Deserialize;
use ts_rs::TS;

/// 更新系统设置请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct UpdateSettingRequest {
    pub value: String,
}
