use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;

/// 管理员更新员工信息请求
///
/// 所有字段可选，只更新提供的字段。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub english_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub department_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub is_active: Option<bool>,
}

/// 企业微信用户信息（登录时自动建档）
#[derive(Debug, Clone)]
pub struct WechatUserProfile {
    pub wechat_userid: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}
