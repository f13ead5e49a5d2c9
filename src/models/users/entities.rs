use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 员工角色
//
// 固定的封闭集合，业务逻辑只允许对枚举做穷尽匹配，
// 不允许直接比较角色字符串。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Employee,   // 员工
    TeamLead,   // 组长
    CenterHead, // 中心负责人
    Hr,         // 人事
    Admin,      // 管理员
}

impl UserRole {
    pub const EMPLOYEE: &'static str = "employee";
    pub const TEAM_LEAD: &'static str = "team_lead";
    pub const CENTER_HEAD: &'static str = "center_head";
    pub const HR: &'static str = "hr";
    pub const ADMIN: &'static str = "admin";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn hr_roles() -> &'static [&'static UserRole] {
        &[&Self::Hr, &Self::Admin]
    }
    pub fn manager_roles() -> &'static [&'static UserRole] {
        &[&Self::TeamLead, &Self::CenterHead, &Self::Admin]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Employee,
            &Self::TeamLead,
            &Self::CenterHead,
            &Self::Hr,
            &Self::Admin,
        ]
    }

    /// 是否具有人事权限（查看全部已提交评估）
    pub fn is_hr(&self) -> bool {
        matches!(self, UserRole::Hr | UserRole::Admin)
    }

    /// 是否具有管理员权限
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            UserRole::EMPLOYEE => Ok(UserRole::Employee),
            UserRole::TEAM_LEAD => Ok(UserRole::TeamLead),
            UserRole::CENTER_HEAD => Ok(UserRole::CenterHead),
            UserRole::HR => Ok(UserRole::Hr),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(serde::de::Error::custom(format!(
                "无效的员工角色: '{s}'. 支持的角色: employee, team_lead, center_head, hr, admin"
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Employee => write!(f, "{}", UserRole::EMPLOYEE),
            UserRole::TeamLead => write!(f, "{}", UserRole::TEAM_LEAD),
            UserRole::CenterHead => write!(f, "{}", UserRole::CENTER_HEAD),
            UserRole::Hr => write!(f, "{}", UserRole::HR),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(UserRole::Employee),
            "team_lead" => Ok(UserRole::TeamLead),
            "center_head" => Ok(UserRole::CenterHead),
            "hr" => Ok(UserRole::Hr),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 员工实体
//
// manager_id 为空表示没有直属上级（例如组织最顶层），
// 所有依赖审批链的逻辑必须显式处理这一情况。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub wechat_userid: String,
    pub name: String,
    pub english_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub department_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成访问令牌
    pub fn generate_access_token(&self) -> Result<String, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.role.to_string())
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
    ) -> Result<crate::utils::jwt::TokenPair, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, &self.role.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in UserRole::all_roles() {
            let parsed = UserRole::from_str(&role.to_string()).unwrap();
            assert_eq!(parsed, **role);
        }
    }

    #[test]
    fn test_invalid_role_rejected() {
        assert!(UserRole::from_str("经理").is_err());
        assert!(UserRole::from_str("manager").is_err());
    }

    #[test]
    fn test_role_groups() {
        assert!(UserRole::Hr.is_hr());
        assert!(UserRole::Admin.is_hr());
        assert!(!UserRole::TeamLead.is_hr());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Hr.is_admin());
    }
}
