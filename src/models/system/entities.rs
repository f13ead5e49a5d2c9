use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 系统设置实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub updated_by: Option<i64>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 已知配置键
#[derive(Debug, Clone, PartialEq)]
pub enum KnownSettingKey {
    SystemName,
    CurrentPeriod,
    ReviewEditDeadlineDay,
}

impl KnownSettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownSettingKey::SystemName => "app.system_name",
            KnownSettingKey::CurrentPeriod => "review.current_period",
            KnownSettingKey::ReviewEditDeadlineDay => "review.edit_deadline_day",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            KnownSettingKey::SystemName,
            KnownSettingKey::CurrentPeriod,
            KnownSettingKey::ReviewEditDeadlineDay,
        ]
    }
}

impl std::str::FromStr for KnownSettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app.system_name" => Ok(KnownSettingKey::SystemName),
            "review.current_period" => Ok(KnownSettingKey::CurrentPeriod),
            "review.edit_deadline_day" => Ok(KnownSettingKey::ReviewEditDeadlineDay),
            _ => Err(format!("Unknown setting key: {s}")),
        }
    }
}
