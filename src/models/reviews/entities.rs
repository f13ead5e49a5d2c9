use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 绩效评估状态
//
// 生命周期：
// draft -> pending_approval -> pending_score -> completed
//       -> pending_hr_confirmation -> archived
// rejected 可以从待审批/待人事确认进入，驳回后可重新编辑（等同草稿）。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub enum ReviewStatus {
    Draft,                 // 草稿
    PendingApproval,       // 待审批
    PendingScore,          // 待打分（计划已批准）
    Completed,             // 已完成（已打分）
    PendingHrConfirmation, // 待人事确认
    Rejected,              // 已驳回
    Archived,              // 已归档
}

impl ReviewStatus {
    pub const DRAFT: &'static str = "draft";
    pub const PENDING_APPROVAL: &'static str = "pending_approval";
    pub const PENDING_SCORE: &'static str = "pending_score";
    pub const COMPLETED: &'static str = "completed";
    pub const PENDING_HR_CONFIRMATION: &'static str = "pending_hr_confirmation";
    pub const REJECTED: &'static str = "rejected";
    pub const ARCHIVED: &'static str = "archived";

    /// 是否可编辑（整体替换绩效项）：草稿或已驳回
    pub fn is_editable(&self) -> bool {
        matches!(self, ReviewStatus::Draft | ReviewStatus::Rejected)
    }

    /// 是否已提交（列表查询中对上级/人事可见）
    pub fn is_submitted(&self) -> bool {
        !matches!(self, ReviewStatus::Draft)
    }
}

impl<'de> Deserialize<'de> for ReviewStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ReviewStatus>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReviewStatus::Draft => Self::DRAFT,
            ReviewStatus::PendingApproval => Self::PENDING_APPROVAL,
            ReviewStatus::PendingScore => Self::PENDING_SCORE,
            ReviewStatus::Completed => Self::COMPLETED,
            ReviewStatus::PendingHrConfirmation => Self::PENDING_HR_CONFIRMATION,
            ReviewStatus::Rejected => Self::REJECTED,
            ReviewStatus::Archived => Self::ARCHIVED,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::DRAFT => Ok(ReviewStatus::Draft),
            Self::PENDING_APPROVAL => Ok(ReviewStatus::PendingApproval),
            Self::PENDING_SCORE => Ok(ReviewStatus::PendingScore),
            Self::COMPLETED => Ok(ReviewStatus::Completed),
            Self::PENDING_HR_CONFIRMATION => Ok(ReviewStatus::PendingHrConfirmation),
            Self::REJECTED => Ok(ReviewStatus::Rejected),
            Self::ARCHIVED => Ok(ReviewStatus::Archived),
            _ => Err(format!("Invalid review status: {s}")),
        }
    }
}

// 绩效项类别
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub enum ItemCategory {
    WorkPerformance, // 工作业绩（权重总和必须为80）
    AiUsage,         // 大模型应用
    Values,          // 价值观
}

impl ItemCategory {
    pub const WORK_PERFORMANCE: &'static str = "work_performance";
    pub const AI_USAGE: &'static str = "ai_usage";
    pub const VALUES: &'static str = "values";
}

impl<'de> Deserialize<'de> for ItemCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ItemCategory>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ItemCategory::WorkPerformance => Self::WORK_PERFORMANCE,
            ItemCategory::AiUsage => Self::AI_USAGE,
            ItemCategory::Values => Self::VALUES,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ItemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::WORK_PERFORMANCE => Ok(ItemCategory::WorkPerformance),
            Self::AI_USAGE => Ok(ItemCategory::AiUsage),
            Self::VALUES => Ok(ItemCategory::Values),
            _ => Err(format!("Invalid item category: {s}")),
        }
    }
}

// 评估归属人摘要（列表/详情响应中嵌入）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ReviewOwner {
    pub id: i64,
    pub name: String,
    pub english_name: Option<String>,
    pub department_id: Option<i64>,
    pub manager_id: Option<i64>,
}

// 绩效评估主实体
//
// 一名员工在一个考核周期内至多一份评估（存储层唯一索引兜底）。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct PerformanceReview {
    pub id: i64,
    pub user_id: i64,
    pub user: Option<ReviewOwner>,
    pub period: String,
    pub status: ReviewStatus,
    pub total_score: Option<f64>,
    pub grade_point: Option<f64>,
    pub final_comment: Option<String>,
    pub items: Vec<PerformanceItem>,
    pub approvals: Vec<ApprovalRecord>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 绩效项实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct PerformanceItem {
    pub id: i64,
    pub review_id: i64,
    pub category: ItemCategory,
    pub title: String,
    pub description: String,
    pub weight: f64,
    pub target: String,
    pub completion_details: Option<String>,
    pub score: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 审批流转记录（追加写入）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ApprovalRecord {
    pub id: i64,
    pub review_id: i64,
    pub approver_id: i64,
    pub status: ReviewStatus,
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        let all = [
            ReviewStatus::Draft,
            ReviewStatus::PendingApproval,
            ReviewStatus::PendingScore,
            ReviewStatus::Completed,
            ReviewStatus::PendingHrConfirmation,
            ReviewStatus::Rejected,
            ReviewStatus::Archived,
        ];
        for status in all {
            assert_eq!(ReviewStatus::from_str(&status.to_string()), Ok(status));
        }
    }

    #[test]
    fn test_editable_statuses() {
        assert!(ReviewStatus::Draft.is_editable());
        assert!(ReviewStatus::Rejected.is_editable());
        assert!(!ReviewStatus::PendingApproval.is_editable());
        assert!(!ReviewStatus::Completed.is_editable());
        assert!(!ReviewStatus::Archived.is_editable());
    }

    #[test]
    fn test_submitted_excludes_draft_only() {
        assert!(!ReviewStatus::Draft.is_submitted());
        assert!(ReviewStatus::Rejected.is_submitted());
        assert!(ReviewStatus::PendingApproval.is_submitted());
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!(ReviewStatus::from_str("草稿").is_err());
        assert!(ReviewStatus::from_str("approved").is_err());
    }
}
