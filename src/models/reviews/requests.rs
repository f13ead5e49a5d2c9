use serde::Deserialize;
use ts_rs::TS;

use super::entities::ItemCategory;

/// 绩效项输入（创建/编辑时整体提交）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ReviewItemInput {
    pub category: ItemCategory,
    pub title: String,
    pub description: String,
    pub weight: f64,
    pub target: String,
}

/// 创建绩效评估请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct CreateReviewRequest {
    /// 考核周期，格式 YYYY-MM
    pub period: String,
    pub items: Vec<ReviewItemInput>,
}

/// 编辑绩效评估请求
///
/// items 为整体替换：请求中未出现的旧绩效项会被删除。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct UpdateReviewRequest {
    pub period: Option<String>,
    pub items: Vec<ReviewItemInput>,
}

/// 单个绩效项打分输入
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ScoreItemInput {
    /// 已存在的绩效项 ID，必须属于该评估
    pub id: i64,
    pub completion_details: Option<String>,
    /// 0 ~ 120，为空表示本次不改动该项分数
    pub score: Option<f64>,
}

/// 打分请求
///
/// 未出现在 items 中的绩效项保留原有分数，本轮不计入总分。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ScoreReviewRequest {
    pub items: Vec<ScoreItemInput>,
    pub final_comment: Option<String>,
}

/// 审批/驳回请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ApprovalActionRequest {
    pub comment: Option<String>,
}

/// 按周期查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct PeriodQuery {
    pub period: String,
}
