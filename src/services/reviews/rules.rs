//! 绩效评估生命周期规则
//!
//! 状态机、打分聚合与绩效项校验的纯函数集合，
//! 不触达存储层，便于单独测试。

use crate::errors::{CepmError, Result};
use crate::models::reviews::{
    entities::{ItemCategory, PerformanceItem, ReviewStatus},
    requests::{ReviewItemInput, ScoreItemInput},
};
use std::collections::HashMap;

/// 单项分数上限（允许超额完成，满分100基础上浮20）
pub const MAX_ITEM_SCORE: f64 = 120.0;

/// “工作业绩”类别的权重总和要求
pub const WORK_PERFORMANCE_WEIGHT_SUM: f64 = 80.0;

// 浮点权重求和的比较容差
const WEIGHT_EPSILON: f64 = 1e-9;

/// 总分到绩点的映射
///
/// 超过 100 分按 score/100 原样放大，不封顶。
pub fn calculate_grade_point(total_score: f64) -> f64 {
    if total_score > 100.0 {
        total_score / 100.0
    } else if total_score >= 90.0 {
        1.0
    } else if total_score >= 60.0 {
        0.8
    } else {
        0.0
    }
}

/// 校验整套绩效项（创建/编辑时调用）
///
/// 所有字段非空、权重大于0，且“工作业绩”权重总和必须恰好为80。
/// 其他类别没有权重总和约束。
pub fn validate_items(items: &[ReviewItemInput]) -> Result<()> {
    if items.is_empty() {
        return Err(CepmError::validation("绩效项不能为空"));
    }

    let mut work_total_weight = 0.0;
    for item in items {
        if item.title.trim().is_empty()
            || item.description.trim().is_empty()
            || item.target.trim().is_empty()
            || item.weight <= 0.0
        {
            return Err(CepmError::validation(
                "所有绩效项的字段均不能为空，且权重必须大于0",
            ));
        }
        if item.category == ItemCategory::WorkPerformance {
            work_total_weight += item.weight;
        }
    }

    if (work_total_weight - WORK_PERFORMANCE_WEIGHT_SUM).abs() > WEIGHT_EPSILON {
        return Err(CepmError::validation("“工作业绩”部分的总权重必须等于80%"));
    }

    Ok(())
}

/// 打分聚合
///
/// 每个输入项必须属于该评估，单项分数必须在 0~120 之间，
/// 任一校验失败立即返回错误（调用方不落任何写入）。
/// 总分只累计“工作业绩”类别中本次给出分数的项：
/// total = Σ (weight/100 × score)。未出现在输入中的项保留原分数，
/// 本轮不计入总分。
pub fn aggregate_total_score(
    existing_items: &[PerformanceItem],
    inputs: &[ScoreItemInput],
) -> Result<f64> {
    let item_map: HashMap<i64, &PerformanceItem> =
        existing_items.iter().map(|item| (item.id, item)).collect();

    let mut total_score = 0.0;
    for input in inputs {
        let item = item_map
            .get(&input.id)
            .ok_or_else(|| CepmError::not_found(format!("无效的绩效项ID: {}", input.id)))?;

        if let Some(score) = input.score {
            if !(0.0..=MAX_ITEM_SCORE).contains(&score) {
                return Err(CepmError::validation("单项分数必须在0到120之间"));
            }
            if item.category == ItemCategory::WorkPerformance {
                total_score += (item.weight / 100.0) * score;
            }
        }
    }

    Ok(total_score)
}

/// 审批通过后的下一个状态
///
/// 审批链：员工提交计划 → 上级批准进入打分 → 打分完成后上级
/// 确认送人事 → 人事确认归档。不在链上的状态不可审批。
pub fn next_status_on_approve(current: ReviewStatus) -> Option<ReviewStatus> {
    match current {
        ReviewStatus::PendingApproval => Some(ReviewStatus::PendingScore),
        ReviewStatus::Completed => Some(ReviewStatus::PendingHrConfirmation),
        ReviewStatus::PendingHrConfirmation => Some(ReviewStatus::Archived),
        _ => None,
    }
}

/// 当前状态是否允许驳回
///
/// 草稿尚未进入流程、已归档的评估已经定稿，均不可驳回。
pub fn can_reject(status: ReviewStatus) -> bool {
    !matches!(status, ReviewStatus::Draft | ReviewStatus::Archived)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_input(category: ItemCategory, weight: f64) -> ReviewItemInput {
        ReviewItemInput {
            category,
            title: "目标".to_string(),
            description: "说明".to_string(),
            weight,
            target: "达成标准".to_string(),
        }
    }

    fn existing_item(id: i64, category: ItemCategory, weight: f64) -> PerformanceItem {
        PerformanceItem {
            id,
            review_id: 1,
            category,
            title: "目标".to_string(),
            description: "说明".to_string(),
            weight,
            target: "达成标准".to_string(),
            completion_details: None,
            score: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn score_input(id: i64, score: Option<f64>) -> ScoreItemInput {
        ScoreItemInput {
            id,
            completion_details: Some("完成情况".to_string()),
            score,
        }
    }

    #[test]
    fn test_grade_point_bands() {
        assert_eq!(calculate_grade_point(93.0), 1.0);
        assert_eq!(calculate_grade_point(75.0), 0.8);
        assert_eq!(calculate_grade_point(59.9), 0.0);
        assert_eq!(calculate_grade_point(150.0), 1.5);
    }

    #[test]
    fn test_grade_point_boundaries() {
        assert_eq!(calculate_grade_point(90.0), 1.0);
        assert_eq!(calculate_grade_point(100.0), 1.0);
        assert_eq!(calculate_grade_point(60.0), 0.8);
        assert_eq!(calculate_grade_point(89.999), 0.8);
        assert_eq!(calculate_grade_point(0.0), 0.0);
        assert_eq!(calculate_grade_point(100.5), 1.005);
    }

    #[test]
    fn test_validate_items_weight_sum_exactly_80() {
        let items = vec![
            item_input(ItemCategory::WorkPerformance, 50.0),
            item_input(ItemCategory::WorkPerformance, 30.0),
            item_input(ItemCategory::AiUsage, 10.0),
            item_input(ItemCategory::Values, 10.0),
        ];
        assert!(validate_items(&items).is_ok());
    }

    #[test]
    fn test_validate_items_rejects_weight_sum_79_and_81() {
        let make = |second_weight: f64| {
            vec![
                item_input(ItemCategory::WorkPerformance, 50.0),
                item_input(ItemCategory::WorkPerformance, second_weight),
            ]
        };
        assert!(validate_items(&make(29.0)).is_err());
        assert!(validate_items(&make(31.0)).is_err());
        assert!(validate_items(&make(30.0)).is_ok());
    }

    #[test]
    fn test_validate_items_other_categories_unconstrained() {
        // 非工作业绩类别的权重总和随意
        let items = vec![
            item_input(ItemCategory::WorkPerformance, 80.0),
            item_input(ItemCategory::AiUsage, 15.0),
            item_input(ItemCategory::Values, 33.0),
        ];
        assert!(validate_items(&items).is_ok());
    }

    #[test]
    fn test_validate_items_rejects_empty_fields() {
        let mut bad = item_input(ItemCategory::WorkPerformance, 80.0);
        bad.title = "".to_string();
        assert!(validate_items(&[bad]).is_err());

        let mut bad = item_input(ItemCategory::WorkPerformance, 80.0);
        bad.target = "  ".to_string();
        assert!(validate_items(&[bad]).is_err());

        let bad = item_input(ItemCategory::WorkPerformance, 0.0);
        assert!(validate_items(&[bad]).is_err());

        assert!(validate_items(&[]).is_err());
    }

    #[test]
    fn test_aggregate_work_performance_only() {
        // 权重 50/30 为工作业绩，10/10 为其他类别
        let items = vec![
            existing_item(1, ItemCategory::WorkPerformance, 50.0),
            existing_item(2, ItemCategory::WorkPerformance, 30.0),
            existing_item(3, ItemCategory::AiUsage, 10.0),
            existing_item(4, ItemCategory::Values, 10.0),
        ];
        let inputs = vec![
            score_input(1, Some(95.0)),
            score_input(2, Some(80.0)),
            score_input(3, Some(100.0)),
            score_input(4, Some(100.0)),
        ];

        let total = aggregate_total_score(&items, &inputs).unwrap();
        assert!((total - 71.5).abs() < 1e-9); // 0.5×95 + 0.3×80
        assert_eq!(calculate_grade_point(total), 0.8);
    }

    #[test]
    fn test_aggregate_rejects_unknown_item_id() {
        let items = vec![existing_item(1, ItemCategory::WorkPerformance, 80.0)];
        let inputs = vec![score_input(999, Some(90.0))];

        let err = aggregate_total_score(&items, &inputs).unwrap_err();
        assert_eq!(err.code(), "E006"); // NotFound
    }

    #[test]
    fn test_aggregate_rejects_out_of_range_score() {
        let items = vec![existing_item(1, ItemCategory::WorkPerformance, 80.0)];

        let too_high = vec![score_input(1, Some(120.5))];
        assert!(aggregate_total_score(&items, &too_high).is_err());

        let negative = vec![score_input(1, Some(-1.0))];
        assert!(aggregate_total_score(&items, &negative).is_err());

        let boundary = vec![score_input(1, Some(120.0))];
        assert!(aggregate_total_score(&items, &boundary).is_ok());
    }

    #[test]
    fn test_aggregate_skips_untouched_and_unscored_items() {
        let items = vec![
            existing_item(1, ItemCategory::WorkPerformance, 50.0),
            existing_item(2, ItemCategory::WorkPerformance, 30.0),
        ];

        // 第二项只填了完成情况，没有分数，不计入总分
        let inputs = vec![score_input(1, Some(90.0)), score_input(2, None)];
        let total = aggregate_total_score(&items, &inputs).unwrap();
        assert!((total - 45.0).abs() < 1e-9);

        // 完全未出现在输入中的项同样不计入
        let inputs = vec![score_input(1, Some(90.0))];
        let total = aggregate_total_score(&items, &inputs).unwrap();
        assert!((total - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_approve_chain() {
        assert_eq!(
            next_status_on_approve(ReviewStatus::PendingApproval),
            Some(ReviewStatus::PendingScore)
        );
        assert_eq!(
            next_status_on_approve(ReviewStatus::Completed),
            Some(ReviewStatus::PendingHrConfirmation)
        );
        assert_eq!(
            next_status_on_approve(ReviewStatus::PendingHrConfirmation),
            Some(ReviewStatus::Archived)
        );
        assert_eq!(next_status_on_approve(ReviewStatus::Draft), None);
        assert_eq!(next_status_on_approve(ReviewStatus::PendingScore), None);
        assert_eq!(next_status_on_approve(ReviewStatus::Rejected), None);
        assert_eq!(next_status_on_approve(ReviewStatus::Archived), None);
    }

    #[test]
    fn test_rejectable_statuses() {
        assert!(!can_reject(ReviewStatus::Draft));
        assert!(!can_reject(ReviewStatus::Archived));
        assert!(can_reject(ReviewStatus::PendingApproval));
        assert!(can_reject(ReviewStatus::PendingScore));
        assert!(can_reject(ReviewStatus::Completed));
        assert!(can_reject(ReviewStatus::PendingHrConfirmation));
    }
}
