//! 预导入模块，方便使用

pub use super::approval_histories::{
    ActiveModel as ApprovalHistoryActiveModel, Entity as ApprovalHistories,
    Model as ApprovalHistoryModel,
};
pub use super::departments::{
    ActiveModel as DepartmentActiveModel, Entity as Departments, Model as DepartmentModel,
};
pub use super::performance_items::{
    ActiveModel as PerformanceItemActiveModel, Entity as PerformanceItems,
    Model as PerformanceItemModel,
};
pub use super::performance_reviews::{
    ActiveModel as PerformanceReviewActiveModel, Entity as PerformanceReviews,
    Model as PerformanceReviewModel,
};
pub use super::system_settings::{
    ActiveModel as SystemSettingActiveModel, Entity as SystemSettings, Model as SystemSettingModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
