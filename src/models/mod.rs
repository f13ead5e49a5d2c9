pub mod auth;
pub mod common;
pub mod departments;
pub mod reviews;
pub mod system;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

/// 程序启动时间（注入到 app_data，用于运行状态查询）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
