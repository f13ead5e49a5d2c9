use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API 业务错误码
///
/// 与 HTTP 状态码分离：HTTP 状态码表达传输层语义，
/// 业务错误码供前端做精确分支。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 请求/认证类
    BadRequest = 40000,
    Unauthorized = 40100,
    AuthFailed = 40101,
    Forbidden = 40300,
    PermissionDenied = 40301,

    // 资源类
    NotFound = 40400,
    UserNotFound = 40401,
    ReviewNotFound = 40402,
    ReviewItemNotFound = 40403,
    DepartmentNotFound = 40404,
    SettingNotFound = 40405,

    // 冲突类
    ReviewAlreadyExists = 40900,

    // 业务校验类
    InvalidReviewState = 42200,
    ValidationFailed = 42201,
    ScoreOutOfRange = 42202,
    PeriodFormatInvalid = 42203,

    // 限流
    RateLimitExceeded = 42900,

    // 服务端
    InternalServerError = 50000,
    StoreFailure = 50001,
    IdentityProviderError = 50200,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::PermissionDenied as i32, 40301);
        assert_eq!(ErrorCode::ReviewNotFound as i32, 40402);
        assert_eq!(ErrorCode::DepartmentNotFound as i32, 40404);
        assert_eq!(ErrorCode::InvalidReviewState as i32, 42200);
        assert_eq!(ErrorCode::StoreFailure as i32, 50001);
        assert_eq!(ErrorCode::IdentityProviderError as i32, 50200);
    }
}
