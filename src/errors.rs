//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_cepm_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CepmError {
            $($variant(String),)*
        }

        impl CepmError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CepmError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CepmError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CepmError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CepmError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CepmError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_cepm_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    NotFound("E006", "Resource Not Found"),
    Validation("E007", "Validation Error"),
    PermissionDenied("E008", "Permission Denied"),
    InvalidState("E009", "Invalid Review State"),
    Serialization("E010", "Serialization Error"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    IdentityProvider("E013", "Identity Provider Error"),
}

impl CepmError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CepmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CepmError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CepmError {
    fn from(err: sea_orm::DbErr) -> Self {
        CepmError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CepmError {
    fn from(err: std::io::Error) -> Self {
        CepmError::DatabaseConnection(err.to_string())
    }
}

impl From<serde_json::Error> for CepmError {
    fn from(err: serde_json::Error) -> Self {
        CepmError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CepmError {
    fn from(err: chrono::ParseError) -> Self {
        CepmError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for CepmError {
    fn from(err: reqwest::Error) -> Self {
        CepmError::IdentityProvider(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CepmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CepmError::cache_connection("test").code(), "E001");
        assert_eq!(CepmError::database_config("test").code(), "E003");
        assert_eq!(CepmError::validation("test").code(), "E007");
        assert_eq!(CepmError::invalid_state("test").code(), "E009");
        assert_eq!(CepmError::authentication("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CepmError::permission_denied("test").error_type(),
            "Permission Denied"
        );
        assert_eq!(
            CepmError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CepmError::validation("工作业绩权重总和必须为80");
        assert_eq!(err.message(), "工作业绩权重总和必须为80");
    }

    #[test]
    fn test_format_simple() {
        let err = CepmError::invalid_state("review is not a draft");
        let formatted = err.format_simple();
        assert!(formatted.contains("Invalid Review State"));
        assert!(formatted.contains("review is not a draft"));
    }
}
