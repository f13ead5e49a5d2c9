//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod departments;
mod reviews;
mod system_settings;
mod users;

use crate::config::AppConfig;
use crate::errors::{CepmError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CepmError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CepmError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CepmError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CepmError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CepmError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    departments::{entities::Department, requests::CreateDepartmentRequest},
    reviews::{
        entities::{PerformanceReview, ReviewStatus},
        requests::{ReviewItemInput, ScoreItemInput},
    },
    system::entities::SystemSetting,
    users::{
        entities::{User, UserRole},
        requests::{UpdateUserRequest, WechatUserProfile},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 员工模块
    async fn create_user(&self, profile: WechatUserProfile, role: UserRole) -> Result<User> {
        self.create_user_impl(profile, role).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_wechat_userid(&self, wechat_userid: &str) -> Result<Option<User>> {
        self.get_user_by_wechat_userid_impl(wechat_userid).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_impl().await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 绩效评估模块
    async fn create_review(
        &self,
        user_id: i64,
        period: &str,
        items: &[ReviewItemInput],
    ) -> Result<PerformanceReview> {
        self.create_review_impl(user_id, period, items).await
    }

    async fn get_review_by_id(&self, id: i64) -> Result<Option<PerformanceReview>> {
        self.get_review_by_id_impl(id).await
    }

    async fn get_review_by_user_and_period(
        &self,
        user_id: i64,
        period: &str,
    ) -> Result<Option<PerformanceReview>> {
        self.get_review_by_user_and_period_impl(user_id, period)
            .await
    }

    async fn list_reviews_by_user(&self, user_id: i64) -> Result<Vec<PerformanceReview>> {
        self.list_reviews_by_user_impl(user_id).await
    }

    async fn list_reviews_by_manager(&self, manager_id: i64) -> Result<Vec<PerformanceReview>> {
        self.list_reviews_by_manager_impl(manager_id).await
    }

    async fn list_all_submitted_reviews(&self) -> Result<Vec<PerformanceReview>> {
        self.list_all_submitted_reviews_impl().await
    }

    async fn list_reviews_by_period(&self, period: &str) -> Result<Vec<PerformanceReview>> {
        self.list_reviews_by_period_impl(period).await
    }

    async fn replace_review_items(
        &self,
        id: i64,
        period: Option<String>,
        items: &[ReviewItemInput],
    ) -> Result<PerformanceReview> {
        self.replace_review_items_impl(id, period, items).await
    }

    async fn update_review_status(&self, id: i64, status: ReviewStatus) -> Result<()> {
        self.update_review_status_impl(id, status).await
    }

    async fn update_status_and_append_approval(
        &self,
        id: i64,
        status: ReviewStatus,
        approver_id: i64,
        comment: Option<String>,
    ) -> Result<()> {
        self.update_status_and_append_approval_impl(id, status, approver_id, comment)
            .await
    }

    async fn apply_review_scores(
        &self,
        id: i64,
        items: &[ScoreItemInput],
        total_score: f64,
        grade_point: f64,
        final_comment: Option<String>,
        status: ReviewStatus,
    ) -> Result<PerformanceReview> {
        self.apply_review_scores_impl(id, items, total_score, grade_point, final_comment, status)
            .await
    }

    // 部门模块
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(req).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        self.list_departments_impl().await
    }

    // 系统设置模块
    async fn get_setting(&self, key: &str) -> Result<Option<SystemSetting>> {
        self.get_setting_impl(key).await
    }

    async fn upsert_setting(
        &self,
        key: &str,
        value: &str,
        updated_by: Option<i64>,
    ) -> Result<SystemSetting> {
        self.upsert_setting_impl(key, value, updated_by).await
    }

    async fn list_settings(&self) -> Result<Vec<SystemSetting>> {
        self.list_settings_impl().await
    }
}
