use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    /// 命中
    Found(T),
    /// 键不存在
    NotFound,
    /// 键存在但取值失败（连接错误等）
    ExistsButNoValue,
}

/// 对象缓存统一接口
///
/// 所有后端以字符串键值存储，结构化对象由调用方经 JSON 编解码。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// ttl 为 0 时使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}
