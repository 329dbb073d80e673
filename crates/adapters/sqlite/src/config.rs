//! SQLite 配置模块

use std::time::Duration;

/// 内存数据库地址
pub const MEMORY_ADDRESS: &str = ":memory:";

/// SQLite 配置
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// 数据库文件路径，或 `sqlite:` URL，或 `:memory:`
    pub path: String,
    /// 最大连接数（内存数据库固定为 1）
    pub max_connections: u32,
    /// 最小连接数
    pub min_connections: u32,
    /// 获取连接超时
    pub acquire_timeout: Duration,
    /// 数据库被锁时的等待时间
    pub busy_timeout: Duration,
    /// 启用 WAL 日志模式
    pub enable_wal: bool,
    /// 是否输出 SQL 语句日志
    pub log_sql: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: MEMORY_ADDRESS.to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            enable_wal: true,
            log_sql: false,
        }
    }
}

impl SqliteConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn with_log_sql(mut self, log_sql: bool) -> Self {
        self.log_sql = log_sql;
        self
    }

    /// 是否为内存数据库
    pub fn is_memory(&self) -> bool {
        self.path == MEMORY_ADDRESS
            || self.path == "sqlite::memory:"
            || self.path.contains("mode=memory")
    }
}
