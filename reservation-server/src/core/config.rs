use std::path::PathBuf;
use std::str::FromStr;

use crate::reservations::PolicyKind;

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// 嵌入式 redb 文件 (work_dir/reservations.redb)
    #[default]
    Redb,
    /// 进程内存，重启即丢失
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redb" => Ok(StoreBackend::Redb),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (redb 文件所在) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | STORE_BACKEND | redb | `redb` 或 `memory` |
/// | RESERVATION_POLICY | open | `open` 或 `caller-required` |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志目录，未设置时只输出到终端 |
///
/// Unparsable values fall back to the default.
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub store_backend: StoreBackend,
    pub reservation_policy: PolicyKind,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            store_backend: std::env::var("STORE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            reservation_policy: std::env::var("RESERVATION_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(
        work_dir: impl Into<String>,
        http_port: u16,
        store_backend: StoreBackend,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.store_backend = store_backend;
        config
    }

    /// redb 数据文件路径
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("reservations.redb")
    }

    /// 确保工作目录存在
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("redb".parse::<StoreBackend>().unwrap(), StoreBackend::Redb);
        assert_eq!(
            "MEMORY".parse::<StoreBackend>().unwrap(),
            StoreBackend::Memory
        );
        assert!("dynamo".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_overrides_and_paths() {
        let config = Config::with_overrides("/tmp/reservations", 8080, StoreBackend::Memory);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/reservations/reservations.redb")
        );
    }
}
