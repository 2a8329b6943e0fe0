//! Reservation Server - 餐厅订座准入服务
//!
//! # 架构概述
//!
//! 接收预订请求，确认桌号存在，检查同一桌台的时段冲突，通过后写入存储。
//!
//! ```text
//! reservation-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 调用方身份 (Bearer token 透传)
//! ├── store/         # 存储网关 (redb / memory)
//! ├── repository/    # 桌台与预订仓储
//! ├── reservations/  # 校验、冲突检测、准入编排
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、时间解析
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod repository;
pub mod reservations;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState, StoreBackend};
pub use reservations::{AdmissionController, AdmissionPolicy, PolicyKind};
pub use store::{MemoryStore, RedbStore, StoreGateway};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 .env、读取配置并初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
    }
    if let Err(e) =
        init_logger_with_file(Some(config.log_level.as_str()), config.log_dir.as_deref())
    {
        // an already installed subscriber still receives this
        tracing::warn!(error = %e, "Logger already initialized, keeping existing subscriber");
    }
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____                                 __  _
   / __ \___  ________  ______   ______ _/ /_(_)___  ____
  / /_/ / _ \/ ___/ _ \/ ___/ | / / __ `/ __/ / __ \/ __ \
 / _, _/  __(__  )  __/ /   | |/ / /_/ / /_/ / /_/ / / / /
/_/ |_|\___/____/\___/_/    |___/\__,_/\__/_/\____/_/ /_/
    "#
    );
}
