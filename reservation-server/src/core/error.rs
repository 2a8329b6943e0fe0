use thiserror::Error;

use crate::store::StoreError;

/// 服务器启动/运行错误
///
/// Request-level failures use `AppError`; this type covers what can stop the
/// process itself.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("存储初始化失败: {0}")]
    Store(#[from] StoreError),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
