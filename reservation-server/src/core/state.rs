use std::sync::Arc;
use std::time::Instant;

use crate::core::config::StoreBackend;
use crate::core::{Config, Result};
use crate::repository::{DiningTableRepository, ReservationRepository};
use crate::reservations::AdmissionController;
use crate::store::{MemoryStore, RedbStore, StoreGateway};

/// 服务器状态 - 持有所有服务的共享引用
///
/// Clone 只复制 Arc。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Arc<dyn StoreGateway> | 存储网关 |
/// | tables | DiningTableRepository | 桌台仓库 (共享创建锁) |
/// | admission | Arc<AdmissionController> | 预订准入 |
/// | started_at | Instant | 启动时间 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn StoreGateway>,
    tables: DiningTableRepository,
    pub admission: Arc<AdmissionController>,
    pub started_at: Instant,
}

impl ServerState {
    /// 用给定存储构造状态
    pub fn new(config: Config, store: Arc<dyn StoreGateway>) -> Self {
        let policy = config.reservation_policy.build();
        let admission = Arc::new(AdmissionController::new(store.clone(), policy));
        Self {
            config,
            tables: DiningTableRepository::new(store.clone()),
            store,
            admission,
            started_at: Instant::now(),
        }
    }

    /// 按配置打开存储并构造状态
    ///
    /// redb 后端会先创建工作目录。
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store: Arc<dyn StoreGateway> = match config.store_backend {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::Redb => {
                config.ensure_work_dir()?;
                let path = config.database_path();
                tracing::info!(path = %path.display(), "Opening reservation store");
                Arc::new(RedbStore::open(&path)?)
            }
        };

        tracing::info!(
            backend = store.backend(),
            policy = %config.reservation_policy,
            "Server state initialized"
        );
        Ok(Self::new(config.clone(), store))
    }

    pub fn tables(&self) -> DiningTableRepository {
        self.tables.clone()
    }

    pub fn reservations(&self) -> ReservationRepository {
        ReservationRepository::new(self.store.clone())
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
