use reservation_server::{Server, ServerState, StoreBackend, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment()?;

    print_banner();

    tracing::info!("Reservation server starting...");

    if config.is_production() && config.store_backend == StoreBackend::Memory {
        tracing::warn!("In-memory store in production: reservations are lost on restart");
    }

    // 2. 初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
