//! Library - 电子图书、文章管理系统
//!
//! 组装入口：配置 → 日志 → 连接池 → 仓储 → 处理器 → HTTP 服务器。
//! 进程是否以错误退出只在这里决定。

use std::sync::Arc;

use library::application::FatalSignal;
use library::config::{load_config, print_config, LogConfig};
use library::infrastructure::http::{AppState, HttpServer, ServerConfig};
use library::infrastructure::persistence::postgres::{
    create_pool, ensure_schema, DatabaseConfig, PostgresArticleRepository,
    PostgresBookRepository,
};

fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log.default_filter()));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Library - 电子图书、文章管理系统");
    print_config(&config);

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.data_uri.clone(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    if config.database.create_schema {
        ensure_schema(&pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create schema: {}", e))?;
    }

    // 创建 Repository 适配器
    let article_repo = Arc::new(PostgresArticleRepository::new(pool.clone()));
    let book_repo = Arc::new(PostgresBookRepository::new(pool.clone()));

    // 事务无法确定结果时由用例触发
    let fatal = FatalSignal::new();

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(
        &config.host,
        config.port,
        config.cors.allow_origins.clone(),
    );
    let state = AppState::new(article_repo, book_repo, fatal.clone());
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    let shutdown = {
        let fatal = fatal.clone();
        async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => match result {
                    Ok(()) => tracing::info!("Received shutdown signal"),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to listen for ctrl-c");
                        fatal.tripped().await;
                    }
                },
                _ = fatal.tripped() => {
                    tracing::error!("Shutting down after unresolved transaction");
                }
            }
        }
    };
    server.run_with_shutdown(shutdown).await?;

    pool.close().await;

    if fatal.is_tripped() {
        anyhow::bail!("Database transaction left unresolved, connection state unknown");
    }

    tracing::info!("Server shutdown complete");

    Ok(())
}
