use notepad::{
    build_app,
    config::Config,
    database::Database,
    error::AppResult,
    handlers::AppState,
    repositories::Repositories,
};
use tower_sessions::MemoryStore;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 加载配置；文件不存在时写出默认配置，解析或校验失败则退出
fn load_config() -> AppResult<Config> {
    let path = Config::path_from_env();
    match Config::load_or_init(&path) {
        Ok(config) => {
            tracing::info!("已加载配置文件: {}", path);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("配置文件 {} 无效: {}", path, e);
            Err(e)
        }
    }
}

/// 连接数据库并按需迁移；失败时返回 None，服务以内存模式启动
async fn connect_database(config: &Config) -> Option<Database> {
    let db = match Database::new(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            tracing::warn!("数据库连接失败，服务将以内存存储模式启动: {}", e);
            return None;
        }
    };

    if let Err(e) = db.verify_connection().await {
        tracing::warn!("数据库验证失败: {}", e);
    }

    if config.database.auto_migrate {
        if let Err(e) = db.migrate().await {
            tracing::error!("数据库迁移失败，服务将以内存存储模式启动: {}", e);
            return None;
        }
    }

    Some(db)
}

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notepad=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    let addr = config.server_addr();

    let database = connect_database(&config).await;

    let app = match database.clone() {
        Some(db) => {
            let store = PostgresStore::new(db.pool().clone());
            store.migrate().await?;
            tracing::info!("会话存储: PostgreSQL");
            let state = AppState::new(config, Repositories::postgres(db.clone()), Some(db));
            build_app(state, store)
        }
        None => {
            tracing::warn!("会话存储: 内存（重启后所有会话失效）");
            let state = AppState::in_memory(config);
            build_app(state, MemoryStore::default())
        }
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("服务器启动成功，监听地址: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = database {
        db.close().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("监听退出信号失败: {}", e);
    }
    tracing::info!("收到退出信号，正在停止服务...");
}
