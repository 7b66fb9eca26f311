//! Serve command - run the HTTP API until Ctrl+C or SIGTERM.

use tracing::info;

use rlmk_core::config::ConfigHandle;
use rlmk_core::error::RlmkResult;

pub async fn run(config: ConfigHandle, port: Option<u16>, bind: Option<String>) -> RlmkResult<()> {
    {
        let mut cfg = config.write().await;
        if let Some(port) = port {
            cfg.server.port = port;
        }
        if let Some(bind) = bind {
            cfg.server.bind_address = bind;
        }
    }

    let config = config.snapshot().await;
    info!("database at {}", config.effective_db_path()?.display());
    rlmk_server::serve(config).await
}
