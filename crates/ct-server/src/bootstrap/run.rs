use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use ct_app::AppRuntime;
use ct_core::ports::HotkeyPort;
use tokio::net::TcpListener;
use tokio::runtime::Handle;
use tracing::{error, info, warn};

use super::paths::{find_static_dir, AppPaths};
use super::wiring::{build_deps, WiredDeps};
use crate::http::{build_router, AppState};

/// Run until Ctrl-C.
///
/// ## Behavior / 行为
/// 1. Wire adapters and start the runtime (fails if history cannot open)
/// 2. Start the hotkey listener on a dedicated thread
/// 3. Serve the HTTP API on `127.0.0.1:{ui.port}`
/// 4. On Ctrl-C stop serving, then shut the runtime down without waiting
///    for in-flight jobs
pub async fn run(paths: AppPaths) -> anyhow::Result<()> {
    let WiredDeps { deps, hotkey } = build_deps(&paths, Handle::current())?;
    let runtime = AppRuntime::start(deps).await.context("start runtime")?;

    let dispatcher = runtime.usecases().dispatcher();
    let source: Arc<dyn HotkeyPort> = hotkey.clone();
    let listener_thread = thread::Builder::new()
        .name("hotkey-listener".into())
        .spawn(move || dispatcher.run_hotkey_listener(source))
        .context("spawn hotkey listener thread")?;

    let port = runtime.usecases().get_settings().execute().await.ui.port;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let static_dir = find_static_dir();
    match &static_dir {
        Some(dir) => info!(dir = %dir.display(), "Serving web UI"),
        None => warn!("No static directory found; only /api is served"),
    }
    let router = build_router(AppState::new(runtime.clone()), static_dir);

    let tcp = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(%addr, "HTTP server listening");

    let served = axum::serve(tcp, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error");

    runtime.shutdown().await;
    hotkey.close();
    if listener_thread.join().is_err() {
        warn!("Hotkey listener thread panicked");
    }
    info!("Shutdown complete");

    served
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}
