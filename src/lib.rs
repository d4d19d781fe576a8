//! Shelf application library
//!
//! Hosts the project modules (currently the in-memory bookshelf) and the
//! bootstrap sequence shared by the `shelf-app` binary and the CLI.

pub mod modules;
pub mod utils;

use anyhow::Context;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::*;

/// Registry with every project module registered.
pub fn build_registry() -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry).context("failed to register modules")?;
    Ok(registry)
}

/// Initialize and start every module, serve HTTP until a shutdown signal,
/// then stop the modules in reverse order.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry()?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = shelf_http::start_server(&registry, &settings, shelf_http::shutdown_signal()).await;

    // Stop modules even when the server failed, but report the server error first
    let stopped = registry.stop_modules().await;
    served?;
    stopped?;

    tracing::info!("shelf shutdown complete");
    Ok(())
}
