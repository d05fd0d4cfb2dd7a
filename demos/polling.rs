//! # Example: polling
//!
//! Runs two managed tasks side by side and stops them with a grace window:
//! - `poller` honours cancellation and stops within one interval;
//! - `stubborn` ignores it and gets abandoned when the grace window expires.
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example polling
//! ```

use std::{sync::Arc, time::Duration};

use hosted_task::{
    Config, HostedService, LogWriter, ManagedTask, PollingWork, Subscribe, WorkError, WorkFn,
    WorkRef,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut cfg = Config::default();
    cfg.grace = Duration::from_millis(200);

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];

    let poller = ManagedTask::builder(Arc::new(PollingWork::with_config("poller", &cfg)))
        .with_config(cfg.clone())
        .with_subscribers(subs.clone())
        .build();

    let stubborn_work: WorkRef = WorkFn::arc("stubborn", |_ctx: CancellationToken| async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Ok::<(), WorkError>(())
    });
    let stubborn = ManagedTask::builder(stubborn_work)
        .with_config(cfg.clone())
        .with_subscribers(subs)
        .build();

    let services: Vec<Arc<dyn HostedService>> = vec![Arc::new(poller), Arc::new(stubborn)];

    let start_ctx = CancellationToken::new();
    for svc in &services {
        svc.start(start_ctx.clone()).await?;
    }

    tokio::time::sleep(Duration::from_millis(300)).await;

    // One deadline shared by every service, fired after the grace window.
    let deadline = CancellationToken::new();
    let timer = {
        let deadline = deadline.clone();
        tokio::spawn(async move {
            tokio::time::sleep(cfg.grace).await;
            deadline.cancel();
        })
    };

    for svc in &services {
        let outcome = svc.stop(deadline.clone()).await;
        println!("{}: {outcome:?}", svc.name());
    }
    timer.abort();

    drop(services);
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}
