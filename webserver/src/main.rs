//! Tuition webserver entry point

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use registry::{InMemoryTuitionStore, JsonFileTuitionStore, TuitionRegistry, TuitionStore};
use shared::{logging, service_info, ServiceId};
use tokio::signal;

use webserver::{Args, StoreBackend, WebServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    ServiceId::init_webserver();
    logging::init_tracing(Some(&args.log_level));
    logging::log_startup(ServiceId::current(), "tuition webserver");

    match args.store {
        StoreBackend::Memory => {
            service_info!(ServiceId::current(), "🔧 Using in-memory store");
            serve(&args, InMemoryTuitionStore::new()).await
        }
        StoreBackend::File => {
            let store = JsonFileTuitionStore::open(&args.data_file)
                .await
                .with_context(|| format!("opening {}", args.data_file.display()))?;
            serve(&args, store).await
        }
    }
}

async fn serve<S: TuitionStore + 'static>(args: &Args, store: S) -> anyhow::Result<()> {
    let bind_address = args.bind_address()?;
    let registry = TuitionRegistry::new(Arc::new(store), args.registry_config()?)?;
    let webserver = WebServer::new(bind_address, registry);

    webserver.run(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(ServiceId::current(), "Received Ctrl+C signal"),
        Err(err) => {
            logging::log_error(ServiceId::current(), "Signal handling", &err);
            std::future::pending::<()>().await;
        }
    }
}
