use anyhow::Result;
use hostinv::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // stdout carries only the payload
        .init();

    tracing::info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "capturing host inventory"
    );

    let app_config = config::AppConfig::load()?;
    let mut repo = inventory_repo::InventoryRepo::new(&app_config.collection);
    let snapshot = repo.snapshot();
    tracing::info!(
        host = %snapshot.host.name,
        disks = snapshot.disks.len(),
        partitions = snapshot.partitions.len(),
        interfaces = snapshot.interfaces.len(),
        "inventory captured"
    );

    let json = if app_config.output.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");
    Ok(())
}
