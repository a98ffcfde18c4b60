use moonly_api::setup;
use moonly_api::telemetry::init_telemetry;
use moonly_core::RelayConfig;

// Use mimalloc as the global allocator for lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = RelayConfig::from_env()?;
    init_telemetry(config.is_production());

    let (_state, router) = setup::initialize_app(config.clone())?;

    setup::server::start_server(&config, router).await?;

    Ok(())
}
