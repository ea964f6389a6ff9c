use clap::Parser;
use minilink_cache::{MokaUrlCache, RedisUrlCache};
use minilink_core::{MappingStore, UrlCache};
use minilink_gateway::cli::Cli;
use minilink_gateway::{App, AppState};
use minilink_generator::RandomCodeGenerator;
use minilink_resolver::ResolutionService;
use minilink_shortener::CreationService;
use minilink_store::InMemoryMappingStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Cli::try_parse()?;
    let store = Arc::new(InMemoryMappingStore::new());

    match config.redis_url {
        Some(redis_url) => {
            let client = redis::Client::open(redis_url.as_str())?;
            let conn = client.get_multiplexed_async_connection().await?;
            info!(redis_url = %redis_url, "using Redis cache backend");
            serve(config.listen_addr, store, Arc::new(RedisUrlCache::new(conn))).await
        }
        None => {
            info!("using in-process Moka cache backend");
            serve(config.listen_addr, store, Arc::new(MokaUrlCache::new())).await
        }
    }
}

async fn serve<S, C>(
    listen_addr: SocketAddr,
    store: Arc<S>,
    cache: Arc<C>,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: MappingStore,
    C: UrlCache,
{
    let creation = Arc::new(CreationService::new(
        Arc::clone(&store),
        Arc::clone(&cache),
        RandomCodeGenerator::new(),
    ));
    let resolution = Arc::new(ResolutionService::new(store, cache));
    let state = AppState::new(creation, resolution);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "starting gateway server");
    axum::serve(listener, App::router(state)).await?;
    Ok(())
}
