use clap::Parser;
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "MINILINK_GATEWAY_LISTEN_ADDR";
pub const REDIS_URL_ENV: &str = "MINILINK_REDIS_URL";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Parser)]
#[command(name = "minilink-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Redis connection URL; when absent the in-process cache is used.
    #[arg(long, env = REDIS_URL_ENV)]
    pub redis_url: Option<String>,
}
