use anyhow::Context;
use camp::domain::config::ApiConfig;
use camp::kernel::config::load_config;
use camp_logger::Logger;
use camp_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build().await?.run().await
}
