use std::{net::TcpListener, sync::Arc};

use anyhow::Context;
use env_logger::Env;
use ranklist::{configuration::get_configuration, services::Droid, startup::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    log::info!("Listening on {}", address);

    let droid = Droid::new(&configuration.browser);

    run(listener, configuration.auth, Arc::new(droid))?.await?;

    Ok(())
}
