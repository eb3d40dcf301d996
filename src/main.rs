use std::process;

use fareline::config::Config;
use fareline::engine::Engine;
use fareline::error::Error;
use fareline::external::{nominatim::NominatimClient, osrm::OsrmClient};
use fareline::server::serve;

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;

    let distances = OsrmClient::new(&config.routing)?;
    let places = NominatimClient::new(&config.places)?;

    let addr = config.listen_addr;
    let engine = Engine::new(config, Box::new(distances), Box::new(places));

    serve(engine, addr).await
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run().await {
        tracing::error!(code = err.code, "{}", err);
        process::exit(1);
    }
}
