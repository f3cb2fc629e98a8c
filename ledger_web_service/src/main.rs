//! The "Ledger Web Service's" entry point.

use ledger_web_service::bootstrap;
use ledger_web_service::config::Config;
use ledger_web_service::routes::routes;
use std::env;
use std::error::Error;
use std::sync::Arc;
use warp::Filter;

/// The "Ledger Web Service's" entry point.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "ledger=info");
    }
    pretty_env_logger::init();

    let log = warp::log("ledger");

    let config = Config::from_env();
    log::debug!("{:?}", config);

    let ledger = match bootstrap::load_ledger(&config).await {
        Ok(ledger) => Arc::new(ledger),
        Err(err) => {
            log::error!("{}", err);
            return Err(err.into());
        }
    };

    let routes = routes(ledger).with(log);

    // Start up the server
    log::info!("Listening on http://{}", config.addr);
    warp::serve(routes).run(config.addr).await;

    Ok(())
}
