use tokio::net::TcpListener;
use todo_core::{seed, TodoService};
use todo_server::{telemetry, ServerConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "configuration error");
            std::process::exit(1);
        }
    };

    let service = TodoService::in_memory(config.item_rules);
    if config.seed {
        seed::load(&service).await?;
    }

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, item_name_max_length = config.item_rules.name_max_length, "listening");
    todo_server::run(listener, service).await?;
    Ok(())
}
