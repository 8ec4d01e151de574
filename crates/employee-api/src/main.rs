use employee_api::{logging, App, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    if config.is_production() {
        logging::init_logging_json();
    } else {
        logging::init_logging();
    }

    let app = App::with_config(config).await?;
    app.run().await?;

    Ok(())
}
