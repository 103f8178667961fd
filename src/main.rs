use std::error::Error;

use gloo_ai_service::telemetry;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when present; hosted
    // deployments inject them directly.
    dotenvy::dotenv().ok();

    telemetry::init("info", Level::INFO)?;

    api::start().await?;

    Ok(())
}
