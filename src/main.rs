// Entrypoint for the listing CLI.
// - Loads `.env`, sets up logging on stderr so it stays out of the prompts.
// - Reads the API base URL once and hands it to the client explicitly.

use mercari_listing_cli::{api::ApiClient, config::Config, ui::main_menu};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mercari_listing_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    tracing::info!(api_url = %config.api_url, "starting listing client");

    let api = ApiClient::new(&config)?;
    main_menu(api)?;
    Ok(())
}
