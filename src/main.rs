use std::env;

use clap::Parser;
use config::Config;
use dotenvy::dotenv;

use rutero::cli::{Cli, run};
use rutero::models::config::ClientConfig;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
    let config_dir = cli.config_dir.to_string_lossy();

    let settings = Config::builder()
        // Add `<config-dir>/default.yaml`
        .add_source(config::File::with_name(&format!("{config_dir}/default")))
        // Add environment-specific overrides
        .add_source(
            config::File::with_name(&format!("{config_dir}/{app_env}")).required(false),
        )
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let client_config = match settings.try_deserialize::<ClientConfig>() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli.command, &client_config) {
        log::error!("{err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
