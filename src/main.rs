use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use tunnel_auth::config::{self, validation::validate_config, AuthConfig, ConfigError};
use tunnel_auth::observability::init_logging;
use tunnel_auth::{ControlPlaneClient, NewProxy, ProxyBaseConfig};

#[derive(Parser)]
#[command(name = "tunnel-authctl")]
#[command(about = "Query a tunnel control plane for token and proxy authorization", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Control-plane API URL (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    #[arg(long)]
    user: Option<String>,

    #[arg(short, long)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the client token
    CheckToken,
    /// Authorize a proxy and print the resulting transport settings
    CheckProxy {
        #[arg(long)]
        name: String,

        #[arg(long = "type", default_value = "tcp")]
        proxy_type: String,

        /// May be repeated; only the first is sent
        #[arg(long = "custom-domain")]
        custom_domains: Vec<String>,

        #[arg(long, default_value = "")]
        subdomain: String,

        #[arg(long)]
        remote_port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("Warning: logging not initialized: {e}");
    }

    match run(cli.command, &config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %e, "Check failed");
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Config file (or defaults) with command-line overrides applied.
fn load(cli: &Cli) -> Result<AuthConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::read_config(path)?,
        None => AuthConfig::default(),
    };

    let cp = &mut config.control_plane;
    if let Some(url) = &cli.url {
        cp.service_url = url.clone();
    }
    if let Some(user) = &cli.user {
        cp.user = user.clone();
    }
    if let Some(token) = &cli.token {
        cp.api_token = token.clone();
    }
    if let Some(timeout) = cli.timeout {
        cp.request_timeout_secs = timeout;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

async fn run(command: Commands, config: &AuthConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let cp = &config.control_plane;
    let client = ControlPlaneClient::from_config(cp)?
        .with_metrics(config.observability.metrics_enabled);

    match command {
        Commands::CheckToken => {
            let valid = client.check_token(&cp.user, &cp.api_token).await?;
            println!("token {}", if valid { "valid" } else { "rejected" });
            Ok(valid)
        }
        Commands::CheckProxy {
            name,
            proxy_type,
            custom_domains,
            subdomain,
            remote_port,
        } => {
            let mut proxy = ProxyBaseConfig::new(name, proxy_type);
            let msg = NewProxy {
                custom_domains,
                subdomain,
                remote_port,
            };

            let granted = client
                .check_proxy(&cp.user, &mut proxy, &msg, &cp.api_token)
                .await?;
            if granted {
                println!("proxy granted");
                println!("{}", serde_json::to_string_pretty(&proxy)?);
            } else {
                println!("proxy denied");
            }
            Ok(granted)
        }
    }
}
