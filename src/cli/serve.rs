//! Serve command handler
//!
//! Starts the HTTP server in foreground mode. Clustering and demo settings
//! can be overridden for this run without touching the config file.

use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use tracing::info;

/// Serve command arguments
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Largest bucket shown without reduction
    #[arg(long)]
    pub pass_through_limit: Option<usize>,

    /// Viewport width per demo post, in projected units
    #[arg(long)]
    pub demo_spacing: Option<f64>,
}

impl ServeArgs {
    /// Layer the overrides onto a loaded config
    ///
    /// Cluster and demo values go through `Config::set`, so they are
    /// validated like `config set` input.
    fn apply(self, mut config: Config) -> Result<Config> {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(limit) = self.pass_through_limit {
            config.set("cluster.pass_through_limit", &limit.to_string())?;
        }
        if let Some(spacing) = self.demo_spacing {
            config.set("demo.spacing", &spacing.to_string())?;
        }
        Ok(config)
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = args.apply(Config::load()?)?;
    let params = config.cluster_params();

    info!(
        "Starting mood-map server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );
    info!(
        "Cluster cells {}x{} of viewport width, pass-through limit {}, demo spacing {}",
        params.cell_width_ratio,
        params.cell_height_ratio,
        params.pass_through_limit,
        config.demo.spacing
    );

    server::run(config).await
}
