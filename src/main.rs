//! stockreel
//!
//! Command-line front end for stock footage search and pan/zoom slideshows.
//!
//! # Usage
//!
//! ```bash
//! stockreel video --term forest --term lake --min-duration 10 --orientation landscape
//! stockreel images --term mountains --count 5
//! stockreel slideshow --image a.jpg --image b.jpg --output reel.mp4
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use stockreel::adapters::init_logging;
use stockreel::app::DefaultAppContainer;
use stockreel::cli::{commands, Cli, Commands};
use stockreel::config_initialization::initialize_configuration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration(&cli)?;
    init_logging(&config.log.level, config.log.json).context("Failed to initialize logging")?;
    debug!(base_url = %config.provider.base_url, ffmpeg = %config.render.ffmpeg_path, "Configuration loaded");

    let container = DefaultAppContainer::new(&config).context("Failed to initialize adapters")?;

    match cli.command {
        Commands::Video(args) => {
            info!("Executing video command");
            commands::video(&container, &config, args).await?;
        }
        Commands::Images(args) => {
            info!("Executing images command");
            commands::images(&container, &config, args).await?;
        }
        Commands::Preview(args) => {
            info!("Executing preview command");
            commands::preview(&container, args).await?;
        }
        Commands::Animate(args) => {
            info!("Executing animate command");
            commands::animate(&container, args).await?;
        }
        Commands::Concat(args) => {
            info!("Executing concat command");
            commands::concat(&container, args).await?;
        }
        Commands::Slideshow(args) => {
            info!("Executing slideshow command");
            commands::slideshow(&container, args).await?;
        }
    }

    Ok(())
}
