use clap::Parser;
use relm4::prelude::*;
use spindle::cli::{Cli, Commands};
use spindle::config;
use spindle::gui::app::AppModel;
use spindle::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if let Some(Commands::InitConfig) = cli.command {
        let path = config::resolve_path(cli.config.as_deref())?;
        let path = config::write_default_config(&path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = config::load_or_default(cli.config.as_deref());
    for feature in &cli.disabled {
        config.features.set(*feature, false);
    }
    if cli.sidebar {
        config.sidebar.open = true;
    }

    let config_path = match config::resolve_path(cli.config.as_deref()) {
        Ok(path) => Some(path),
        Err(e) => {
            log::warn!("Config reload disabled: {}", e);
            None
        }
    };

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config_path.clone());

    // GTK must not see the flags clap already consumed
    let app = RelmApp::new("org.spindle.demo").with_args(Vec::new());

    app.run::<AppModel>((config, config_path, rx));
    Ok(())
}
