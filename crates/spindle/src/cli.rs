use clap::{Parser, Subcommand};
use cursorkit::Feature;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spindle", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read settings from this file instead of the platform config directory
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Start with a feature switched off (rotation, scaling, idle); repeatable
    #[arg(short = 'd', long = "disable", value_name = "FEATURE")]
    pub disabled: Vec<Feature>,

    /// Start with the sidebar open
    #[arg(long)]
    pub sidebar: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write the default configuration file and print its path.
    InitConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disable_flags() {
        let cli = Cli::try_parse_from(["spindle", "-d", "rotation", "--disable", "IDLE"]).unwrap();
        assert_eq!(cli.disabled, vec![Feature::Rotation, Feature::Idle]);
        assert!(cli.command.is_none());
        assert!(!cli.sidebar);
    }

    #[test]
    fn test_unknown_feature_is_rejected() {
        assert!(Cli::try_parse_from(["spindle", "--disable", "wobble"]).is_err());
    }

    #[test]
    fn test_init_config_subcommand() {
        let cli = Cli::try_parse_from(["spindle", "--config", "/tmp/s.toml", "init-config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::InitConfig)));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
    }
}
