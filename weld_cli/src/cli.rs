//! CLI definition using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for estimates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "weldtime")]
#[command(version)]
#[command(about = "Weld labor estimates for pressure-vessel fabrication")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// TOML settings file overriding the tables embedded in the project
    #[arg(long, short = 's', global = true)]
    pub settings: Option<PathBuf>,

    /// Debug logging (overrides RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate every item in a project file
    Estimate {
        /// Path to a .wtp project file
        project: PathBuf,

        /// Show per-zone and per-process breakdown for each item
        #[arg(long, short = 'd')]
        detail: bool,
    },

    /// Estimate a built-in project with one item of every weld type
    Demo {
        /// Show per-zone and per-process breakdown for each item
        #[arg(long, short = 'd')]
        detail: bool,
    },

    /// Write the default settings as a TOML file
    InitSettings {
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Write a sample project file to start from
    InitProject {
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_estimate() {
        let cli = Cli::try_parse_from(["weldtime", "estimate", "vessel.wtp", "--format", "json", "-s", "shop.toml"])
            .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.settings, Some(PathBuf::from("shop.toml")));
        match cli.command {
            Commands::Estimate { project, detail } => {
                assert_eq!(project, PathBuf::from("vessel.wtp"));
                assert!(!detail);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["weldtime", "demo"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.settings.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_init_commands() {
        let cli = Cli::try_parse_from(["weldtime", "init-settings", "shop.toml", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::InitSettings { force: true, .. }));

        let cli = Cli::try_parse_from(["weldtime", "init-project", "new.wtp"]).unwrap();
        assert!(matches!(cli.command, Commands::InitProject { force: false, .. }));
    }

    #[test]
    fn test_missing_project_path_rejected() {
        assert!(Cli::try_parse_from(["weldtime", "estimate"]).is_err());
    }
}
