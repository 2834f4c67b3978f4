//! Command handlers

use std::path::Path;

use tracing::info;

use weld_core::errors::{CalcError, CalcResult};
use weld_core::file_io::{load_project, save_project};
use weld_core::project::Project;
use weld_core::settings::{load_settings, save_settings, EstimatorSettings};

use crate::cli::{Cli, Commands, OutputFormat};
use crate::output;

/// Execute CLI command
pub fn execute(cli: Cli) -> CalcResult<()> {
    let override_settings = match &cli.settings {
        Some(path) => {
            let settings = load_settings(path)?;
            info!(path = %path.display(), "using settings file");
            Some(settings)
        }
        None => None,
    };

    match &cli.command {
        Commands::Estimate { project, detail } => {
            let project = load_project(project)?;
            cmd_estimate(&project, override_settings.as_ref(), cli.format, *detail)
        }
        Commands::Demo { detail } => cmd_estimate(&Project::demo(), override_settings.as_ref(), cli.format, *detail),
        Commands::InitSettings { path, force } => {
            ensure_writable(path, *force)?;
            let settings = override_settings.unwrap_or_default();
            save_settings(&settings, path)?;
            println!("Wrote settings to {}", path.display());
            Ok(())
        }
        Commands::InitProject { path, force } => {
            ensure_writable(path, *force)?;
            let mut project = Project::demo();
            if let Some(settings) = override_settings {
                project.settings = settings;
            }
            save_project(&project, path)?;
            println!("Wrote sample project with {} items to {}", project.item_count(), path.display());
            Ok(())
        }
    }
}

fn cmd_estimate(
    project: &Project,
    settings: Option<&EstimatorSettings>,
    format: OutputFormat,
    detail: bool,
) -> CalcResult<()> {
    let settings = settings.unwrap_or(&project.settings);
    info!(job_id = %project.meta.job_id, items = project.item_count(), "estimating project");
    let estimate = project.estimate_with(settings)?;

    match format {
        OutputFormat::Json => output::print_json(&estimate),
        OutputFormat::Table => {
            output::print_project_table(&project.meta, &estimate);
            if detail {
                for line in &estimate.items {
                    output::print_item_detail(&line.estimate);
                }
            }
            Ok(())
        }
    }
}

/// Refuse to clobber an existing file unless forced
fn ensure_writable(path: &Path, force: bool) -> CalcResult<()> {
    if path.exists() && !force {
        return Err(CalcError::file_error(
            "create",
            path.display().to_string(),
            "File already exists (use --force to overwrite)",
        ));
    }
    Ok(())
}
