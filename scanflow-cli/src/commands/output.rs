//! output command

use anyhow::Result;
use clap::{Args, ValueEnum};

use scanflow_core::application::reporting::{write_output, OutputFormat};

use crate::cli::exit_codes;
use crate::context::CliContext;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormatArg {
    #[default]
    Json,
    Csv,
    Xlsx,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(format: OutputFormatArg) -> Self {
        match format {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Xlsx => OutputFormat::Xlsx,
        }
    }
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Project name
    #[arg(long, value_name = "NAME")]
    pub project: String,

    /// Output file format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormatArg,
}

pub async fn run(ctx: &CliContext, args: &OutputArgs) -> Result<i32> {
    let project = match ctx.projects.get_project(&args.project).await {
        Ok(project) => project,
        Err(e) => {
            ctx.output.error(&e.to_string());
            return Ok(exit_codes::FAILURE);
        }
    };

    let packages = ctx
        .repositories
        .packages
        .list_for_project(project.uuid)
        .await?;
    let resources = ctx
        .repositories
        .resources
        .list_for_project(project.uuid)
        .await?;

    let paths = write_output(&project, &packages, &resources, args.format.into())?;
    for path in paths {
        ctx.output.print(&path.display().to_string());
    }

    Ok(exit_codes::SUCCESS)
}
