//! create-project command

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::cli::exit_codes;
use crate::commands::execute::execute_project_runs;
use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct CreateProjectArgs {
    /// Project name, unique across the workspace
    pub name: String,

    /// Pipelines to attach, in execution order (repeatable)
    #[arg(long = "pipeline", value_name = "PIPELINE")]
    pub pipelines: Vec<String>,

    /// Input files to copy into the project (repeatable)
    #[arg(long = "input-file", value_name = "FILE")]
    pub input_files: Vec<PathBuf>,

    /// Execute the attached pipelines right away
    #[arg(long)]
    pub execute: bool,
}

pub async fn run(ctx: &CliContext, args: &CreateProjectArgs) -> Result<i32> {
    if args.execute && args.pipelines.is_empty() {
        ctx.output
            .error("The --execute option requires one or more pipelines.");
        return Ok(exit_codes::FAILURE);
    }

    // validate pipelines and inputs before creating anything
    if let Err(e) = ctx.projects.validate_pipelines(&ctx.registry, &args.pipelines) {
        ctx.output.error(&e.to_string());
        return Ok(exit_codes::FAILURE);
    }
    if let Err(e) = ctx.projects.validate_input_files(&args.input_files) {
        ctx.output.error(&e.to_string());
        return Ok(exit_codes::FAILURE);
    }

    let project = match ctx.projects.create_project(&args.name).await {
        Ok(project) => project,
        Err(e) => {
            ctx.output.error(&e.to_string());
            return Ok(exit_codes::FAILURE);
        }
    };

    ctx.projects.add_input_files(&project, &args.input_files)?;
    for pipeline in &args.pipelines {
        ctx.projects
            .add_pipeline(&project, &ctx.registry, pipeline)
            .await?;
    }

    ctx.output.print(&format!(
        "Project {} created with work directory {}",
        project.name,
        project.work_path().display()
    ));

    if args.execute {
        return execute_project_runs(ctx, &project).await;
    }

    Ok(exit_codes::SUCCESS)
}
