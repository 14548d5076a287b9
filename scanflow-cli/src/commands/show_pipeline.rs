//! show-pipeline command

use anyhow::Result;
use clap::Args;

use crate::cli::exit_codes;
use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct ShowPipelineArgs {
    /// Project name
    #[arg(long, value_name = "NAME")]
    pub project: String,
}

pub async fn run(ctx: &CliContext, args: &ShowPipelineArgs) -> Result<i32> {
    let project = match ctx.projects.get_project(&args.project).await {
        Ok(project) => project,
        Err(e) => {
            ctx.output.error(&e.to_string());
            return Ok(exit_codes::FAILURE);
        }
    };

    for run in ctx.projects.project_runs(&project).await? {
        ctx.output.print(&format!(
            " {} {}",
            ctx.output.status_label(run.status()),
            run.pipeline_name
        ));
    }

    Ok(exit_codes::SUCCESS)
}
