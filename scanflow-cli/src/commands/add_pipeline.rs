//! add-pipeline command

use anyhow::Result;
use clap::Args;

use crate::cli::exit_codes;
use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct AddPipelineArgs {
    /// Project name
    #[arg(long, value_name = "NAME")]
    pub project: String,

    /// Pipelines to attach, in the given order
    #[arg(value_name = "PIPELINE", required = true)]
    pub pipelines: Vec<String>,
}

pub async fn run(ctx: &CliContext, args: &AddPipelineArgs) -> Result<i32> {
    let project = match ctx.projects.get_project(&args.project).await {
        Ok(project) => project,
        Err(e) => {
            ctx.output.error(&e.to_string());
            return Ok(exit_codes::FAILURE);
        }
    };

    if let Err(e) = ctx.projects.validate_pipelines(&ctx.registry, &args.pipelines) {
        ctx.output.error(&e.to_string());
        return Ok(exit_codes::FAILURE);
    }

    for pipeline in &args.pipelines {
        ctx.projects
            .add_pipeline(&project, &ctx.registry, pipeline)
            .await?;
    }

    ctx.output.print("Pipeline(s) added to the project");
    Ok(exit_codes::SUCCESS)
}
