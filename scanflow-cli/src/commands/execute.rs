//! execute command

use anyhow::Result;
use clap::Args;

use scanflow_core::domain::project::Project;

use crate::cli::exit_codes;
use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct ExecuteArgs {
    /// Project name
    #[arg(long, value_name = "NAME")]
    pub project: String,
}

/// Run every not-yet-started pipeline of the project, oldest first.
/// Stops at the first failure with a non-zero exit code.
pub(crate) async fn execute_project_runs(ctx: &CliContext, project: &Project) -> Result<i32> {
    let pipeline_ctx = ctx.pipeline_context(project);

    while let Some(run) = ctx.projects.next_run(project).await? {
        ctx.output.print(&format!(
            "Pipeline {} run in progress...",
            run.pipeline_name
        ));

        let executed = ctx.runner.execute(&run, &pipeline_ctx).await?;
        if executed.task_succeeded() {
            ctx.output.success(&format!(
                "{} successfully executed on project {}",
                executed.pipeline_name, project.name
            ));
        } else {
            ctx.output
                .error(&format!("Error during {} execution:", executed.pipeline_name));
            ctx.output.error(executed.log.trim_end());
            return Ok(exit_codes::FAILURE);
        }
    }

    Ok(exit_codes::SUCCESS)
}

pub async fn run(ctx: &CliContext, args: &ExecuteArgs) -> Result<i32> {
    let project = match ctx.projects.get_project(&args.project).await {
        Ok(project) => project,
        Err(e) => {
            ctx.output.error(&e.to_string());
            return Ok(exit_codes::FAILURE);
        }
    };

    if ctx.projects.next_run(&project).await?.is_none() {
        ctx.output
            .error(&format!("No pipelines to run on project {}", project.name));
        return Ok(exit_codes::FAILURE);
    }

    execute_project_runs(ctx, &project).await
}
