//! status command

use anyhow::Result;
use clap::Args;

use scanflow_core::util::count_group_by;

use crate::cli::exit_codes;
use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Project name
    #[arg(long, value_name = "NAME")]
    pub project: String,
}

pub async fn run(ctx: &CliContext, args: &StatusArgs) -> Result<i32> {
    let project = match ctx.projects.get_project(&args.project).await {
        Ok(project) => project,
        Err(e) => {
            ctx.output.error(&e.to_string());
            return Ok(exit_codes::FAILURE);
        }
    };

    ctx.output.print(&format!("Project: {}", project.name));

    let counts = ctx.projects.counts(&project).await?;
    ctx.output
        .print(&format!(" - CodebaseResource: {}", counts.resources));
    ctx.output
        .print(&format!(" - DiscoveredPackage: {}", counts.packages));
    ctx.output
        .print(&format!(" - ProjectError: {}", counts.errors));

    if counts.resources > 0 {
        let resources = ctx
            .repositories
            .resources
            .list_for_project(project.uuid)
            .await?;
        let statuses = count_group_by(resources.iter().map(|resource| {
            resource
                .status
                .map(|status| status.to_string())
                .unwrap_or_else(|| "no-status".to_string())
        }));
        ctx.output.print("Resource status:");
        for (status, count) in statuses {
            ctx.output.print(&format!(" - {}: {}", status, count));
        }
    }

    for run in ctx.projects.project_runs(&project).await? {
        let label = ctx.output.status_label(run.status());
        match run.execution_time() {
            Some(seconds) => ctx.output.print(&format!(
                " {} {} (executed in {} seconds)",
                label, run.pipeline_name, seconds
            )),
            None => ctx
                .output
                .print(&format!(" {} {}", label, run.pipeline_name)),
        }
        if !run.log.is_empty() {
            for line in run.log.lines() {
                ctx.output.print(line);
            }
        }
    }

    Ok(exit_codes::SUCCESS)
}
