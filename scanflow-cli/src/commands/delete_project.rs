//! delete-project command

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::cli::exit_codes;
use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct DeleteProjectArgs {
    /// Project name
    #[arg(long, value_name = "NAME")]
    pub project: String,

    /// Delete without asking for confirmation
    #[arg(long)]
    pub no_input: bool,
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub async fn run(ctx: &CliContext, args: &DeleteProjectArgs) -> Result<i32> {
    let project = match ctx.projects.get_project(&args.project).await {
        Ok(project) => project,
        Err(e) => {
            ctx.output.error(&e.to_string());
            return Ok(exit_codes::FAILURE);
        }
    };

    if !args.no_input {
        let prompt = format!(
            "Are you sure you want to delete the {} project and all its data? [y/N] ",
            project.name
        );
        if !confirm(&prompt)? {
            ctx.output.warn("Deletion cancelled.");
            return Ok(exit_codes::SUCCESS);
        }
    }

    ctx.projects.delete_project(&project).await?;
    ctx.output.print(&format!(
        "All the {} project data have been removed.",
        project.name
    ));

    Ok(exit_codes::SUCCESS)
}
