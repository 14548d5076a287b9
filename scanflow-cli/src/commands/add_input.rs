//! add-input command

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::cli::exit_codes;
use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct AddInputArgs {
    /// Project name
    #[arg(long, value_name = "NAME")]
    pub project: String,

    /// Input files to copy into the project (repeatable)
    #[arg(long = "input-file", value_name = "FILE", required = true)]
    pub input_files: Vec<PathBuf>,
}

pub async fn run(ctx: &CliContext, args: &AddInputArgs) -> Result<i32> {
    let project = match ctx.projects.get_project(&args.project).await {
        Ok(project) => project,
        Err(e) => {
            ctx.output.error(&e.to_string());
            return Ok(exit_codes::FAILURE);
        }
    };

    if let Err(e) = ctx.projects.add_input_files(&project, &args.input_files) {
        ctx.output.error(&e.to_string());
        return Ok(exit_codes::FAILURE);
    }

    ctx.output
        .print("File(s) copied to the project inputs directory");
    Ok(exit_codes::SUCCESS)
}
