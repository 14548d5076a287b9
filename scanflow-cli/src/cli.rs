//! scanflow CLI - command definitions and dispatch

use clap::{Parser, Subcommand};

use crate::commands;
use crate::context::CliContext;

/// scanflow - codebase scanning projects and pipelines
#[derive(Parser, Debug)]
#[command(
    name = "scanflow",
    version,
    about = "Manage codebase scanning projects and their pipelines",
    long_about = "scanflow manages analysis projects: each project owns a work directory, \
                  input files, and an ordered list of pipeline runs producing codebase \
                  resources and discovered packages."
)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project
    CreateProject(commands::create_project::CreateProjectArgs),

    /// Copy input files into a project
    AddInput(commands::add_input::AddInputArgs),

    /// Attach pipelines to a project
    AddPipeline(commands::add_pipeline::AddPipelineArgs),

    /// List a project's pipelines and their statuses
    ShowPipeline(commands::show_pipeline::ShowPipelineArgs),

    /// Run all not-yet-started pipelines of a project
    Execute(commands::execute::ExecuteArgs),

    /// Display project record counts and pipeline states
    Status(commands::status::StatusArgs),

    /// Write the project results to an output file
    Output(commands::output::OutputArgs),

    /// Delete a project, its records and its work directory
    DeleteProject(commands::delete_project::DeleteProjectArgs),
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
    context: CliContext,
}

impl CliApp {
    pub async fn new() -> anyhow::Result<Self> {
        let cli = Cli::parse();
        let context = CliContext::new(&cli).await?;
        Ok(Self { cli, context })
    }

    pub async fn run(self) -> anyhow::Result<i32> {
        let ctx = &self.context;
        let exit_code = match self.cli.command {
            Commands::CreateProject(ref args) => commands::create_project::run(ctx, args).await,
            Commands::AddInput(ref args) => commands::add_input::run(ctx, args).await,
            Commands::AddPipeline(ref args) => commands::add_pipeline::run(ctx, args).await,
            Commands::ShowPipeline(ref args) => commands::show_pipeline::run(ctx, args).await,
            Commands::Execute(ref args) => commands::execute::run(ctx, args).await,
            Commands::Status(ref args) => commands::status::run(ctx, args).await,
            Commands::Output(ref args) => commands::output::run(ctx, args).await,
            Commands::DeleteProject(ref args) => commands::delete_project::run(ctx, args).await,
        }?;

        Ok(exit_code)
    }
}

/// Process exit codes
pub mod exit_codes {
    /// Command completed
    pub const SUCCESS: i32 = 0;
    /// Validation or execution failure
    pub const FAILURE: i32 = 1;
}
