//! scanflow - project and pipeline management from the command line

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let exit_code = match cli::CliApp::new().await {
        Ok(app) => match app.run().await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                cli::exit_codes::FAILURE
            }
        },
        Err(e) => {
            eprintln!("Error: {:#}", e);
            cli::exit_codes::FAILURE
        }
    };

    std::process::exit(exit_code);
}
