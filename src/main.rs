//! Entry point: resolve the question and model, check the credential, and
//! stream one answer to stdout.

use ask::cli::{self, Cli, Config};
use ask::{client, Client, StreamOutcome};
use clap::Parser;
use std::io;
use std::process::ExitCode;

/// Shell convention for SIGINT (128 + 2).
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();

    if args.print_alias {
        return match std::env::current_exe() {
            Ok(exe) => {
                println!("{}", cli::alias_line(&exe));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let model = cli::resolve_model(args.model, std::env::var("MODEL").ok());
    let Some(question) =
        cli::resolve_question(args.question, cli::read_piped_stdin, cli::prompt_question)
    else {
        eprintln!("{}", cli::NO_QUESTION_HINT);
        return ExitCode::FAILURE;
    };

    let Some(api_key) = cli::require_api_key(std::env::var("OPENROUTER_API_KEY").ok()) else {
        // Deliberately stdout, see NO_KEY_HINT.
        println!("{}", cli::NO_KEY_HINT);
        return ExitCode::FAILURE;
    };

    let client = match Client::new(api_key) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = Config { question, model };
    let interrupt = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    let outcome = client::run(
        &client,
        &config,
        interrupt,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await;

    match outcome {
        StreamOutcome::Completed => ExitCode::SUCCESS,
        StreamOutcome::Interrupted => ExitCode::from(EXIT_INTERRUPTED),
        StreamOutcome::Failed(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}
