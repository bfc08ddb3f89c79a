//! Argument surface and startup configuration.
//!
//! All resolution is done once at startup into an explicit [`Config`]; the
//! pure functions here take their inputs as parameters so tests can inject
//! arguments, environment values, and fake stdin.

use clap::Parser;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

/// Model used when neither `--model` nor `$MODEL` is given.
pub const FALLBACK_MODEL: &str = "qwen/qwen3-30b-a3b-thinking-2507";

/// Diagnostic for a run that resolved no question, written to stderr.
pub const NO_QUESTION_HINT: &str =
    "No question provided. Pass as an argument, pipe via stdin, or type when prompted.";

/// Diagnostic for a missing API key. Written to stdout, not stderr, so it
/// stays visible when stderr is redirected away.
pub const NO_KEY_HINT: &str = "OPENROUTER_API_KEY is not set. Export it before running.\n\
Example: export OPENROUTER_API_KEY=sk-or-...";

const AFTER_HELP: &str = "\
Examples:
  ask \"What is the meaning of life?\"
  echo \"What's new in AI this week?\" | ask
  MODEL=qwen/qwen3-30b-a3b-thinking-2507 ask \"Question\"
  ask --model meta-llama/llama-3.1-8b-instruct \"Question\"

Env:
  OPENROUTER_API_KEY (required), MODEL (optional default model)

Setup (zsh):
  export OPENROUTER_API_KEY=sk-or-...
  echo 'export OPENROUTER_API_KEY=sk-or-...' >> ~/.zshrc
  source ~/.zshrc";

/// Stream a chat completion from OpenRouter.
///
/// Reads the question from an argument, stdin, or an interactive prompt.
/// Streamed tokens go to stdout; model info goes to stderr.
#[derive(Parser, Debug)]
#[command(version, about, after_help = AFTER_HELP)]
pub struct Cli {
    /// Your question to ask the model (falls back to stdin or an interactive prompt)
    pub question: Option<String>,

    /// Model ID to use. Defaults to $MODEL if set, otherwise qwen/qwen3-30b-a3b-thinking-2507
    #[arg(short, long)]
    pub model: Option<String>,

    /// Print a suggested shell alias for this binary and exit
    #[arg(long)]
    pub print_alias: bool,
}

/// Startup configuration, resolved once from arguments and environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// The question to ask. Never empty once resolution succeeds.
    pub question: String,
    /// Model identifier to request.
    pub model: String,
}

/// Pick the model identifier: flag beats `$MODEL` beats the fallback.
pub fn resolve_model(flag: Option<String>, env_model: Option<String>) -> String {
    flag.filter(|m| !m.is_empty())
        .or_else(|| env_model.filter(|m| !m.is_empty()))
        .unwrap_or_else(|| FALLBACK_MODEL.to_string())
}

/// Resolve the question text, or `None` when every source comes up empty.
///
/// Order: a non-empty positional argument wins and is used verbatim; piped
/// input is read next and trimmed; finally one interactively prompted line
/// is read and trimmed (end-of-input there counts as empty).
pub fn resolve_question<P, F>(arg: Option<String>, piped: P, prompt: F) -> Option<String>
where
    P: FnOnce() -> Option<String>,
    F: FnOnce() -> io::Result<String>,
{
    if let Some(question) = arg.filter(|q| !q.is_empty()) {
        return Some(question);
    }

    if let Some(input) = piped() {
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    let line = prompt().unwrap_or_default();
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The API key from its environment value, rejecting empty values.
pub fn require_api_key(value: Option<String>) -> Option<String> {
    value.filter(|k| !k.is_empty())
}

/// Read all piped stdin, or `None` when stdin is an interactive terminal.
pub fn read_piped_stdin() -> Option<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    let mut input = String::new();
    stdin.lock().read_to_string(&mut input).ok()?;
    Some(input)
}

/// Prompt for one line of input on the terminal.
pub fn prompt_question() -> io::Result<String> {
    print!("Question: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

/// Render the shell alias suggestion for the given executable path.
pub fn alias_line(exe: &Path) -> String {
    format!("alias ask='{}'", exe.display())
}
