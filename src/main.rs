use anyhow::Result;
use argh::FromArgs;
use nix::sys::signal::{signal, SigHandler, Signal};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use dsh::{dispatch, lexer};

#[derive(FromArgs)]
/// A small command dispatcher shell.
struct Options {
    /// run a single command line and exit
    #[argh(option, short = 'c')]
    command: Option<String>,

    /// prompt shown in interactive mode
    #[argh(option, default = "String::from(\"dsh> \")")]
    prompt: String,
}

fn main() -> Result<()> {
    let options: Options = argh::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    prepare()?;

    match options.command {
        Some(line) => run_line(&line),
        None => repl(&options.prompt),
    }
}

/// Set up the shell process itself before the first dispatch: the shell
/// ignores SIGINT for its whole lifetime, so an interrupt aimed at a
/// foreground command never kills the shell around it.
fn prepare() -> Result<()> {
    unsafe { signal(Signal::SIGINT, SigHandler::SigIgn) }?;
    Ok(())
}

fn repl(prompt: &str) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline(prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                run_line(&line)?;
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => return Err(err.into()),
        }
    }
}

fn run_line(line: &str) -> Result<()> {
    let tokens = lexer::tokenize(line);
    if tokens.is_empty() {
        return Ok(());
    }
    dispatch::process_arglist(&tokens)?;
    Ok(())
}
