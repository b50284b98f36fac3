use anyhow::Result;
use argh::FromArgs;
use lsh::io_adapters::{Editor, LineSource, Lines};
use lsh::{Interpreter, Streams};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::Level;

#[derive(FromArgs)]
/// A tiny interactive command interpreter.
struct Args {
    #[argh(option, default = "lsh::DEFAULT_PROMPT.to_string()")]
    /// prompt printed before each command line.
    prompt: String,

    #[argh(switch, short = 'v')]
    /// log every step to standard error.
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lsh: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut input: Box<dyn LineSource> = if io::stdin().is_terminal() {
        Box::new(Editor::new()?)
    } else {
        Box::new(Lines::new(io::stdin().lock(), io::stdout()))
    };

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut sh = Interpreter::default().with_prompt(args.prompt);
    sh.repl(input.as_mut(), &mut Streams::new(&mut stdout, &mut stderr))
}
