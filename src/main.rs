use clap::Parser;
use rpn_trainer::app::App;
use rpn_trainer::engine::{
    boxed_source, evaluate, format_number, format_stack, trace, Config, Expression,
    ExpressionEngine, GeneratorConfig, TrainerError,
};
use rpn_trainer::ui::TuiManager;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// RPN Trainer - practice evaluating Reverse Polish Notation expressions
#[derive(Parser, Debug)]
#[command(name = "rpn-trainer")]
#[command(about = "Practice evaluating RPN expressions", long_about = None)]
struct Args {
    /// Seed the expression generator for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Print N generated expressions and exit
    #[arg(long, value_name = "N")]
    generate: Option<usize>,

    /// Print the value of an expression and exit
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    eval: Option<String>,

    /// Print the step-by-step stack trace of an expression and exit
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    trace: Option<String>,

    /// Write logs to this file (filtered by RUST_LOG, default warn)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn is_interactive(&self) -> bool {
        self.generate.is_none() && self.eval.is_none() && self.trace.is_none()
    }
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<(), TrainerError> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| TrainerError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
            fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .init();
        }
        // The TUI owns the terminal, so stderr logging would corrupt the screen
        None if interactive => {}
        None => {
            fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }

    Ok(())
}

fn print_trace(text: &str) -> Result<(), TrainerError> {
    let expression: Expression = text.parse()?;
    for (index, step) in trace(&expression.to_string()).iter().enumerate() {
        println!(
            "Step {:>2}: {:<4} {} -> {}  {}",
            index + 1,
            step.token,
            format_stack(&step.stack),
            format_stack(&step.next_stack),
            step.description
        );
    }
    Ok(())
}

fn print_value(text: &str) -> Result<(), TrainerError> {
    let expression: Expression = text.parse()?;
    println!("{}", format_number(evaluate(&expression.to_string())));
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.is_interactive())?;

    if let Some(count) = args.generate {
        let mut engine =
            ExpressionEngine::with_source(boxed_source(args.seed), GeneratorConfig::default());
        for _ in 0..count {
            println!("{}", engine.generate());
        }
        return Ok(());
    }

    if let Some(text) = &args.eval {
        print_value(text)?;
        return Ok(());
    }

    if let Some(text) = &args.trace {
        print_trace(text)?;
        return Ok(());
    }

    let mut app = App::with_config(Config {
        seed: args.seed,
        ..Config::default()
    });
    let mut tui = TuiManager::new()?;

    tui.run_event_loop(&mut app)?;

    Ok(())
}
