use chrono::NaiveDate;
use clap::Parser;
use criteria::{Clock, Context, Evaluator, MapEnv};
use serde_json::Value;

/// Simple runner: evaluate a rule expression from the command line.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Rule expression, e.g. "days:monday,tuesday&&gte:score,10"
    expression: String,
    /// Context data as a JSON object, e.g. '{"score": 12}'
    #[arg(long)]
    data: Option<String>,
    /// Evaluate against a fixed date (YYYY-MM-DD) instead of today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// KEY=VALUE pairs for the env predicate, instead of the process environment
    #[arg(long = "env", value_name = "KEY=VALUE")]
    env: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // Parse context data, if any.
    let context = match args.data.as_deref() {
        Some(json) => match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => Context::from(map),
            Ok(_) => {
                eprintln!("--data must be a JSON object");
                std::process::exit(2);
            }
            Err(e) => {
                eprintln!("Invalid JSON: {e}");
                std::process::exit(2);
            }
        },
        None => Context::new(),
    };

    // Build the evaluator.
    let mut evaluator = Evaluator::new(context);
    if let Some(date) = args.date {
        evaluator = evaluator.with_clock(Clock::fixed(date));
    }
    if !args.env.is_empty() {
        let mut map = MapEnv::new();
        for pair in &args.env {
            match pair.split_once('=') {
                Some((k, v)) => map = map.set(k, v),
                None => {
                    eprintln!("--env expects KEY=VALUE, got `{pair}`");
                    std::process::exit(2);
                }
            }
        }
        evaluator = evaluator.with_env(map);
    }

    // Evaluate and report. Exit code mirrors the decision so the binary
    // composes in shell conditionals.
    match evaluator.evaluate(&args.expression) {
        Ok(result) => {
            println!("{result}");
            std::process::exit(if result { 0 } else { 1 });
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    }
}
