use clap::Parser;
use dice_dist::expr::{ExplainStringifier, SimpleStringifier};
use dice_dist::histogram::{MarkdownHistogram, Render, TextHistogram};
use dice_dist::{Limits, Outcome, Session};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "repl", about = "Print the exact distribution of dice expressions")]
struct Args {
    /// Most dice a single pool may roll
    #[arg(long, default_value_t = Limits::DEFAULT_POOL_DICE)]
    max_dice: u64,

    /// Most faces a single die may have
    #[arg(long, default_value_t = Limits::DEFAULT_FACES)]
    max_faces: u64,

    /// Most distinct sorted rolls a keep-highest/lowest pool may enumerate
    #[arg(long, default_value_t = Limits::DEFAULT_KEEP_STATES)]
    max_keep_states: u128,

    /// Width of the longest histogram bar
    #[arg(long, default_value_t = TextHistogram::DEFAULT_WIDTH)]
    width: usize,

    /// Print a markdown table instead of a text histogram
    #[arg(long)]
    markdown: bool,

    /// Show implicit type conversions when echoing expressions
    #[arg(long)]
    explain: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let limits = Limits::new_bounded(args.max_dice, args.max_faces, args.max_keep_states);
    let renderer: Box<dyn Render> = if args.markdown {
        Box::new(MarkdownHistogram::new())
    } else {
        Box::new(TextHistogram::new(args.width))
    };
    tracing::debug!(?limits, markdown = args.markdown, "starting");

    let mut session = Session::new(limits);
    print!("> ");
    io::stdout().flush()?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match session.run(&line) {
                Ok(Outcome::Evaluated { expr, dist }) => {
                    let echo = if args.explain {
                        ExplainStringifier::new().stringify(&expr)
                    } else {
                        SimpleStringifier::new().stringify(&expr)
                    };
                    println!("{}", echo);
                    print!("{}", renderer.render(&dist));
                }
                Ok(Outcome::Defined { name, expr }) => {
                    println!("${} := {}", name, expr);
                }
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    println!();
    Ok(())
}
