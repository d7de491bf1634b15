//! rollcall: people picker in the terminal.
//!
//! Reads keystroke batches from stdin and prints the suggestion and
//! selection lists whenever they change.
//!
//! Usage:
//!   rollcall --directory people.json
//!
//! Input lines: plain text is typed into the query box, `:pick <id>` picks a
//! suggestion, `:unpick <id>` removes a pick, `:clear` empties the box and
//! `:quit` exits. Start a line with `\` to type text beginning with `:`.

use anyhow::Result;
use clap::Parser;
use rollcall_cli::{apply_input, load_directory, parse_input, render};
use rollcall_picker::{spawn_picker, PickerConfig, DEFAULT_PAGE_SIZE};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "rollcall")]
#[command(about = "Search a people directory and pick people as you type")]
struct Args {
    /// JSON file with an array of people
    #[arg(short, long)]
    directory: PathBuf,

    /// Quiet period before a search is issued, in milliseconds
    #[arg(long, default_value = "300")]
    debounce_ms: u64,

    /// Maximum suggestions per search
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let directory = load_directory(&args.directory, args.page_size)?;
    info!("Loaded {} people from {:?}", directory.len(), args.directory);

    let config = PickerConfig {
        debounce_ms: args.debounce_ms,
        page_size: args.page_size,
        ..Default::default()
    };
    let (picker, task) = spawn_picker(config, Some(Arc::new(directory)));

    let mut updates = picker.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let text = render(&updates.borrow_and_update());
            println!("{text}");
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(e) => {
                warn!("{:#}", e);
                continue;
            }
        };
        if !apply_input(&picker, input).await? {
            break;
        }
    }

    picker.shutdown().await?;
    task.await?;
    printer.await?;
    Ok(())
}
