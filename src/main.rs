use clap::Parser;
use daybook::Section;
use daybook::cli::{self, Command};
use daybook::core::config::{self, DaybookConfig, ResolvedConfig};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "daybook", version, about = "Plain-text blog journal")]
struct Args {
    /// Posts directory (overrides the config file and DAYBOOK_POSTS_DIR)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Section the terminal UI opens in
    #[arg(short, long, default_value_t, value_enum)]
    section: Section,

    #[command(subcommand)]
    command: Option<Command>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("daybook: {e}; using defaults");
            DaybookConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.dir.as_deref(), args.verbose);
    init_logging(&resolved);

    log::info!(
        "Daybook starting up with posts in {}",
        resolved.posts_dir.display()
    );

    let result = match args.command {
        Some(command) => cli::execute(
            command,
            &resolved,
            &mut io::stdin().lock(),
            &mut io::stdout().lock(),
        )
        .map_err(|e| e.to_string()),
        None => daybook::tui::run(resolved, args.section).map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("{}", message);
            eprintln!("daybook: {message}");
            ExitCode::FAILURE
        }
    }
}

/// File logger only; the terminal belongs to the UI. Failures are ignored.
fn init_logging(config: &ResolvedConfig) {
    let Some(path) = &config.log_file else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::options().create(true).append(true).open(path) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}
