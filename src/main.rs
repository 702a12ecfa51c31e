use clap::Parser;
use elibrary_report::{
    Cli, ElibraryReport, OutputFormatter, OutputMode, ReportError, ReportWriter,
    UserFriendlyError,
};
use std::process;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    setup_logging(cli.verbosity_level(), cli.quiet);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match ElibraryReport::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    if cli.dry_run {
        return handle_dry_run(&cli, &app);
    }

    let start = Instant::now();
    match app.generate(&cli.inputs) {
        Ok(report) => {
            app.output_formatter()
                .print_extraction_report(&report, start.elapsed());

            if report.has_warnings() {
                2 // Report written, but some data was left out
            } else {
                0
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &ReportError) -> i32 {
    match error {
        ReportError::NoSourcesFound { .. } => 3,
        ReportError::NothingToReport => 4,
        ReportError::EmptyReport { .. } => 5,
        ReportError::OutputFileExists { .. } => 6,
        ReportError::Permission { .. } => 7,
        ReportError::InvalidCitation { .. } => 8,
        _ => 1, // General error
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("elibrary_report={}", level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "elibrary-report.toml".to_string());

    match ElibraryReport::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  elibrary-report <profiles...> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(cli: &Cli, app: &ElibraryReport) -> i32 {
    let formatter = app.output_formatter();

    formatter.info("DRY RUN MODE - No report will be written");
    formatter.print_separator();

    let config = app.config();
    formatter.info("Configuration that would be used:");
    formatter.info(&format!(
        "  Extensions: {}",
        config.input.extensions.join(", ")
    ));
    formatter.info(&format!(
        "  Max file size: {} bytes",
        config.input.max_file_size
    ));
    formatter.info(&format!(
        "  Invalid citations: {:?}",
        config.parser.on_invalid_citation
    ));

    let sources = match app.collect_sources(&cli.inputs) {
        Ok(sources) => sources,
        Err(e) => {
            app.handle_error(&e);
            return exit_code_for(&e);
        }
    };

    formatter.print_header("Profiles that would be read");
    formatter.print_source_list(sources.as_slice());

    let output = &config.output;
    let target =
        ReportWriter::new(&output.directory, &output.file_name, output.format).output_path();
    formatter.info(&format!("Report file: {}", target.display()));

    if target.exists() && !output.overwrite {
        formatter.warning("Report file already exists; the run would fail without --force");
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");

    0
}

fn print_startup_error(error: &ReportError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
