use clap::Parser;
use linkprobe::config::Config;
use linkprobe::core::constants::output_formats;
use linkprobe::engine::CancelSource;
use linkprobe::logging;
use linkprobe::progress::ProgressReporter;
use linkprobe::service::LinkService;
use linkprobe::store::MemoryLinkStore;
use linkprobe::types::BrokenLinksPage;
use linkprobe::ui::{Cli, cli_to_config};

use std::fs;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);

    let mut config = match cli.config {
        Some(ref path) => Config::load_from_file(path)?,
        None => Config::load_from_standard_locations(),
    };
    config.merge_with_cli(&cli_config);
    config.validate()?;

    logging::init_logger(cli_config.verbose, cli_config.quiet);
    logging::log_config_info(&config);

    let urls = collect_urls(cli)?;
    if urls.is_empty() {
        eprintln!("Error: No URLs provided");
        eprintln!("\nFor more information, try '--help'.");
        return Ok(1);
    }

    let store = Arc::new(MemoryLinkStore::new());
    let service = LinkService::new(store, &config)?;

    service.add_links(&urls).await?;

    // Ctrl-C aborts in-flight probes; already-committed batches stand.
    let (cancel_source, cancel_token) = CancelSource::new();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_source.cancel();
        }
    });

    let json_output = cli.format == output_formats::JSON;
    let show_progress =
        !cli.no_progress && !cli_config.quiet && !json_output && atty::is(atty::Stream::Stderr);

    let mut progress = ProgressReporter::new(show_progress);
    let summary = service
        .validate_all_with_progress(&cancel_token, &mut progress)
        .await?;

    let broken_page = service.list_broken(1, cli.page_size).await?;

    if json_output {
        let output = serde_json::json!({
            "summary": summary,
            "broken": broken_page,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text_results(&summary, &broken_page);
    }

    Ok(if summary.broken_count > 0 { 1 } else { 0 })
}

fn collect_urls(cli: &Cli) -> linkprobe::Result<Vec<String>> {
    let mut urls = cli.urls.clone();

    if let Some(ref path) = cli.from_file {
        let content = fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Could not read URL file '{}': {e}", path.display()),
            )
        })?;
        urls.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }

    Ok(urls)
}

fn print_text_results(summary: &linkprobe::types::RunSummary, page: &BrokenLinksPage) {
    println!(
        "Validated {} link(s): {} valid, {} broken ({}ms)",
        summary.total_processed,
        summary.valid_count,
        summary.broken_count,
        summary.duration.as_millis()
    );

    if page.total_count == 0 {
        println!("No broken links!");
        return;
    }

    println!(
        "\n> Broken links (page {}/{}, {} total)",
        page.page, page.total_pages, page.total_count
    );
    for (i, record) in page.records.iter().enumerate() {
        println!("{:4}. {} - {}", i + 1, record.url, record.reason_or_unknown());
    }
    if page.has_next_page {
        println!("   ... more on the next page (--page-size to widen)");
    }
}
