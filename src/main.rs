use anyhow::Result;
use tokio_util::sync::CancellationToken;

use show_scan_rs::client::ShowClient;
use show_scan_rs::inspector::ProjectInspector;
use show_scan_rs::report;
use show_scan_rs::scanner;
use show_scan_rs::shell::{self, NextAction};

#[tokio::main]
async fn main() -> Result<()> {
    loop {
        print_banner();
        if let Err(e) = run_scan_flow().await {
            eprintln!("error: {e:#}");
        }
        match shell::prompt_next_action() {
            Ok(NextAction::Restart) => {
                println!("\nrestarting...\n");
            }
            Ok(NextAction::Terminate) => break,
            // Closed stdin: nobody is left to answer the menu.
            Err(_) => break,
        }
    }
    println!("exited");
    Ok(())
}

/// One pass of the interactive flow: collect a range, scan it, offer to save.
/// Errors bubble up to the outer loop, which reports them and returns to the
/// exit/restart menu rather than crashing.
async fn run_scan_flow() -> Result<()> {
    let (start_id, end_id) = shell::prompt_range()?;
    let client = ShowClient::new()?;
    let inspector = ProjectInspector::new(client);

    // Ctrl-C aborts the in-progress scan, not the program.
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            cancel.cancel();
        })
    };
    let session = scanner::scan_range(
        &inspector,
        start_id,
        end_id,
        scanner::DEFAULT_INTERVAL,
        cancel,
    )
    .await;
    watcher.abort();

    // Interrupted sessions keep their partial results and can be saved too.
    if session.outcomes.is_empty() {
        return Ok(());
    }
    if shell::prompt_save()? {
        match report::persist(&session, None) {
            Ok(path) => println!("scan results saved to {}", path.display()),
            Err(e) => eprintln!("failed to save results: {e:#}"),
        }
    }
    Ok(())
}

fn print_banner() {
    println!("show-scan-rs v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", "=".repeat(88));
    println!();
}
