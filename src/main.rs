use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use nea_client::{
    config::Config,
    controller::InteractionController,
    panel::{Panel, PanelCommand, HELP},
    services::HttpBackend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the panel output stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let backend = Arc::new(HttpBackend::new(config.backend_url.clone()));
    let controller = InteractionController::new(&config);

    tracing::info!(
        backend_url = %config.backend_url,
        session_id = %controller.session(),
        "Session started"
    );

    let mut panel = Panel::new(controller, backend);
    println!("NEA - Network Entertainment Administer");
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<PanelCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if command == PanelCommand::Quit {
            break;
        }

        match panel.handle(command).await {
            Ok(output) if !output.is_empty() => println!("{}", output),
            Ok(_) => {}
            Err(e) => println!("{}", e),
        }
    }

    tracing::info!(
        turns = panel.controller().conversation().len(),
        "Session ended"
    );
    Ok(())
}
