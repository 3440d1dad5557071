use anyhow::Result;
use clap::Parser;
use console::style;

use parley::registry::{ServiceId, SERVICES};
use parley::session::ChatSession;
use parley::transport::HttpTransport;

mod chat;
mod render;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the backend gateway
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// Show each raw backend payload under the rendered reply
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let transport = HttpTransport::new(&cli.base_url)?;
    let mut session = ChatSession::new(Box::new(transport));

    println!(
        "{} {}",
        style("parley").bold(),
        style(format!("— service test harness ({})", cli.base_url)).dim()
    );

    loop {
        let Some(id) = pick_service()? else {
            break;
        };
        session.select(id);
        chat::run(&mut session, cli.raw).await?;
        session.back_to_menu();
    }

    Ok(())
}

/// The service menu. Returns None when the operator quits.
fn pick_service() -> Result<Option<ServiceId>> {
    let mut select = cliclack::select("Select a service to test");
    for service in &SERVICES {
        select = select.item(
            Some(service.id),
            service.name,
            format!("{}  {}", service.description, service.endpoint),
        );
    }
    select = select.item(None, "Quit", "");
    Ok(select.interact()?)
}
