//! Ultramar – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und fuehrt den
//! angegebenen Befehl aus. Abweisungen werden als JSON mit Statuscode auf
//! stdout ausgegeben, der Prozess endet dann mit Exit-Code 1.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use ultramar_server::{config::ServerConfig, App, Ausgang, Cli};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = ServerConfig::laden(&cli.config)?
        .geheimnis_ueberschreiben(std::env::var("ULTRAMAR_SECRET_KEY").ok());

    ultramar_observability::logging_initialisieren(&config.logging.level, &config.logging.format);

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config,
        "Ultramar wird initialisiert"
    );

    let app = App::aus_config(&config)?;

    let ausgang = app.ausfuehren(cli.befehl).await?;
    match &ausgang {
        Ausgang::Erfolg(ausgabe) => println!("{ausgabe}"),
        Ausgang::Abgewiesen { status, meldung } => println!(
            "{}",
            serde_json::json!({ "status": status, "fehler": meldung })
        ),
    }
    Ok(ExitCode::from(ausgang.exit_status()))
}
