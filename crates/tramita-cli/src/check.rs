//! Connectivity verification for the three external services.

use crate::config::Config;
use crate::error::Result;
use crate::runner::provider_from_config;
use colored::Colorize;
use std::time::Duration;
use tramita_comunica::ComunicaClient;
use tramita_sheets::{ServiceAccountKey, SheetsClient};

fn report(label: &str, outcome: std::result::Result<String, String>) -> bool {
    match outcome {
        Ok(message) => {
            println!("{} {label}: {message}", "✓".green());
            true
        }
        Err(message) => {
            println!("{} {label}: {message}", "✗".red());
            false
        }
    }
}

/// Run every connectivity test and report each; returns whether all of
/// them passed. The AI probe is skipped when analysis is disabled for
/// the run.
pub async fn run(config: &Config, include_ai: bool) -> Result<bool> {
    let mut all_ok = true;

    let problems = config.validate(include_ai);
    if problems.is_empty() {
        println!("{} configuration: ok", "✓".green());
    } else {
        all_ok = false;
        for problem in &problems {
            println!("{} configuration: {problem}", "✗".red());
        }
    }

    // Spreadsheet: auth plus worksheet listing.
    let sheets_outcome = match ServiceAccountKey::from_file(&config.sheets.credentials_file) {
        Ok(key) => {
            let client = SheetsClient::new(
                key,
                &config.sheets.spreadsheet_id,
                config.columns.to_column_names(),
            );
            client.test_connection().await.map_err(|e| e.to_string())
        }
        Err(e) => Err(e.to_string()),
    };
    all_ok &= report("Google Sheets", sheets_outcome);

    // Model backend.
    if include_ai {
        let provider = provider_from_config(config);
        let ai_outcome = provider.test_connection().await.map_err(|e| e.to_string());
        all_ok &= report(
            &format!("AI backend ({})", config.ai.backend),
            ai_outcome,
        );
    }

    // Gazette API: the court listing is a cheap authenticated-less probe.
    let comunica = ComunicaClient::new(
        &config.comunica.base_url,
        Duration::from_secs(config.comunica.timeout_secs),
        Duration::from_secs(config.comunica.delay_secs),
    );
    let comunica_outcome = comunica
        .list_courts()
        .await
        .map(|courts| format!("{} courts available", courts.len()))
        .map_err(|e| e.to_string());
    all_ok &= report("Comunica PJe", comunica_outcome);

    Ok(all_ok)
}
