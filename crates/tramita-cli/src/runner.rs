//! The sweep: query, analyze and update every case on the spreadsheet.

use crate::config::Config;
use crate::error::{CliError, Result};
use chrono::Local;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{error, info, warn};
use tramita_ai::{AiProvider, Backend, GeminiProvider, OllamaProvider};
use tramita_analysis::{clean_sheet_summary, parse_model_response, AnalysisResult};
use tramita_comunica::{ComunicaClient, ComunicaError, QueryResult};
use tramita_sheets::{CaseRow, CaseUpdate, ServiceAccountKey, SheetsClient};

/// Status written when the query succeeded but analysis is absent or
/// unusable.
const STATUS_UPDATED: &str = "ATUALIZADO";
/// Status written when the case has no publications at all.
const STATUS_NO_PUBLICATIONS: &str = "SEM_PUBLICACOES";
/// Status written when the API reply was inconsistent.
const STATUS_QUERY_ERROR: &str = "ERRO_CONSULTA";

/// Counters reported at the end of a sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepTotals {
    /// Cases processed
    pub processed: usize,
    /// Cases queried and updated without trouble
    pub ok: usize,
    /// Cases with no publications on record
    pub no_publications: usize,
    /// Cases that failed somewhere in the pipeline
    pub errors: usize,
}

/// Drives one sweep over the spreadsheet.
pub struct Runner {
    comunica: ComunicaClient,
    sheets: SheetsClient,
    provider: Option<Box<dyn AiProvider>>,
    max_publications: usize,
    dry_run: bool,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("provider", &self.provider.as_ref().map(|_| "<dyn AiProvider>"))
            .field("max_publications", &self.max_publications)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

/// Select the configured backend. The choice happens here, once, at
/// startup; everything downstream sees only the capability trait.
pub fn provider_from_config(config: &Config) -> Box<dyn AiProvider> {
    match config.ai.backend {
        Backend::Gemini => Box::new(GeminiProvider::new(
            &config.ai.gemini.api_key,
            &config.ai.gemini.model,
        )),
        Backend::Ollama => Box::new(OllamaProvider::new(
            &config.ai.ollama.url,
            &config.ai.ollama.model,
        )),
    }
}

impl Runner {
    /// Build a runner from configuration. Fails with the full list of
    /// configuration problems when essentials are missing.
    pub fn from_config(config: &Config, use_ai: bool, dry_run: bool) -> Result<Self> {
        let problems = config.validate(use_ai);
        if !problems.is_empty() {
            return Err(CliError::Config(problems.join("; ")));
        }

        let comunica = ComunicaClient::new(
            &config.comunica.base_url,
            Duration::from_secs(config.comunica.timeout_secs),
            Duration::from_secs(config.comunica.delay_secs),
        );

        let key = ServiceAccountKey::from_file(&config.sheets.credentials_file)?;
        let sheets = SheetsClient::new(
            key,
            &config.sheets.spreadsheet_id,
            config.columns.to_column_names(),
        );

        let provider = use_ai.then(|| provider_from_config(config));

        Ok(Self {
            comunica,
            sheets,
            provider,
            max_publications: config.comunica.max_publications,
            dry_run,
        })
    }

    /// Sweep one worksheet, or all of them.
    pub async fn sweep(&self, tab: Option<&str>) -> Result<SweepTotals> {
        let cases = self.sheets.list_cases(tab).await?;
        let mut totals = SweepTotals {
            processed: cases.len(),
            ..SweepTotals::default()
        };

        if cases.is_empty() {
            warn!("no cases found on the spreadsheet");
            return Ok(totals);
        }

        let mut per_tab: BTreeMap<&str, usize> = BTreeMap::new();
        for case in &cases {
            *per_tab.entry(case.tab.as_str()).or_default() += 1;
        }
        info!(
            cases = cases.len(),
            worksheets = per_tab.len(),
            "starting sweep"
        );
        for (tab_name, count) in &per_tab {
            info!(tab = %tab_name, cases = count, "worksheet loaded");
        }

        for (index, case) in cases.iter().enumerate() {
            info!(
                case = %case.number,
                tab = %case.tab,
                progress = %format!("{}/{}", index + 1, cases.len()),
                "processing"
            );
            self.process_case(case, &mut totals).await;
        }

        info!(
            processed = totals.processed,
            ok = totals.ok,
            no_publications = totals.no_publications,
            errors = totals.errors,
            dry_run = self.dry_run,
            "sweep finished"
        );

        Ok(totals)
    }

    async fn process_case(&self, case: &CaseRow, totals: &mut SweepTotals) {
        let query = match self.comunica.query_case(&case.number, self.max_publications).await {
            Ok(query) => query,
            Err(err) => {
                if matches!(err, ComunicaError::RateLimited { .. }) {
                    warn!(case = %case.number, %err, "query rate limited");
                } else {
                    error!(case = %case.number, %err, "query failed");
                }
                totals.errors += 1;
                return;
            }
        };

        if let Some(rate) = query.rate_limit {
            if let (Some(remaining), Some(total)) = (rate.remaining, rate.total) {
                info!(remaining, total, "rate limit window");
            }
        }

        let (status, summary, had_trouble) = self.assess(case, &query).await;
        let newest = query.publications.first();

        let count_outcome = |totals: &mut SweepTotals| {
            if had_trouble {
                totals.errors += 1;
            } else if query.total == 0 {
                totals.no_publications += 1;
            } else {
                totals.ok += 1;
            }
        };

        if self.dry_run {
            info!(case = %case.number, %status, "dry run, spreadsheet untouched");
            count_outcome(totals);
            return;
        }

        let update = CaseUpdate {
            status,
            checked_at: Local::now().format("%d/%m/%Y %H:%M").to_string(),
            ai_summary: summary,
            last_publication: newest.map(|p| p.formatted_date()),
            last_publication_type: newest.map(|p| p.communication_type.clone()),
        };

        match self.sheets.update_case(case, &update).await {
            Ok(()) => count_outcome(totals),
            Err(err) => {
                error!(case = %case.number, %err, "spreadsheet update failed");
                totals.errors += 1;
            }
        }
    }

    /// Decide status and summary for one queried case. The boolean
    /// marks outcomes counted as errors.
    async fn assess(
        &self,
        case: &CaseRow,
        query: &QueryResult,
    ) -> (String, Option<String>, bool) {
        if query.total == 0 {
            info!(case = %case.number, "no publications on record");
            return (STATUS_NO_PUBLICATIONS.to_string(), Some(String::new()), false);
        }

        if query.publications.is_empty() {
            warn!(
                case = %case.number,
                total = query.total,
                "inconsistent reply: positive count with an empty page"
            );
            return (STATUS_QUERY_ERROR.to_string(), Some(String::new()), true);
        }

        info!(
            case = %case.number,
            found = query.total,
            analyzed = query.publications.len(),
            "publications found"
        );

        let analysis = self.analyze(&query.publications).await;
        match analysis {
            Some(result) if result.success() => {
                info!(case = %case.number, status = %result.status, "analysis ready");
                if let Some(warning) = &result.warning {
                    warn!(case = %case.number, %warning, "degraded analysis");
                }
                let summary = clean_sheet_summary(&result.summary);
                (result.status, Some(summary), false)
            }
            Some(result) => {
                warn!(
                    case = %case.number,
                    error = ?result.error,
                    "analysis did not produce a usable summary"
                );
                (STATUS_UPDATED.to_string(), Some(String::new()), false)
            }
            None => (STATUS_UPDATED.to_string(), Some(String::new()), false),
        }
    }

    async fn analyze(
        &self,
        publications: &[tramita_comunica::Publication],
    ) -> Option<AnalysisResult> {
        let provider = self.provider.as_ref()?;

        match provider.analyze(publications).await {
            Ok(raw) => Some(parse_model_response(&raw)),
            Err(err) => {
                warn!(%err, "model call failed, updating without analysis");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_start_empty() {
        let totals = SweepTotals::default();
        assert_eq!(totals.processed, 0);
        assert_eq!(totals.errors, 0);
    }

    #[test]
    fn provider_selection_follows_config() {
        let mut config = Config::default();
        config.ai.backend = Backend::Ollama;
        // Just exercising the factory; no calls are made.
        let _provider = provider_from_config(&config);

        config.ai.backend = Backend::Gemini;
        let _provider = provider_from_config(&config);
    }

    #[test]
    fn missing_essentials_fail_runner_construction() {
        let config = Config::default();
        let err = Runner::from_config(&config, true, false).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
