use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, bail, Result};

use crate::cli::config::{ensure_output_dir, resolve_config, resolve_output_file, RunConfig};
use crate::cli::flags::{Cli, Command, OutputFormatArg};
use crate::core::engine::Engine;
use crate::core::error::CheckError;
use crate::core::hash::{report_fingerprint, stable_dispute_id};
use crate::core::i18n::{Catalog, Translate, Translator};
use crate::core::progress::{Progress, TICK_INTERVAL};
use crate::core::random::RngSource;
use crate::core::share::{decode, open_shared_link, share_url, token_from_link, View};
use crate::core::store::Store;
use crate::core::telemetry::{summarize, ClientContext, DeviceType, EventData, Tracker};
use crate::core::time::now_utc;
use crate::core::types::{Dispute, OutputFormat, SecurityReport};
use crate::pipeline::reporter::{render, write_report};
use crate::pipeline::validation::validate_input;

pub async fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();
    let cfg = resolve_config(&cli)?;
    let store = Store::new(&cfg.db_path)?;
    let mut tracker = open_tracker(&cfg, store, cli.command.name())?;

    let outcome = match cli.command {
        Command::Analyze {
            url,
            format,
            output,
            share,
            seed,
            delay_ms,
        } => {
            let opts = AnalyzeOpts {
                format: format.map(Into::into).unwrap_or(OutputFormat::Markdown),
                output,
                share,
                seed,
                delay_ms,
            };
            run_analyze(&cfg, &mut tracker, &url, &opts).await.map(|_| ())
        }
        Command::View {
            link,
            format,
            output,
        } => run_view(&cfg, &mut tracker, &link, format, output.as_deref()).map(|_| ()),
        Command::Dispute { link, reason } => {
            run_dispute(&cfg, &mut tracker, &link, &reason).map(|_| ())
        }
        Command::Events { limit, summary } => run_events(&tracker, limit, summary),
    };

    tracker.track(EventData::SessionDuration {
        duration: started.elapsed().as_millis() as u64,
    });
    outcome
}

/// With telemetry off, no client id is written to the store.
pub fn open_tracker(cfg: &RunConfig, mut store: Store, command: &str) -> Result<Tracker<Store>> {
    let mut rng = RngSource::from_entropy();
    let page_url = format!("securecheck://{command}");
    let ctx = if cfg.telemetry {
        ClientContext::load_or_create(&mut store, &mut rng, &page_url, &cfg.user_agent)?
    } else {
        ClientContext::load_or_transient(&store, &mut rng, &page_url, &cfg.user_agent)?
    };
    Ok(Tracker::new(ctx, store, cfg.telemetry))
}

#[derive(Debug, Clone)]
pub struct AnalyzeOpts {
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub share: bool,
    pub seed: Option<u64>,
    pub delay_ms: Option<u64>,
}

/// Validation gate, lifecycle events, progress, rendering and optional
/// sharing around a single analysis.
pub async fn run_analyze(
    cfg: &RunConfig,
    tracker: &mut Tracker<Store>,
    url: &str,
    opts: &AnalyzeOpts,
) -> Result<SecurityReport> {
    let tr = Translator::new(cfg.locale);
    if let Err(rejection) = validate_input(url) {
        tracing::warn!("rejected input {:?}: {}", url, rejection);
        bail!(rejection.describe(&tr));
    }
    tracker.track(EventData::Click {
        element: "analyze".into(),
    });
    tracker.track(EventData::AnalysisStarted {
        url: url.to_string(),
    });

    let mut app = cfg.app.clone();
    if let Some(delay) = opts.delay_ms {
        app.analysis_delay_ms = delay;
    }
    let engine = Engine::new(app);
    if !Catalog::builtin().has_table(cfg.locale) {
        tracing::info!("no {} strings shipped, report prose falls back to en", cfg.locale);
    }

    let outcome = match opts.seed {
        Some(seed) => {
            let mut rng = RngSource::seeded(seed);
            with_progress(url, engine.analyze(url, cfg.locale, &mut rng)).await
        }
        None => with_progress(url, engine.analyze_url(url, cfg.locale)).await,
    };
    let report = match outcome {
        Ok(report) => report,
        Err(err) => {
            tracing::error!("security analysis failed for {}: {}", url, err);
            tracker.track(EventData::AnalysisFailed {
                url: url.to_string(),
                error: err.to_string(),
            });
            return Err(anyhow::Error::new(err).context(format!(
                "{}: {}",
                tr.t("analysisFailed"),
                tr.t("unableToCompleteAnalysis")
            )));
        }
    };

    tracker.track(EventData::AnalysisCompleted {
        url: url.to_string(),
        score: report.overall_score,
        risk_level: report.risk_level,
    });
    tracing::info!(
        "{}: {}",
        tr.t("analysisComplete"),
        tr.translate("securityScanCompleted", &[("url", url)])
    );

    emit_report(&report, opts.format, opts.output.as_deref(), &tr)?;

    if opts.share {
        let link = share_url(&cfg.app.share_base_url, &report)?;
        println!("{}", tr.translate("shareTitle", &[("url", report.url.as_str())]));
        let score = report.overall_score.to_string();
        println!("{}", tr.translate("shareText", &[("score", score.as_str())]));
        println!("{link}");
        let data = if tracker.context().device_type == DeviceType::Mobile {
            EventData::ShareMobile {
                url: report.url.clone(),
                score: report.overall_score,
            }
        } else {
            EventData::ShareCopy {
                url: report.url.clone(),
                score: report.overall_score,
            }
        };
        tracker.track(data);
    }
    Ok(report)
}

/// Ticks the progress tracker while `analysis` is in flight.
async fn with_progress<F>(url: &str, analysis: F) -> Result<SecurityReport, CheckError>
where
    F: Future<Output = Result<SecurityReport, CheckError>>,
{
    let mut progress = Progress::default();
    progress.start();

    tokio::pin!(analysis);
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.tick().await;

    let result = loop {
        tokio::select! {
            res = &mut analysis => break res,
            _ = ticker.tick() => {
                let value = progress.tick();
                tracing::debug!(progress = value, "analyzing {}", url);
            }
        }
    };

    if result.is_ok() {
        progress.complete();
    } else {
        progress.reset();
    }
    tracing::debug!(progress = progress.value(), "analysis settled");
    result
}

fn emit_report(
    report: &SecurityReport,
    format: OutputFormat,
    output: Option<&Path>,
    tr: &dyn Translate,
) -> Result<()> {
    match output {
        Some(output) => {
            let path = resolve_output_file(output, format, "report");
            if let Some(parent) = path.parent() {
                ensure_output_dir(parent)?;
            }
            write_report(report, format, &path, tr)?;
            tracing::info!("report written to {}", path.display());
        }
        None => println!("{}", render(report, format, tr)?),
    }
    Ok(())
}

/// Opens a shared link. An unreadable link is not an error: it lands on the
/// home view and returns `None`.
pub fn run_view(
    cfg: &RunConfig,
    tracker: &mut Tracker<Store>,
    link: &str,
    format: Option<OutputFormatArg>,
    output: Option<&Path>,
) -> Result<Option<SecurityReport>> {
    let tr = Translator::new(cfg.locale);
    tracker.set_page(link);
    tracker.track(EventData::PageVisit {
        referrer: String::new(),
    });

    match open_shared_link(link) {
        View::Report(report) => {
            let format = format.map(Into::into).unwrap_or(OutputFormat::Markdown);
            if format == OutputFormat::Markdown && output.is_none() {
                println!("{} - {}\n", tr.t("sharedReport"), report.url);
            }
            emit_report(&report, format, output, &tr)?;
            Ok(Some(*report))
        }
        View::Home => {
            eprintln!("{}", tr.t("invalidReport"));
            tracker.track(EventData::AnalyzeNewClicked {});
            Ok(None)
        }
    }
}

pub fn run_dispute(
    cfg: &RunConfig,
    tracker: &mut Tracker<Store>,
    link: &str,
    reason: &str,
) -> Result<Dispute> {
    let tr = Translator::new(cfg.locale);
    let reason = reason.trim();
    if reason.is_empty() {
        bail!(tr.t("explanationRequired"));
    }
    let token = token_from_link(link).ok_or_else(|| anyhow!(tr.t("invalidReport")))?;
    let report = decode(&token).map_err(|err| {
        tracing::error!("failed to decode disputed report: {}", err);
        anyhow!(tr.t("invalidReport"))
    })?;
    tracker.track(EventData::Click {
        element: "reportResult".into(),
    });

    let fingerprint = report_fingerprint(&report)?;
    let user_id = tracker.context().user_id.clone();
    let dispute = Dispute {
        id: stable_dispute_id(&fingerprint, &user_id, reason),
        report_url: report.url.clone(),
        report_score: report.overall_score,
        risk_level: report.risk_level,
        fingerprint,
        user_id,
        reason: reason.to_string(),
        submitted_at: now_utc(),
    };
    if tracker.sink_mut().save_dispute(&dispute)? {
        tracing::info!("dispute {} stored for {}", dispute.id, dispute.report_url);
    } else {
        tracing::info!("dispute {} was already on file", dispute.id);
    }
    println!("{} ({})", tr.t("reportSubmitted"), dispute.id);
    Ok(dispute)
}

fn run_events(tracker: &Tracker<Store>, limit: Option<usize>, summary: bool) -> Result<()> {
    let events = tracker.sink().events(limit)?;
    if summary {
        println!("{}", serde_json::to_string_pretty(&summarize(&events))?);
        return Ok(());
    }
    for event in &events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}
