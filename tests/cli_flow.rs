use std::path::PathBuf;

use securecheck::cli::commands::{open_tracker, run_analyze, run_dispute, run_view, AnalyzeOpts};
use securecheck::cli::config::RunConfig;
use securecheck::config::default_config;
use securecheck::core::i18n::Locale;
use securecheck::core::random::RngSource;
use securecheck::core::share::share_url;
use securecheck::core::store::Store;
use securecheck::core::telemetry::{ClientContext, ClientStore, EventData, Tracker, USER_ID_KEY};
use securecheck::core::types::OutputFormat;

const IPHONE_UA: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";

fn run_config(locale: Locale) -> RunConfig {
    let mut app = default_config();
    app.analysis_delay_ms = 0;
    RunConfig {
        app,
        locale,
        db_path: PathBuf::from(":memory:"),
        telemetry: true,
        user_agent: IPHONE_UA.to_string(),
    }
}

fn tracker(user_agent: &str) -> Tracker<Store> {
    let mut store = Store::in_memory().unwrap();
    let mut rng = RngSource::seeded(3);
    let ctx =
        ClientContext::load_or_create(&mut store, &mut rng, "securecheck://test", user_agent).unwrap();
    Tracker::new(ctx, store, true)
}

fn opts(share: bool) -> AnalyzeOpts {
    AnalyzeOpts {
        format: OutputFormat::Json,
        output: None,
        share,
        seed: Some(11),
        delay_ms: Some(0),
    }
}

fn event_names(tracker: &Tracker<Store>) -> Vec<&'static str> {
    tracker
        .sink()
        .events(None)
        .unwrap()
        .iter()
        .map(|e| e.data.name())
        .collect()
}

#[tokio::test]
async fn analyze_records_lifecycle_and_share_events() {
    let cfg = run_config(Locale::En);
    let mut tracker = tracker(IPHONE_UA);
    let report = run_analyze(&cfg, &mut tracker, "https://example.com", &opts(true))
        .await
        .unwrap();
    assert_eq!(report.url, "https://example.com");

    let names = event_names(&tracker);
    assert_eq!(
        names,
        vec!["click", "analysis_started", "analysis_completed", "share_mobile"]
    );
    let events = tracker.sink().events(Some(1)).unwrap();
    assert_eq!(
        events[0].data,
        EventData::ShareMobile {
            url: report.url.clone(),
            score: report.overall_score
        }
    );
}

#[tokio::test]
async fn desktop_sessions_copy_the_link() {
    let cfg = run_config(Locale::En);
    let mut tracker = tracker("Mozilla/5.0 (X11; Linux x86_64) Firefox/120.0");
    run_analyze(&cfg, &mut tracker, "https://example.com", &opts(true))
        .await
        .unwrap();
    assert_eq!(event_names(&tracker).last(), Some(&"share_copy"));
}

#[tokio::test]
async fn rejected_input_is_localized_and_untracked() {
    let cfg = run_config(Locale::Es);
    let mut tracker = tracker(IPHONE_UA);
    let err = run_analyze(&cfg, &mut tracker, "   ", &opts(false))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Por favor"), "{err}");
    assert!(event_names(&tracker).is_empty());
}

#[tokio::test]
async fn analyze_writes_into_an_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = run_config(Locale::En);
    let mut tracker = tracker(IPHONE_UA);
    let mut o = opts(false);
    o.output = Some(dir.path().join("reports"));
    run_analyze(&cfg, &mut tracker, "https://example.com", &o)
        .await
        .unwrap();
    assert!(dir.path().join("reports").join("report.json").exists());
}

#[tokio::test]
async fn shared_links_reopen_and_can_be_disputed_once() {
    let cfg = run_config(Locale::En);
    let mut tracker = tracker(IPHONE_UA);
    let report = run_analyze(&cfg, &mut tracker, "https://shop.example.com", &opts(false))
        .await
        .unwrap();
    let link = share_url(&cfg.app.share_base_url, &report).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let viewed = run_view(&cfg, &mut tracker, &link, None, Some(dir.path()))
        .unwrap()
        .unwrap();
    assert_eq!(viewed, report);
    assert_eq!(tracker.context().page_url, link);

    assert!(run_dispute(&cfg, &mut tracker, &link, "  ").is_err());

    let first = run_dispute(&cfg, &mut tracker, &link, "this is my own shop").unwrap();
    let again = run_dispute(&cfg, &mut tracker, &link, " this is my own shop ").unwrap();
    assert_eq!(first.id, again.id);
    assert_eq!(first.report_score, report.overall_score);
    assert_eq!(tracker.sink().disputes().unwrap().len(), 1);
}

#[test]
fn broken_links_land_on_home() {
    let cfg = run_config(Locale::En);
    let mut tracker = tracker(IPHONE_UA);
    let viewed = run_view(
        &cfg,
        &mut tracker,
        "https://securecheck.app/report/%%%",
        None,
        None,
    )
    .unwrap();
    assert!(viewed.is_none());
    assert_eq!(
        event_names(&tracker),
        vec!["page_visit", "analyze_new_clicked"]
    );
    assert!(run_dispute(&cfg, &mut tracker, "https://securecheck.app/about", "wrong").is_err());
}

#[test]
fn opting_out_leaves_no_client_id() {
    let mut cfg = run_config(Locale::En);
    cfg.telemetry = false;
    let tracker = open_tracker(&cfg, Store::in_memory().unwrap(), "analyze").unwrap();
    assert!(tracker.context().user_id.starts_with("user_"));
    assert_eq!(tracker.sink().client_value(USER_ID_KEY).unwrap(), None);

    cfg.telemetry = true;
    let tracker = open_tracker(&cfg, Store::in_memory().unwrap(), "analyze").unwrap();
    assert_eq!(
        tracker.sink().client_value(USER_ID_KEY).unwrap().as_deref(),
        Some(tracker.context().user_id.as_str())
    );
}
