use std::collections::HashSet;
use std::sync::Arc;

use securecheck::config::{default_config, AppConfig};
use securecheck::core::engine::Engine;
use securecheck::core::i18n::{Locale, Translator};
use securecheck::core::random::{ReplaySource, RngSource};
use securecheck::core::types::{RiskLevel, SecurityReport, SslGrade, ThreatKind};
use securecheck::pipeline::scorer::score_report;
use securecheck::pipeline::synthesizer::{synthesize_report, DATA_COLLECTION_TAGS};

fn instant_config() -> AppConfig {
    AppConfig {
        analysis_delay_ms: 0,
        ..default_config()
    }
}

fn seeded(url: &str, seed: u64) -> SecurityReport {
    let tr = Translator::new(Locale::En);
    let mut rng = RngSource::seeded(seed);
    synthesize_report(url, &tr, &mut rng).unwrap()
}

#[test]
fn reports_hold_their_invariants_across_seeds() {
    let urls = [
        "https://example.com",
        "http://paypal-secure.example.net/login",
        "https://free-download.test/app.exe",
        "https://data-collector.io",
        "http://localhost:8080",
    ];
    for url in urls {
        for seed in 0..200 {
            let report = seeded(url, seed);
            assert!(report.overall_score <= 100);

            let critical = report.threats.malware.detected || report.threats.phishing.detected;
            assert_eq!(report.risk_level == RiskLevel::Critical, critical, "{url} #{seed}");
            assert_eq!(report.is_secure, report.overall_score >= 70 && !critical);
            for (_, threat) in report.threats.iter() {
                assert!(threat.is_consistent());
            }

            let card = score_report(&report.threats, &report.ssl, &report.privacy);
            assert_eq!(card.score, report.overall_score);

            assert!(report.privacy.trackers < 15);
            assert!((1..=25).contains(&report.privacy.cookie_count));
            let tags: HashSet<&str> = report
                .privacy
                .data_collection
                .iter()
                .map(String::as_str)
                .collect();
            assert!((1..=5).contains(&tags.len()));
            assert_eq!(tags.len(), report.privacy.data_collection.len());
            assert!(tags.iter().all(|t| DATA_COLLECTION_TAGS.contains(t)));
        }
    }
}

#[test]
fn details_follow_the_fixed_category_order() {
    for seed in 0..100 {
        let report = seeded("http://malware-download.data-collector.com", seed);
        let t = &report.threats;
        let expected: Vec<&str> = [
            (t.malware.detected, "Malware"),
            (t.phishing.detected, "Phishing"),
            (!report.ssl.enabled, "Encryption"),
            (t.data_theft.detected, "Privacy"),
            (report.privacy.trackers > 10, "Tracking"),
            (t.malicious_cookies.detected, "Cookies"),
            (t.unsafe_downloads.detected, "Downloads"),
        ]
        .into_iter()
        .filter_map(|(present, category)| present.then_some(category))
        .collect();
        let actual: Vec<&str> = report.details.iter().map(|d| d.category.as_str()).collect();
        assert_eq!(actual, expected, "seed {seed}");
    }
}

#[test]
fn keyword_hosts_always_detect_malware() {
    for seed in 0..50 {
        let report = seeded("https://malware-test.com", seed);
        assert!(report.threats.is_detected(ThreatKind::Malware));
        assert_eq!(report.risk_level, RiskLevel::Critical);
        assert!(!report.is_secure);
        assert!(!report.ssl.valid);
    }
}

#[test]
fn downloads_need_the_keyword() {
    for seed in 0..200 {
        let report = seeded("https://safe.com", seed);
        assert!(!report.threats.unsafe_downloads.detected);
    }
}

#[test]
fn https_hosts_get_a_valid_certificate() {
    for seed in 0..50 {
        let report = seeded("https://example.com", seed);
        assert!(report.ssl.enabled);
        assert!(report.ssl.valid);
        assert_ne!(report.ssl.grade, SslGrade::F);
    }
}

#[test]
fn plain_http_is_penalized_for_transport() {
    let tr = Translator::new(Locale::En);
    let mut rng = ReplaySource::constant(0.99);
    let report = synthesize_report("http://example.com", &tr, &mut rng).unwrap();

    let card = score_report(&report.threats, &report.ssl, &report.privacy);
    assert_eq!(card.points_for("sslDisabled"), Some(20));
    assert_eq!(card.points_for("sslGradeF"), Some(15));
    assert_eq!(report.overall_score, 35);
    assert_eq!(report.risk_level, RiskLevel::High);

    let high_encryption: Vec<_> = report
        .details
        .iter()
        .filter(|d| d.category == "Encryption" && d.severity == RiskLevel::High)
        .collect();
    assert_eq!(high_encryption.len(), 1);
}

#[test]
fn invalid_urls_are_rejected() {
    let tr = Translator::new(Locale::En);
    let mut rng = RngSource::seeded(1);
    assert!(synthesize_report("not a url", &tr, &mut rng).is_err());
}

#[tokio::test]
async fn engine_serves_concurrent_analyses() {
    let engine = Arc::new(Engine::new(instant_config()));
    let mut handles = Vec::new();
    for i in 0..16u64 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            let url = format!("https://site{i}.example.com");
            let mut rng = RngSource::seeded(i);
            engine.analyze(&url, Locale::En, &mut rng).await
        }));
    }
    for (i, handle) in handles.into_iter().enumerate() {
        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.url, format!("https://site{i}.example.com"));
    }
}

#[tokio::test]
async fn seeded_analyses_are_reproducible() {
    let engine = Engine::new(instant_config());
    let mut a = RngSource::seeded(42);
    let mut b = RngSource::seeded(42);
    let first = engine.analyze("https://shop.example.com", Locale::Es, &mut a).await.unwrap();
    let second = engine.analyze("https://shop.example.com", Locale::Es, &mut b).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn entropy_analysis_completes() {
    let engine = Engine::new(instant_config());
    let report = engine.analyze_url("https://example.org", Locale::En).await.unwrap();
    assert!(report.ssl.enabled);
}
