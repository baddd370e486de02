use url::Url;

use crate::core::error::CheckError;
use crate::core::i18n::Translate;
use crate::core::random::RandomSource;
use crate::core::types::{Privacy, SecurityReport, Ssl, SslGrade};
use crate::detectors::classify_all;
use crate::pipeline::details::build_details;
use crate::pipeline::scorer::{is_secure, risk_level, score_report};

pub const DATA_COLLECTION_TAGS: [&str; 8] = [
    "Personal Info",
    "Location",
    "Browsing History",
    "Device Info",
    "Cookies",
    "IP Address",
    "Email",
    "Phone",
];

/// Hostname and transport of a parsed target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub https: bool,
}

pub fn parse_target(url: &str) -> Result<Target, CheckError> {
    let parsed = Url::parse(url)?;
    Ok(Target {
        host: parsed.host_str().unwrap_or_default().to_lowercase(),
        https: parsed.scheme() == "https",
    })
}

/// Turns a URL into a complete report. Every random decision is drawn from
/// `rng` in a fixed order: classifiers, SSL grade, trackers, cookie count,
/// data-collection tags.
pub fn synthesize_report(
    url: &str,
    tr: &dyn Translate,
    rng: &mut dyn RandomSource,
) -> Result<SecurityReport, CheckError> {
    let target = parse_target(url)?;
    let threats = classify_all(&target.host, rng, tr);
    let ssl = synthesize_ssl(&target, rng);
    let privacy = synthesize_privacy(rng);

    let card = score_report(&threats, &ssl, &privacy);
    let details = build_details(&threats, &ssl, &privacy, tr);

    Ok(SecurityReport {
        url: url.to_string(),
        overall_score: card.score,
        risk_level: risk_level(card.score, &threats),
        is_secure: is_secure(card.score, &threats),
        threats,
        ssl,
        privacy,
        details,
    })
}

pub fn synthesize_ssl(target: &Target, rng: &mut dyn RandomSource) -> Ssl {
    let valid =
        target.https && !target.host.contains("test") && !target.host.contains("localhost");
    let grade = if !target.https {
        SslGrade::F
    } else if rng.next_f64() > 0.3 {
        SslGrade::APlus
    } else {
        SslGrade::B
    };
    Ssl {
        enabled: target.https,
        valid,
        grade,
    }
}

pub fn synthesize_privacy(rng: &mut dyn RandomSource) -> Privacy {
    let trackers = rng.index(15) as u32;
    let cookie_count = rng.between(1, 25);
    let count = rng.between(1, 5) as usize;

    // partial Fisher-Yates: the first `count` slots end up a uniform sample
    let mut pool: Vec<&str> = DATA_COLLECTION_TAGS.to_vec();
    for i in 0..count {
        let j = i + rng.index(pool.len() - i);
        pool.swap(i, j);
    }
    Privacy {
        trackers,
        cookie_count,
        data_collection: pool[..count].iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::i18n::{Locale, Translator};
    use crate::core::random::{ReplaySource, RngSource};
    use std::collections::HashSet;

    #[test]
    fn rejects_relative_input() {
        let tr = Translator::new(Locale::En);
        let mut rng = RngSource::seeded(1);
        let err = synthesize_report("not a url", &tr, &mut rng).unwrap_err();
        assert!(matches!(err, CheckError::InvalidUrl(_)));
    }

    #[test]
    fn host_is_lowercased() {
        let target = parse_target("HTTPS://Example.COM/path").unwrap();
        assert_eq!(target.host, "example.com");
        assert!(target.https);
    }

    #[test]
    fn test_hosts_never_get_a_valid_certificate() {
        let mut rng = ReplaySource::constant(0.9);
        let target = parse_target("https://staging-test.example").unwrap();
        let ssl = synthesize_ssl(&target, &mut rng);
        assert!(ssl.enabled);
        assert!(!ssl.valid);
        assert_eq!(ssl.grade, SslGrade::APlus);
    }

    #[test]
    fn low_draw_gives_grade_b() {
        let mut rng = ReplaySource::constant(0.3);
        let target = parse_target("https://example.com").unwrap();
        assert_eq!(synthesize_ssl(&target, &mut rng).grade, SslGrade::B);
    }

    #[test]
    fn privacy_stays_in_bounds() {
        for seed in 0..200 {
            let mut rng = RngSource::seeded(seed);
            let privacy = synthesize_privacy(&mut rng);
            assert!(privacy.trackers <= 14);
            assert!((1..=25).contains(&privacy.cookie_count));
            assert!((1..=5).contains(&privacy.data_collection.len()));
            let unique: HashSet<_> = privacy.data_collection.iter().collect();
            assert_eq!(unique.len(), privacy.data_collection.len());
            assert!(privacy
                .data_collection
                .iter()
                .all(|tag| DATA_COLLECTION_TAGS.contains(&tag.as_str())));
        }
    }

    #[test]
    fn high_draws_saturate_privacy() {
        let mut rng = ReplaySource::constant(0.99);
        let privacy = synthesize_privacy(&mut rng);
        assert_eq!(privacy.trackers, 14);
        assert_eq!(privacy.cookie_count, 25);
        assert_eq!(privacy.data_collection.len(), 5);
    }
}
