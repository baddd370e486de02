use crate::core::i18n::Translate;
use crate::core::random::RandomSource;
use crate::core::types::{Threat, ThreatDetail, ThreatKind, Threats};

pub mod cookies;
pub mod data_theft;
pub mod downloads;
pub mod malware;
pub mod phishing;

/// When a classifier fires for a hostname.
///
/// Keyword checks run before any draw, so a keyword hit in `KeywordOr` and a
/// keyword miss in `KeywordAnd` consume nothing from the random source.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    KeywordOr {
        keywords: &'static [&'static str],
        probability: f64,
    },
    KeywordAnd {
        keywords: &'static [&'static str],
        probability: f64,
    },
    Chance(f64),
}

impl Trigger {
    pub fn fires(&self, host: &str, rng: &mut dyn RandomSource) -> bool {
        match *self {
            Trigger::KeywordOr {
                keywords,
                probability,
            } => matches_any(host, keywords) || rng.chance(probability),
            Trigger::KeywordAnd {
                keywords,
                probability,
            } => matches_any(host, keywords) && rng.chance(probability),
            Trigger::Chance(probability) => rng.chance(probability),
        }
    }
}

fn matches_any(host: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| host.contains(k))
}

pub trait Classifier {
    fn kind(&self) -> ThreatKind;
    fn trigger(&self) -> Trigger;
    /// Picks a template uniformly and renders it in the translator's locale.
    fn template(&self, rng: &mut dyn RandomSource, tr: &dyn Translate) -> ThreatDetail;

    /// `host` must already be lower-cased.
    fn classify(&self, host: &str, rng: &mut dyn RandomSource, tr: &dyn Translate) -> Threat {
        if self.trigger().fires(host, rng) {
            tracing::trace!(threat = self.kind().as_str(), host, "classifier fired");
            Threat::found(self.template(rng, tr))
        } else {
            Threat::clear()
        }
    }
}

/// All five classifiers in report order.
pub fn classifiers() -> [&'static dyn Classifier; 5] {
    [
        &malware::MalwareClassifier,
        &phishing::PhishingClassifier,
        &data_theft::DataTheftClassifier,
        &cookies::CookieClassifier,
        &downloads::DownloadClassifier,
    ]
}

pub fn classify_all(host: &str, rng: &mut dyn RandomSource, tr: &dyn Translate) -> Threats {
    let host = host.to_lowercase();
    let [malware, phishing, data_theft, cookies, downloads] =
        classifiers().map(|c| c.classify(&host, rng, tr));
    Threats {
        malware,
        phishing,
        data_theft,
        malicious_cookies: cookies,
        unsafe_downloads: downloads,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::i18n::{Locale, Translator};
    use crate::core::random::ReplaySource;

    #[test]
    fn keyword_hit_skips_the_draw() {
        let trigger = Trigger::KeywordOr {
            keywords: &["virus"],
            probability: 0.1,
        };
        let mut rng = ReplaySource::constant(0.99);
        assert!(trigger.fires("virus.example", &mut rng));
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn and_gate_needs_keyword_before_drawing() {
        let trigger = Trigger::KeywordAnd {
            keywords: &["download"],
            probability: 0.2,
        };
        let mut rng = ReplaySource::constant(0.0);
        assert!(!trigger.fires("safe.com", &mut rng));
        assert_eq!(rng.consumed(), 0);
        assert!(trigger.fires("download.example", &mut rng));
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn classifies_in_slot_order() {
        let tr = Translator::new(Locale::En);
        let mut rng = ReplaySource::constant(0.0);
        let threats = classify_all("quiet.example", &mut rng, &tr);
        assert!(threats.malware.detected);
        assert!(threats.phishing.detected);
        assert!(threats.data_theft.detected);
        assert!(threats.malicious_cookies.detected);
        assert!(!threats.unsafe_downloads.detected);
        for (kind, threat) in threats.iter() {
            assert!(threat.is_consistent());
            if let Some(detail) = &threat.details {
                assert_eq!(detail.kind(), kind);
            }
        }
    }

    #[test]
    fn hostname_match_ignores_case() {
        let tr = Translator::new(Locale::En);
        let mut rng = ReplaySource::constant(0.99);
        let threats = classify_all("MALWARE-Test.com", &mut rng, &tr);
        assert!(threats.malware.detected);
    }
}
