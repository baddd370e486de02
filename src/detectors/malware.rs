use crate::core::i18n::Translate;
use crate::core::random::RandomSource;
use crate::core::types::{MalwareDetail, MalwareVariant, ThreatDetail, ThreatKind};
use crate::detectors::{Classifier, Trigger};

const KEYWORDS: &[&str] = &["malware", "virus", "hack", "phish", "scam", "fake"];

const TEMPLATES: [(MalwareVariant, &str, &[&str]); 4] = [
    (
        MalwareVariant::Trojan,
        "trojan",
        &["identity", "financial", "privacy"],
    ),
    (
        MalwareVariant::Spyware,
        "spyware",
        &["data", "keystroke", "screen"],
    ),
    (
        MalwareVariant::Ransomware,
        "ransomware",
        &["encryption", "extortion", "financial"],
    ),
    (
        MalwareVariant::Botnet,
        "botnet",
        &["unauthorized", "performance", "legal"],
    ),
];

pub struct MalwareClassifier;

impl Classifier for MalwareClassifier {
    fn kind(&self) -> ThreatKind {
        ThreatKind::Malware
    }

    fn trigger(&self) -> Trigger {
        Trigger::KeywordOr {
            keywords: KEYWORDS,
            probability: 0.10,
        }
    }

    fn template(&self, rng: &mut dyn RandomSource, tr: &dyn Translate) -> ThreatDetail {
        let (variant, key, risks) = TEMPLATES[rng.index(TEMPLATES.len())];
        ThreatDetail::Malware(MalwareDetail {
            variant,
            name: tr.t(&format!("security.malware.{key}")),
            description: tr.t(&format!("security.malware.{key}Desc")),
            risks: risks
                .iter()
                .map(|r| tr.t(&format!("security.malware.risks.{r}")))
                .collect(),
        })
    }
}
