use crate::core::i18n::Translate;
use crate::core::random::RandomSource;
use crate::core::types::{DownloadDetail, DownloadVariant, ThreatDetail, ThreatKind};
use crate::detectors::{Classifier, Trigger};

const TEMPLATES: [(DownloadVariant, &str, &[&str]); 3] = [
    (
        DownloadVariant::Fake,
        "fake",
        &["infection", "dataLoss", "backdoor"],
    ),
    (DownloadVariant::Bundled, "bundled", &["adware", "hijack"]),
    (
        DownloadVariant::Corrupted,
        "corrupted",
        &["damage", "dataLoss"],
    ),
];

/// Only download hosts are eligible, and even then only on a 20% draw.
pub struct DownloadClassifier;

impl Classifier for DownloadClassifier {
    fn kind(&self) -> ThreatKind {
        ThreatKind::UnsafeDownloads
    }

    fn trigger(&self) -> Trigger {
        Trigger::KeywordAnd {
            keywords: &["download"],
            probability: 0.20,
        }
    }

    fn template(&self, rng: &mut dyn RandomSource, tr: &dyn Translate) -> ThreatDetail {
        let (variant, key, risks) = TEMPLATES[rng.index(TEMPLATES.len())];
        ThreatDetail::UnsafeDownloads(DownloadDetail {
            variant,
            name: tr.t(&format!("security.downloads.{key}")),
            description: tr.t(&format!("security.downloads.{key}Desc")),
            risks: risks
                .iter()
                .map(|r| tr.t(&format!("security.downloads.risks.{r}")))
                .collect(),
            warning: tr.t(&format!("security.downloads.warnings.{key}")),
        })
    }
}
