use crate::core::i18n::Translate;
use crate::core::random::RandomSource;
use crate::core::types::{DataTheftDetail, DataTheftVariant, ThreatDetail, ThreatKind};
use crate::detectors::{Classifier, Trigger};

const TEMPLATES: [(DataTheftVariant, &str, &[&str]); 3] = [
    (
        DataTheftVariant::Personal,
        "personal",
        &["fullName", "homeAddress", "phoneNumber", "dateOfBirth"],
    ),
    (
        DataTheftVariant::Financial,
        "financial",
        &["income", "bankDetails", "purchaseHistory"],
    ),
    (
        DataTheftVariant::Behavioral,
        "behavioral",
        &["browsingHabits", "clickPatterns", "locationHistory"],
    ),
];

pub struct DataTheftClassifier;

impl Classifier for DataTheftClassifier {
    fn kind(&self) -> ThreatKind {
        ThreatKind::DataTheft
    }

    fn trigger(&self) -> Trigger {
        Trigger::KeywordOr {
            keywords: &["data-collector"],
            probability: 0.15,
        }
    }

    fn template(&self, rng: &mut dyn RandomSource, tr: &dyn Translate) -> ThreatDetail {
        let (variant, key, collected) = TEMPLATES[rng.index(TEMPLATES.len())];
        ThreatDetail::DataTheft(DataTheftDetail {
            variant,
            name: tr.t(&format!("security.dataTheft.{key}")),
            description: tr.t(&format!("security.dataTheft.{key}Desc")),
            data_collected: collected
                .iter()
                .map(|c| tr.t(&format!("security.dataTheft.collected.{c}")))
                .collect(),
            risks: tr.t(&format!("security.dataTheft.risks.{key}")),
        })
    }
}
