use crate::core::i18n::Translate;
use crate::core::random::RandomSource;
use crate::core::types::{PhishingDetail, PhishingVariant, ThreatDetail, ThreatKind};
use crate::detectors::{Classifier, Trigger};

const KEYWORDS: &[&str] = &["secure-bank", "paypal-secure", "amazon-login", "google-auth"];

const TEMPLATES: [(PhishingVariant, &str, &[&str]); 4] = [
    (
        PhishingVariant::Banking,
        "banking",
        &["bankLogin", "accountNumbers", "securityCodes"],
    ),
    (
        PhishingVariant::Social,
        "social",
        &["socialPassword", "privateMessages", "contacts"],
    ),
    (
        PhishingVariant::Shopping,
        "shopping",
        &["creditCard", "billingAddress"],
    ),
    (
        PhishingVariant::Email,
        "email",
        &["emailPassword", "recoveryInfo", "linkedAccounts"],
    ),
];

pub struct PhishingClassifier;

impl Classifier for PhishingClassifier {
    fn kind(&self) -> ThreatKind {
        ThreatKind::Phishing
    }

    fn trigger(&self) -> Trigger {
        Trigger::KeywordOr {
            keywords: KEYWORDS,
            probability: 0.05,
        }
    }

    fn template(&self, rng: &mut dyn RandomSource, tr: &dyn Translate) -> ThreatDetail {
        let (variant, key, targets) = TEMPLATES[rng.index(TEMPLATES.len())];
        ThreatDetail::Phishing(PhishingDetail {
            variant,
            name: tr.t(&format!("security.phishing.{key}")),
            description: tr.t(&format!("security.phishing.{key}Desc")),
            targeted_info: targets
                .iter()
                .map(|t| tr.t(&format!("security.phishing.targets.{t}")))
                .collect(),
            consequences: tr.t(&format!("security.phishing.consequences.{key}")),
        })
    }
}
