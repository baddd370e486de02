use crate::core::i18n::Translate;
use crate::core::random::RandomSource;
use crate::core::types::{CookieDetail, CookieVariant, ThreatDetail, ThreatKind};
use crate::detectors::{Classifier, Trigger};

const TEMPLATES: [(CookieVariant, &str); 3] = [
    (CookieVariant::Tracking, "tracking"),
    (CookieVariant::CrossSite, "crossSite"),
    (CookieVariant::Persistent, "persistent"),
];

/// Fires on chance alone; the hostname plays no part.
pub struct CookieClassifier;

impl Classifier for CookieClassifier {
    fn kind(&self) -> ThreatKind {
        ThreatKind::MaliciousCookies
    }

    fn trigger(&self) -> Trigger {
        Trigger::Chance(0.12)
    }

    fn template(&self, rng: &mut dyn RandomSource, tr: &dyn Translate) -> ThreatDetail {
        let (variant, key) = TEMPLATES[rng.index(TEMPLATES.len())];
        ThreatDetail::MaliciousCookies(CookieDetail {
            variant,
            name: tr.t(&format!("security.cookies.{key}")),
            description: tr.t(&format!("security.cookies.{key}Desc")),
            impact: tr.t(&format!("security.cookies.impact.{key}")),
            privacy_risk: tr.t(&format!("security.cookies.privacyRisk.{key}")),
        })
    }
}
