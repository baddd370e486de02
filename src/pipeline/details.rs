use crate::core::i18n::Translate;
use crate::core::types::{Privacy, RiskLevel, SecurityDetail, Ssl, ThreatDetail, Threats};

/// Builds the itemized findings in their fixed order: malware, phishing,
/// encryption, data theft, tracking, cookies, downloads.
pub fn build_details(
    threats: &Threats,
    ssl: &Ssl,
    privacy: &Privacy,
    tr: &dyn Translate,
) -> Vec<SecurityDetail> {
    let mut details = Vec::new();

    if let Some(ThreatDetail::Malware(m)) = &threats.malware.details {
        let mut d = SecurityDetail::new(
            tr.t("security.categories.malware"),
            tr.translate("security.issues.detected", &[("type", m.name.as_str())]),
            RiskLevel::Critical,
            m.description.clone(),
        );
        d.explanation = Some(tr.translate(
            "security.explanations.dangerous",
            &[("risks", m.risks.join(", ").as_str())],
        ));
        d.risks = Some(m.risks.clone());
        details.push(d);
    }

    if let Some(ThreatDetail::Phishing(p)) = &threats.phishing.details {
        let mut d = SecurityDetail::new(
            tr.t("security.categories.phishing"),
            tr.translate("security.issues.attempt", &[("type", p.name.as_str())]),
            RiskLevel::Critical,
            p.description.clone(),
        );
        d.explanation = Some(tr.translate(
            "security.explanations.phishing",
            &[
                ("info", p.targeted_info.join(", ").as_str()),
                ("consequences", p.consequences.as_str()),
            ],
        ));
        d.targeted_info = Some(p.targeted_info.clone());
        d.consequences = Some(p.consequences.clone());
        details.push(d);
    }

    if !ssl.enabled {
        let mut d = SecurityDetail::new(
            tr.t("security.categories.encryption"),
            tr.t("security.issues.noProtection"),
            RiskLevel::High,
            tr.t("security.descriptions.noEncryption"),
        );
        d.explanation = Some(tr.t("security.explanations.encryption"));
        details.push(d);
    }

    if let Some(ThreatDetail::DataTheft(t)) = &threats.data_theft.details {
        let mut d = SecurityDetail::new(
            tr.t("security.categories.privacy"),
            t.name.clone(),
            RiskLevel::High,
            t.description.clone(),
        );
        d.explanation = Some(tr.translate(
            "security.explanations.dataCollection",
            &[
                ("data", t.data_collected.join(", ").as_str()),
                ("risks", t.risks.as_str()),
            ],
        ));
        d.data_collected = Some(t.data_collected.clone());
        details.push(d);
    }

    if privacy.trackers > 10 {
        let count = privacy.trackers.to_string();
        let mut d = SecurityDetail::new(
            tr.t("security.categories.tracking"),
            tr.t("security.issues.surveillance"),
            RiskLevel::Medium,
            tr.translate("security.descriptions.tracking", &[("count", count.as_str())]),
        );
        d.explanation = Some(tr.t("security.explanations.tracking"));
        details.push(d);
    }

    if let Some(ThreatDetail::MaliciousCookies(c)) = &threats.malicious_cookies.details {
        let mut d = SecurityDetail::new(
            tr.t("security.categories.cookies"),
            c.name.clone(),
            RiskLevel::Medium,
            c.description.clone(),
        );
        d.explanation = Some(tr.translate(
            "security.explanations.cookies",
            &[("risk", c.privacy_risk.as_str())],
        ));
        d.impact = Some(c.impact.clone());
        details.push(d);
    }

    if let Some(ThreatDetail::UnsafeDownloads(u)) = &threats.unsafe_downloads.details {
        let mut d = SecurityDetail::new(
            tr.t("security.categories.downloads"),
            u.name.clone(),
            RiskLevel::High,
            u.description.clone(),
        );
        d.explanation = Some(tr.translate(
            "security.explanations.downloads",
            &[("warning", u.warning.as_str())],
        ));
        d.risks = Some(u.risks.clone());
        details.push(d);
    }

    details
}
