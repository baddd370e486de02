use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::core::i18n::Translate;
use crate::core::types::{OutputFormat, SecurityReport, ThreatKind};

pub fn render(report: &SecurityReport, format: OutputFormat, tr: &dyn Translate) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Markdown => Ok(render_markdown(report, tr)),
    }
}

pub fn write_report(
    report: &SecurityReport,
    format: OutputFormat,
    path: &Path,
    tr: &dyn Translate,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render(report, format, tr)?)?;
    Ok(())
}

pub fn render_json(report: &SecurityReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn threat_label(kind: ThreatKind) -> &'static str {
    match kind {
        ThreatKind::Malware => "malwareDetection",
        ThreatKind::Phishing => "phishingAttempt",
        ThreatKind::DataTheft => "dataTheftRisk",
        ThreatKind::MaliciousCookies => "maliciousCookies",
        ThreatKind::UnsafeDownloads => "unsafeDownloads",
    }
}

fn yes_no(tr: &dyn Translate, value: bool) -> String {
    tr.t(if value { "yes" } else { "no" })
}

pub fn render_markdown(report: &SecurityReport, tr: &dyn Translate) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", tr.t("securityAnalysis")));
    out.push_str(&format!("- {}: {}\n", tr.t("analyzedUrl"), report.url));
    out.push_str(&format!(
        "- {}: {}/100\n",
        tr.t("securityScore"),
        report.overall_score
    ));
    out.push_str(&format!("- {} {}\n\n", report.risk_level, tr.t("risk")));

    out.push_str(&format!("## {}\n\n", tr.t("threatDetection")));
    for (kind, threat) in report.threats.iter() {
        let status = if threat.detected {
            tr.t("detected")
        } else {
            tr.t("clean")
        };
        out.push_str(&format!("- {}: {}\n", tr.t(threat_label(kind)), status));
    }
    out.push('\n');

    out.push_str(&format!("## {}\n\n", tr.t("sslSecurity")));
    out.push_str(&format!(
        "- {}: {}\n",
        tr.t("sslEnabled"),
        yes_no(tr, report.ssl.enabled)
    ));
    out.push_str(&format!(
        "- {}: {}\n",
        tr.t("certificateValid"),
        yes_no(tr, report.ssl.valid)
    ));
    out.push_str(&format!("- {}: {}\n\n", tr.t("sslGrade"), report.ssl.grade));

    out.push_str(&format!("## {}\n\n", tr.t("privacyAnalysis")));
    out.push_str(&format!(
        "- {}: {}\n",
        tr.t("trackersFound"),
        report.privacy.trackers
    ));
    out.push_str(&format!(
        "- {}: {}\n",
        tr.t("cookies"),
        report.privacy.cookie_count
    ));
    out.push_str(&format!(
        "- {} {}\n\n",
        tr.t("dataCollection"),
        report.privacy.data_collection.join(", ")
    ));

    out.push_str(&format!("## {}\n\n", tr.t("detailedAnalysis")));
    if report.details.is_empty() {
        out.push_str(&format!("{}\n", tr.t("noIssuesFound")));
    }
    for detail in &report.details {
        out.push_str(&format!("### [{}] {}\n", detail.severity, detail.issue));
        out.push_str(&format!("- {}: {}\n\n", tr.t("category"), detail.category));
        out.push_str(&format!(
            "**{}** {}\n\n",
            tr.t("whatThisMeans"),
            detail.description
        ));
        if let Some(explanation) = &detail.explanation {
            out.push_str(&format!("**{}** {}\n\n", tr.t("whyThisMatters"), explanation));
        }
        push_list(&mut out, &tr.t("potentialRisks"), detail.risks.as_deref());
        push_list(
            &mut out,
            &tr.t("targetedInformation"),
            detail.targeted_info.as_deref(),
        );
        push_list(
            &mut out,
            &tr.t("dataBeingCollected"),
            detail.data_collected.as_deref(),
        );
        if let Some(consequences) = &detail.consequences {
            out.push_str(&format!(
                "**{}** {}\n\n",
                tr.t("whatCouldHappen"),
                consequences
            ));
        }
        if let Some(impact) = &detail.impact {
            out.push_str(&format!("**{}** {}\n\n", tr.t("impact"), impact));
        }
    }
    out
}

fn push_list(out: &mut String, label: &str, items: Option<&[String]>) {
    let Some(items) = items else {
        return;
    };
    out.push_str(&format!("**{}**\n", label));
    for item in items {
        out.push_str(&format!("  - {}\n", item));
    }
    out.push('\n');
}
