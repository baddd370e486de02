use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five threat slots every report carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ThreatKind {
    Malware,
    Phishing,
    DataTheft,
    MaliciousCookies,
    UnsafeDownloads,
}

impl ThreatKind {
    pub const ALL: [ThreatKind; 5] = [
        ThreatKind::Malware,
        ThreatKind::Phishing,
        ThreatKind::DataTheft,
        ThreatKind::MaliciousCookies,
        ThreatKind::UnsafeDownloads,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatKind::Malware => "malware",
            ThreatKind::Phishing => "phishing",
            ThreatKind::DataTheft => "dataTheft",
            ThreatKind::MaliciousCookies => "maliciousCookies",
            ThreatKind::UnsafeDownloads => "unsafeDownloads",
        }
    }

    /// Malware and phishing force a CRITICAL verdict.
    pub fn is_critical(&self) -> bool {
        matches!(self, ThreatKind::Malware | ThreatKind::Phishing)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MalwareVariant {
    Trojan,
    Spyware,
    Ransomware,
    Botnet,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PhishingVariant {
    Banking,
    Social,
    Shopping,
    Email,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DataTheftVariant {
    Personal,
    Financial,
    Behavioral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CookieVariant {
    Tracking,
    CrossSite,
    Persistent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DownloadVariant {
    Fake,
    Bundled,
    Corrupted,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MalwareDetail {
    pub variant: MalwareVariant,
    #[serde(rename = "type")]
    pub name: String,
    pub description: String,
    pub risks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhishingDetail {
    pub variant: PhishingVariant,
    #[serde(rename = "type")]
    pub name: String,
    pub description: String,
    pub targeted_info: Vec<String>,
    pub consequences: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataTheftDetail {
    pub variant: DataTheftVariant,
    #[serde(rename = "type")]
    pub name: String,
    pub description: String,
    pub data_collected: Vec<String>,
    pub risks: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CookieDetail {
    pub variant: CookieVariant,
    #[serde(rename = "type")]
    pub name: String,
    pub description: String,
    pub impact: String,
    pub privacy_risk: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DownloadDetail {
    pub variant: DownloadVariant,
    #[serde(rename = "type")]
    pub name: String,
    pub description: String,
    pub risks: Vec<String>,
    pub warning: String,
}

/// Template data attached to a detected threat, one shape per slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "threat", rename_all = "camelCase")]
pub enum ThreatDetail {
    Malware(MalwareDetail),
    Phishing(PhishingDetail),
    DataTheft(DataTheftDetail),
    MaliciousCookies(CookieDetail),
    UnsafeDownloads(DownloadDetail),
}

impl ThreatDetail {
    pub fn kind(&self) -> ThreatKind {
        match self {
            ThreatDetail::Malware(_) => ThreatKind::Malware,
            ThreatDetail::Phishing(_) => ThreatKind::Phishing,
            ThreatDetail::DataTheft(_) => ThreatKind::DataTheft,
            ThreatDetail::MaliciousCookies(_) => ThreatKind::MaliciousCookies,
            ThreatDetail::UnsafeDownloads(_) => ThreatKind::UnsafeDownloads,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Threat {
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ThreatDetail>,
}

impl Threat {
    pub fn clear() -> Self {
        Self {
            detected: false,
            details: None,
        }
    }

    pub fn found(detail: ThreatDetail) -> Self {
        Self {
            detected: true,
            details: Some(detail),
        }
    }

    /// `details` is present exactly when the threat was detected.
    pub fn is_consistent(&self) -> bool {
        self.detected == self.details.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Threats {
    pub malware: Threat,
    pub phishing: Threat,
    pub data_theft: Threat,
    pub malicious_cookies: Threat,
    pub unsafe_downloads: Threat,
}

impl Threats {
    pub fn get(&self, kind: ThreatKind) -> &Threat {
        match kind {
            ThreatKind::Malware => &self.malware,
            ThreatKind::Phishing => &self.phishing,
            ThreatKind::DataTheft => &self.data_theft,
            ThreatKind::MaliciousCookies => &self.malicious_cookies,
            ThreatKind::UnsafeDownloads => &self.unsafe_downloads,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ThreatKind, &Threat)> + '_ {
        ThreatKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn is_detected(&self, kind: ThreatKind) -> bool {
        self.get(kind).detected
    }

    pub fn has_critical(&self) -> bool {
        ThreatKind::ALL
            .into_iter()
            .any(|kind| kind.is_critical() && self.is_detected(kind))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SslGrade {
    #[serde(rename = "A+")]
    APlus,
    B,
    F,
}

impl fmt::Display for SslGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SslGrade::APlus => f.write_str("A+"),
            SslGrade::B => f.write_str("B"),
            SslGrade::F => f.write_str("F"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ssl {
    pub enabled: bool,
    pub valid: bool,
    pub grade: SslGrade,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Privacy {
    pub trackers: u32,
    pub cookie_count: u32,
    pub data_collection: Vec<String>,
}

/// One itemized finding shown in the detailed analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityDetail {
    pub category: String,
    pub issue: String,
    pub severity: RiskLevel,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeted_info: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_collected: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequences: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

impl SecurityDetail {
    pub fn new(
        category: impl Into<String>,
        issue: impl Into<String>,
        severity: RiskLevel,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            issue: issue.into(),
            severity,
            description: description.into(),
            explanation: None,
            risks: None,
            targeted_info: None,
            data_collected: None,
            consequences: None,
            impact: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub url: String,
    pub overall_score: u8,
    pub risk_level: RiskLevel,
    pub is_secure: bool,
    pub threats: Threats,
    pub ssl: Ssl,
    pub privacy: Privacy,
    pub details: Vec<SecurityDetail>,
}

/// A user's disagreement with a shared report's verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    pub id: String,
    pub report_url: String,
    pub report_score: u8,
    pub risk_level: RiskLevel,
    pub fingerprint: String,
    pub user_id: String,
    pub reason: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}
