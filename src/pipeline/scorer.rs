use serde::Serialize;

use crate::core::types::{Privacy, RiskLevel, Ssl, SslGrade, ThreatKind, Threats};

/// One subtraction from the starting score of 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deduction {
    pub reason: &'static str,
    pub points: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    pub score: u8,
    pub deductions: Vec<Deduction>,
}

impl ScoreCard {
    pub fn points_for(&self, reason: &str) -> Option<u8> {
        self.deductions
            .iter()
            .find(|d| d.reason == reason)
            .map(|d| d.points)
    }
}

fn threat_penalty(kind: ThreatKind) -> u8 {
    match kind {
        ThreatKind::Malware => 30,
        ThreatKind::Phishing => 25,
        ThreatKind::DataTheft => 20,
        ThreatKind::MaliciousCookies => 15,
        ThreatKind::UnsafeDownloads => 10,
    }
}

pub fn score_report(threats: &Threats, ssl: &Ssl, privacy: &Privacy) -> ScoreCard {
    let mut deductions = Vec::new();
    let mut push = |reason: &'static str, points: u8| deductions.push(Deduction { reason, points });

    for (kind, threat) in threats.iter() {
        if threat.detected {
            push(kind.as_str(), threat_penalty(kind));
        }
    }

    if !ssl.enabled {
        push("sslDisabled", 20);
    }
    if !ssl.valid {
        push("sslInvalid", 10);
    }
    match ssl.grade {
        SslGrade::B => push("sslGradeB", 5),
        SslGrade::F => push("sslGradeF", 15),
        SslGrade::APlus => {}
    }

    if privacy.trackers > 10 {
        push("trackers", 15);
    } else if privacy.trackers > 5 {
        push("trackers", 10);
    }
    if privacy.cookie_count > 20 {
        push("cookies", 5);
    }

    let total: i32 = deductions.iter().map(|d| d.points as i32).sum();
    let score = (100 - total).clamp(0, 100) as u8;
    ScoreCard { score, deductions }
}

pub fn risk_level(score: u8, threats: &Threats) -> RiskLevel {
    if threats.has_critical() {
        RiskLevel::Critical
    } else if score < 40 {
        RiskLevel::High
    } else if score < 70 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn is_secure(score: u8, threats: &Threats) -> bool {
    score >= 70 && !threats.has_critical()
}
