use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use anyhow::Result;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::core::time::{now_millis, now_utc};
use crate::core::types::RiskLevel;

pub const USER_ID_KEY: &str = "securecheck_user_id";
pub const DEFAULT_USER_AGENT: &str = concat!("securecheck/", env!("CARGO_PKG_VERSION"), " (cli)");

static TABLET_UA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tablet|ipad|playbook|silk").expect("tablet ua regex"));
static MOBILE_UA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)mobile|iphone|ipod|android|blackberry|opera|mini|windows\sce|palm|smartphone|iemobile",
    )
    .expect("mobile ua regex")
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Mobile,
    Tablet,
}

impl DeviceType {
    /// Tablet patterns win over mobile ones.
    pub fn from_user_agent(ua: &str) -> Self {
        if TABLET_UA.is_match(ua) {
            DeviceType::Tablet
        } else if MOBILE_UA.is_match(ua) {
            DeviceType::Mobile
        } else {
            DeviceType::Desktop
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Other,
}

impl Browser {
    /// First match wins, so Chromium-based Edge reports as Chrome.
    pub fn from_user_agent(ua: &str) -> Self {
        if ua.contains("Chrome") {
            Browser::Chrome
        } else if ua.contains("Firefox") {
            Browser::Firefox
        } else if ua.contains("Safari") {
            Browser::Safari
        } else if ua.contains("Edge") {
            Browser::Edge
        } else {
            Browser::Other
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Browser::Chrome => "Chrome",
            Browser::Firefox => "Firefox",
            Browser::Safari => "Safari",
            Browser::Edge => "Edge",
            Browser::Other => "Other",
        };
        f.write_str(name)
    }
}

/// `user_<9 base-36 chars>_<epoch millis>`.
pub fn generate_user_id(rng: &mut dyn RandomSource, epoch_millis: i64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let tag: String = (0..9)
        .map(|_| ALPHABET[rng.index(ALPHABET.len())] as char)
        .collect();
    format!("user_{tag}_{epoch_millis}")
}

/// Where events go once stamped.
pub trait EventSink {
    fn record(&mut self, event: &AnalyticsEvent) -> Result<()>;
}

impl EventSink for Vec<AnalyticsEvent> {
    fn record(&mut self, event: &AnalyticsEvent) -> Result<()> {
        self.push(event.clone());
        Ok(())
    }
}

/// Persistence for the anonymous client id.
pub trait ClientStore {
    fn client_value(&self, key: &str) -> Result<Option<String>>;
    fn set_client_value(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Identity and environment of the current session, stamped onto every
/// event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    pub user_id: String,
    pub page_url: String,
    pub user_agent: String,
    pub device_type: DeviceType,
    pub browser: Browser,
}

impl ClientContext {
    pub fn new(user_id: impl Into<String>, page_url: impl Into<String>, user_agent: &str) -> Self {
        Self {
            user_id: user_id.into(),
            page_url: page_url.into(),
            user_agent: user_agent.to_string(),
            device_type: DeviceType::from_user_agent(user_agent),
            browser: Browser::from_user_agent(user_agent),
        }
    }

    /// Reuses the persisted id, or creates and persists a new one.
    pub fn load_or_create(
        store: &mut dyn ClientStore,
        rng: &mut dyn RandomSource,
        page_url: &str,
        user_agent: &str,
    ) -> Result<Self> {
        let user_id = match store.client_value(USER_ID_KEY)? {
            Some(id) => id,
            None => {
                let id = generate_user_id(rng, now_millis());
                store.set_client_value(USER_ID_KEY, &id)?;
                tracing::debug!("created client id {}", id);
                id
            }
        };
        Ok(Self::new(user_id, page_url, user_agent))
    }

    /// Reuses a persisted id if one exists, otherwise makes a session-only id
    /// that is never written to the store.
    pub fn load_or_transient(
        store: &dyn ClientStore,
        rng: &mut dyn RandomSource,
        page_url: &str,
        user_agent: &str,
    ) -> Result<Self> {
        let user_id = match store.client_value(USER_ID_KEY)? {
            Some(id) => id,
            None => generate_user_id(rng, now_millis()),
        };
        Ok(Self::new(user_id, page_url, user_agent))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum EventData {
    PageVisit {
        referrer: String,
    },
    SessionDuration {
        duration: u64,
    },
    AnalysisStarted {
        url: String,
    },
    AnalysisCompleted {
        url: String,
        score: u8,
        #[serde(rename = "riskLevel")]
        risk_level: RiskLevel,
    },
    AnalysisFailed {
        url: String,
        error: String,
    },
    AnalyzeNewClicked {},
    Click {
        element: String,
    },
    ShareMobile {
        url: String,
        score: u8,
    },
    ShareCopy {
        url: String,
        score: u8,
    },
}

impl EventData {
    pub fn name(&self) -> &'static str {
        match self {
            EventData::PageVisit { .. } => "page_visit",
            EventData::SessionDuration { .. } => "session_duration",
            EventData::AnalysisStarted { .. } => "analysis_started",
            EventData::AnalysisCompleted { .. } => "analysis_completed",
            EventData::AnalysisFailed { .. } => "analysis_failed",
            EventData::AnalyzeNewClicked {} => "analyze_new_clicked",
            EventData::Click { .. } => "click",
            EventData::ShareMobile { .. } => "share_mobile",
            EventData::ShareCopy { .. } => "share_copy",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub url: String,
    pub user_agent: String,
    pub device_type: DeviceType,
    pub browser: Browser,
    #[serde(flatten)]
    pub data: EventData,
}

impl AnalyticsEvent {
    pub fn stamp(ctx: &ClientContext, data: EventData) -> Self {
        Self {
            timestamp: now_utc(),
            user_id: ctx.user_id.clone(),
            url: ctx.page_url.clone(),
            user_agent: ctx.user_agent.clone(),
            device_type: ctx.device_type,
            browser: ctx.browser,
            data,
        }
    }
}

/// Stamps events with the client context and hands them to a sink.
/// Recording failures are logged, never returned.
pub struct Tracker<S: EventSink> {
    ctx: ClientContext,
    sink: S,
    enabled: bool,
}

impl<S: EventSink> Tracker<S> {
    pub fn new(ctx: ClientContext, sink: S, enabled: bool) -> Self {
        Self { ctx, sink, enabled }
    }

    pub fn context(&self) -> &ClientContext {
        &self.ctx
    }

    pub fn set_page(&mut self, page_url: impl Into<String>) {
        self.ctx.page_url = page_url.into();
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn track(&mut self, data: EventData) -> Option<AnalyticsEvent> {
        if !self.enabled {
            return None;
        }
        let event = AnalyticsEvent::stamp(&self.ctx, data);
        tracing::info!(
            event = event.data.name(),
            user = %event.user_id,
            "analytics event tracked"
        );
        if let Err(err) = self.sink.record(&event) {
            tracing::warn!("failed to record {} event: {}", event.data.name(), err);
        }
        Some(event)
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_visits: usize,
    pub unique_users: usize,
    pub analysis_count: usize,
    pub device_types: BTreeMap<DeviceType, usize>,
    pub browsers: BTreeMap<Browser, usize>,
}

pub fn summarize(events: &[AnalyticsEvent]) -> AnalyticsSummary {
    let mut summary = AnalyticsSummary::default();
    let mut users = HashSet::new();
    for event in events {
        users.insert(event.user_id.as_str());
        match event.data {
            EventData::PageVisit { .. } => summary.total_visits += 1,
            EventData::AnalysisCompleted { .. } => summary.analysis_count += 1,
            _ => {}
        }
        *summary.device_types.entry(event.device_type).or_insert(0) += 1;
        *summary.browsers.entry(event.browser).or_insert(0) += 1;
    }
    summary.unique_users = users.len();
    summary
}
