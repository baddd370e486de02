use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use url::Url;

use crate::core::error::{CheckError, DecodeError};
use crate::core::types::SecurityReport;

pub const REPORT_ROUTE: &str = "report";

/// Serializes a report into a single URL path segment.
pub fn encode(report: &SecurityReport) -> Result<String, CheckError> {
    let json = serde_json::to_vec(report).map_err(|e| CheckError::Encode(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Accepts the URL-safe or the standard alphabet, padded or not.
pub fn decode(token: &str) -> Result<SecurityReport, DecodeError> {
    let trimmed = token.trim().trim_end_matches("%3D").trim_end_matches('=');
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }
    let normalized: String = trimmed
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = URL_SAFE_NO_PAD.decode(normalized.as_bytes())?;
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn share_url(base: &str, report: &SecurityReport) -> Result<String, CheckError> {
    let token = encode(report)?;
    Ok(format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        REPORT_ROUTE,
        token
    ))
}

/// Extracts the token from a full link, a `.../report/<token>` path, or a
/// bare token. The route may sit under a path prefix taken from the share
/// base URL. Returns `None` for paths on any other route.
pub fn token_from_link(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let path = match Url::parse(input) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => input.to_string(),
    };
    if !path.contains('/') {
        return Some(path);
    }
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match segments.as_slice() {
        [.., route, token] if *route == REPORT_ROUTE && !token.is_empty() => {
            Some(token.to_string())
        }
        _ => None,
    }
}

/// Where a shared link lands.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Report(Box<SecurityReport>),
    Home,
}

/// Resolves a shared link. Unreadable links are logged and fall back to the
/// home view rather than failing.
pub fn open_shared_link(input: &str) -> View {
    let Some(token) = token_from_link(input) else {
        tracing::warn!("link is not a shared report route: {}", input);
        return View::Home;
    };
    match decode(&token) {
        Ok(report) => View::Report(Box::new(report)),
        Err(err) => {
            tracing::error!("failed to decode shared report: {}", err);
            View::Home
        }
    }
}
