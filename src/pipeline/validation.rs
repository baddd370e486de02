use url::Url;

use crate::core::i18n::Translate;

/// Why the gate refused an input. Each case maps to a pair of catalog keys
/// for the notification title and body.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("no url entered")]
    Empty,
    #[error("input is not an absolute url")]
    Unparseable,
}

impl Rejection {
    pub fn title_key(&self) -> &'static str {
        match self {
            Rejection::Empty => "error",
            Rejection::Unparseable => "invalidUrl",
        }
    }

    pub fn message_key(&self) -> &'static str {
        match self {
            Rejection::Empty => "enterUrlToAnalyze",
            Rejection::Unparseable => "enterValidUrl",
        }
    }

    pub fn describe(&self, tr: &dyn Translate) -> String {
        format!("{}: {}", tr.t(self.title_key()), tr.t(self.message_key()))
    }
}

/// Runs before an analysis is started. The input itself is never altered.
pub fn validate_input(input: &str) -> Result<(), Rejection> {
    if input.trim().is_empty() {
        return Err(Rejection::Empty);
    }
    Url::parse(input).map_err(|_| Rejection::Unparseable)?;
    Ok(())
}
