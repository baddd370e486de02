use sha2::{Digest, Sha256};

use crate::core::types::SecurityReport;

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Content hash of a report's canonical JSON form.
pub fn report_fingerprint(report: &SecurityReport) -> anyhow::Result<String> {
    let json = serde_json::to_string(report)?;
    Ok(sha256_hex(json.as_bytes()))
}

/// Same report, client and reason always map to the same dispute id.
pub fn stable_dispute_id(fingerprint: &str, user_id: &str, reason: &str) -> String {
    let mut buf = String::new();
    buf.push_str(fingerprint);
    buf.push('|');
    buf.push_str(user_id);
    buf.push('|');
    buf.push_str(reason.trim());
    format!("dsp_{}", &sha256_hex(buf.as_bytes())[..32])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispute_id_ignores_surrounding_whitespace() {
        let a = stable_dispute_id("abc", "user_1", "site is my bank");
        let b = stable_dispute_id("abc", "user_1", "  site is my bank \n");
        assert_eq!(a, b);
        assert!(a.starts_with("dsp_"));
        assert_eq!(a.len(), 4 + 32);
    }

    #[test]
    fn dispute_id_depends_on_every_part() {
        let base = stable_dispute_id("abc", "user_1", "reason");
        assert_ne!(base, stable_dispute_id("abd", "user_1", "reason"));
        assert_ne!(base, stable_dispute_id("abc", "user_2", "reason"));
        assert_ne!(base, stable_dispute_id("abc", "user_1", "other"));
    }
}
