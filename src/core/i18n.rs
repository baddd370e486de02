use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::core::error::CheckError;

const EN_TABLE: &str = include_str!("../../locales/en.toml");
const ES_TABLE: &str = include_str!("../../locales/es.toml");

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
    Ru,
    Zh,
    Ja,
    Ko,
}

impl Locale {
    pub const ALL: [Locale; 10] = [
        Locale::En,
        Locale::Es,
        Locale::Fr,
        Locale::De,
        Locale::It,
        Locale::Pt,
        Locale::Ru,
        Locale::Zh,
        Locale::Ja,
        Locale::Ko,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::It => "it",
            Locale::Pt => "pt",
            Locale::Ru => "ru",
            Locale::Zh => "zh",
            Locale::Ja => "ja",
            Locale::Ko => "ko",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        let code = code.trim().to_ascii_lowercase();
        Locale::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Resolves a language tag such as `es-MX` or `es_ES.UTF-8`.
    /// Unknown tags fall back to English.
    pub fn detect(tag: &str) -> Locale {
        let primary = tag
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default();
        Locale::from_code(primary).unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Dot-path string lookup with `{name}` substitution.
pub trait Translate {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;

    fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}

/// Flattened string tables, one per locale that ships a table.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: HashMap<Locale, HashMap<String, String>>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    let mut catalog = Catalog::default();
    for (locale, raw) in [(Locale::En, EN_TABLE), (Locale::Es, ES_TABLE)] {
        if let Err(err) = catalog.load(locale, raw) {
            tracing::error!("failed to load {} strings: {}", locale, err);
        }
    }
    catalog
});

impl Catalog {
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn load(&mut self, locale: Locale, raw: &str) -> Result<(), CheckError> {
        let value: toml::Table =
            toml::from_str(raw).map_err(|e| CheckError::Config(e.to_string()))?;
        let mut flat = HashMap::new();
        flatten("", &value, &mut flat);
        self.tables.insert(locale, flat);
        Ok(())
    }

    pub fn has_table(&self, locale: Locale) -> bool {
        self.tables.contains_key(&locale)
    }

    #[cfg(test)]
    pub fn keys(&self, locale: Locale) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .tables
            .get(&locale)
            .map(|t| t.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.tables
            .get(&locale)
            .and_then(|t| t.get(key))
            .map(String::as_str)
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut HashMap<String, String>) {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            toml::Value::String(s) => {
                out.insert(key, s.clone());
            }
            toml::Value::Table(inner) => flatten(&key, inner, out),
            other => {
                out.insert(key, other.to_string());
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    catalog: &'a Catalog,
    locale: Locale,
}

impl Translator<'static> {
    pub fn new(locale: Locale) -> Self {
        Self {
            catalog: Catalog::builtin(),
            locale,
        }
    }
}

impl<'a> Translator<'a> {
    pub fn with_catalog(catalog: &'a Catalog, locale: Locale) -> Self {
        Self { catalog, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl Translate for Translator<'_> {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = self
            .catalog
            .lookup(self.locale, key)
            .or_else(|| self.catalog.lookup(Locale::En, key))
            .unwrap_or(key);
        substitute(template, params)
    }
}

/// Replaces each `{name}` with its value. Values are inserted literally and
/// never rescanned.
pub fn substitute(template: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match params.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_locale_from_tags() {
        assert_eq!(Locale::detect("es-MX"), Locale::Es);
        assert_eq!(Locale::detect("es_ES.UTF-8"), Locale::Es);
        assert_eq!(Locale::detect("DE"), Locale::De);
        assert_eq!(Locale::detect("xx-YY"), Locale::En);
        assert_eq!(Locale::detect(""), Locale::En);
    }

    #[test]
    fn looks_up_nested_keys() {
        let en = Translator::new(Locale::En);
        assert_eq!(en.t("security.malware.trojan"), "Trojan Horse");
        let es = Translator::new(Locale::Es);
        assert_eq!(es.t("security.malware.trojan"), "Caballo de Troya");
    }

    #[test]
    fn falls_back_to_english_then_key() {
        let fr = Translator::new(Locale::Fr);
        assert_eq!(fr.t("security.malware.trojan"), "Trojan Horse");
        assert_eq!(fr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn substitutes_params_literally() {
        assert_eq!(
            substitute("{type} Detected", &[("type", "{count}")]),
            "{count} Detected"
        );
        assert_eq!(substitute("{a} and {b}", &[("a", "x")]), "x and {b}");
        assert_eq!(substitute("open {brace", &[("brace", "x")]), "open {brace");
    }

    #[test]
    fn shipped_tables_have_the_same_keys() {
        let catalog = Catalog::builtin();
        assert!(catalog.has_table(Locale::En));
        assert!(catalog.has_table(Locale::Es));
        assert_eq!(catalog.keys(Locale::En), catalog.keys(Locale::Es));
    }

    #[test]
    fn custom_catalogs_fall_back_to_the_key() {
        let mut catalog = Catalog::default();
        catalog
            .load(Locale::Fr, "[security.malware]\ntrojan = \"Cheval de Troie\"\n")
            .unwrap();
        assert!(catalog.load(Locale::De, "not = [toml").is_err());

        let fr = Translator::with_catalog(&catalog, Locale::Fr);
        assert_eq!(fr.locale(), Locale::Fr);
        assert_eq!(fr.t("security.malware.trojan"), "Cheval de Troie");
        assert_eq!(fr.t("security.malware.worm"), "security.malware.worm");
    }
}
