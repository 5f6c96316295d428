use std::fmt;
use std::future::Future;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::StoreError;

/// Artifact folder used when none is configured.
pub const DEFAULT_CATEGORY: &str = "smetalar/excel";
/// File name used when the project name sanitises to nothing.
pub const FALLBACK_FILE_NAME: &str = "Xarajatlar_smetasi";
pub const MAX_FILE_NAME_CHARS: usize = 120;

/// Retrieval locator (URL or path) of a stored artifact.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactLocator(String);

impl ArtifactLocator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ArtifactLocator> for String {
    fn from(value: ArtifactLocator) -> Self {
        value.0
    }
}

/// Durable storage of generated workbooks.
pub trait ArtifactStore: Send + Sync {
    /// Stores `bytes` under `key`, replacing any previous artifact, and
    /// returns where it can be retrieved.
    fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<ArtifactLocator, StoreError>> + Send;
}

/// File name for a project: path separators and `:` become `_`, the text is
/// NFC normalised and cut to [`MAX_FILE_NAME_CHARS`] characters.
#[must_use]
pub fn sanitize_file_name(project_name: &str) -> String {
    let name: String = project_name
        .nfc()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .take(MAX_FILE_NAME_CHARS)
        .collect();
    if name.trim().is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        name
    }
}

/// `<category>/<YYYY>/<MM>/<name>.xlsx`
#[must_use]
pub fn artifact_key(category: &str, date: NaiveDate, project_name: &str) -> String {
    format!(
        "{}/{:04}/{:02}/{}.xlsx",
        category.trim_matches('/'),
        date.year(),
        date.month(),
        sanitize_file_name(project_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_are_replaced() {
        assert_eq!(sanitize_file_name("A/B\\C:D"), "A_B_C_D");
        assert_eq!(sanitize_file_name("Issiqxona loyihasi"), "Issiqxona loyihasi");
    }

    #[test]
    fn empty_names_fall_back() {
        assert_eq!(sanitize_file_name(""), FALLBACK_FILE_NAME);
        assert_eq!(sanitize_file_name("   "), FALLBACK_FILE_NAME);
    }

    #[test]
    fn long_names_are_cut_by_characters() {
        let name = "ў".repeat(200);
        let sanitized = sanitize_file_name(&name);
        assert_eq!(sanitized.chars().count(), MAX_FILE_NAME_CHARS);
    }

    #[test]
    fn decomposed_text_is_composed() {
        // "o" + combining diaeresis
        assert_eq!(sanitize_file_name("Ko\u{308}l"), "K\u{f6}l");
    }

    #[test]
    fn key_is_partitioned_by_year_and_month() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(
            artifact_key(DEFAULT_CATEGORY, date, "Loyiha: 1/2"),
            "smetalar/excel/2025/03/Loyiha_ 1_2.xlsx"
        );
        assert_eq!(
            artifact_key("/hisobot/", date, ""),
            "hisobot/2025/03/Xarajatlar_smetasi.xlsx"
        );
    }
}
