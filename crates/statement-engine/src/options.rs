//! Run configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StatementError;

/// Everything configurable about a statement run.
///
/// The defaults reproduce the reference statement verbatim; a partial
/// JSON file can override individual fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementOptions {
    /// Statement heading
    pub title: String,
    /// Reporting period, rendered as "Period {statement_period}"
    pub statement_period: String,
    /// Issue date shown in the metadata block
    pub statement_date: String,
    /// Issuer lines shown opposite the first metadata rows
    pub issuer_boilerplate: Vec<String>,
    /// Caption under the line-item table
    pub currency_label: String,
    /// Contact line rendered at the bottom of every page
    pub footer_text: String,
    /// Shown when a positive total stays below the threshold
    pub withholding_note: String,
    /// Header logo; the header renders without an image when unset
    pub logo_path: Option<PathBuf>,
    /// Base directory for generated statements
    pub output_dir: PathBuf,
    /// Subdirectory for owners paid above the threshold
    pub above_threshold_dir: String,
    /// Totals strictly above this route to the subdirectory; positive
    /// totals strictly below it get the withholding note
    pub payment_threshold: f64,
}

impl Default for StatementOptions {
    fn default() -> Self {
        Self {
            title: "Royalty Statement".to_string(),
            statement_period: "2022-01-01 - 2022-12-31".to_string(),
            statement_date: "2023-01-31".to_string(),
            issuer_boilerplate: vec![
                "Smart Books".to_string(),
                "Company registration nr: XXXXXXX".to_string(),
                "VAT: XXXXXXXXX".to_string(),
                "Registered for Tax".to_string(),
            ],
            currency_label: "Currency in EUR".to_string(),
            footer_text: "Contact royalty@fake.com for questions".to_string(),
            withholding_note: "Please note that royalties below EUR 50 are not paid due to \
                               bank fees being higher, the royalty will be saved as outgoing \
                               balance and paid out with the next payment."
                .to_string(),
            logo_path: None,
            output_dir: PathBuf::from("Statements"),
            above_threshold_dir: "Payments_Above_50".to_string(),
            payment_threshold: 50.0,
        }
    }
}

impl StatementOptions {
    /// Load options from a JSON file; fields missing from the file keep
    /// their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, StatementError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_reference_statement() {
        let options = StatementOptions::default();

        assert_eq!(options.title, "Royalty Statement");
        assert_eq!(options.statement_date, "2023-01-31");
        assert_eq!(options.payment_threshold, 50.0);
        assert_eq!(options.above_threshold_dir, "Payments_Above_50");
        assert_eq!(options.issuer_boilerplate.len(), 4);
        assert!(options.logo_path.is_none());
    }

    #[test]
    fn test_partial_json_keeps_remaining_defaults() {
        let parsed: StatementOptions =
            serde_json::from_str(r#"{"payment_threshold": 100.0, "title": "Statement"}"#)
                .unwrap();

        assert_eq!(parsed.payment_threshold, 100.0);
        assert_eq!(parsed.title, "Statement");
        assert_eq!(parsed.statement_date, "2023-01-31");
        assert_eq!(parsed.currency_label, "Currency in EUR");
    }

    #[test]
    fn test_options_roundtrip_through_json() {
        let options = StatementOptions {
            logo_path: Some(PathBuf::from("assets/logo.png")),
            ..Default::default()
        };

        let json = serde_json::to_string(&options).unwrap();
        let back: StatementOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
