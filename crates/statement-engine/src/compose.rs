//! Building the document model for one owner's statement
//!
//! The model is an ordered sequence of presentation blocks, serialized
//! as tagged JSON for the layout template. Everything is pre-formatted
//! here; the template only arranges strings.

use serde::Serialize;

use crate::format::{format_amount, format_percentage};
use crate::model::OwnerGroup;
use crate::options::StatementOptions;

/// Virtual path the header logo is mounted under when configured
pub const LOGO_VPATH: &str = "/logo.png";

/// Column labels of the line-item table, in render order
pub const COLUMN_LABELS: [&str; 9] = [
    "Title ID",
    "Title Name",
    "Author",
    "Sales",
    "Royalty Rate",
    "Royalty Earned",
    "Ingoing Balance",
    "Outgoing Balance",
    "Payment",
];

/// One presentation block of a statement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Header {
        title: String,
        period: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        logo: Option<String>,
    },
    Metadata {
        pairs: Vec<(String, String)>,
    },
    LineItems {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    CurrencyNote {
        text: String,
    },
    TotalLine {
        text: String,
    },
    WithholdingNote {
        text: String,
    },
}

/// The renderer-agnostic content of one statement, consumed exactly once
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentModel {
    pub blocks: Vec<Block>,
}

/// Build the document model for one owner's group.
pub fn compose_statement(group: &OwnerGroup, options: &StatementOptions) -> DocumentModel {
    let mut blocks = vec![
        header_block(options),
        metadata_block(group, options),
        line_items_block(group),
        Block::CurrencyNote {
            text: options.currency_label.clone(),
        },
    ];

    let total = group.total_payment();
    if total > 0.0 {
        blocks.push(Block::TotalLine {
            text: format!(
                "Total amount to be paid: EUR {}",
                format_amount(Some(total))
            ),
        });
        if total < options.payment_threshold {
            blocks.push(Block::WithholdingNote {
                text: options.withholding_note.clone(),
            });
        }
    }

    DocumentModel { blocks }
}

fn header_block(options: &StatementOptions) -> Block {
    Block::Header {
        title: options.title.clone(),
        period: format!("Period {}", options.statement_period),
        logo: options.logo_path.as_ref().map(|_| LOGO_VPATH.to_string()),
    }
}

/// Two-column pair table: owner details on the left, issuer boilerplate
/// opposite the first rows, remaining right cells blank.
fn metadata_block(group: &OwnerGroup, options: &StatementOptions) -> Block {
    let first = group.first();
    let left = [
        format!("Copyright Owner ID: {}", first.owner_id),
        format!("Copyright Owner Name: {}", first.owner_name),
        format!("Contact: {}", or_na(&first.contact)),
        format!("Account number: {}", or_na(&first.account_number)),
        format!("Bank ID: {}", or_na(&first.bank_id)),
        format!("Statement ID: {}", or_na(&first.title_id)),
        format!("Date: {}", options.statement_date),
    ];

    let pairs = left
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let issuer = options
                .issuer_boilerplate
                .get(i)
                .cloned()
                .unwrap_or_default();
            (label, issuer)
        })
        .collect();

    Block::Metadata { pairs }
}

fn line_items_block(group: &OwnerGroup) -> Block {
    let columns = COLUMN_LABELS.iter().map(|label| label.to_string()).collect();

    let rows = group
        .records()
        .iter()
        .map(|record| {
            vec![
                record.title_id.clone().unwrap_or_default(),
                record.title_name.clone(),
                record.author.clone(),
                format_amount(record.sales),
                format_percentage(record.royalty_rate),
                format_amount(record.royalties_earned),
                format_amount(record.ingoing_balance),
                format_amount(record.outgoing_balance),
                payment_cell(record.payment),
            ]
        })
        .collect();

    Block::LineItems { columns, rows }
}

/// Blank unless strictly positive.
fn payment_cell(payment: Option<f64>) -> String {
    match payment {
        Some(p) if p > 0.0 => format_amount(Some(p)),
        _ => String::new(),
    }
}

fn or_na(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or("N/A")
}
