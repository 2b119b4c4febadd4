//! Driving statement generation end to end
//!
//! Groups the input records, composes one document model per owner,
//! renders it through the layout template and writes the PDF into the
//! output tree. Routing between the base directory and the
//! above-threshold subdirectory happens here.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use render_engine::{render_pdf, RenderRequest};

use crate::compose::{compose_statement, DocumentModel, LOGO_VPATH};
use crate::error::StatementError;
use crate::group::group_by_owner;
use crate::model::{OwnerGroup, RoyaltyRecord};
use crate::options::StatementOptions;
use crate::template::STATEMENT_TEMPLATE;

/// A statement that has been rendered and written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenStatement {
    pub owner_id: String,
    pub owner_name: String,
    pub total_payment: f64,
    pub path: PathBuf,
}

/// Renders one PDF statement per copyright owner.
///
/// Owners paid strictly above the threshold land in the above-threshold
/// subdirectory, everyone else in the base output directory. Both
/// directories are created up front. The first failure aborts the run;
/// statements already written stay on disk.
pub fn generate_statements(
    records: Vec<RoyaltyRecord>,
    options: &StatementOptions,
) -> Result<Vec<WrittenStatement>, StatementError> {
    fs::create_dir_all(&options.output_dir)?;
    fs::create_dir_all(options.output_dir.join(&options.above_threshold_dir))?;

    let logo = load_logo(options)?;
    let groups = group_by_owner(records);
    tracing::info!("Generating statements for {} owner(s)", groups.len());

    let mut written = Vec::with_capacity(groups.len());
    for group in &groups {
        written.push(generate_one(group, logo.as_deref(), options)?);
    }
    Ok(written)
}

fn generate_one(
    group: &OwnerGroup,
    logo: Option<&[u8]>,
    options: &StatementOptions,
) -> Result<WrittenStatement, StatementError> {
    let owner_name = group.first().owner_name.clone();
    if owner_name.is_empty() {
        tracing::warn!(
            "Owner {} has no name in the input table",
            group.owner_id()
        );
    }

    let model = compose_statement(group, options);
    let total = group.total_payment();
    let path = output_path(group, total, options);
    tracing::debug!(
        "Composed {} block(s) for owner {} (total {:.2})",
        model.blocks.len(),
        group.owner_id(),
        total
    );

    let request = build_request(&model, logo, options)?;
    let pdf = render_pdf(&request)?;
    fs::write(&path, &pdf.bytes)?;

    tracing::info!(
        "PDF generated for {}: {} ({} page(s))",
        owner_name,
        path.display(),
        pdf.pages
    );
    Ok(WrittenStatement {
        owner_id: group.owner_id().to_string(),
        owner_name,
        total_payment: total,
        path,
    })
}

/// Reads the configured logo once per run. A configured path that
/// cannot be read is fatal; no logo configured is fine.
fn load_logo(options: &StatementOptions) -> Result<Option<Vec<u8>>, StatementError> {
    match &options.logo_path {
        Some(path) => {
            let bytes = fs::read(path).map_err(|source| StatementError::Logo {
                path: path.clone(),
                source,
            })?;
            Ok(Some(bytes))
        }
        None => Ok(None),
    }
}

fn build_request(
    model: &DocumentModel,
    logo: Option<&[u8]>,
    options: &StatementOptions,
) -> Result<RenderRequest, StatementError> {
    let mut inputs = HashMap::new();
    inputs.insert("blocks".to_string(), serde_json::to_value(&model.blocks)?);
    inputs.insert(
        "page_footer".to_string(),
        serde_json::Value::String(options.footer_text.clone()),
    );

    let mut assets = HashMap::new();
    if let Some(bytes) = logo {
        assets.insert(LOGO_VPATH.to_string(), bytes.to_vec());
    }

    Ok(RenderRequest {
        source: STATEMENT_TEMPLATE.to_string(),
        inputs,
        assets,
    })
}

fn output_path(group: &OwnerGroup, total: f64, options: &StatementOptions) -> PathBuf {
    let file_name = statement_filename(&group.first().owner_name, group.owner_id());
    if total > options.payment_threshold {
        options
            .output_dir
            .join(&options.above_threshold_dir)
            .join(file_name)
    } else {
        options.output_dir.join(file_name)
    }
}

/// File name for an owner's statement: the owner name with spaces and
/// path separators replaced by underscores. An empty name falls back to
/// the owner id.
fn statement_filename(owner_name: &str, owner_id: &str) -> String {
    let mut base = owner_name;
    if base.is_empty() {
        base = owner_id;
    }
    if base.is_empty() {
        base = "statement";
    }

    let sanitized: String = base
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{}.pdf", sanitized)
}
