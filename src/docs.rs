//! Documentation rendering for declared configuration.
//!
//! Works on an instantiated [`ConfigGroup`] (populated or not) and never
//! queries a provider. Each field contributes a [`FieldMeta`]; a field with an
//! attached file field is followed by a `{NAME}_FILE` entry of type `str`.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::MinicfgError;
use crate::field::Field;
use crate::group::ConfigGroup;
use crate::types::DocsFormat;

/// What the docs consumer sees of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: String,
    /// `None` when the caster cannot name its type.
    pub type_name: Option<String>,
    /// Rendered default; `None` when the field has no default.
    pub default: Option<String>,
    pub description: Option<String>,
}

impl FieldMeta {
    pub fn from_field(field: &Field) -> Self {
        Self {
            name: field.name().unwrap_or_default().to_string(),
            type_name: field.type_name(),
            default: field.default_value().map(|v| v.to_string()),
            description: field.description_text().map(str::to_string),
        }
    }
}

/// Renders a group tree as plaintext or a Markdown table per group.
#[derive(Debug, Clone)]
pub struct DocsGenerator {
    title: String,
    fields: Vec<FieldMeta>,
    children: Vec<DocsGenerator>,
}

impl DocsGenerator {
    pub fn new(group: &ConfigGroup) -> Self {
        let mut fields = Vec::new();
        for (_, field) in group.fields() {
            fields.push(FieldMeta::from_field(field));
            if let Some(file_field) = field.file_field() {
                fields.push(FieldMeta::from_field(file_field));
            }
        }

        Self {
            title: group.title().to_string(),
            fields,
            children: group.children().map(|(_, g)| DocsGenerator::new(g)).collect(),
        }
    }

    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    pub fn render(&self, format: DocsFormat) -> String {
        match format {
            DocsFormat::Plaintext => self.as_plaintext(),
            DocsFormat::Markdown => self.as_markdown(),
        }
    }

    pub fn as_plaintext(&self) -> String {
        let mut out = format!("{}\n", self.title);
        for field in &self.fields {
            out.push_str(&format!(" - {}", field.name));
            if let Some(type_name) = non_empty(&field.type_name) {
                out.push_str(&format!(": {type_name}"));
            }
            if let Some(default) = non_empty(&field.default) {
                out.push_str(&format!(" = {default}"));
            }
            if let Some(description) = non_empty(&field.description) {
                out.push_str(&format!("  # {description}"));
            }
            out.push('\n');
        }

        let children: Vec<String> = self.children.iter().map(|c| c.as_plaintext()).collect();
        format!("{out}\n{}", children.join("\n"))
    }

    pub fn as_markdown(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .fields
            .iter()
            .map(|field| {
                vec![
                    format!("`{}`", field.name),
                    code_or_na(non_empty(&field.type_name)),
                    code_or_na(non_empty(&field.default)),
                    non_empty(&field.description).unwrap_or_default().to_string(),
                ]
            })
            .collect();

        let table = markdown_table(&["Name", "Type", "Default", "Description"], &rows);
        let children: Vec<String> = self.children.iter().map(|c| c.as_markdown()).collect();
        format!("**{}**\n{table}\n\n{}", self.title, children.join("\n"))
    }
}

/// Empty strings render like a missing value.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn code_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("`{v}`"),
        None => "N/A".to_string(),
    }
}

/// Left-aligned table with every column padded to its widest cell.
fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render_row = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut out = render_row(headers.to_vec());
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("\n| {} |", dashes.join(" | ")));
    for row in rows {
        out.push('\n');
        out.push_str(&render_row(row.iter().map(String::as_str).collect()));
    }
    out
}

/// Result of a docs request. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum DocsOutput {
    /// The rendered documentation.
    Text(String),
    /// Confirmation that the documentation was written to a file.
    Written { path: PathBuf },
}

impl fmt::Display for DocsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocsOutput::Text(text) => write!(f, "{text}"),
            DocsOutput::Written { path } => {
                write!(f, "Config docs written to {}", path.display())
            }
        }
    }
}

/// Render docs for `group` and either return them or write them to `output`.
pub fn emit(
    group: &ConfigGroup,
    format: DocsFormat,
    output: Option<&Path>,
) -> Result<DocsOutput, MinicfgError> {
    let text = DocsGenerator::new(group).render(format);
    let Some(path) = output else {
        return Ok(DocsOutput::Text(text));
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MinicfgError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, &text).map_err(|e| MinicfgError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(DocsOutput::Written {
        path: path.to_path_buf(),
    })
}
