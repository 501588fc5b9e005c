//! Schema checks for group files, applied before any graph is built.
//!
//! A label is a single uppercase ASCII letter. A choice list is one or more
//! labels joined by commas with no spaces (`B`, `B,C,D`), or `null` for a
//! participant who chose nobody. Nobody may choose themselves and nobody may
//! name the same participant twice.

use std::collections::{BTreeMap, BTreeSet};

use abgrid_sna::PackedRow;

use crate::output::CliError;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub value: String,
    pub reason: String,
    pub suggestion: String,
    pub code: &'static str,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
        suggestion: impl Into<String>,
        code: &'static str,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            suggestion: suggestion.into(),
            code,
        }
    }

    pub fn to_cli_error(&self) -> CliError {
        CliError::with_details(
            format!("invalid {} '{}': {}", self.field, self.value, self.reason),
            self.suggestion.clone(),
            self.code,
        )
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} '{}': {}",
            self.field, self.value, self.reason
        )
    }
}

impl std::error::Error for ValidationError {}

fn is_label(s: &str) -> bool {
    s.len() == 1 && s.bytes().all(|b| b.is_ascii_uppercase())
}

pub fn validate_label(field: &str, s: &str) -> Result<(), ValidationError> {
    if is_label(s) {
        return Ok(());
    }
    Err(ValidationError::new(
        field,
        s,
        "must be a single uppercase letter",
        "use labels A to Z",
        "invalid_label",
    ))
}

/// Check one participant's choice list and return the chosen labels.
pub fn validate_choices<'a>(
    field: &str,
    source: &str,
    value: &'a str,
) -> Result<Vec<&'a str>, ValidationError> {
    let chosen: Vec<&str> = value.split(',').collect();
    if !chosen.iter().all(|label| is_label(label)) {
        return Err(ValidationError::new(
            field,
            value,
            "must be uppercase letters separated by commas",
            "write choices as \"B,C\" without spaces, or null for no choices",
            "invalid_choices",
        ));
    }
    if chosen.contains(&source) {
        return Err(ValidationError::new(
            field,
            value,
            format!("{source} cannot choose themselves"),
            format!("remove {source} from its own choice list"),
            "self_choice",
        ));
    }
    let mut seen = BTreeSet::new();
    if let Some(repeated) = chosen.iter().find(|label| !seen.insert(**label)) {
        return Err(ValidationError::new(
            field,
            value,
            format!("{repeated} is chosen more than once"),
            format!("list {repeated} only once"),
            "duplicate_choice",
        ));
    }
    Ok(chosen)
}

/// Validate the rows of one network and convert them to packed rows.
///
/// `network` names the list in error messages (`choices_a`).
pub fn validate_rows(
    network: &str,
    rows: &[BTreeMap<String, Option<String>>],
) -> Result<Vec<PackedRow>, ValidationError> {
    if rows.is_empty() {
        return Err(ValidationError::new(
            network,
            "[]",
            "must list at least one participant",
            "add one `Label: choices` entry per participant",
            "empty_network",
        ));
    }

    let mut sources = BTreeSet::new();
    let mut packed = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let field = format!("{network}[{i}]");
        let mut entries = row.iter();
        let (Some((source, value)), None) = (entries.next(), entries.next()) else {
            return Err(ValidationError::new(
                field,
                format!("{} entries", row.len()),
                "must map exactly one label to its choices",
                "write each row as `A: \"B,C\"`",
                "invalid_row",
            ));
        };

        validate_label(&field, source)?;
        if !sources.insert(source.as_str()) {
            return Err(ValidationError::new(
                field,
                source.as_str(),
                "participant is listed twice",
                "merge the rows for this participant",
                "duplicate_participant",
            ));
        }

        match value {
            Some(value) => {
                validate_choices(&field, source, value)?;
                packed.push(PackedRow::new(source.as_str(), value.as_str()));
            }
            None => packed.push(PackedRow::empty(source.as_str())),
        }
    }
    Ok(packed)
}
