//! Group files.
//!
//! ```yaml
//! group: 1
//! choices_a:
//!   - A: B,C
//!   - B: A
//!   - C: ~
//! choices_b:
//!   - A: C
//!   - B: C
//!   - C: A,B
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use abgrid_sna::GroupChoices;
use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::validate::validate_rows;

/// One participant row: a single `label: choices` entry.
type RawRow = BTreeMap<String, Option<String>>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupFile {
    pub group: u32,
    pub choices_a: Vec<RawRow>,
    pub choices_b: Vec<RawRow>,
}

impl GroupFile {
    /// Validate both networks and convert to engine input.
    pub fn into_choices(self) -> anyhow::Result<GroupChoices> {
        Ok(GroupChoices {
            group: self.group,
            choices_a: validate_rows("choices_a", &self.choices_a)?,
            choices_b: validate_rows("choices_b", &self.choices_b)?,
        })
    }
}

/// Parse group YAML text.
pub fn parse_group(text: &str) -> anyhow::Result<GroupChoices> {
    let file: GroupFile = serde_yaml::from_str(text).context("group file is not valid YAML")?;
    file.into_choices()
}

/// Read, parse and validate a group file.
pub fn load_group(path: &Path) -> anyhow::Result<GroupChoices> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let choices = parse_group(&text)?;
    debug!(
        path = %path.display(),
        group = choices.group,
        rows_a = choices.choices_a.len(),
        rows_b = choices.choices_b.len(),
        "group file loaded"
    );
    Ok(choices)
}
