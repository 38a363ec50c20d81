//! File exports: `.txt` files with one ID per line, newline-terminated, and
//! the child-to-parents mapping as CSV.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use alma_model::ParentSummary;

use crate::session::{BatchOutcome, LookupOutcome};
use crate::summary::join_parents;

/// File name of the child-to-parents mapping export.
pub const CHILD_TO_PARENTS_CSV: &str = "CHILD_TO_PARENTS.csv";

/// Join IDs one per line. A non-empty list ends with a newline.
pub fn to_txt<S: AsRef<str>>(ids: &[S]) -> String {
    let mut text = ids
        .iter()
        .map(|id| id.as_ref())
        .collect::<Vec<&str>>()
        .join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

/// Write `<ID>_parents.txt` and `<ID>_children.txt` for the non-empty sides
/// of a lookup. Returns the files written.
pub fn export_lookup(dir: &Path, outcome: &LookupOutcome) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let result = &outcome.result;
    let stem = file_stem(&result.query);
    let mut written = Vec::new();
    let sides = [
        ("parents", &result.as_child_parents),
        ("children", &result.as_parent_children),
    ];
    for (suffix, ids) in sides {
        if ids.is_empty() {
            continue;
        }
        let ids: Vec<&String> = ids.iter().collect();
        let path = dir.join(format!("{stem}_{suffix}.txt"));
        write_ids(&path, &ids)?;
        written.push(path);
    }
    Ok(written)
}

/// Write one file per group of a batch classification, empty groups included,
/// plus [`CHILD_TO_PARENTS_CSV`] when any submitted ID is a child.
pub fn export_batch(dir: &Path, outcome: &BatchOutcome) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let mut groups: Vec<(String, &[String])> = Vec::new();
    for membership in &outcome.lists {
        let name = file_stem(&membership.list);
        groups.push((format!("{name}.txt"), membership.members.as_slice()));
        groups.push((format!("NOT_{name}.txt"), membership.non_members.as_slice()));
    }
    let roles = &outcome.roles;
    groups.push(("PARENTS_ONLY.txt".to_string(), roles.parents_only.as_slice()));
    groups.push((
        "CHILDREN_AND_PARENTS.txt".to_string(),
        roles.children_and_parents.as_slice(),
    ));
    groups.push(("CHILDREN_ONLY.txt".to_string(), roles.children_only.as_slice()));
    groups.push((
        "TOP_LEVEL_PARENTS.txt".to_string(),
        roles.top_level_parents.as_slice(),
    ));
    groups.push(("STANDALONE.txt".to_string(), roles.standalone.as_slice()));
    groups.push((
        "UNIQUE_PARENTS.txt".to_string(),
        outcome.parents.unique_parents.as_slice(),
    ));

    let mut written = Vec::with_capacity(groups.len());
    for (file_name, ids) in groups {
        let path = dir.join(file_name);
        write_ids(&path, ids)?;
        written.push(path);
    }
    if !outcome.parents.mapping.is_empty() {
        let path = dir.join(CHILD_TO_PARENTS_CSV);
        write_mapping(&path, &outcome.parents)?;
        written.push(path);
    }
    Ok(written)
}

/// Write the `Child,Parents` mapping, parents joined with ` ||| `.
fn write_mapping(path: &Path, parents: &ParentSummary) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(["Child", "Parents"])
        .with_context(|| format!("write {}", path.display()))?;
    for row in &parents.mapping {
        writer
            .write_record([row.child.as_str(), join_parents(&row.parents).as_str()])
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = parents.mapping.len(), "Exported mapping");
    Ok(())
}

fn write_ids<S: AsRef<str>>(path: &Path, ids: &[S]) -> Result<()> {
    fs::write(path, to_txt(ids)).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(path = %path.display(), ids = ids.len(), "Exported IDs");
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create export directory {}", dir.display()))
}

/// Make an ID or list name safe to use as a file name.
fn file_stem(value: &str) -> String {
    value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}
