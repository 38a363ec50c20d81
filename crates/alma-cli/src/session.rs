//! A lookup session: the loaded relationship index plus the ID lists, held
//! for as long as the user keeps querying.
//!
//! The session never watches the source file. Changes are only picked up by
//! an explicit [`Session::reload`].

use std::collections::{BTreeMap, HashSet};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span, warn};

use alma_ingest::{ListParseMode, LoadReport, TableOptions, load_index, read_id_list};
use alma_model::{
    Classification, IdList, IdPolicy, IndexStats, LookupResult, Membership, ParentSummary,
    RelationshipIndex, Role, classify, derive_parents, lookup,
};

use crate::summary::{render_lookup, render_stats};

/// Default relationship table file name.
pub const DEFAULT_TABLE_PATH: &str = "CHILD PARENT ALMA.csv";

/// A named ID list given on the command line as `NAME=PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSpec {
    pub name: String,
    pub path: PathBuf,
}

impl FromStr for ListSpec {
    type Err = String;

    /// Parses `NAME=PATH`. A bare `PATH` is named after its upper-cased file stem.
    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        if let Some((name, path)) = value.split_once('=') {
            let name = name.trim();
            if name.is_empty() || path.trim().is_empty() {
                return Err(format!("expected NAME=PATH, got '{value}'"));
            }
            return Ok(Self {
                name: name.to_string(),
                path: PathBuf::from(path.trim()),
            });
        }
        let path = PathBuf::from(value);
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_uppercase)
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| format!("cannot derive a list name from '{value}'"))?;
        Ok(Self { name, path })
    }
}

/// Everything needed to (re)load a session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub table_path: PathBuf,
    pub table: TableOptions,
    pub lists: Vec<ListSpec>,
}

/// Lookup result enriched with role and list membership.
#[derive(Debug, Clone, Serialize)]
pub struct LookupOutcome {
    #[serde(flatten)]
    pub result: LookupResult,
    pub role: Role,
    pub lists: BTreeMap<String, bool>,
}

/// Batch classification by role and by each configured list.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// Normalized IDs, deduplicated in input order.
    pub ids: Vec<String>,
    pub roles: Classification,
    pub parents: ParentSummary,
    pub lists: Vec<Membership>,
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    index: RelationshipIndex,
    report: LoadReport,
    lists: Vec<IdList>,
}

struct LoadedData {
    index: RelationshipIndex,
    report: LoadReport,
    lists: Vec<IdList>,
}

fn load_data(config: &SessionConfig) -> Result<LoadedData> {
    let span = info_span!("load", table = %config.table_path.display());
    let _guard = span.enter();
    let (index, report) = load_index(&config.table_path, &config.table).with_context(|| {
        format!(
            "failed to load relationship table {}",
            config.table_path.display()
        )
    })?;
    let lists = config
        .lists
        .iter()
        .map(|spec| {
            read_id_list(&spec.path, &spec.name, ListParseMode::Lines, config.table.id_policy)
                .with_context(|| format!("failed to load ID list {}", spec.name))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(LoadedData {
        index,
        report,
        lists,
    })
}

impl Session {
    /// Load the relationship table and all configured lists.
    pub fn load(config: SessionConfig) -> Result<Self> {
        let data = load_data(&config)?;
        Ok(Self {
            config,
            index: data.index,
            report: data.report,
            lists: data.lists,
        })
    }

    /// Re-read every source. On failure the current data stays in place.
    pub fn reload(&mut self) -> Result<()> {
        let data = load_data(&self.config)?;
        self.index = data.index;
        self.report = data.report;
        self.lists = data.lists;
        info!(records = self.report.records, "Reloaded relationship table");
        Ok(())
    }

    pub fn table_path(&self) -> &Path {
        &self.config.table_path
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn lists(&self) -> &[IdList] {
        &self.lists
    }

    /// Policy applied to table cells, list lines, queries and batch IDs.
    pub fn id_policy(&self) -> IdPolicy {
        self.config.table.id_policy
    }

    /// Normalize a raw query the same way table cells were normalized.
    pub fn normalize(&self, raw: &str) -> String {
        self.id_policy().normalize(raw)
    }

    pub fn lookup(&self, raw: &str) -> LookupOutcome {
        let result = lookup(&self.index, &self.normalize(raw));
        let lists = self
            .lists
            .iter()
            .map(|list| (list.name().to_string(), list.contains(&result.query)))
            .collect();
        LookupOutcome {
            role: result.role(),
            result,
            lists,
        }
    }

    /// Classify a batch. Each ID is normalized like a lookup query; empty
    /// and repeated IDs are dropped.
    pub fn classify<S: AsRef<str>>(&self, raw_ids: &[S]) -> BatchOutcome {
        let mut seen = HashSet::new();
        let ids: Vec<String> = raw_ids
            .iter()
            .map(|raw| self.normalize(raw.as_ref()))
            .filter(|id| !id.is_empty() && seen.insert(id.clone()))
            .collect();
        let roles = classify(&self.index, &ids);
        let parents = derive_parents(&self.index, &roles);
        let lists = self.lists.iter().map(|list| list.partition(&ids)).collect();
        BatchOutcome {
            ids,
            roles,
            parents,
            lists,
        }
    }
}

const HELP: &str = "\
Enter an ALMA ID to see its parents and children.
Commands:
  :reload  re-read the relationship table and lists
  :stats   show load diagnostics
  :help    show this help
  :quit    leave the session
";

/// Run the line-oriented prompt until `:quit` or end of input.
///
/// Lookups and command output go to `output`. `prompt` controls whether a
/// `> ` prompt is written before each line.
pub fn run_interactive<R, W>(
    session: &mut Session,
    input: R,
    mut output: W,
    prompt: bool,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    if prompt {
        write!(output, "{HELP}")?;
    }
    let mut lines = input.lines();
    loop {
        if prompt {
            write!(output, "> ")?;
            output.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            ":quit" | ":q" | ":exit" => break,
            ":help" => write!(output, "{HELP}")?,
            ":stats" => write!(output, "{}", render_stats(session))?,
            ":reload" => match session.reload() {
                Ok(()) => writeln!(
                    output,
                    "Reloaded {} ({} records).",
                    session.table_path().display(),
                    session.report().records
                )?,
                Err(error) => {
                    warn!(error = %format!("{error:#}"), "Reload failed");
                    writeln!(
                        output,
                        "Reload failed: {error:#}\nKeeping the previously loaded table."
                    )?;
                }
            },
            command if command.starts_with(':') => {
                writeln!(output, "Unknown command '{command}'. Type :help for help.")?;
            }
            query => write!(output, "{}", render_lookup(&session.lookup(query)))?,
        }
    }
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_spec_with_name() {
        let spec: ListSpec = "GENIZA=lists/NLI_GNIZA_ALMAs.list".parse().unwrap();
        assert_eq!(spec.name, "GENIZA");
        assert_eq!(spec.path, PathBuf::from("lists/NLI_GNIZA_ALMAs.list"));
    }

    #[test]
    fn test_list_spec_from_stem() {
        let spec: ListSpec = "lists/manuscripts.list".parse().unwrap();
        assert_eq!(spec.name, "MANUSCRIPTS");
    }

    #[test]
    fn test_list_spec_rejects_empty_parts() {
        assert!("=a.list".parse::<ListSpec>().is_err());
        assert!("NAME=".parse::<ListSpec>().is_err());
    }
}
