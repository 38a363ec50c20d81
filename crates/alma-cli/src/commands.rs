use std::io::{self, IsTerminal};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use alma_cli::export::{export_batch, export_lookup};
use alma_cli::session::{LookupOutcome, Session, SessionConfig, run_interactive};
use alma_cli::summary::{
    render_batch, render_batch_plain, render_lookup, render_lookup_plain, render_stats,
};
use alma_ingest::{ListParseMode, read_id_file};

use crate::cli::{ClassifyArgs, LookupArgs, OutputFormatArg};

pub fn run_lookup(config: SessionConfig, args: &LookupArgs) -> Result<()> {
    let session = Session::load(config)?;
    let span = info_span!("lookup", ids = args.ids.len());
    let _guard = span.enter();

    let mut outcomes: Vec<LookupOutcome> = Vec::with_capacity(args.ids.len());
    for raw in &args.ids {
        if session.normalize(raw).is_empty() {
            bail!("empty ALMA ID");
        }
        outcomes.push(session.lookup(raw));
    }

    match args.format {
        OutputFormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
        OutputFormatArg::Table => {
            for outcome in &outcomes {
                println!("{}", render_lookup(outcome));
            }
        }
        OutputFormatArg::Plain => {
            for outcome in &outcomes {
                print!("{}", render_lookup_plain(outcome));
            }
        }
    }

    if let Some(dir) = &args.export_dir {
        let mut written = 0usize;
        for outcome in &outcomes {
            written += export_lookup(dir, outcome)?.len();
        }
        info!(dir = %dir.display(), files = written, "Exported lookup results");
    }
    Ok(())
}

pub fn run_session(config: SessionConfig) -> Result<()> {
    let mut session = Session::load(config)?;
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    run_interactive(&mut session, stdin.lock(), io::stdout().lock(), prompt)
}

pub fn run_classify(config: SessionConfig, args: &ClassifyArgs) -> Result<()> {
    let session = Session::load(config)?;
    let mode = if args.digits {
        ListParseMode::Digits
    } else {
        ListParseMode::Lines
    };
    let ids = read_id_file(&args.input, mode, session.id_policy())
        .with_context(|| format!("failed to read IDs from {}", args.input.display()))?;
    if ids.is_empty() {
        bail!("no valid ALMA IDs found in {}", args.input.display());
    }
    let span = info_span!("classify", ids = ids.len());
    let _guard = span.enter();

    let outcome = session.classify(&ids);
    info!(
        parents_only = outcome.roles.parents_only.len(),
        children_and_parents = outcome.roles.children_and_parents.len(),
        children_only = outcome.roles.children_only.len(),
        unmatched = outcome.roles.unmatched.len(),
        unique_parents = outcome.parents.unique_parents.len(),
        "Classified IDs"
    );

    match args.format {
        OutputFormatArg::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormatArg::Table => print!("{}", render_batch(&outcome)),
        OutputFormatArg::Plain => print!("{}", render_batch_plain(&outcome)),
    }

    if let Some(dir) = &args.export_dir {
        let written = export_batch(dir, &outcome)?;
        info!(dir = %dir.display(), files = written.len(), "Exported classification");
    }
    Ok(())
}

pub fn run_stats(config: SessionConfig) -> Result<()> {
    let session = Session::load(config)?;
    print!("{}", render_stats(&session));
    Ok(())
}
