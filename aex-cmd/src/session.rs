//! Replay of a selection event stream through the view coordinator.

use crate::report::open_output;
use crate::source::{open_input, Sources};
use crate::SourceArgs;
use aex_view::{SelectionEvent, ViewCoordinator};
use anyhow::Context;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

/// Apply each JSON event line in order and write the resulting view as one
/// JSON line. Blank lines are skipped. Returns the number of events applied.
pub fn replay<R: BufRead, W: Write>(
    coordinator: &mut ViewCoordinator<'_>,
    events: R,
    mut out: W,
) -> anyhow::Result<usize> {
    let mut applied = 0;
    for (i, line) in events.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: SelectionEvent = serde_json::from_str(&line)
            .with_context(|| format!("event line {}: {:?}", i + 1, line))?;
        log::debug!("session: {:?}", event);
        let view = coordinator.dispatch(&event);
        serde_json::to_writer(&mut out, view)?;
        writeln!(out)?;
        applied += 1;
    }
    out.flush()?;
    Ok(applied)
}

pub fn run_session(
    args: &SourceArgs,
    events: Option<&Path>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let sources = Sources::load(args)?;
    let mut coordinator = ViewCoordinator::new(
        &sources.table,
        &sources.active,
        &sources.config.anchor,
        sources.config.view.clone(),
    )?;

    let input: Box<dyn Read> = match events {
        Some(path) => open_input(path)?,
        None => Box::new(std::io::stdin().lock()),
    };
    let applied = replay(&mut coordinator, BufReader::new(input), open_output(output)?)?;
    log::info!("Applied {} selection events", applied);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aex_metrics::MetricTable;
    use aex_resolve::{build_active_set, AnchorEntity, ResolverConfig};
    use aex_view::ViewConfig;

    const METRICS: &str = "\
Date,\"Exports, Autos, Total, Germany, USD m\",\"Exports, Autos, Total, Japan, USD m\",\"Exports, Autos, Total, Germany, % of total\",\"Exports, Autos, Total, Japan, % of total\"
2024-01-31,100,300,25,75
";

    const EVENTS: &str = r#"{"event":"unit","unit":"USD m"}

{"event":"highlight_top_k"}
{"event":"entity","entity":"Japan"}
{"event":"refresh"}
"#;

    #[test]
    fn test_replay_writes_one_view_per_event() {
        let table = MetricTable::from_csv_str(METRICS).unwrap();
        let anchor = AnchorEntity::default();
        let active = build_active_set(
            &["China", "Germany", "Japan"],
            table.entity_keys(),
            &anchor,
            &ResolverConfig::default(),
        );
        let mut coordinator = ViewCoordinator::new(&table, &active, &anchor, ViewConfig::default()).unwrap();

        let mut out = Vec::new();
        let applied = replay(&mut coordinator, EVENTS.as_bytes(), &mut out).unwrap();
        assert_eq!(applied, 4);

        let text = String::from_utf8(out).unwrap();
        let views: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(views.len(), 4);
        assert_eq!(views[0]["title"], "Automobile Exports by Country (Total, USD m)");
        assert_eq!(views[0]["selection"]["unit"], "USD m");
        assert_eq!(views[1]["top_k"]["entries"][0]["name"], "Japan");
        assert_eq!(views[2]["series"]["latest"], 300.0);
        // refresh leaves the view unchanged
        assert_eq!(views[2], views[3]);
    }

    #[test]
    fn test_bad_event_line_is_error() {
        let table = MetricTable::from_csv_str(METRICS).unwrap();
        let anchor = AnchorEntity::default();
        let active = build_active_set(
            &["Germany"],
            table.entity_keys(),
            &anchor,
            &ResolverConfig::default(),
        );
        let mut coordinator = ViewCoordinator::new(&table, &active, &anchor, ViewConfig::default()).unwrap();
        let err = replay(&mut coordinator, r#"{"event":"zoom"}"#.as_bytes(), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("event line 1"));
    }
}
