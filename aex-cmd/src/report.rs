//! One-shot reports over a single selection.

use crate::export::write_series_csv;
use crate::source::Sources;
use crate::SourceArgs;
use aex_metrics::{MetricTable, Unit};
use aex_resolve::{best_candidate, ActiveSet, Resolution, ResolverConfig};
use aex_view::{Highlight, Selection, ViewCoordinator, ViewPayload};
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Open `path` for writing, or stdout when there is no path.
pub fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
    }
}

/// The initial selection of `table` with the requested category and unit.
pub fn selection_for(
    table: &MetricTable,
    category: Option<&str>,
    unit: Option<&str>,
) -> anyhow::Result<Selection> {
    let mut selection = Selection::initial(table);
    if let Some(category) = category {
        if !table.categories().contains(category) {
            anyhow::bail!(
                "unknown category {:?}, expected one of: {}",
                category,
                table.categories().iter().cloned().collect::<Vec<_>>().join(", ")
            );
        }
        selection.category = category.to_string();
    }
    if let Some(unit) = unit {
        let unit: Unit = unit.parse()?;
        if !table.units().contains(&unit) {
            log::warn!("unit {:?} does not appear in the metric source", unit.label());
        }
        selection.unit = unit;
    }
    Ok(selection)
}

/// Write one CSV row per boundary name: active ones with their resolution,
/// then dropped ones with the closest rejected key.
pub fn write_resolution<W: Write>(
    active: &ActiveSet,
    entity_keys: &[String],
    config: &ResolverConfig,
    writer: W,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["boundary_name", "resolution", "entity_key", "score"])?;
    for entity in active.entities() {
        let (kind, key, score) = match &entity.resolution {
            Resolution::Entity { key, score } => ("entity", key.as_str(), format!("{:.3}", score)),
            Resolution::Anchor => ("anchor", "", String::new()),
            Resolution::Unresolved => ("unresolved", "", String::new()),
        };
        wtr.write_record([entity.name.as_str(), kind, key, score.as_str()])?;
    }
    for name in active.unresolved() {
        let closest = best_candidate(name, entity_keys, config.tie_break);
        let (key, score) = match closest {
            Some(candidate) => (candidate.key, format!("{:.3}", candidate.score)),
            None => ("", String::new()),
        };
        wtr.write_record([name.as_str(), "unresolved", key, score.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the top-K table of a highlighted view as `rank,name,value` CSV.
pub fn write_top<W: Write>(view: &ViewPayload, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["rank", "name", "value"])?;
    for (rank, entry) in view.top_k.entries.iter().enumerate() {
        wtr.write_record([
            (rank + 1).to_string(),
            entry.name.clone(),
            entry.display_value.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn run_resolve(args: &SourceArgs) -> anyhow::Result<()> {
    let sources = Sources::load(args)?;
    log::info!(
        "Resolved {} of {} boundary records, {} unresolved",
        sources.active.len(),
        sources.boundary_names.len(),
        sources.active.unresolved().len()
    );
    write_resolution(
        &sources.active,
        sources.table.entity_keys(),
        &sources.config.resolver,
        std::io::stdout().lock(),
    )
}

pub fn run_map(
    args: &SourceArgs,
    category: Option<&str>,
    unit: Option<&str>,
    highlight: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let sources = Sources::load(args)?;
    let mut selection = selection_for(&sources.table, category, unit)?;
    if highlight {
        selection.highlight = Highlight::TopK;
    }

    let mut coordinator = ViewCoordinator::new(
        &sources.table,
        &sources.active,
        &sources.config.anchor,
        sources.config.view.clone(),
    )?;
    let view = coordinator.select(selection);
    log::info!("{}: {} features", view.title, view.features.len());

    let mut out = open_output(output)?;
    serde_json::to_writer_pretty(&mut out, view)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

pub fn run_top(args: &SourceArgs, category: Option<&str>, unit: Option<&str>) -> anyhow::Result<()> {
    let sources = Sources::load(args)?;
    let mut selection = selection_for(&sources.table, category, unit)?;
    selection.highlight = Highlight::TopK;

    let mut coordinator = ViewCoordinator::new(
        &sources.table,
        &sources.active,
        &sources.config.anchor,
        sources.config.view.clone(),
    )?;
    let view = coordinator.select(selection);
    log::info!("{}", view.top_k.title);
    write_top(view, std::io::stdout().lock())
}

pub fn run_series(
    args: &SourceArgs,
    entity: &str,
    category: Option<&str>,
    unit: Option<&str>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let sources = Sources::load(args)?;
    if sources.active.get(entity).is_none() {
        anyhow::bail!("{:?} is not an active boundary entity", entity);
    }
    let mut selection = selection_for(&sources.table, category, unit)?;
    selection.entity = Some(entity.to_string());

    let mut coordinator = ViewCoordinator::new(
        &sources.table,
        &sources.active,
        &sources.config.anchor,
        sources.config.view.clone(),
    )?;
    let view = coordinator.select(selection);
    log::info!(
        "{}: {} points, latest {:?}",
        view.series.title,
        view.series.points.len(),
        view.series.latest
    );
    write_series_csv(&view.series, open_output(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aex_resolve::{build_active_set, AnchorEntity};
    use aex_view::ViewConfig;

    const METRICS: &str = "\
Date,\"Exports, Autos, Total, Germany, USD m\",\"Exports, Autos, Total, Japan, USD m\",\"Exports, Autos, Total, Germany, % of total\"
2024-01-31,100,300,25
";

    fn table() -> MetricTable {
        MetricTable::from_csv_str(METRICS).unwrap()
    }

    #[test]
    fn test_selection_for_defaults_and_overrides() {
        let table = table();
        let selection = selection_for(&table, None, None).unwrap();
        assert_eq!(selection.category, "Total");
        assert_eq!(selection.unit, Unit::ShareOfTotal);
        let selection = selection_for(&table, Some("Total"), Some("USD m")).unwrap();
        assert_eq!(selection.unit, Unit::UsdMillions);
    }

    #[test]
    fn test_selection_for_rejects_unknown_values() {
        let table = table();
        assert!(selection_for(&table, Some("Trucks"), None).is_err());
        assert!(selection_for(&table, None, Some("EUR m")).is_err());
    }

    #[test]
    fn test_write_resolution() {
        let table = table();
        let anchor = AnchorEntity::default();
        let config = ResolverConfig::default();
        let active = build_active_set(
            &["China", "Germany", "Japan", "Atlantis"],
            table.entity_keys(),
            &anchor,
            &config,
        );
        let mut out = Vec::new();
        write_resolution(&active, table.entity_keys(), &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "boundary_name,resolution,entity_key,score");
        assert_eq!(lines[1], "Germany,entity,Germany,1.000");
        assert_eq!(lines[2], "Japan,entity,Japan,1.000");
        assert_eq!(lines[3], "China,anchor,,");
        assert!(lines[4].starts_with("Atlantis,unresolved,"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_write_top() {
        let table = table();
        let anchor = AnchorEntity::default();
        let active = build_active_set(
            &["Germany", "Japan"],
            table.entity_keys(),
            &anchor,
            &ResolverConfig::default(),
        );
        let mut coordinator = ViewCoordinator::new(&table, &active, &anchor, ViewConfig::default()).unwrap();
        let mut selection = selection_for(&table, Some("Total"), Some("USD m")).unwrap();
        selection.highlight = Highlight::TopK;
        let view = coordinator.select(selection);
        let mut out = Vec::new();
        write_top(view, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "rank,name,value\n1,Japan,300\n2,Germany,100\n"
        );
    }
}
