//! Loading the metric table and the boundary names from disk.

use crate::config::{load_config, Config};
use crate::SourceArgs;
use aex_metrics::MetricTable;
use aex_resolve::{build_active_set, ActiveSet};
use anyhow::Context;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Open `path` for reading, decompressing it when the name ends in `.gz`.
pub fn open_input(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    if path.extension().is_some_and(|ext| ext == "gz") {
        log::debug!("reading {} through gzip", path.display());
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

pub fn load_metrics(path: &Path) -> anyhow::Result<MetricTable> {
    let table = MetricTable::from_reader(open_input(path)?)
        .with_context(|| format!("loading metrics from {}", path.display()))?;
    log::info!(
        "Loaded {} entities over {} rows from {}",
        table.entity_keys().len(),
        table.row_count(),
        path.display()
    );
    Ok(table)
}

/// Values of `name_column` from a boundary attribute CSV, in record order.
pub fn read_boundary_names<R: Read>(reader: R, name_column: &str) -> anyhow::Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let column = rdr
        .headers()?
        .iter()
        .position(|header| header.trim() == name_column)
        .with_context(|| format!("boundary data has no {:?} column", name_column))?;

    let mut names = Vec::new();
    for record in rdr.records() {
        let record = record?;
        names.push(record.get(column).unwrap_or_default().trim().to_string());
    }
    Ok(names)
}

pub fn load_boundary_names(path: &Path, name_column: &str) -> anyhow::Result<Vec<String>> {
    let names = read_boundary_names(open_input(path)?, name_column)
        .with_context(|| format!("loading boundaries from {}", path.display()))?;
    log::info!("Loaded {} boundary records from {}", names.len(), path.display());
    Ok(names)
}

/// Loaded inputs of a run, with the boundary names already resolved.
pub struct Sources {
    pub config: Config,
    pub table: MetricTable,
    pub boundary_names: Vec<String>,
    pub active: ActiveSet,
}

impl Sources {
    pub fn load(args: &SourceArgs) -> anyhow::Result<Sources> {
        let mut config = load_config(args.config.as_deref())?;
        if let Some(min_similarity) = args.min_similarity {
            config.resolver.min_similarity = min_similarity;
        }
        if let Some(top_k) = args.top_k {
            config.view.top_k = top_k;
        }

        let table = load_metrics(&args.metrics)?;
        let boundary_names = load_boundary_names(&args.boundaries, &args.name_column)?;
        let active = build_active_set(
            &boundary_names,
            table.entity_keys(),
            &config.anchor,
            &config.resolver,
        );
        Ok(Sources {
            config,
            table,
            boundary_names,
            active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const BOUNDARIES: &str = "\
ADMIN,ISO_A3,POP_EST
China,CHN,1397715000
\"Korea, Republic of\",KOR,51709098
Germany,DEU,83132799
";

    #[test]
    fn test_read_boundary_names() {
        let names = read_boundary_names(BOUNDARIES.as_bytes(), "ADMIN").unwrap();
        assert_eq!(names, vec!["China", "Korea, Republic of", "Germany"]);
        let codes = read_boundary_names(BOUNDARIES.as_bytes(), "ISO_A3").unwrap();
        assert_eq!(codes, vec!["CHN", "KOR", "DEU"]);
    }

    #[test]
    fn test_missing_name_column_is_error() {
        let err = read_boundary_names(BOUNDARIES.as_bytes(), "NAME").unwrap_err();
        assert!(err.to_string().contains("NAME"));
    }

    #[test]
    fn test_gzip_input_is_decompressed() {
        let dir = std::env::temp_dir().join(format!("aex-source-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("boundaries.csv.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(BOUNDARIES.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let names = load_boundary_names(&path, "ADMIN").unwrap();
        assert_eq!(names.len(), 3);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
