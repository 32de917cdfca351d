/*!
# Archive I/O

This module reads and writes the two textual archive formats used by Pathina:

- **Graph archive:** a JSON mapping from an edge key of the form `"from,to"`
  to a record with `weight` and `cost` fields.
- **Benchmark archive:** a JSON mapping from a graph size (node or edge
  count) to a measured duration in seconds.

Both archives are written with canonical key ordering, so loading a saved
archive and saving it again yields a byte-identical file. Files that fail
schema validation on load are reported as `ArchiveCorrupt`; filesystem
failures are reported as `Io`.
*/

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::PathinaError;
use crate::core::types::{NodeId, WcGraph};

/// The attribute record stored per edge in a graph archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub weight: u64,
    pub cost: u64,
}

/// Timings keyed by graph size (node count or edge count).
pub type BenchmarkArchive = BTreeMap<u64, f64>;

type GraphArchive = BTreeMap<String, EdgeRecord>;

/// Writes the edge set of `graph` to a JSON archive at `path`.
pub fn save_graph<P: AsRef<Path>>(graph: &WcGraph, path: P) -> Result<(), PathinaError> {
    let mut archive = GraphArchive::new();
    for (from, to, wc) in graph.edges() {
        archive.insert(
            edge_key(from, to),
            EdgeRecord {
                weight: wc.weight,
                cost: wc.cost,
            },
        );
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &archive)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Loads a graph from a JSON archive at `path`.
///
/// # Errors
///
/// Returns `ArchiveCorrupt` when the file does not match the archive schema
/// (bad JSON, malformed edge keys, loop edges) and `Io` on filesystem errors.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<WcGraph, PathinaError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let archive: GraphArchive = serde_json::from_reader(reader).map_err(|e| {
        PathinaError::archive_corrupt(format!("graph archive failed schema validation: {}", e))
    })?;
    let mut edges = Vec::with_capacity(archive.len());
    for (key, record) in &archive {
        let (from, to) = parse_edge_key(key)?;
        edges.push(((from, to), (record.weight, record.cost)));
    }
    WcGraph::from_edges(edges)
        .map_err(|e| PathinaError::archive_corrupt(format!("graph archive holds a bad edge: {}", e)))
}

/// Writes size-to-seconds timings to a JSON archive at `path`.
pub fn save_benchmark<P: AsRef<Path>>(
    results: &BenchmarkArchive,
    path: P,
) -> Result<(), PathinaError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Loads size-to-seconds timings from a JSON archive at `path`.
///
/// The sizes are stored as JSON object keys and re-parsed from their textual
/// form.
pub fn load_benchmark<P: AsRef<Path>>(path: P) -> Result<BenchmarkArchive, PathinaError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        PathinaError::archive_corrupt(format!(
            "benchmark archive failed schema validation: {}",
            e
        ))
    })
}

fn edge_key(from: NodeId, to: NodeId) -> String {
    format!("{},{}", from, to)
}

fn parse_edge_key(key: &str) -> Result<(NodeId, NodeId), PathinaError> {
    let mut parts = key.split(',');
    let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PathinaError::archive_corrupt(format!(
            "edge key '{}' is not of the form 'from,to'",
            key
        )));
    };
    let from = from.trim().parse::<NodeId>().map_err(|_| {
        PathinaError::archive_corrupt(format!("edge key '{}' has a bad source id", key))
    })?;
    let to = to.trim().parse::<NodeId>().map_err(|_| {
        PathinaError::archive_corrupt(format!("edge key '{}' has a bad target id", key))
    })?;
    Ok((from, to))
}
