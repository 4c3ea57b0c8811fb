use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::error::Result;
use crate::graph::Graph;

/// Suffix appended to the edge-list file name for the coefficient file
pub const COEFFICIENT_SUFFIX: &str = ".isakov";

/// One Ising coupling `weight * s_i * s_j`, with `i <= j`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoefficientRecord {
    pub i: usize,
    pub j: usize,
    pub weight: usize,
}

/// Upper-triangle coefficients of `H = sum_ij (N - e_ij) s_i s_j`.
///
/// For each node in ascending order: the diagonal `(i, i, 0)`, then every
/// `j > i` with weight `N - 1` when the edge exists and `N` otherwise.
/// Produces exactly `N (N + 1) / 2` records.
pub fn emit_coefficients(graph: &Graph) -> Vec<CoefficientRecord> {
    (0..graph.node_count())
        .flat_map(|i| coefficient_row(graph, i))
        .collect()
}

/// Records of row `i`: the diagonal, then every `j > i`
fn coefficient_row(graph: &Graph, i: usize) -> impl Iterator<Item = CoefficientRecord> + '_ {
    let n = graph.node_count();
    std::iter::once(CoefficientRecord { i, j: i, weight: 0 }).chain(((i + 1)..n).map(move |j| {
        let weight = if graph.has_edge(i, j) { n - 1 } else { n };
        CoefficientRecord { i, j, weight }
    }))
}

/// Write the coefficients of `graph` as `i j weight` lines.
///
/// Returns the number of records written.
pub fn write_coefficients<W: Write>(graph: &Graph, writer: W) -> Result<usize> {
    write_rows(graph, writer, &ProgressBar::hidden())
}

/// `<input>.isakov`, keeping the full input name including its extension
pub fn coefficient_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(COEFFICIENT_SUFFIX);
    PathBuf::from(name)
}

/// Write the coefficient file for `graph`, one progress tick per node.
///
/// Returns the number of records written.
pub fn save_coefficients(graph: &Graph, output_path: &Path) -> Result<usize> {
    let file = File::create(output_path)?;

    let pb = ProgressBar::new(graph.node_count() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} nodes ({percent}%)",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );

    let written = write_rows(graph, BufWriter::new(file), &pb)?;
    pb.finish_and_clear();

    log::info!("Wrote {} coefficients to {}", written, output_path.display());
    Ok(written)
}

fn write_rows<W: Write>(graph: &Graph, writer: W, pb: &ProgressBar) -> Result<usize> {
    let mut writer = coefficient_writer(writer);
    let mut written = 0;
    for i in 0..graph.node_count() {
        for record in coefficient_row(graph, i) {
            writer.serialize(record)?;
            written += 1;
        }
        pb.inc(1);
    }
    writer.flush()?;
    Ok(written)
}

fn coefficient_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}
