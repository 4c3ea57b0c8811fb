use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::results::SolutionSet;

/// Node indices of the two groups of a canonical partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartition {
    pub group_a: Vec<usize>,
    pub group_b: Vec<usize>,
}

impl Bipartition {
    /// Group A holds every position matching the first symbol, group B the rest.
    pub fn from_canonical(canonical: &str) -> Self {
        let mut group_a = Vec::new();
        let mut group_b = Vec::new();
        let first = canonical.chars().next();
        for (idx, c) in canonical.chars().enumerate() {
            if Some(c) == first {
                group_a.push(idx);
            } else {
                group_b.push(idx);
            }
        }
        Self { group_a, group_b }
    }
}

/// Row of the assignment CSV export
#[derive(Debug, Serialize)]
struct AssignmentRow {
    solution: usize,
    node: usize,
    group: char,
}

fn write_group<W: Write>(out: &mut W, label: &str, nodes: &[usize]) -> std::io::Result<()> {
    write!(out, "Group {}:", label)?;
    for node in nodes {
        write!(out, " {}", node)?;
    }
    writeln!(out)
}

/// Print each solution as two labeled groups followed by a blank line.
pub fn write_report<W: Write>(solutions: &SolutionSet, mut out: W) -> Result<()> {
    for canonical in solutions.iter() {
        let partition = Bipartition::from_canonical(canonical);
        write_group(&mut out, "A", &partition.group_a)?;
        write_group(&mut out, "B", &partition.group_b)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Write every node's group for every solution as `solution,node,group`.
pub fn save_assignments_csv(solutions: &SolutionSet, output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)?;
    for (solution, canonical) in solutions.iter().enumerate() {
        let partition = Bipartition::from_canonical(canonical);
        let rows = partition
            .group_a
            .iter()
            .map(|&node| (node, 'A'))
            .chain(partition.group_b.iter().map(|&node| (node, 'B')));
        for (node, group) in rows {
            writer.serialize(AssignmentRow {
                solution,
                node,
                group,
            })?;
        }
    }
    writer.flush()?;
    log::info!("Saved assignments to {}", output_path.display());
    Ok(())
}
