use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{EdgeListError, Error, Result};

/// Maps node index to the set of its neighbors
type Adjacency = BTreeMap<usize, BTreeSet<usize>>;

/// Validated undirected graph.
///
/// Node indices form the contiguous range `0..node_count()` and the node
/// count is even and non-zero. Every edge is stored in both directions; a
/// self-loop only marks its node as present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Adjacency,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn neighbors(&self, node: usize) -> Option<&BTreeSet<usize>> {
        self.adjacency.get(&node)
    }

    /// True if an edge between `i` and `j` was declared (in either direction).
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adjacency
            .get(&i)
            .map_or(false, |neighbors| neighbors.contains(&j))
    }
}

/// Parse an edge list from text lines.
///
/// Empty lines, lines starting with `#` and bare carriage returns are skipped.
/// Every other line must start with two non-negative integers; anything after
/// them is ignored.
pub fn parse_edge_list<I, S>(lines: I) -> std::result::Result<Graph, EdgeListError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = EdgeListBuilder::default();
    for (idx, line) in lines.into_iter().enumerate() {
        builder.push_line(idx + 1, line.as_ref())?;
    }
    builder.finish()
}

/// Parse an edge list from a buffered reader.
///
/// A line that is not valid UTF-8 counts as bad indices, unless it would be
/// skipped anyway.
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<Graph> {
    let mut builder = EdgeListBuilder::default();
    for (idx, line_result) in reader.split(b'\n').enumerate() {
        let bytes = line_result?;
        let line_number = idx + 1;
        match std::str::from_utf8(&bytes) {
            Ok(line) => builder.push_line(line_number, line)?,
            Err(_) if is_skipped(&bytes) => {}
            Err(_) => return Err(EdgeListError::Parse { line: line_number }.into()),
        }
    }
    Ok(builder.finish()?)
}

/// Open and parse an edge-list file.
pub fn load_graph(path: &Path) -> Result<Graph> {
    let file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let graph = read_edge_list(BufReader::new(file))?;
    log::info!(
        "Loaded graph from {} with {} nodes",
        path.display(),
        graph.node_count()
    );
    Ok(graph)
}

#[derive(Default)]
struct EdgeListBuilder {
    adjacency: Adjacency,
    seen: HashSet<(usize, usize)>,
}

impl EdgeListBuilder {
    fn push_line(&mut self, line_number: usize, line: &str) -> std::result::Result<(), EdgeListError> {
        if is_skipped(line.as_bytes()) {
            log::debug!("Skipping line {}", line_number);
            return Ok(());
        }

        let (x, y) = parse_indices(line).ok_or(EdgeListError::Parse { line: line_number })?;

        // Both directions go into `seen`, so a later line repeating
        // either orientation is rejected.
        if self.seen.contains(&(x, y)) {
            return Err(EdgeListError::DuplicateEdge { line: line_number });
        }
        self.seen.insert((x, y));
        self.seen.insert((y, x));

        self.adjacency.entry(x).or_default().insert(y);
        self.adjacency.entry(y).or_default().insert(x);
        Ok(())
    }

    fn finish(self) -> std::result::Result<Graph, EdgeListError> {
        check_contiguous(&self.adjacency)?;

        let count = self.adjacency.len();
        if count == 0 {
            return Err(EdgeListError::EmptyGraph);
        }
        if count % 2 != 0 {
            return Err(EdgeListError::OddNodeCount { count });
        }

        Ok(Graph {
            adjacency: self.adjacency,
        })
    }
}

fn is_skipped(line: &[u8]) -> bool {
    line.is_empty() || line[0] == b'#' || line == b"\r"
}

fn parse_indices(line: &str) -> Option<(usize, usize)> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse::<usize>().ok()?;
    let y = tokens.next()?.parse::<usize>().ok()?;
    Some((x, y))
}

/// Keys of the adjacency must be exactly `0..len`. A gap is reported as the
/// first node whose predecessor is absent.
fn check_contiguous(adjacency: &Adjacency) -> std::result::Result<(), EdgeListError> {
    for (expected, &node) in adjacency.keys().enumerate() {
        if node != expected {
            if expected == 0 {
                return Err(EdgeListError::MissingNodeZero);
            }
            return Err(EdgeListError::Discontinuity {
                node,
                missing: node - 1,
            });
        }
    }
    Ok(())
}
