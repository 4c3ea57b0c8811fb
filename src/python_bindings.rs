use pyo3::prelude::*;
use std::path::{Path, PathBuf};

use crate::coefficients::{coefficient_output_path, save_coefficients};
use crate::error::Error;
use crate::graph::load_graph;
use crate::report::Bipartition;
use crate::results::parse_results;

fn to_py_err(e: Error) -> PyErr {
    match e {
        Error::FileOpen { .. } | Error::Io(_) => {
            PyErr::new::<pyo3::exceptions::PyIOError, _>(e.to_string())
        }
        Error::Input(_) => PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()),
        Error::Csv(_) => PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()),
    }
}

/// Python binding for the edge list to coefficient file conversion
#[pyfunction]
#[pyo3(signature = (edge_list_file, output=None))]
fn convert_edge_list(edge_list_file: &str, output: Option<&str>) -> PyResult<(usize, String)> {
    let input = Path::new(edge_list_file);
    let graph = load_graph(input).map_err(to_py_err)?;

    let output_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| coefficient_output_path(input));
    save_coefficients(&graph, &output_path).map_err(to_py_err)?;

    Ok((
        graph.node_count(),
        output_path.to_string_lossy().to_string(),
    ))
}

/// Python binding for solver output parsing.
///
/// Returns one `(group_a, group_b)` pair per best partition, or None when no
/// balanced readout was accepted.
#[pyfunction]
fn parse_result(text: &str) -> PyResult<Option<Vec<(Vec<usize>, Vec<usize>)>>> {
    let solutions = parse_results(text.as_bytes()).map_err(to_py_err)?;
    if solutions.is_empty() {
        return Ok(None);
    }

    let partitions = solutions
        .iter()
        .map(Bipartition::from_canonical)
        .map(|partition| (partition.group_a, partition.group_b))
        .collect();
    Ok(Some(partitions))
}

/// Lowest energy among balanced readouts, or None
#[pyfunction]
fn best_energy(text: &str) -> PyResult<Option<i64>> {
    let solutions = parse_results(text.as_bytes()).map_err(to_py_err)?;
    Ok(solutions.best_energy())
}

/// Python module definition
#[pymodule]
fn ising_partition_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(convert_edge_list, m)?)?;
    m.add_function(wrap_pyfunction!(parse_result, m)?)?;
    m.add_function(wrap_pyfunction!(best_energy, m)?)?;
    m.add("__doc__", "Graph bipartitioning via Ising coefficients, with Python bindings")?;
    Ok(())
}
