pub mod coefficients;
pub mod error;
pub mod graph;
pub mod report;
pub mod results;

#[cfg(feature = "python")]
pub mod python_bindings;

// Re-export commonly used types and functions
pub use coefficients::{coefficient_output_path, emit_coefficients, save_coefficients, write_coefficients, CoefficientRecord};
pub use error::{EdgeListError, Error, Result};
pub use graph::{load_graph, parse_edge_list, read_edge_list, Graph};
pub use report::{save_assignments_csv, write_report, Bipartition};
pub use results::{canonicalize, is_balanced, parse_results, read_readouts, SolutionSet, SolverReadout};
