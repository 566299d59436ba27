use crate::compiler::{Compiler, CompilerOptions};
use crate::error::CompileError;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(error: CompileError) -> PyErr {
    match error {
        CompileError::CyclicGraph { .. } => PyRuntimeError::new_err(error.to_string()),
        CompileError::JsonParse(_) | CompileError::Conversion(_) => {
            PyValueError::new_err(error.to_string())
        }
    }
}

/// Compiles a block graph into the source of a LINE webhook bot.
///
/// Args:
///     blocks_json (str): The editor's JSON document, either an array of
///         nested blocks or a `{"roots": [...], "blocks": [...]}` graph.
///     options_json (str | None): Optional compiler options as JSON, e.g.
///         `{"indentWidth": 2, "port": 8080}`.
///
/// Returns:
///     str: The generated Python program.
///
/// Raises:
///     ValueError: If either JSON document is malformed.
///     RuntimeError: If the block graph contains a cycle.
#[pyfunction]
#[pyo3(signature = (blocks_json, options_json = None))]
fn generate_code(blocks_json: &str, options_json: Option<&str>) -> PyResult<String> {
    let options = match options_json {
        Some(json) => CompilerOptions::from_json(json).map_err(to_py_err)?,
        None => CompilerOptions::default(),
    };
    Compiler::new(options)
        .compile_json(blocks_json)
        .map_err(to_py_err)
}

/// Python bindings to the botgen block-graph compiler.
#[pymodule]
fn botgen(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate_code, m)?)?;
    Ok(())
}
