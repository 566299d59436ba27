use super::imports::{Import, ImportAccumulator};
use super::options::CompilerOptions;
use crate::block::Block;
use crate::error::CompileError;
use ahash::AHashMap;
use serde_json::Value;

/// Last-known literal value of every variable set so far in the program.
///
/// This only decides whether a read needs a fallback; it has no runtime effect
/// on the generated code.
#[derive(Debug, Default)]
pub struct VariableTable {
    values: AHashMap<String, Value>,
}

impl VariableTable {
    pub fn record(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn last_value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Per-invocation state threaded through every emitter.
pub struct CompileContext<'o> {
    pub options: &'o CompilerOptions,
    pub imports: ImportAccumulator,
    pub variables: VariableTable,
    unit: String,
    depth: usize,
}

impl<'o> CompileContext<'o> {
    pub fn new(options: &'o CompilerOptions) -> Self {
        Self {
            options,
            imports: ImportAccumulator::default(),
            variables: VariableTable::default(),
            unit: options.indent_unit(),
            depth: 0,
        }
    }

    pub fn register(&mut self, import: Import) {
        self.imports.register(import);
    }

    /// One level of indentation.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Enters the body of `block`, failing once nesting exceeds the configured
    /// limit. Every successful call must be paired with [`Self::leave`].
    pub fn enter(&mut self, block: &Block) -> Result<(), CompileError> {
        if self.depth >= self.options.max_depth {
            return Err(CompileError::CyclicGraph {
                block_id: block.label().to_string(),
                depth: self.depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
