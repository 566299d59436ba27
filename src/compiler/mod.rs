use crate::block::{Block, BlockGraph, EventType, IntoBlocks};
use crate::error::CompileError;
use serde::Deserialize;

mod actions;
mod assembler;
pub mod condition;
pub mod context;
mod control;
pub mod imports;
pub mod options;
pub mod router;

use context::CompileContext;
pub use options::CompilerOptions;

/// Compiles block graphs into runnable webhook programs.
///
/// A `Compiler` holds only configuration. Every call to [`Compiler::compile`]
/// builds fresh per-invocation state, so one instance can be shared and
/// reused, and compiling the same input twice yields identical text.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompilerOptions,
}

pub struct CompilerBuilder {
    options: CompilerOptions,
}

impl CompilerBuilder {
    pub fn new() -> Self {
        Self {
            options: CompilerOptions::default(),
        }
    }
    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.options.indent_width = width;
        self
    }
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = depth;
        self
    }
    pub fn with_default_text(mut self, text: &str) -> Self {
        self.options.default_text = text.to_string();
        self
    }
    pub fn with_placeholder_image_url(mut self, url: &str) -> Self {
        self.options.placeholder_image_url = url.to_string();
        self
    }
    pub fn with_port(mut self, port: u16) -> Self {
        self.options.port = port;
        self
    }
    /// Maps a host-specific event name onto a known event tag. Aliases that
    /// point at an unknown tag are ignored.
    pub fn with_event_alias(mut self, user_event_name: &str, event_tag: &str) -> Self {
        if EventType::from_tag(event_tag).is_some() {
            self.options
                .event_aliases
                .insert(user_event_name.to_string(), event_tag.to_string());
        }
        self
    }
    pub fn build(self) -> Compiler {
        Compiler {
            options: self.options,
        }
    }
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The two document shapes accepted by [`Compiler::compile_json`].
#[derive(Deserialize)]
#[serde(untagged)]
enum BlockDocument {
    Tree(Vec<Block>),
    Graph(BlockGraph),
}

impl Compiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compiles root-level blocks into the program text.
    pub fn compile(&self, blocks: &[Block]) -> Result<String, CompileError> {
        let mut ctx = CompileContext::new(&self.options);

        let handlers = router::route(blocks, &mut ctx);
        log::info!(
            "Compiling {} root blocks into {} event handlers",
            blocks.len(),
            handlers.len()
        );

        let mut sections = Vec::with_capacity(handlers.len());
        for handler in &handlers {
            log::debug!(
                "Emitting handler '{}' with {} actions",
                handler.function_name(),
                handler.actions.len()
            );
            let actions = control::emit_sequence(handler.actions.iter().copied(), &mut ctx)?;
            sections.push(assembler::render_handler(handler, actions, &ctx));
        }

        log::debug!("Collected {} unique imports", ctx.imports.len());
        Ok(assembler::assemble(&sections, &ctx))
    }

    /// Compiles the flat, id-referenced graph form.
    pub fn compile_graph(&self, graph: &BlockGraph) -> Result<String, CompileError> {
        let blocks = graph.resolve_with_limit(self.options.max_depth)?;
        self.compile(&blocks)
    }

    /// Converts a custom editor format and compiles it.
    pub fn compile_from<T: IntoBlocks>(&self, source: T) -> Result<String, CompileError> {
        let blocks = source.into_blocks()?;
        self.compile(&blocks)
    }

    /// Parses editor JSON and compiles it. Accepts either an array of nested
    /// blocks or a `{ "roots": [...], "blocks": [...] }` graph object.
    pub fn compile_json(&self, json: &str) -> Result<String, CompileError> {
        let document: BlockDocument =
            serde_json::from_str(json).map_err(|e| CompileError::JsonParse(e.to_string()))?;
        match document {
            BlockDocument::Tree(blocks) => self.compile(&blocks),
            BlockDocument::Graph(graph) => self.compile_graph(&graph),
        }
    }
}
