//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the botgen crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use botgen::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let blocks_json = std::fs::read_to_string("path/to/blocks.json")?;
//!
//! let compiler = Compiler::builder().with_indent_width(4).build();
//! let program = compiler.compile_json(&blocks_json)?;
//! std::fs::write("bot.py", program)?;
//! # Ok(())
//! # }
//! ```

// Compilation
pub use crate::compiler::{Compiler, CompilerBuilder, CompilerOptions};

// Block model
pub use crate::block::{
    Block, BlockGraph, BlockKind, BlockNode, ControlType, DataExt, EventType, IntoBlocks,
    MatchMode, ReplyType, SettingType,
};

// Error types
pub use crate::error::{CompileError, ConversionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
