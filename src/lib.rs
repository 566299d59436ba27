//! # botgen - Block-Graph Compiler
//!
//! **botgen** turns the block graphs built in a no-code chatbot designer into
//! a complete, runnable webhook program: a Flask application for the LINE
//! Messaging API with one handler per event block.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Blocks**: Deserialize the editor's JSON into [`block::Block`]s, or
//!     implement [`block::IntoBlocks`] for your own document format.
//! 2.  **Configure**: Use [`Compiler::builder`] to adjust indentation, defaults or
//!     event aliases. The defaults are fine for most hosts.
//! 3.  **Compile**: [`Compiler::compile`] routes root blocks into event handlers,
//!     emits nested control flow and assembles the program text.
//!
//! Compilation is a pure function of its input: no I/O, no shared state, and
//! the same blocks always produce the same text. The only failure is a cyclic
//! graph, which is reported as [`CompileError::CyclicGraph`].
//!
//! ## Quick Start
//!
//! ```rust
//! use botgen::prelude::*;
//! use serde_json::json;
//!
//! let blocks: Vec<Block> = serde_json::from_value(json!([
//!     { "kind": "event", "data": { "eventType": "message.text", "pattern": "price" } },
//!     { "kind": "reply", "data": { "replyType": "text", "content": "$10" } }
//! ]))?;
//!
//! let program = botgen::generate_code(&blocks)?;
//! assert!(program.contains(r#"if "price".lower() in message.lower():"#));
//! assert!(program.contains(r#"reply_messages.append(TextSendMessage(text="$10"))"#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod block;
pub mod compiler;
pub mod error;
pub mod prelude;
pub mod target;

#[cfg(feature = "python-bindings")]
mod python;

pub use block::Block;
pub use compiler::{Compiler, CompilerBuilder, CompilerOptions};
pub use error::CompileError;

/// Compiles root-level blocks with the default options.
pub fn generate_code(blocks: &[Block]) -> Result<String, CompileError> {
    Compiler::default().compile(blocks)
}
