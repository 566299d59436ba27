use super::definition::Block;
use crate::error::ConversionError;

/// A trait for custom editor formats that can be converted into botgen blocks.
///
/// This is the extension point for hosts whose block editor stores a different
/// document shape. Implement it on your own structs and hand the result to
/// [`Compiler::compile_from`](crate::compiler::Compiler::compile_from).
///
/// # Example
///
/// ```rust,no_run
/// use botgen::prelude::*;
/// use botgen::error::ConversionError;
///
/// struct MyStep { trigger: Option<String>, say: Option<String> }
/// struct MyScript { steps: Vec<MyStep> }
///
/// impl IntoBlocks for MyScript {
///     fn into_blocks(self) -> std::result::Result<Vec<Block>, ConversionError> {
///         self.steps
///             .into_iter()
///             .map(|step| match (step.trigger, step.say) {
///                 (Some(trigger), None) => Ok(Block::new(BlockKind::Event)
///                     .with_data("eventType", trigger)),
///                 (None, Some(text)) => Ok(Block::new(BlockKind::Reply)
///                     .with_data("replyType", "text")
///                     .with_data("content", text)),
///                 _ => Err(ConversionError::Validation(
///                     "a step needs exactly one of trigger or say".to_string(),
///                 )),
///             })
///             .collect()
///     }
/// }
/// ```
pub trait IntoBlocks {
    /// Consumes the object and converts it into root-level blocks.
    fn into_blocks(self) -> Result<Vec<Block>, ConversionError>;
}

impl IntoBlocks for Vec<Block> {
    fn into_blocks(self) -> Result<Vec<Block>, ConversionError> {
        Ok(self)
    }
}
