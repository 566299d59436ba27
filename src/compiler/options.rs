use crate::block::{DEFAULT_MAX_DEPTH, EventType};
use crate::error::CompileError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Tunables for code generation. Every field has a default, so an options
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Spaces per indentation level in the emitted program.
    pub indent_width: usize,
    /// Deepest control nesting accepted before the input is treated as cyclic.
    pub max_depth: usize,
    /// Text sent by a text reply that has no content.
    pub default_text: String,
    /// URL used by an image reply that has no image URLs.
    pub placeholder_image_url: String,
    /// Port the generated server listens on when `PORT` is unset.
    pub port: u16,
    /// Host-specific event names mapped onto known event tags.
    pub event_aliases: AHashMap<String, String>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            max_depth: DEFAULT_MAX_DEPTH,
            default_text: "Hello!".to_string(),
            placeholder_image_url: "https://example.com/image.png".to_string(),
            port: 5000,
            event_aliases: AHashMap::new(),
        }
    }
}

impl CompilerOptions {
    pub fn from_json(json: &str) -> Result<Self, CompileError> {
        serde_json::from_str(json).map_err(|e| CompileError::JsonParse(e.to_string()))
    }

    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width.max(1))
    }

    /// Resolves an `eventType` tag, consulting the alias table for unknown names.
    pub fn resolve_event(&self, tag: &str) -> Option<EventType> {
        EventType::from_tag(tag).or_else(|| {
            self.event_aliases
                .get(tag)
                .and_then(|known| EventType::from_tag(known))
        })
    }
}
