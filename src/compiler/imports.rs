use ahash::AHashSet;
use itertools::Itertools;

/// A declaration the generated program needs beyond its fixed preamble.
///
/// The variant order is the order in which imports are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Import {
    Regex,
    Time,
    FlexMessage,
    ImageMessage,
    StickerMessage,
}

impl Import {
    pub fn statement(&self) -> &'static str {
        match self {
            Import::Regex => "import re",
            Import::Time => "import time",
            Import::FlexMessage => "from linebot.models import FlexSendMessage",
            Import::ImageMessage => "from linebot.models import ImageSendMessage",
            Import::StickerMessage => "from linebot.models import StickerSendMessage",
        }
    }
}

/// Deduplicated set of imports registered while emitting one program.
#[derive(Debug, Default)]
pub struct ImportAccumulator {
    imports: AHashSet<Import>,
}

impl ImportAccumulator {
    pub fn register(&mut self, import: Import) {
        if self.imports.insert(import) {
            log::debug!("Registered import '{}'", import.statement());
        }
    }

    pub fn contains(&self, import: Import) -> bool {
        self.imports.contains(&import)
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// The import statements in a stable order.
    pub fn statements(&self) -> Vec<&'static str> {
        self.imports
            .iter()
            .sorted()
            .map(Import::statement)
            .collect()
    }
}
