pub mod color;
pub mod combination;
pub mod export;
pub mod palette;
pub mod storage;

pub use color::{Color, Hsl, Rgb};
pub use combination::{CombinationEngine, CombinationRecord};
pub use export::{
    ExportDocument, ExportOptions, ImportDocument, parse_document, read_import_source, write_export,
};
pub use palette::Palette;
pub use storage::{InMemoryBackend, JsonFileBackend, KeyValueBackend};
