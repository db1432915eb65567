//! swatchbook - personal color swatch manager
//!
//! The engine behind the swatch UI: saved colors with their hex, RGB and HSL
//! forms, favorites and search, channel-averaged color combinations with an
//! editable history, and JSON import/export of colors and palettes.

pub mod app;
pub mod cli;
pub mod color_math;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod store;

pub use app::{App, ImportSummary};
pub use error::{ConfigError, Result, StorageError, SwatchError};
pub use models::{Color, CombinationEngine, CombinationRecord, Hsl, Palette, Rgb};
pub use search::filter_colors;
pub use store::ColorStore;
