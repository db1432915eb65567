use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Result, StorageError};
use crate::models::storage::PALETTES_KEY;
use crate::models::{
    Color, CombinationEngine, ExportDocument, ExportOptions, KeyValueBackend, Palette,
    parse_document, read_import_source,
};
use crate::search::filter_colors;
use crate::store::ColorStore;

/// What an import replaced, as collection sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub colors: Option<usize>,
    pub palettes: Option<usize>,
}

/// Main Application State Container
/// Holds the saved colors, the palettes, the session's combination history and
/// the view state (picker selection, search, favorites toggle). Presentation
/// code drives it through the `on_*` callbacks and reads `visible_colors`.
pub struct App<B: KeyValueBackend> {
    pub store: ColorStore<B>,
    pub palettes: Vec<Palette>,
    pub combinations: CombinationEngine,
    pub picker_hex: String,
    pub search_query: String,
    pub show_favorites_only: bool,
    pub editing_combination: Option<usize>,
}

impl<B: KeyValueBackend> App<B> {
    pub fn new(backend: B) -> Result<Self> {
        let palettes = match backend.read(PALETTES_KEY)? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|error| {
                warn!("Saved palettes are unreadable, starting empty: {}", error);
                Vec::new()
            }),
            None => Vec::new(),
        };

        Ok(Self {
            store: ColorStore::load(backend)?,
            palettes,
            combinations: CombinationEngine::new(),
            picker_hex: String::from("#000000"),
            search_query: String::new(),
            show_favorites_only: false,
            editing_combination: None,
        })
    }

    pub fn colors(&self) -> &[Color] {
        self.store.colors()
    }

    /// The saved colors after applying the search query and favorites toggle.
    pub fn visible_colors(&self) -> Vec<&Color> {
        filter_colors(self.store.colors(), &self.search_query, self.show_favorites_only)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn toggle_favorites_only(&mut self) {
        self.show_favorites_only = !self.show_favorites_only;
    }

    pub fn on_picker_change(&mut self, hex: impl Into<String>) {
        self.picker_hex = hex.into();
    }

    /// Save the picker's current color under `name`.
    pub fn create_color(&mut self, name: &str) -> Result<Option<Color>> {
        let hex = self.picker_hex.clone();
        self.store.create(name, &hex)
    }

    pub fn on_add_colors(&mut self, colors: Vec<Color>) -> Result<()> {
        self.store.add_generated(colors)
    }

    pub fn on_toggle_favorite(&mut self, id: &str) -> Result<bool> {
        self.store.toggle_favorite(id)
    }

    pub fn on_delete(&mut self, id: &str) -> Result<bool> {
        self.store.delete(id)
    }

    pub fn on_rename(&mut self, id: &str, name: &str) -> Result<bool> {
        self.store.rename(id, name)
    }

    /// Unconditional; callers confirm with the user first.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear_all()
    }

    pub fn combine(&mut self, hex_a: &str, hex_b: &str) -> Result<String> {
        let result = self.combinations.combine(hex_a, hex_b)?;
        // Positions of any row being edited have shifted.
        self.editing_combination = self.editing_combination.map(|p| p + 1);
        Ok(result)
    }

    pub fn on_start_edit(&mut self, position: usize) {
        self.editing_combination = Some(position);
    }

    pub fn on_save_name(&mut self, position: usize, name: &str) -> Result<()> {
        self.combinations.rename_entry(position, name)?;
        self.editing_combination = None;
        Ok(())
    }

    pub fn on_delete_entry(&mut self, position: usize) -> Result<()> {
        self.combinations.delete_entry(position)?;
        self.editing_combination = match self.editing_combination {
            Some(editing) if editing == position => None,
            Some(editing) if editing > position => Some(editing - 1),
            other => other,
        };
        Ok(())
    }

    pub fn export_document(&self, options: &ExportOptions) -> ExportDocument {
        ExportDocument::new(self.store.colors(), &self.palettes, options)
    }

    /// Apply an import document. A document that fails to parse or validate
    /// changes nothing.
    pub fn import_str(&mut self, raw: &str) -> Result<ImportSummary> {
        let document = parse_document(raw).inspect_err(|error| {
            warn!("Import rejected: {}", error);
        })?;

        let mut summary = ImportSummary::default();
        let previous_colors = document.colors.as_ref().map(|_| self.store.colors().to_vec());

        if let Some(colors) = document.colors {
            summary.colors = Some(colors.len());
            self.store.replace_all(colors)?;
        }
        if let Some(palettes) = document.palettes {
            summary.palettes = Some(palettes.len());
            if let Err(error) = self.save_palettes(palettes) {
                // Imports apply all or nothing: restore the colors.
                if let Some(previous) = previous_colors {
                    if let Err(restore) = self.store.replace_all(previous) {
                        warn!("Failed to restore colors after import error: {}", restore);
                    }
                }
                return Err(error);
            }
        }

        info!(?summary, "import applied");
        Ok(summary)
    }

    /// Read `path` and import its contents.
    pub async fn import_file(&mut self, path: &Path) -> anyhow::Result<ImportSummary> {
        let raw = read_import_source(path).await?;
        Ok(self.import_str(&raw)?)
    }

    fn save_palettes(&mut self, palettes: Vec<Palette>) -> Result<()> {
        let value: Value = serde_json::to_value(&palettes).map_err(StorageError::from)?;
        self.store.backend_mut().write(PALETTES_KEY, &value)?;
        self.palettes = palettes;
        Ok(())
    }
}
