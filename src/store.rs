//! The saved-color collection and its write-through persistence.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Result, StorageError, SwatchError};
use crate::models::storage::COLORS_KEY;
use crate::models::{Color, KeyValueBackend};

type Listener = Box<dyn FnMut(&[Color])>;

/// Ordered collection of saved colors, most recent first.
///
/// Every call that changes the collection writes the whole collection to the
/// backend before returning. Calls that change nothing write nothing.
pub struct ColorStore<B: KeyValueBackend> {
    colors: Vec<Color>,
    backend: B,
    listeners: Vec<Listener>,
}

// Custom debug implementation since listeners are closures
impl<B: KeyValueBackend + std::fmt::Debug> std::fmt::Debug for ColorStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorStore")
            .field("colors", &self.colors)
            .field("backend", &self.backend)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<B: KeyValueBackend> ColorStore<B> {
    /// Restore the collection saved in `backend`. Missing or unreadable data
    /// yields an empty collection.
    pub fn load(backend: B) -> Result<Self> {
        let colors = match backend.read(COLORS_KEY)? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|error| {
                warn!("Saved colors are unreadable, starting empty: {}", error);
                Vec::new()
            }),
            None => Vec::new(),
        };

        Ok(Self {
            colors,
            backend,
            listeners: Vec::new(),
        })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn get(&self, id: &str) -> Option<&Color> {
        self.colors.iter().find(|color| color.id == id)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Register a listener called with the new collection after each change.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Color]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Save a new color. Returns `Ok(None)` when the trimmed name is empty.
    pub fn create(&mut self, name: &str, hex: &str) -> Result<Option<Color>> {
        self.create_at(name, hex, Utc::now())
    }

    pub fn create_at(&mut self, name: &str, hex: &str, now: DateTime<Utc>) -> Result<Option<Color>> {
        if name.trim().is_empty() {
            debug!("create skipped: {}", SwatchError::EmptyName);
            return Ok(None);
        }

        let color = Color::new(name, hex, now)?;
        let mut colors = Vec::with_capacity(self.colors.len() + 1);
        colors.push(color.clone());
        colors.extend_from_slice(&self.colors);
        self.commit(colors)?;
        Ok(Some(color))
    }

    /// Flip the favorite flag. Returns false when no color has this id.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let Some(position) = self.position(id) else {
            debug!("toggle skipped: {}", SwatchError::NotFound(id.to_string()));
            return Ok(false);
        };
        let mut colors = self.colors.clone();
        colors[position].toggle_favorite();
        self.commit(colors)?;
        Ok(true)
    }

    /// Replace the name as given; unlike `create`, empty names are accepted.
    pub fn rename(&mut self, id: &str, new_name: &str) -> Result<bool> {
        let Some(position) = self.position(id) else {
            debug!("rename skipped: {}", SwatchError::NotFound(id.to_string()));
            return Ok(false);
        };
        let mut colors = self.colors.clone();
        colors[position].name = new_name.to_string();
        self.commit(colors)?;
        Ok(true)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(position) = self.position(id) else {
            debug!("delete skipped: {}", SwatchError::NotFound(id.to_string()));
            return Ok(false);
        };
        let mut colors = self.colors.clone();
        colors.remove(position);
        self.commit(colors)?;
        Ok(true)
    }

    /// Remove every color. Asking the user first is the caller's job.
    pub fn clear_all(&mut self) -> Result<()> {
        info!("clearing {} saved colors", self.colors.len());
        self.commit(Vec::new())
    }

    /// Prepend externally produced colors as they are.
    pub fn add_generated(&mut self, generated: Vec<Color>) -> Result<()> {
        if generated.is_empty() {
            return Ok(());
        }
        let mut colors = generated;
        colors.extend_from_slice(&self.colors);
        self.commit(colors)
    }

    /// Swap in a whole new collection, as an import does.
    pub fn replace_all(&mut self, colors: Vec<Color>) -> Result<()> {
        self.commit(colors)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.colors.iter().position(|color| color.id == id)
    }

    /// Persist `colors`, then make it the current collection. A failed write
    /// leaves the collection and listeners untouched.
    fn commit(&mut self, colors: Vec<Color>) -> Result<()> {
        let value: Value = serde_json::to_value(&colors).map_err(StorageError::from)?;
        self.backend.write(COLORS_KEY, &value)?;
        self.colors = colors;
        for listener in &mut self.listeners {
            listener(&self.colors);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::storage::testing::FlakyBackend;
    use crate::models::{InMemoryBackend, JsonFileBackend};
    use chrono::Duration;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> ColorStore<InMemoryBackend> {
        ColorStore::load(InMemoryBackend::new()).unwrap()
    }

    /// Three colors created a millisecond apart, so ids differ.
    fn seeded() -> ColorStore<InMemoryBackend> {
        let mut store = store();
        let start = Utc::now();
        for (i, (name, hex)) in [("Red", "#ff0000"), ("Green", "#00ff00"), ("Blue", "#0000ff")]
            .into_iter()
            .enumerate()
        {
            store
                .create_at(name, hex, start + Duration::milliseconds(i as i64))
                .unwrap();
        }
        store
    }

    #[test]
    fn create_prepends_and_writes_through() {
        let store = seeded();
        let names: Vec<_> = store.colors().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Blue", "Green", "Red"]);
        assert_eq!(store.backend().writes(), 3);

        let saved = store.backend().read(COLORS_KEY).unwrap().unwrap();
        assert_eq!(saved[0]["name"], "Blue");
    }

    #[test]
    fn create_with_blank_name_is_a_silent_no_op() {
        let mut store = store();
        assert!(store.create("", "#abcdef").unwrap().is_none());
        assert!(store.create("   ", "#abcdef").unwrap().is_none());
        assert!(store.is_empty());
        assert_eq!(store.backend().writes(), 0);
    }

    #[test]
    fn create_rejects_invalid_hex() {
        let mut store = store();
        assert!(matches!(
            store.create("Oops", "#abc"),
            Err(SwatchError::InvalidHex(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_favorite_is_an_involution() {
        let mut store = seeded();
        let id = store.colors()[1].id.clone();
        let before = store.get(&id).unwrap().is_favorite;

        assert!(store.toggle_favorite(&id).unwrap());
        assert_ne!(store.get(&id).unwrap().is_favorite, before);
        assert!(store.toggle_favorite(&id).unwrap());
        assert_eq!(store.get(&id).unwrap().is_favorite, before);
    }

    #[test]
    fn unknown_ids_change_nothing() {
        let mut store = seeded();
        let writes = store.backend().writes();
        let snapshot = store.colors().to_vec();

        assert!(!store.toggle_favorite("missing").unwrap());
        assert!(!store.rename("missing", "x").unwrap());
        assert!(!store.delete("missing").unwrap());

        assert_eq!(store.colors(), snapshot.as_slice());
        assert_eq!(store.backend().writes(), writes);
    }

    #[test]
    fn rename_accepts_empty_names() {
        let mut store = seeded();
        let id = store.colors()[0].id.clone();
        assert!(store.rename(&id, "").unwrap());
        assert_eq!(store.get(&id).unwrap().name, "");
    }

    #[test]
    fn rename_keeps_derived_fields() {
        let mut store = seeded();
        let before = store.colors()[2].clone();
        store.rename(&before.id, "Crimson").unwrap();

        let after = store.get(&before.id).unwrap();
        assert_eq!(after.hex, before.hex);
        assert_eq!(after.rgb, before.rgb);
        assert_eq!(after.hsl, before.hsl);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn delete_removes_only_the_match() {
        let mut store = seeded();
        let id = store.colors()[1].id.clone();
        assert!(store.delete(&id).unwrap());
        assert_eq!(store.len(), 2);
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn clear_all_empties_and_persists() {
        let mut store = seeded();
        store.clear_all().unwrap();
        assert!(store.is_empty());
        assert_eq!(
            store.backend().read(COLORS_KEY).unwrap(),
            Some(serde_json::json!([]))
        );
    }

    #[test]
    fn add_generated_prepends_batch_untouched() {
        let mut store = seeded();
        let mut generated = Color::new("Gen", "#123456", Utc::now()).unwrap();
        generated.id = "gen-1".to_string();
        // Fields that disagree with the hex are kept as supplied.
        generated.hsl.h = 42.0;
        generated.is_favorite = true;

        store.add_generated(vec![generated.clone()]).unwrap();
        assert_eq!(store.colors()[0], generated);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn colliding_ids_are_possible_within_one_millisecond() {
        let mut store = store();
        let now = Utc::now();
        let a = store.create_at("A", "#000000", now).unwrap().unwrap();
        let b = store.create_at("B", "#ffffff", now).unwrap().unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn listeners_see_each_snapshot() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |colors| sink.borrow_mut().push(colors.len()));

        store.create("One", "#111111").unwrap();
        store.create("", "#111111").unwrap();
        store.clear_all().unwrap();

        assert_eq!(*seen.borrow(), vec![1, 0]);
    }

    #[test]
    fn failed_write_leaves_collection_untouched() {
        let mut store = ColorStore::load(FlakyBackend::default()).unwrap();
        let kept = store.create("Kept", "#101010").unwrap().unwrap();
        let notified = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notified);
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.backend_mut().fail(COLORS_KEY);
        let snapshot = store.colors().to_vec();
        let persisted = store.backend().read(COLORS_KEY).unwrap();

        assert!(matches!(
            store.create("Red", "#ff0000"),
            Err(SwatchError::Storage(_))
        ));
        assert!(store.toggle_favorite(&kept.id).is_err());
        assert!(store.rename(&kept.id, "Lost").is_err());
        assert!(store.delete(&kept.id).is_err());
        assert!(store.clear_all().is_err());
        assert!(store.add_generated(vec![kept.clone()]).is_err());
        assert!(store.replace_all(Vec::new()).is_err());

        assert_eq!(store.colors(), snapshot.as_slice());
        assert_eq!(store.backend().read(COLORS_KEY).unwrap(), persisted);
        assert_eq!(*notified.borrow(), 0);
    }

    #[test]
    fn reload_from_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path()).unwrap();
        let mut store = ColorStore::load(backend).unwrap();
        let created = store.create("Olive", "#808000").unwrap().unwrap();
        store.toggle_favorite(&created.id).unwrap();
        drop(store);

        let reloaded = ColorStore::load(JsonFileBackend::new(dir.path()).unwrap()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.colors()[0].name, "Olive");
        assert!(reloaded.colors()[0].is_favorite);
    }
}
