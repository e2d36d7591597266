use std::{collections::HashMap, path::PathBuf, sync::Arc};

use crate::{
    error::{Result, TextError},
    font::FontSource,
};

/// Manages font loading and retrieval using `fontdb` and `fontdue`.
///
/// This struct combines a database of available fonts (`fontdb`) with a cache of parsed
/// font instances (`fontdue`). Faces are parsed lazily the first time a [`FontSource`]
/// resolving to them is requested.
pub struct FontStorage {
    /// This is the font set that has been loaded by fontdb.
    font_db: fontdb::Database,
    /// This is the font that has been parsed by fontdue.
    /// Not all fonts in fontdb are necessarily parsed here.
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
    /// Faces already registered for file and binary sources, so one resource is
    /// only pushed into the database once.
    registered: HashMap<SourceKey, fontdb::ID, fxhash::FxBuildHasher>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum SourceKey {
    File(PathBuf),
    // The database keeps a clone of the `Arc`, so the address stays unique
    // while the entry exists.
    Binary(usize),
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates a new empty font storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
            registered: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }
}

/// Loading fonts into fontdb and setting up fontdb.
impl FontStorage {
    /// Loads the system fonts.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }

    /// Sets the family name for the "serif" generic family.
    pub fn set_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_serif_family(family);
    }

    /// Sets the family name for the "sans-serif" generic family.
    pub fn set_sans_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_sans_serif_family(family);
    }

    /// Sets the family name for the "monospace" generic family.
    pub fn set_monospace_family(&mut self, family: impl Into<String>) {
        self.font_db.set_monospace_family(family);
    }
}

/// Get `Font`
impl FontStorage {
    /// Queries for a font matching the description.
    ///
    /// Fails with [`TextError::FontLoad`] naming the searched families when no
    /// face matches, or when the matching face cannot be parsed.
    pub fn query(&mut self, query: &fontdb::Query) -> Result<(fontdb::ID, Arc<fontdue::Font>)> {
        let Some(id) = self.font_db.query(query) else {
            let families: Vec<&str> = query
                .families
                .iter()
                .map(|family| self.font_db.family_name(family))
                .collect();
            return Err(TextError::font_load(
                format!("family `{}` (weight {})", families.join(", "), query.weight.0),
                "no matching face is loaded",
            ));
        };

        let font = self.font(id)?;
        Ok((id, font))
    }

    /// Retrieves a parsed font by ID, parsing it if necessary.
    pub fn font(&mut self, id: fontdb::ID) -> Result<Arc<fontdue::Font>> {
        use std::collections::hash_map::Entry;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self
                    .font_db
                    .with_face_data(id, |data, index| {
                        fontdue::Font::from_bytes(
                            data,
                            fontdue::FontSettings {
                                collection_index: index,
                                scale: 40.0,
                                load_substitutions: true,
                            },
                        )
                    })
                    .ok_or_else(|| {
                        TextError::font_load(format!("{id:?}"), "face data is unavailable")
                    })?;

                match font_result {
                    Ok(font) => {
                        let r: &mut Arc<fontdue::Font> = entry.insert(Arc::new(font));
                        Ok(Arc::clone(r))
                    }
                    Err(e) => {
                        log::error!("Failed to parse font (id: {:?}): {}", id, e);
                        Err(TextError::font_load(format!("{id:?}"), e))
                    }
                }
            }
        }
    }

    /// Resolves a [`FontSource`] to a parsed face, registering file and binary
    /// sources in the database on first use.
    pub fn resolve(&mut self, source: &FontSource) -> Result<(fontdb::ID, Arc<fontdue::Font>)> {
        let id = match source {
            FontSource::Family { name, weight } => {
                let (id, font) = self.query_family(name, *weight)?;
                log::trace!("resolved {} to face {:?}", source.describe(), id);
                return Ok((id, font));
            }
            FontSource::File(path) => {
                let key = SourceKey::File(path.clone());
                match self.registered.get(&key) {
                    Some(id) => *id,
                    None => {
                        let data = std::fs::read(path).map_err(|e| {
                            TextError::font_load(source.describe(), e.to_string())
                        })?;
                        let id = self.register(source, Arc::new(data))?;
                        self.registered.insert(key, id);
                        id
                    }
                }
            }
            FontSource::Binary(data) => {
                let key = SourceKey::Binary(Arc::as_ptr(data) as usize);
                match self.registered.get(&key) {
                    Some(id) => *id,
                    None => {
                        let id = self.register(source, Arc::clone(data))?;
                        self.registered.insert(key, id);
                        id
                    }
                }
            }
        };

        let font = self
            .font(id)
            .map_err(|e| TextError::font_load(source.describe(), e.to_string()))?;
        log::trace!("resolved {} to face {:?}", source.describe(), id);
        Ok((id, font))
    }

    fn query_family(
        &mut self,
        name: &str,
        weight: u16,
    ) -> Result<(fontdb::ID, Arc<fontdue::Font>)> {
        let family = match name {
            "serif" => fontdb::Family::Serif,
            "sans-serif" => fontdb::Family::SansSerif,
            "monospace" => fontdb::Family::Monospace,
            "cursive" => fontdb::Family::Cursive,
            "fantasy" => fontdb::Family::Fantasy,
            other => fontdb::Family::Name(other),
        };

        self.query(&fontdb::Query {
            families: &[family],
            weight: fontdb::Weight(weight),
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        })
    }

    fn register(&mut self, source: &FontSource, data: Arc<Vec<u8>>) -> Result<fontdb::ID> {
        let ids = self.font_db.load_font_source(fontdb::Source::Binary(data));
        ids.first()
            .copied()
            .ok_or_else(|| TextError::font_load(source.describe(), "no font face found in data"))
    }

}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_fails_to_load() {
        let mut storage = FontStorage::new();
        let source = FontSource::file("/definitely/not/here/Body-Regular.ttf");

        let err = storage.resolve(&source).unwrap_err();
        match err {
            TextError::FontLoad { font, .. } => assert!(font.contains("Body-Regular.ttf")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(storage.is_empty());
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut storage = FontStorage::new();
        let source = FontSource::Binary(Arc::new(b"this is not a font".to_vec()));

        let err = storage.resolve(&source).unwrap_err();
        assert!(matches!(err, TextError::FontLoad { .. }));
    }

    #[test]
    fn unknown_family_fails_on_empty_database() {
        let mut storage = FontStorage::new();
        let err = storage
            .resolve(&FontSource::family("No Such Family"))
            .unwrap_err();
        assert!(matches!(err, TextError::FontLoad { .. }));

        let err = storage.resolve(&FontSource::family("serif")).unwrap_err();
        assert!(matches!(err, TextError::FontLoad { .. }));
    }

    #[test]
    fn generic_family_errors_name_the_configured_family() {
        let mut storage = FontStorage::new();
        storage.set_serif_family("Body Serif");
        storage.set_sans_serif_family("Body Sans");
        storage.set_monospace_family("Body Mono");

        for (generic, configured) in [
            ("serif", "Body Serif"),
            ("sans-serif", "Body Sans"),
            ("monospace", "Body Mono"),
        ] {
            match storage.resolve(&FontSource::family(generic)).unwrap_err() {
                TextError::FontLoad { font, .. } => {
                    assert!(font.contains(configured), "{generic}: {font}")
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn query_reports_every_searched_family() {
        let mut storage = FontStorage::new();
        let err = storage
            .query(&fontdb::Query {
                families: &[fontdb::Family::Name("Display"), fontdb::Family::Monospace],
                weight: fontdb::Weight::BOLD,
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            })
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Display"), "{message}");
        assert!(message.contains("weight 700"), "{message}");
    }

    #[test]
    fn system_fonts_resolve_and_are_cached() {
        let mut storage = FontStorage::new();
        storage.load_system_fonts();
        if storage.is_empty() {
            return;
        }
        assert!(storage.len() > 0);

        let Ok((id, first)) = storage.resolve(&FontSource::family("sans-serif")) else {
            return;
        };
        let (again, second) = storage.resolve(&FontSource::family("sans-serif")).unwrap();
        assert_eq!(id, again);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
