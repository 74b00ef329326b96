use std::collections::HashMap;

use crate::assets::manifest::SheetManifest;
use crate::error::{Result, SpriteError};
use crate::sprite::Sprite;

/// Registry of named sprites, built from a SheetManifest and the loaded sheets.
/// Provides convenient name-based sprite lookup for game code.
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    sprites: HashMap<String, Sprite>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed manifest.
    ///
    /// `sheets[i]` is the decoded image for `manifest.sheets[i]`. Each named
    /// cell becomes a region of its sheet's grid.
    pub fn from_manifest(manifest: &SheetManifest, sheets: &[Sprite]) -> Result<Self> {
        if sheets.len() != manifest.sheets.len() {
            return Err(SpriteError::invalid(format!(
                "manifest lists {} sheets but {} were supplied",
                manifest.sheets.len(),
                sheets.len()
            )));
        }

        let grids = manifest
            .sheets
            .iter()
            .zip(sheets)
            .map(|(desc, sheet)| sheet.to_grid(desc.cell_width, desc.cell_height))
            .collect::<Result<Vec<_>>>()?;

        let mut sprites = HashMap::with_capacity(manifest.sprites.len());
        for (name, cell) in &manifest.sprites {
            let grid = grids.get(cell.sheet).ok_or_else(|| {
                SpriteError::invalid(format!("sprite {name:?} refers to unknown sheet {}", cell.sheet))
            })?;
            if !grid.contains_key(cell.coord()) {
                log::warn!(
                    "sprite {name:?} at {:?} lies outside sheet {:?}",
                    cell.coord(),
                    manifest.sheets[cell.sheet].name
                );
            }
            sprites.insert(name.clone(), grid.get(cell.coord()));
        }

        log::debug!("registered {} sprites from {} sheets", sprites.len(), sheets.len());
        Ok(Self { sprites })
    }

    /// Register or replace a sprite under `name`.
    pub fn insert(&mut self, name: impl Into<String>, sprite: Sprite) -> Option<Sprite> {
        self.sprites.insert(name.into(), sprite)
    }

    /// Look up a sprite by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sprites.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
