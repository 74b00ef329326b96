use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::core::geometry::GridCoord;

/// Manifest describing sprite sheets and the named cells cut from them.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetManifest {
    /// List of sprite sheets.
    pub sheets: Vec<SheetDescriptor>,
    /// Named cell lookup: name → sheet index + grid coordinates.
    #[serde(default)]
    pub sprites: HashMap<String, CellDescriptor>,
}

/// Describes a single sprite sheet and how it is partitioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDescriptor {
    /// Human-readable name (e.g., "base_tiles").
    pub name: String,
    /// Cell width in pixels.
    pub cell_width: u32,
    /// Cell height in pixels.
    pub cell_height: u32,
    /// Relative path to the image file. Loading it is up to the caller.
    #[serde(default)]
    pub path: Option<String>,
}

/// Describes a named cell within a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDescriptor {
    /// Index into the sheets array.
    pub sheet: usize,
    /// Column in the sheet grid.
    pub col: i32,
    /// Row in the sheet grid.
    pub row: i32,
}

impl CellDescriptor {
    pub fn coord(&self) -> GridCoord {
        GridCoord::new(self.col, self.row)
    }
}

impl SheetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Look up a sheet by name.
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name == name)
    }
}
