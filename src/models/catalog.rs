//! Content catalog: the overview entry plus one entry per layer.
//!
//! The catalog is the only place that mints [`LayerId`] and [`SubItemId`]
//! values, so every id flowing through the interaction core is known to be
//! valid. String keys coming from the outside (CLI, replay scripts) are
//! resolved here and fail with [`AppError::UnknownLayer`] /
//! [`AppError::UnknownSubItem`].

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identifier of one layer (ring) in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(usize);

impl LayerId {
    /// Position of the layer in catalog order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identifier of one sub-item (function label) across all layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubItemId(usize);

impl SubItemId {
    /// Global position of the sub-item in catalog order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// RGB color stored as `0xRRGGBB`, serialized as `"#RRGGBB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFFFFFF);
    pub const BLACK: Rgb = Rgb(0x000000);

    /// Red, green and blue bytes.
    pub fn components(self) -> [u8; 3] {
        [
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0xFF_FFFF)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return Err(format!("expected #RRGGBB, got '{}'", value));
        }
        u32::from_str_radix(hex, 16)
            .map(Rgb)
            .map_err(|_| format!("expected #RRGGBB, got '{}'", value))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// The overview shown when no layer is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewEntry {
    /// Panel headline.
    pub headline: String,
    /// Headline statistics.
    pub stats: Vec<String>,
}

/// One layer: a ring in the scene and its panel content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerEntry {
    /// Lookup key used by controls and scripts (e.g. "automation").
    pub key: String,
    /// Short label rendered next to the ring.
    pub label: String,
    /// Panel headline.
    pub headline: String,
    /// Panel description.
    pub description: String,
    /// Statistics shown in the panel.
    pub stats: Vec<String>,
    /// Finance functions; each one becomes a sub-item on the ring.
    pub functions: Vec<String>,
    /// Accent color of the ring and its points.
    pub color: Rgb,
    /// Emissive color of the ring.
    pub emissive: Rgb,
}

/// Serializable catalog contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    pub overview: OverviewEntry,
    pub layers: Vec<LayerEntry>,
}

/// A single function label attached to a layer.
#[derive(Debug, Clone)]
pub struct SubItem {
    /// Owning layer.
    pub layer: LayerId,
    /// Position within the owning layer's function list.
    pub ordinal: usize,
    /// Display text.
    pub text: String,
}

/// Which catalog entry to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Overview,
    Layer(LayerId),
}

/// Immutable, validated catalog with id tables.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    data: CatalogData,
    sub_items: Vec<SubItem>,
    ranges: Vec<Range<usize>>,
}

impl ContentCatalog {
    /// Validate catalog data and build the id tables.
    pub fn new(data: CatalogData) -> Result<Self, AppError> {
        validate(&data)?;
        Ok(Self::index(data))
    }

    /// The built-in AI-in-finance content.
    pub fn builtin() -> Self {
        Self::index(super::finance::catalog_data())
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        let data: CatalogData = serde_json::from_str(&content)?;
        Self::new(data)
    }

    /// Load from `path` if given, the built-in catalog otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => {
                tracing::info!("Loading catalog from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::builtin()),
        }
    }

    fn index(data: CatalogData) -> Self {
        let mut sub_items = Vec::new();
        let mut ranges = Vec::with_capacity(data.layers.len());
        for (layer_idx, layer) in data.layers.iter().enumerate() {
            let start = sub_items.len();
            for (ordinal, text) in layer.functions.iter().enumerate() {
                sub_items.push(SubItem {
                    layer: LayerId(layer_idx),
                    ordinal,
                    text: text.clone(),
                });
            }
            ranges.push(start..sub_items.len());
        }
        Self {
            data,
            sub_items,
            ranges,
        }
    }

    /// Raw contents, for serialization.
    pub fn data(&self) -> &CatalogData {
        &self.data
    }

    pub fn overview(&self) -> &OverviewEntry {
        &self.data.overview
    }

    pub fn layer(&self, id: LayerId) -> &LayerEntry {
        &self.data.layers[id.0]
    }

    pub fn layer_count(&self) -> usize {
        self.data.layers.len()
    }

    /// All layers in catalog order.
    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> {
        (0..self.data.layers.len()).map(LayerId)
    }

    /// Resolve a layer key (case-insensitive).
    pub fn layer_id(&self, key: &str) -> Result<LayerId, AppError> {
        let key = key.trim();
        self.data
            .layers
            .iter()
            .position(|l| l.key.eq_ignore_ascii_case(key))
            .map(LayerId)
            .ok_or_else(|| AppError::UnknownLayer(key.to_string()))
    }

    pub fn sub_item(&self, id: SubItemId) -> &SubItem {
        &self.sub_items[id.0]
    }

    pub fn sub_item_count(&self) -> usize {
        self.sub_items.len()
    }

    /// All sub-items across every layer, in catalog order.
    pub fn sub_item_ids(&self) -> impl Iterator<Item = SubItemId> {
        (0..self.sub_items.len()).map(SubItemId)
    }

    /// Sub-items of one layer, in catalog order.
    pub fn sub_items_of(&self, layer: LayerId) -> impl Iterator<Item = SubItemId> {
        self.ranges[layer.0].clone().map(SubItemId)
    }

    pub fn layer_of(&self, id: SubItemId) -> LayerId {
        self.sub_items[id.0].layer
    }

    /// Resolve a sub-item by its display text (case-insensitive).
    pub fn sub_item_id(&self, text: &str) -> Result<SubItemId, AppError> {
        let text = text.trim();
        self.sub_items
            .iter()
            .position(|s| s.text.eq_ignore_ascii_case(text))
            .map(SubItemId)
            .ok_or_else(|| AppError::UnknownSubItem(text.to_string()))
    }
}

fn validate(data: &CatalogData) -> Result<(), AppError> {
    if data.layers.is_empty() {
        return Err(AppError::InvalidCatalog(
            "catalog must define at least one layer".to_string(),
        ));
    }

    let mut keys = HashSet::new();
    // Function text is how replay scripts address items, so it must be
    // unique across the whole catalog.
    let mut functions = HashSet::new();
    for layer in &data.layers {
        if layer.key.trim().is_empty() {
            return Err(AppError::InvalidCatalog(format!(
                "layer '{}' has an empty key",
                layer.label
            )));
        }
        if layer.key.trim() != layer.key {
            return Err(AppError::InvalidCatalog(format!(
                "layer key '{}' has surrounding whitespace",
                layer.key
            )));
        }
        if !keys.insert(layer.key.to_ascii_lowercase()) {
            return Err(AppError::InvalidCatalog(format!(
                "duplicate layer key '{}'",
                layer.key
            )));
        }
        for function in &layer.functions {
            if !functions.insert(function.trim().to_ascii_lowercase()) {
                return Err(AppError::InvalidCatalog(format!(
                    "function '{}' appears more than once",
                    function
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(key: &str, functions: &[&str]) -> LayerEntry {
        LayerEntry {
            key: key.to_string(),
            label: key.to_uppercase(),
            headline: format!("{} headline", key),
            description: String::new(),
            stats: vec![],
            functions: functions.iter().map(|s| s.to_string()).collect(),
            color: Rgb(0x4CAF50),
            emissive: Rgb(0x2A7030),
        }
    }

    fn data(layers: Vec<LayerEntry>) -> CatalogData {
        CatalogData {
            overview: OverviewEntry {
                headline: "Overview".to_string(),
                stats: vec!["one".to_string()],
            },
            layers,
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = ContentCatalog::builtin();
        assert!(ContentCatalog::new(catalog.data().clone()).is_ok());
        assert_eq!(catalog.layer_count(), 3);
        assert_eq!(catalog.sub_item_count(), 24);
    }

    #[test]
    fn test_layer_lookup_is_case_insensitive() {
        let catalog = ContentCatalog::builtin();
        let id = catalog.layer_id("Cognitive").unwrap();
        assert_eq!(catalog.layer(id).key, "cognitive");
        assert!(matches!(
            catalog.layer_id("quantum"),
            Err(AppError::UnknownLayer(_))
        ));
    }

    #[test]
    fn test_sub_items_map_to_exactly_one_layer() {
        let catalog = ContentCatalog::new(data(vec![
            layer("a", &["x", "y"]),
            layer("b", &[]),
            layer("c", &["z"]),
        ]))
        .unwrap();

        let a = catalog.layer_id("a").unwrap();
        let b = catalog.layer_id("b").unwrap();
        let c = catalog.layer_id("c").unwrap();

        assert_eq!(catalog.sub_items_of(a).count(), 2);
        assert_eq!(catalog.sub_items_of(b).count(), 0);
        let z = catalog.sub_item_id("z").unwrap();
        assert_eq!(catalog.layer_of(z), c);
        assert_eq!(catalog.sub_item(z).ordinal, 0);

        for id in catalog.sub_item_ids() {
            let owner = catalog.layer_of(id);
            let owners = catalog
                .layer_ids()
                .filter(|l| catalog.sub_items_of(*l).any(|s| s == id))
                .count();
            assert_eq!(owners, 1);
            assert!(catalog.sub_items_of(owner).any(|s| s == id));
        }
    }

    #[test]
    fn test_rejects_empty_and_duplicate_layers() {
        assert!(matches!(
            ContentCatalog::new(data(vec![])),
            Err(AppError::InvalidCatalog(_))
        ));
        assert!(matches!(
            ContentCatalog::new(data(vec![layer("a", &[]), layer("A", &[])])),
            Err(AppError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_rejects_function_shared_between_layers() {
        let shared = data(vec![
            layer("a", &["Compliance Checks", "x"]),
            layer("b", &["compliance checks ", "y"]),
        ]);
        assert!(matches!(
            ContentCatalog::new(shared),
            Err(AppError::InvalidCatalog(ref msg)) if msg.contains("compliance checks")
        ));

        let within = data(vec![layer("a", &["x", "X"])]);
        assert!(ContentCatalog::new(within).is_err());
    }

    #[test]
    fn test_rejects_key_with_surrounding_whitespace() {
        assert!(matches!(
            ContentCatalog::new(data(vec![layer("automation ", &["x"])])),
            Err(AppError::InvalidCatalog(_))
        ));
        let catalog = ContentCatalog::new(data(vec![layer("automation", &["x"])])).unwrap();
        assert!(catalog.layer_id(" automation ").is_ok());
    }

    #[test]
    fn test_rgb_serialization() {
        let json = serde_json::to_string(&Rgb(0x2196F3)).unwrap();
        assert_eq!(json, "\"#2196F3\"");
        let parsed: Rgb = serde_json::from_str("\"#ffc107\"").unwrap();
        assert_eq!(parsed, Rgb(0xFFC107));
        assert_eq!(parsed.components(), [0xFF, 0xC1, 0x07]);
        assert!(serde_json::from_str::<Rgb>("\"#12\"").is_err());
    }

    #[test]
    fn test_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let json = serde_json::to_string(&data(vec![layer("solo", &["only"])])).unwrap();
        std::fs::write(&path, json).unwrap();

        let catalog = ContentCatalog::load(Some(&path)).unwrap();
        assert_eq!(catalog.layer_count(), 1);
        assert_eq!(catalog.sub_item(catalog.sub_item_id("only").unwrap()).text, "only");

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            ContentCatalog::from_file(&missing),
            Err(AppError::Io { .. })
        ));
    }
}
