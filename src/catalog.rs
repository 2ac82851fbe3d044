//! Read-only product catalog, loaded once at startup.

use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub id: u32,
    pub category: String,
    pub name: String,
    pub description: String,
    /// Price in whole currency units.
    pub price: i64,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Load the catalog from disk. A missing or corrupt file degrades to an
    /// empty catalog so the bot still serves the mini-game.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let parsed = fs::read_to_string(path.as_ref())
            .map_err(|e| e.to_string())
            .and_then(|raw| serde_json::from_str::<Vec<Item>>(&raw).map_err(|e| e.to_string()));
        match parsed {
            Ok(items) => {
                tracing::info!(target: "catalog", count = items.len(), "catalog loaded");
                Self { items }
            }
            Err(error) => {
                tracing::error!(target: "catalog", %error, "failed to load catalog, starting empty");
                Self::default()
            }
        }
    }

    pub fn get(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn in_category(&self, category: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
