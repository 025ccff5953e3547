use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::cart::models::CartItem;
use crate::shared::constants::CART_STORAGE_NAME;

#[derive(Debug, Error)]
pub enum CartStorageError {
    #[error("Cart storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cart storage is corrupted: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable storage for the cart item list.
///
/// `load` is called once when a store is created, `save` after every change
/// to the item list. The open/closed flag is never handed to the port.
pub trait CartPersistence {
    fn load(&self) -> Result<Vec<CartItem>, CartStorageError>;
    fn save(&self, items: &[CartItem]) -> Result<(), CartStorageError>;
}

/// On-disk shape of the persisted blob
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedCart {
    #[serde(default)]
    items: Vec<CartItem>,
}

fn encode(items: &[CartItem]) -> Result<String, CartStorageError> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        items: &'a [CartItem],
    }
    Ok(serde_json::to_string(&Borrowed { items })?)
}

fn decode(raw: &str) -> Result<Vec<CartItem>, CartStorageError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let persisted: PersistedCart = serde_json::from_str(raw)?;
    Ok(persisted.items)
}

/// Stores the cart as a single JSON file named `cart-storage.json`
#[derive(Debug, Clone)]
pub struct JsonFileCartPersistence {
    path: PathBuf,
}

impl JsonFileCartPersistence {
    /// Persist under `dir/cart-storage.json`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir
                .as_ref()
                .join(format!("{}.json", CART_STORAGE_NAME)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartPersistence for JsonFileCartPersistence {
    fn load(&self) -> Result<Vec<CartItem>, CartStorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, items: &[CartItem]) -> Result<(), CartStorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write then rename so a crash never leaves a half-written blob
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encode(items)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process blob shared between clones; survives store re-creation
#[derive(Debug, Clone, Default)]
pub struct MemoryCartPersistence {
    blob: Arc<Mutex<Option<String>>>,
}

impl MemoryCartPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw serialized blob, if anything was saved
    pub fn snapshot(&self) -> Option<String> {
        self.blob
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl CartPersistence for MemoryCartPersistence {
    fn load(&self) -> Result<Vec<CartItem>, CartStorageError> {
        match self.snapshot() {
            Some(raw) => decode(&raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[CartItem]) -> Result<(), CartStorageError> {
        let encoded = encode(items)?;
        *self
            .blob
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(encoded);
        Ok(())
    }
}
