//! User settings, passed explicitly to whoever needs them.
//!
//! The platform's key-value storage sits behind [`SettingsStore`]. Each field
//! is stored under its own key as a JSON value, so a store written by an older
//! build with fewer keys still loads (missing keys fall back to defaults).

use crate::error::SdkError;
use crate::network::{DEFAULT_CURRENCY, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DARK_MODE_KEY: &str = "dark_mode";
pub const CURRENCY_KEY: &str = "currency";
pub const PAGE_SIZE_KEY: &str = "page_size";

/// Key-value persistence provided by the host platform.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), SdkError>;
}

/// In-process store. Useful for tests and for hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: HashMap<String, String>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SdkError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub dark_mode: bool,
    pub currency: String,
    pub page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            currency: DEFAULT_CURRENCY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Settings {
    pub fn color_scheme(&self) -> ColorScheme {
        if self.dark_mode {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }

    /// Read settings from `store`. Absent keys take their default; a present
    /// but unparsable value is an error.
    pub fn load(store: &impl SettingsStore) -> Result<Self, SdkError> {
        let defaults = Self::default();
        Ok(Self {
            dark_mode: read(store, DARK_MODE_KEY)?.unwrap_or(defaults.dark_mode),
            currency: read(store, CURRENCY_KEY)?.unwrap_or(defaults.currency),
            page_size: read(store, PAGE_SIZE_KEY)?.unwrap_or(defaults.page_size),
        })
    }

    pub fn save(&self, store: &mut impl SettingsStore) -> Result<(), SdkError> {
        store.set(DARK_MODE_KEY, serde_json::to_string(&self.dark_mode)?)?;
        store.set(CURRENCY_KEY, serde_json::to_string(&self.currency)?)?;
        store.set(PAGE_SIZE_KEY, serde_json::to_string(&self.page_size)?)?;
        tracing::debug!(dark_mode = self.dark_mode, currency = %self.currency, "Saved settings");
        Ok(())
    }
}

fn read<T: serde::de::DeserializeOwned>(
    store: &impl SettingsStore,
    key: &str,
) -> Result<Option<T>, SdkError> {
    match store.get(key) {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SdkError::Settings(format!("{}: {}", key, e))),
        None => Ok(None),
    }
}
