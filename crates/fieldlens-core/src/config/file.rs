use std::fs;
use std::path::Path;

use crate::field::FieldDescriptor;

use super::error::ConfigError;
use super::store::FieldConfig;

impl FieldConfig {
    /// Load a config file: a JSON array of `{name, range, endian}` objects.
    /// Missing object fields default per position (`"Field N"`, `"0-3"`,
    /// `"little"`).
    ///
    /// The file is parsed completely before a store is built, so a failed
    /// load leaves any existing store untouched; callers with no prior state
    /// recover with [`FieldConfig::default`].
    ///
    /// # Errors
    /// Returns `ConfigError::Io` when the file cannot be read and
    /// `ConfigError::Json` when it does not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let records: Vec<FieldDescriptor> = serde_json::from_str(&text)?;
        Ok(Self::from_descriptors(records))
    }

    /// Write the store as pretty-printed JSON, one object per field in
    /// display order. Field values round-trip exactly through `load`.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self.descriptors())?;
        fs::write(path, json)?;
        Ok(())
    }
}
