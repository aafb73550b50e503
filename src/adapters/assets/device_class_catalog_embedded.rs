//! Device class catalog loaded from embedded TOML assets.

use std::collections::BTreeMap;

use include_dir::{Dir, include_dir};
use serde::Deserialize;

use crate::domain::AppError;
use crate::domain::device::DeviceClass;
use crate::ports::DeviceClassCatalog;

/// Embedded device class directory.
static CATALOG_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/device_classes");

/// One catalog file: a list of `[[class]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "class")]
    classes: Vec<DeviceClass>,
}

/// Device class schemas shipped with the binary.
#[derive(Debug, Clone)]
pub struct EmbeddedDeviceClassCatalog {
    classes: BTreeMap<String, DeviceClass>,
}

impl EmbeddedDeviceClassCatalog {
    /// Load all embedded catalog files.
    pub fn new() -> Result<Self, AppError> {
        let mut classes = BTreeMap::new();

        for file in CATALOG_DIR.files() {
            if file.path().extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            let what = format!("device class catalog {}", file.path().display());
            let content = file.contents_utf8().ok_or_else(|| AppError::ParseError {
                what: what.clone(),
                details: "not valid UTF-8".to_string(),
            })?;
            let parsed: CatalogFile = toml::from_str(content).map_err(|err| {
                AppError::ParseError { what: what.clone(), details: err.to_string() }
            })?;

            for class in parsed.classes {
                if classes.contains_key(&class.name) {
                    return Err(AppError::ParseError {
                        what,
                        details: format!("device class '{}' is declared twice", class.name),
                    });
                }
                classes.insert(class.name.clone(), class);
            }
        }

        Ok(Self { classes })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl DeviceClassCatalog for EmbeddedDeviceClassCatalog {
    fn get(&self, name: &str) -> Option<&DeviceClass> {
        self.classes.get(name)
    }

    fn list_all(&self) -> Vec<&DeviceClass> {
        self.classes.values().collect()
    }
}
