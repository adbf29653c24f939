//! Named overlay presets persisted to a single JSON object on disk.
//!
//! The file maps preset name to `{ "urls": [OverlayConfig, ...] }`. Only the
//! outer shape is enforced: anything that is not a JSON object (missing file,
//! garbage, an array, ...) is replaced by `{}` the next time it is read.
//! Every write rewrites the whole file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, config::PRESET_FILE_NAME, overlay::OverlayConfig};

/// Preset name to raw preset value, in file order.
pub type PresetMap = IndexMap<String, serde_json::Value>;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Preset {
    #[serde(default)]
    pub urls: Vec<OverlayConfig>,
}

pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    /// Bind to `path`, creating parent directories and an empty store file if
    /// needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let store = Self { path };
        if !store.path.exists() {
            store.write(&PresetMap::new())?;
        }

        tracing::info!(path = %store.path.display(), "preset store ready");
        Ok(store)
    }

    pub fn in_dir(dir: &Path) -> Result<Self, Error> {
        Self::open(dir.join(PRESET_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> PresetMap {
        self.read()
    }

    pub fn get(&self, name: &str) -> Result<Preset, Error> {
        let value = self
            .read()
            .shift_remove(name)
            .ok_or_else(|| Error::PresetNotFound(name.to_string()))?;

        serde_json::from_value(value).map_err(|e| Error::MalformedPreset {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Insert or replace `name`, stored exactly as given. Blank names are
    /// rejected. Rows without a URL are dropped; a preset left with none is
    /// rejected.
    pub fn save(&self, name: &str, preset: &Preset) -> Result<PresetMap, Error> {
        if name.trim().is_empty() {
            return Err(Error::InvalidPresetName);
        }

        let urls: Vec<OverlayConfig> = preset
            .urls
            .iter()
            .filter(|config| !config.url.trim().is_empty())
            .cloned()
            .collect();
        if urls.is_empty() {
            return Err(Error::EmptyPreset(name.to_string()));
        }

        let mut presets = self.read();
        presets.insert(name.to_string(), serde_json::to_value(Preset { urls })?);
        self.write(&presets)?;

        tracing::info!(preset = name, "preset saved");
        Ok(presets)
    }

    /// Remove `name`. Removing a preset that does not exist is not an error.
    pub fn delete(&self, name: &str) -> Result<PresetMap, Error> {
        let mut presets = self.read();
        if presets.shift_remove(name).is_some() {
            self.write(&presets)?;
            tracing::info!(preset = name, "preset deleted");
        }
        Ok(presets)
    }

    fn read(&self) -> PresetMap {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return self.reset("file is missing");
            }
            Err(e) => return self.reset(&e.to_string()),
        };

        match serde_json::from_str::<PresetMap>(&content) {
            Ok(presets) => presets,
            Err(e) => self.reset(&format!("not a JSON object: {}", e)),
        }
    }

    fn reset(&self, reason: &str) -> PresetMap {
        tracing::warn!(path = %self.path.display(), reason, "resetting preset store");
        let empty = PresetMap::new();
        if let Err(e) = self.write(&empty) {
            tracing::error!(path = %self.path.display(), error = %e, "failed to reset preset store");
        }
        empty
    }

    fn write(&self, presets: &PresetMap) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(presets)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    fn preset(urls: &[&str]) -> Preset {
        Preset {
            urls: urls
                .iter()
                .map(|url| OverlayConfig {
                    url: url.to_string(),
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn file_json(store: &PresetStore) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap()
    }

    #[test]
    fn test_open_creates_empty_file() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(&dir.path().join("nested")).unwrap();
        assert!(store.path().ends_with("presets.json"));
        assert_eq!(file_json(&store), json!({}));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_save_then_list_contains_entry() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(dir.path()).unwrap();

        let mut stream = preset(&["http://localhost:24050/gosu"]);
        stream.urls[0].click_through = true;
        stream.urls[0].width = Some(800.0);
        stream.urls[0].height = Some(600.0);

        let returned = store.save("Stream", &stream).unwrap();
        let listed = store.list();
        assert_eq!(returned, listed);
        assert_eq!(
            listed["Stream"],
            json!({"urls": [{
                "url": "http://localhost:24050/gosu",
                "clickThrough": true,
                "alwaysOnTop": false,
                "hideFromDesktop": false,
                "width": 800.0,
                "height": 600.0
            }]})
        );
        assert_eq!(store.get("Stream").unwrap(), stream);
    }

    #[test]
    fn test_save_overwrites_and_keeps_order() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(dir.path()).unwrap();
        store.save("b", &preset(&["http://b"])).unwrap();
        store.save("a", &preset(&["http://a"])).unwrap();
        store.save("b", &preset(&["http://b2"])).unwrap();

        let listed = store.list();
        assert_eq!(listed.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(store.get("b").unwrap(), preset(&["http://b2"]));
    }

    #[test]
    fn test_delete_then_list_omits_entry() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(dir.path()).unwrap();
        store.save("one", &preset(&["http://1"])).unwrap();
        store.save("two", &preset(&["http://2"])).unwrap();

        let returned = store.delete("one").unwrap();
        assert!(!returned.contains_key("one"));
        assert!(!store.list().contains_key("one"));
        assert!(store.list().contains_key("two"));

        // absent names are fine
        assert_eq!(store.delete("missing").unwrap().len(), 1);
    }

    #[test]
    fn test_array_file_resets_to_empty_object() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(dir.path()).unwrap();
        fs::write(store.path(), r#"[{"urls": []}]"#).unwrap();

        assert!(store.list().is_empty());
        assert_eq!(file_json(&store), json!({}));
    }

    #[test]
    fn test_garbage_and_scalar_files_reset() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(dir.path()).unwrap();

        for content in ["not json at all", "42", "\"text\"", "null", ""] {
            fs::write(store.path(), content).unwrap();
            assert!(store.list().is_empty(), "content {content:?}");
            assert_eq!(file_json(&store), json!({}));
        }
    }

    #[test]
    fn test_missing_file_is_recreated() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(dir.path()).unwrap();
        fs::remove_file(store.path()).unwrap();

        assert!(store.list().is_empty());
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_after_reset_persists() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(dir.path()).unwrap();
        fs::write(store.path(), "[1, 2, 3]").unwrap();

        let presets = store.save("fresh", &preset(&["http://x"])).unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(file_json(&store)["fresh"]["urls"][0]["url"], "http://x");
    }

    #[test]
    fn test_save_validation() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(dir.path()).unwrap();

        assert!(matches!(
            store.save("   ", &preset(&["http://x"])),
            Err(Error::InvalidPresetName)
        ));
        assert!(matches!(
            store.save("empty", &preset(&["", "  "])),
            Err(Error::EmptyPreset(_))
        ));

        let saved = store.save("kept", &preset(&["", "http://x"])).unwrap();
        assert_eq!(store.get("kept").unwrap(), preset(&["http://x"]));
        assert!(saved.contains_key("kept"));
    }

    #[test]
    fn test_padded_names_are_exact_keys() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(dir.path()).unwrap();

        let saved = store.save("  x ", &preset(&["http://x"])).unwrap();
        assert_eq!(saved.keys().collect::<Vec<_>>(), vec!["  x "]);
        assert!(matches!(store.get("x"), Err(Error::PresetNotFound(_))));

        fs::write(store.path(), r#"{" stream ": {"urls": [{"url": "http://s"}]}}"#).unwrap();
        assert_eq!(store.get(" stream ").unwrap(), preset(&["http://s"]));

        // the unpadded name is a different preset
        assert_eq!(store.delete("stream").unwrap().len(), 1);
        assert!(store.delete(" stream ").unwrap().is_empty());
        assert_eq!(file_json(&store), json!({}));
    }

    #[test]
    fn test_get_missing_and_malformed() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(dir.path()).unwrap();
        fs::write(store.path(), r#"{"odd": {"urls": "nope"}}"#).unwrap();

        assert!(matches!(store.get("absent"), Err(Error::PresetNotFound(_))));
        assert!(matches!(
            store.get("odd"),
            Err(Error::MalformedPreset { .. })
        ));
        // an object with odd values is still a valid store
        assert!(store.list().contains_key("odd"));
    }

    #[test]
    fn test_reads_legacy_preset_files() {
        let dir = tempdir().unwrap();
        let store = PresetStore::in_dir(dir.path()).unwrap();
        fs::write(
            store.path(),
            r#"{
  "osu": {
    "urls": [
      {"url": "http://localhost:24050/", "clickThrough": true, "advanced": true, "width": 800, "height": 600},
      {"url": "http://localhost:24050/pp", "clickThrough": false, "advanced": false, "width": null, "height": null}
    ]
  }
}"#,
        )
        .unwrap();

        let osu = store.get("osu").unwrap();
        assert_eq!(osu.urls.len(), 2);
        assert_eq!(osu.urls[0].custom_size(), Some((800.0, 600.0)));
        assert_eq!(osu.urls[1].custom_size(), None);
    }
}
