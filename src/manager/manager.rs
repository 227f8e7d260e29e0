use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde_json;

use super::managererror::ManagerError;


/// Reads a whole JSON document from `file_path`.
pub fn read_json_file(file_path: &Path) -> Result<serde_json::Value, ManagerError> {
    let file = File::open(file_path).map_err(|error| ManagerError::IOError {
        path: file_path.to_path_buf(),
        error
    })?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Loads named objects from JSON into a [`ManagerBuilder`].
pub trait IManager<V: ?Sized> {
    fn insert_obj_from_json(&self,
                            builder: &mut ManagerBuilder<V>,
                            json_value: serde_json::Value) -> Result<(), ManagerError>;

    fn insert_obj_from_json_vec(&self,
                                builder: &mut ManagerBuilder<V>,
                                json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for j in json_vec.iter() {
            self.insert_obj_from_json(builder, j.clone())?;
        }
        Ok(())
    }
}


/// Mutable name -> object map filled while loading.
pub struct ManagerBuilder<V: ?Sized> {
    map: HashMap<String, Arc<V>>
}

impl<V: ?Sized> ManagerBuilder<V> {
    pub fn new() -> ManagerBuilder<V> {
        ManagerBuilder { map: HashMap::new() }
    }

    pub fn insert(&mut self, name: String, v: Arc<V>) {
        self.map.insert(name, v);
    }

    pub fn get(&self, name: &str) -> Result<Arc<V>, ManagerError> {
        self.map.get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    pub fn build(self) -> FrozenManager<V> {
        FrozenManager { map: self.map }
    }
}

impl<V: ?Sized> Default for ManagerBuilder<V> {
    fn default() -> Self {
        ManagerBuilder::new()
    }
}


/// Read-only name -> object map, shareable across threads once built.
pub struct FrozenManager<V: ?Sized> {
    map: HashMap<String, Arc<V>>
}

impl<V: ?Sized> FrozenManager<V> {
    pub fn get(&self, name: &str) -> Result<Arc<V>, ManagerError> {
        self.map.get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.map.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.json");
        fs::write(&path, r#"{"regions": []}"#).unwrap();
        let value = read_json_file(&path).unwrap();
        assert!(value["regions"].is_array());
    }

    #[test]
    fn missing_file_keeps_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nowhere.json");
        let error = read_json_file(&path).unwrap_err();
        assert!(matches!(error, ManagerError::IOError { path: ref p, .. } if *p == path));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_json_file(&path), Err(ManagerError::JsonParseError(_))));
    }

    #[test]
    fn frozen_manager_lists_sorted_names() {
        let mut builder: ManagerBuilder<str> = ManagerBuilder::default();
        builder.insert("us".to_owned(), Arc::from("United States"));
        builder.insert("fr".to_owned(), Arc::from("France"));
        assert!(matches!(builder.get("de"), Err(ManagerError::NameNotFoundError(_))));
        let frozen = builder.build();
        assert_eq!(frozen.names(), vec!["fr", "us"]);
        assert_eq!(frozen.len(), 2);
        assert_eq!(&*frozen.get("fr").unwrap(), "France");
    }
}
