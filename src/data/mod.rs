//! Animal dataset: habitats and the records that live in them
//!
//! The built-in dataset ships inside the binary (`data/animals.json`) and is
//! parsed once on first use. A replacement file with the same schema can be
//! loaded with [`HabitatCollection::from_path`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

const BUILTIN_DATASET: &str = include_str!("../../data/animals.json");

static BUILTIN: OnceLock<HabitatCollection> = OnceLock::new();

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate animal id '{id}' in habitat {habitat}")]
    DuplicateId { habitat: Habitat, id: String },

    #[error("animal in habitat {habitat} has an empty '{field}'")]
    MissingField { habitat: Habitat, field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown habitat '{0}'")]
pub struct UnknownHabitat(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Habitat {
    Forest,
    Ocean,
    Desert,
    Arctic,
}

impl Habitat {
    pub const ALL: [Habitat; 4] = [Habitat::Forest, Habitat::Ocean, Habitat::Desert, Habitat::Arctic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Habitat::Forest => "Forest",
            Habitat::Ocean => "Ocean",
            Habitat::Desert => "Desert",
            Habitat::Arctic => "Arctic",
        }
    }
}

impl fmt::Display for Habitat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route keys are the dataset's map keys, so matching is exact
impl FromStr for Habitat {
    type Err = UnknownHabitat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Habitat::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| UnknownHabitat(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub diet: String,
    #[serde(default)]
    pub lifespan: String,
    #[serde(default)]
    pub conservation_status: String,
    #[serde(default)]
    pub fun_facts: Vec<String>,
}

/// Habitat -> ordered animal records. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitatCollection {
    habitats: BTreeMap<Habitat, Vec<AnimalRecord>>,
}

impl HabitatCollection {
    /// The dataset embedded in the binary, parsed on first call
    pub fn builtin() -> Result<&'static HabitatCollection, DatasetError> {
        if let Some(collection) = BUILTIN.get() {
            return Ok(collection);
        }
        let parsed = Self::from_json(BUILTIN_DATASET)?;
        Ok(BUILTIN.get_or_init(|| parsed))
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let collection = Self::from_json(&content)?;
        tracing::info!(
            "Loaded dataset from {} ({} animals)",
            path.display(),
            collection.len()
        );
        if collection.is_empty() {
            tracing::warn!("Dataset {} has no animals; every route will be not found", path.display());
        }
        Ok(collection)
    }

    pub fn from_json(content: &str) -> Result<Self, DatasetError> {
        let habitats: BTreeMap<Habitat, Vec<AnimalRecord>> = serde_json::from_str(content)?;
        Self::new(habitats)
    }

    /// Build a collection, rejecting blank ids/names and ids repeated within a habitat
    pub fn new(habitats: BTreeMap<Habitat, Vec<AnimalRecord>>) -> Result<Self, DatasetError> {
        for (habitat, animals) in &habitats {
            let mut seen = HashSet::new();
            for animal in animals {
                if animal.id.trim().is_empty() {
                    return Err(DatasetError::MissingField { habitat: *habitat, field: "id" });
                }
                if animal.name.trim().is_empty() {
                    return Err(DatasetError::MissingField { habitat: *habitat, field: "name" });
                }
                if !seen.insert(animal.id.as_str()) {
                    return Err(DatasetError::DuplicateId {
                        habitat: *habitat,
                        id: animal.id.clone(),
                    });
                }
            }
        }
        Ok(Self { habitats })
    }

    /// Animals of a habitat key; unknown keys have none
    pub fn animals(&self, habitat: &str) -> &[AnimalRecord] {
        habitat
            .parse::<Habitat>()
            .ok()
            .and_then(|h| self.habitats.get(&h))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up an animal by route parameters
    pub fn resolve(&self, habitat: &str, animal_id: &str) -> Option<&AnimalRecord> {
        self.animals(habitat).iter().find(|a| a.id == animal_id)
    }

    pub fn habitats(&self) -> impl Iterator<Item = (Habitat, &[AnimalRecord])> {
        self.habitats.iter().map(|(h, animals)| (*h, animals.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.habitats.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> AnimalRecord {
        AnimalRecord {
            id: id.to_string(),
            name: name.to_string(),
            scientific_name: String::new(),
            description: String::new(),
            diet: String::new(),
            lifespan: String::new(),
            conservation_status: String::new(),
            fun_facts: Vec::new(),
        }
    }

    #[test]
    fn test_builtin_dataset_loads() {
        let data = HabitatCollection::builtin().unwrap();
        assert_eq!(data.len(), 12);
        assert!(!data.is_empty());
        for habitat in Habitat::ALL {
            assert_eq!(data.animals(habitat.as_str()).len(), 3);
        }
    }

    #[test]
    fn test_resolve_known_animal() {
        let data = HabitatCollection::builtin().unwrap();
        let tiger = data.resolve("Forest", "bengal-tiger").unwrap();
        assert_eq!(tiger.name, "Bengal Tiger");
        assert_eq!(tiger.scientific_name, "Panthera tigris tigris");
    }

    #[test]
    fn test_resolve_every_record() {
        let data = HabitatCollection::builtin().unwrap();
        for (habitat, animals) in data.habitats() {
            for animal in animals {
                assert_eq!(data.resolve(habitat.as_str(), &animal.id), Some(animal));
            }
        }
    }

    #[test]
    fn test_resolve_not_found() {
        let data = HabitatCollection::builtin().unwrap();
        assert!(data.resolve("Ocean", "nonexistent-id").is_none());
        // right id, wrong habitat
        assert!(data.resolve("Ocean", "bengal-tiger").is_none());
        assert!(data.resolve("Jungle", "bengal-tiger").is_none());
        assert!(data.resolve("forest", "bengal-tiger").is_none());
        assert!(data.resolve("", "").is_none());
    }

    #[test]
    fn test_resolve_is_repeatable() {
        let data = HabitatCollection::builtin().unwrap();
        let first = data.resolve("Arctic", "polar-bear").cloned();
        let second = data.resolve("Arctic", "polar-bear").cloned();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_habitat_has_no_animals() {
        let data = HabitatCollection::builtin().unwrap();
        assert!(data.animals("Savanna").is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut habitats = BTreeMap::new();
        habitats.insert(
            Habitat::Desert,
            vec![record("meerkat", "Meerkat"), record("meerkat", "Other Meerkat")],
        );
        let err = HabitatCollection::new(habitats).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateId { habitat: Habitat::Desert, .. }));
    }

    #[test]
    fn test_same_id_in_two_habitats_allowed() {
        let mut habitats = BTreeMap::new();
        habitats.insert(Habitat::Desert, vec![record("fox", "Fennec Fox")]);
        habitats.insert(Habitat::Arctic, vec![record("fox", "Arctic Fox")]);
        let data = HabitatCollection::new(habitats).unwrap();
        assert_eq!(data.resolve("Desert", "fox").unwrap().name, "Fennec Fox");
        assert_eq!(data.resolve("Arctic", "fox").unwrap().name, "Arctic Fox");
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut habitats = BTreeMap::new();
        habitats.insert(Habitat::Ocean, vec![record("  ", "Nameless")]);
        let err = HabitatCollection::new(habitats).unwrap_err();
        assert!(matches!(err, DatasetError::MissingField { field: "id", .. }));

        let mut habitats = BTreeMap::new();
        habitats.insert(Habitat::Ocean, vec![record("orca", "")]);
        let err = HabitatCollection::new(habitats).unwrap_err();
        assert!(matches!(err, DatasetError::MissingField { field: "name", .. }));
    }

    #[test]
    fn test_from_json_minimal_records() {
        let json = r#"{ "Ocean": [ { "id": "orca", "name": "Orca" } ] }"#;
        let data = HabitatCollection::from_json(json).unwrap();
        let orca = data.resolve("Ocean", "orca").unwrap();
        assert_eq!(orca.name, "Orca");
        assert!(orca.fun_facts.is_empty());
        assert!(data.animals("Forest").is_empty());
    }

    #[test]
    fn test_empty_dataset_loads_empty() {
        let data = HabitatCollection::from_json(r#"{ "Forest": [] }"#).unwrap();
        assert!(data.is_empty());
        assert!(data.resolve("Forest", "bengal-tiger").is_none());
    }

    #[test]
    fn test_from_json_unknown_habitat_key() {
        let json = r#"{ "Savanna": [] }"#;
        assert!(matches!(
            HabitatCollection::from_json(json),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn test_habitat_parse_is_exact() {
        assert_eq!("Arctic".parse::<Habitat>(), Ok(Habitat::Arctic));
        assert_eq!(
            "arctic".parse::<Habitat>(),
            Err(UnknownHabitat("arctic".to_string()))
        );
    }
}
