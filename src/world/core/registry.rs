use super::BlockId;
use crate::constants::states::MAX_ROTATIONS;
use crate::error::{EngineError, EngineResult, ErrorContext, OptionExt};
use crate::world::blocks::block_data::{BlockDef, BlockShape};
use crate::world::error::{WorldError, WorldErrorContext};
use rustc_hash::FxHashMap;
use std::path::Path;

/// Registry that stores all block types as data
///
/// Ids are dense: a block's id is its index in `blocks`. Id 0 is air.
pub struct BlockRegistry {
    blocks: Vec<BlockDef>,
    /// Map from name to BlockId
    name_to_id: FxHashMap<String, BlockId>,
    /// Returned for ids nothing was registered under
    unknown: BlockDef,
}

impl BlockRegistry {
    pub fn new() -> Self {
        let air = BlockDef::air();
        let mut name_to_id = FxHashMap::default();
        name_to_id.insert(air.name.clone(), BlockId::AIR);

        Self {
            blocks: vec![air],
            name_to_id,
            unknown: BlockDef {
                name: "unknown".to_string(),
                replaceable: false,
                ..BlockDef::air()
            },
        }
    }

    /// Register a new block type, returning its id
    pub fn register(&mut self, def: BlockDef) -> Result<BlockId, WorldError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(WorldError::DuplicateBlock(def.name));
        }
        if let BlockShape::Rotated(rotations) = &def.shape {
            if rotations.len() > MAX_ROTATIONS {
                return Err(WorldError::TooManyRotations {
                    name: def.name.clone(),
                    count: rotations.len(),
                    max: MAX_ROTATIONS,
                });
            }
        }
        let raw = u16::try_from(self.blocks.len())
            .map_err(|_| WorldError::RegistryFull(self.blocks.len()))?;

        let id = BlockId(raw);
        log::debug!(
            "[BlockRegistry] Registered '{}' as {} (solid: {}, obstacle: {}, selectable: {})",
            def.name,
            id.0,
            def.solid(),
            def.obstacle,
            def.selectable
        );
        self.name_to_id.insert(def.name.clone(), id);
        self.blocks.push(def);
        Ok(id)
    }

    /// Definition for an id; unregistered ids get an inert placeholder
    pub fn get(&self, id: BlockId) -> &BlockDef {
        self.blocks.get(id.0 as usize).unwrap_or(&self.unknown)
    }

    /// Definition for an id, failing on unregistered ids
    pub fn try_get(&self, id: BlockId) -> EngineResult<&BlockDef> {
        self.blocks
            .get(id.0 as usize)
            .ok_or_engine(|| EngineError::InvalidBlockType { id: id.0 as u32 })
    }

    /// Get a block ID by name
    pub fn get_id(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }

    /// Check if a block ID is registered
    pub fn is_registered(&self, id: BlockId) -> bool {
        (id.0 as usize) < self.blocks.len()
    }

    /// Number of registered blocks, air included
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Register every definition from a JSON array
    pub fn register_json(&mut self, json: &str) -> EngineResult<Vec<BlockId>> {
        let defs: Vec<BlockDef> = serde_json::from_str(json).world_context("block definitions")?;
        let mut ids = Vec::with_capacity(defs.len());
        for def in defs {
            ids.push(self.register(def)?);
        }
        log::info!("[BlockRegistry] Loaded {} block definitions", ids.len());
        Ok(ids)
    }

    /// Register every definition from a JSON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> EngineResult<Vec<BlockId>> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| EngineError::IoError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        self.register_json(&json)
            .with_context(|| format!("loading {}", path.display()))
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_air_is_preregistered() {
        let registry = BlockRegistry::new();
        assert_eq!(registry.get_id("air"), Some(BlockId::AIR));
        assert!(!registry.get(BlockId::AIR).selectable);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_are_dense() {
        let mut registry = BlockRegistry::new();
        let a = registry.register(BlockDef::cube("a")).expect("register a");
        let b = registry.register(BlockDef::cube("b")).expect("register b");
        assert_eq!(a, BlockId(1));
        assert_eq!(b, BlockId(2));
        assert_eq!(registry.get(b).name, "b");
    }

    #[test]
    fn test_unknown_id_is_inert() {
        let registry = BlockRegistry::new();
        let def = registry.get(BlockId(999));
        assert!(!def.obstacle && !def.selectable && !def.replaceable);
        assert!(matches!(
            registry.try_get(BlockId(999)),
            Err(EngineError::InvalidBlockType { id: 999 })
        ));
        assert!(!registry.is_registered(BlockId(999)));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = BlockRegistry::new();
        registry.register(BlockDef::cube("a")).expect("first registration");
        assert!(matches!(
            registry.register(BlockDef::cube("a")),
            Err(WorldError::DuplicateBlock(_))
        ));
    }

    #[test]
    fn test_too_many_rotations_rejected() {
        let mut registry = BlockRegistry::new();
        let def = BlockDef::rotated("spinner", vec![Vec::new(); MAX_ROTATIONS + 1]);
        assert!(matches!(
            registry.register(def),
            Err(WorldError::TooManyRotations { .. })
        ));
    }

    #[test]
    fn test_register_json() {
        let mut registry = BlockRegistry::new();
        let ids = registry
            .register_json(
                r#"[
                    { "name": "game:brick" },
                    { "name": "game:flower", "obstacle": false, "replaceable": true,
                      "shape": { "kind": "boxes", "boxes": [[0.3, 0.0, 0.3, 0.7, 0.6, 0.7]] } }
                ]"#,
            )
            .expect("definitions parse");
        assert_eq!(ids.len(), 2);
        assert!(registry.get(ids[0]).solid());
        assert!(registry.get(ids[1]).replaceable);

        assert!(registry.register_json("not json").is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"[{{ "name": "game:crate", "inventory_size": 9 }}]"#).expect("write defs");

        let mut registry = BlockRegistry::new();
        let ids = registry.load_file(file.path()).expect("file loads");
        assert_eq!(registry.get(ids[0]).inventory_size, 9);

        assert!(registry.load_file("/nonexistent/blocks.json").is_err());
    }
}
