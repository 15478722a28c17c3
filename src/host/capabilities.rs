//! # Material Capabilities
//!
//! A typed registry of what each material can do when it is mined: its own harvest
//! routine, its drop table, the tool tier it requires and its stack size.
//!
//! ## Resolution
//!
//! Definitions are registered once through [`MaterialRegistryBuilder`]. A lookup for a
//! material resolves, in order:
//!
//! 1. the definition registered for the exact id
//! 2. the definition registered for its canonical id (so an activated ore inherits
//!    the base ore's drops)
//! 3. [`MaterialCapabilities::default`]
//!
//! The result is memoized per id in a [`Registry`], so each id walks the chain once.

use std::{collections::HashMap, ops::RangeInclusive, sync::Arc};

use log::debug;

use super::{CapabilityTable, DropTable, HarvestRoutine, ToolStack};
use crate::{core::Registry, voxels::MaterialId};

/// Stack size used for materials without an explicit definition.
pub const DEFAULT_MAX_STACK_SIZE: u32 = 64;

/// Resolved capability descriptor of one material.
#[derive(Clone)]
pub struct MaterialCapabilities {
    pub harvest: Option<Arc<dyn HarvestRoutine>>,
    pub drops: Option<Arc<dyn DropTable>>,
    /// Minimum tool tier; 0 means the bare hand works.
    pub harvest_tier: u32,
    pub max_stack_size: u32,
}

impl Default for MaterialCapabilities {
    fn default() -> Self {
        Self {
            harvest: None,
            drops: None,
            harvest_tier: 0,
            max_stack_size: DEFAULT_MAX_STACK_SIZE,
        }
    }
}

impl MaterialCapabilities {
    /// A material that drops `drops` and can be harvested at `harvest_tier`.
    pub fn with_drops(drops: impl DropTable + 'static, harvest_tier: u32) -> Self {
        Self {
            drops: Some(Arc::new(drops)),
            harvest_tier,
            ..Default::default()
        }
    }

    /// An item that only exists in inventories, e.g. a tool.
    pub fn item(max_stack_size: u32) -> Self {
        Self {
            max_stack_size,
            ..Default::default()
        }
    }

    pub fn harvested_by(mut self, routine: impl HarvestRoutine + 'static) -> Self {
        self.harvest = Some(Arc::new(routine));
        self
    }
}

/// Drop table yielding one fixed material in a quantity range.
#[derive(Clone, Debug)]
pub struct FixedDrops {
    pub material: MaterialId,
    pub quantity: RangeInclusive<u32>,
    /// Carry the cell's sub-state over as the item variant (e.g. wool colour).
    pub keep_sub_state: bool,
}

impl FixedDrops {
    /// Drops exactly one `material`.
    pub fn single(material: MaterialId) -> Self {
        Self {
            material,
            quantity: 1..=1,
            keep_sub_state: false,
        }
    }

    pub fn range(material: MaterialId, quantity: RangeInclusive<u32>) -> Self {
        Self {
            material,
            quantity,
            keep_sub_state: false,
        }
    }
}

impl DropTable for FixedDrops {
    fn dropped(&self, _sub_state: u32, _rng: &mut fastrand::Rng) -> Option<MaterialId> {
        (!self.material.is_empty()).then_some(self.material)
    }

    fn quantity(&self, rng: &mut fastrand::Rng) -> u32 {
        if self.quantity.is_empty() {
            return 0;
        }
        rng.u32(self.quantity.clone())
    }

    fn variant(&self, sub_state: u32) -> u32 {
        if self.keep_sub_state {
            sub_state
        } else {
            0
        }
    }
}

/// Collects material definitions before the registry is frozen.
#[derive(Default)]
pub struct MaterialRegistryBuilder {
    definitions: HashMap<MaterialId, MaterialCapabilities>,
}

impl MaterialRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `capabilities` for `material`, replacing an earlier definition.
    pub fn material(mut self, material: impl Into<MaterialId>, capabilities: MaterialCapabilities) -> Self {
        self.definitions.insert(material.into(), capabilities);
        self
    }

    pub fn build(self) -> MaterialRegistry {
        debug!("Material registry built with {} definitions", self.definitions.len());
        MaterialRegistry {
            definitions: self.definitions,
            resolved: Registry::new(),
        }
    }
}

/// The hosting game's capability table, populated once and queried thereafter.
pub struct MaterialRegistry {
    definitions: HashMap<MaterialId, MaterialCapabilities>,
    resolved: Registry<MaterialId, MaterialCapabilities>,
}

impl MaterialRegistry {
    pub fn builder() -> MaterialRegistryBuilder {
        MaterialRegistryBuilder::new()
    }

    /// Resolves the descriptor for `material`, see the module docs for the fallback chain.
    pub fn resolve(&self, material: MaterialId) -> Arc<MaterialCapabilities> {
        self.resolved.get_or_insert_with(material, || {
            self.definitions
                .get(&material)
                .or_else(|| self.definitions.get(&material.canonical()))
                .cloned()
                .unwrap_or_default()
        })
    }

    /// Returns `true` if `material` (or its canonical form) was registered explicitly.
    pub fn is_defined(&self, material: MaterialId) -> bool {
        self.definitions.contains_key(&material)
            || self.definitions.contains_key(&material.canonical())
    }
}

impl CapabilityTable for MaterialRegistry {
    fn canonical_harvest(&self, material: MaterialId) -> Option<Arc<dyn HarvestRoutine>> {
        self.resolve(material).harvest.clone()
    }

    fn drop_table(&self, material: MaterialId) -> Option<Arc<dyn DropTable>> {
        self.resolve(material).drops.clone()
    }

    fn can_harvest(&self, tool: Option<&ToolStack>, material: MaterialId) -> bool {
        let required = self.resolve(material).harvest_tier;
        required == 0 || tool.is_some_and(|tool| !tool.is_depleted() && tool.tier >= required)
    }

    fn max_stack_size(&self, material: MaterialId) -> u32 {
        self.resolve(material).max_stack_size.max(1)
    }
}
