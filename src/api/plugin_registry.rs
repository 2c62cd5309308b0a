use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::OptionsTree;
use crate::error::{ChartError, ChartResult};

/// Plugin identity plus its option block, as handed to the chart engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub id: String,
    #[serde(default, skip_serializing_if = "OptionsTree::is_empty")]
    pub options: OptionsTree,
}

impl PluginDescriptor {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            options: OptionsTree::new(),
        }
    }
}

/// Registry of plugins applied to every chart.
///
/// Clones share one underlying registry. Create it once for the process (or
/// test) and pass clones to each binding; entries live until unregistered.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: Rc<RefCell<IndexMap<String, PluginDescriptor>>>,
}

impl PluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin with unique identifier.
    pub fn register(&self, plugin: PluginDescriptor) -> ChartResult<()> {
        if plugin.id.is_empty() {
            return Err(ChartError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        let mut plugins = self.plugins.borrow_mut();
        if plugins.contains_key(&plugin.id) {
            return Err(ChartError::InvalidData(format!(
                "plugin with id `{}` is already registered",
                plugin.id
            )));
        }
        plugins.insert(plugin.id.clone(), plugin);
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister(&self, plugin_id: &str) -> bool {
        self.plugins.borrow_mut().shift_remove(plugin_id).is_some()
    }

    #[must_use]
    pub fn contains(&self, plugin_id: &str) -> bool {
        self.plugins.borrow().contains_key(plugin_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.borrow().is_empty()
    }

    /// Registered plugins in registration order.
    #[must_use]
    pub fn descriptors(&self) -> Vec<PluginDescriptor> {
        self.plugins.borrow().values().cloned().collect()
    }
}
