use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ChartConfig, PluginRegistry};
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartBackend, ChartInstance, DatasetMeta};

/// Lifecycle counters shared by a `NullBackend` and every chart it created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullBackendStats {
    pub created: usize,
    pub updated: usize,
    pub destroyed: usize,
    pub legends: usize,
    pub global_plugins: usize,
}

impl NullBackendStats {
    /// Instances created and not yet destroyed.
    #[must_use]
    pub fn live(self) -> usize {
        self.created - self.destroyed
    }
}

/// Headless backend used by tests and server-side reconciliation.
///
/// It still validates every configuration it receives so tests catch
/// unlabeled datasets before a real engine is plugged in.
#[derive(Debug, Default)]
pub struct NullBackend {
    stats: Rc<RefCell<NullBackendStats>>,
}

impl NullBackend {
    #[must_use]
    pub fn stats(&self) -> NullBackendStats {
        *self.stats.borrow()
    }
}

impl ChartBackend for NullBackend {
    type Surface = Viewport;
    type Instance = NullChart;

    fn create(
        &mut self,
        surface: &Viewport,
        config: &ChartConfig,
        plugins: &PluginRegistry,
    ) -> ChartResult<NullChart> {
        if !surface.is_valid() {
            return Err(ChartError::Backend(format!(
                "invalid surface size: width={}, height={}",
                surface.width, surface.height
            )));
        }
        config.validate()?;

        let mut stats = self.stats.borrow_mut();
        stats.created += 1;
        stats.global_plugins = plugins.len();
        Ok(NullChart {
            meta: vec![DatasetMeta::default(); config.datasets.len()],
            destroyed: false,
            stats: Rc::clone(&self.stats),
        })
    }
}

/// Chart produced by `NullBackend`.
#[derive(Debug)]
pub struct NullChart {
    meta: Vec<DatasetMeta>,
    destroyed: bool,
    stats: Rc<RefCell<NullBackendStats>>,
}

impl NullChart {
    fn ensure_alive(&self) -> ChartResult<()> {
        if self.destroyed {
            return Err(ChartError::Backend("chart was destroyed".to_owned()));
        }
        Ok(())
    }
}

impl ChartInstance for NullChart {
    fn update(&mut self, config: &ChartConfig) -> ChartResult<()> {
        self.ensure_alive()?;
        config.validate()?;
        self.meta.resize(config.datasets.len(), DatasetMeta::default());
        self.stats.borrow_mut().updated += 1;
        Ok(())
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.stats.borrow_mut().destroyed += 1;
        }
    }

    fn dataset_meta(&self, index: usize) -> Option<DatasetMeta> {
        self.meta.get(index).copied()
    }

    fn set_dataset_hidden(&mut self, index: usize, hidden: bool) -> ChartResult<()> {
        self.ensure_alive()?;
        let meta = self.meta.get_mut(index).ok_or_else(|| {
            ChartError::InvalidData(format!("dataset index {index} is out of range"))
        })?;
        meta.hidden = hidden;
        Ok(())
    }

    fn generate_legend(&mut self, config: &ChartConfig) -> String {
        self.stats.borrow_mut().legends += 1;
        let items: String = config
            .datasets
            .iter()
            .map(|dataset| format!("<li>{}</li>", dataset.label_text().unwrap_or_default()))
            .collect();
        format!("<ul class=\"{}-legend\">{items}</ul>", config.kind)
    }

    fn to_base64_image(&self) -> ChartResult<String> {
        self.ensure_alive()?;
        Ok("data:,".to_owned())
    }
}
