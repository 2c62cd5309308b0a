use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::OptionsTree;
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartBackend, ChartInstance};

use super::{
    ChangeSet, ChartConfig, ChartInputs, Patch, PluginDescriptor, PluginRegistry, ReconcilePlan,
    ThemeService, ThemeSubscription, apply_patch, build_chart_config, classify,
};

/// What one reconciliation pass did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reconciliation {
    /// No drawing surface yet.
    Skipped,
    /// Inputs were identical to the previous generation.
    Unchanged,
    /// The live instance was patched and redrawn once.
    Patched(Vec<Patch>),
    /// The live instance was replaced.
    Rebuilt,
}

/// Live engine handle plus the configuration it was last drawn from.
struct LiveChart<I> {
    config: ChartConfig,
    instance: I,
    legend: Option<String>,
}

enum Lifecycle<S, I> {
    Uninitialized,
    Ready {
        surface: S,
        live: Option<LiveChart<I>>,
    },
}

struct Runtime<B: ChartBackend> {
    backend: B,
    plugins: PluginRegistry,
    lifecycle: Lifecycle<B::Surface, B::Instance>,
}

impl<B: ChartBackend> Runtime<B> {
    fn live(&self) -> Option<&LiveChart<B::Instance>> {
        match &self.lifecycle {
            Lifecycle::Ready { live, .. } => live.as_ref(),
            Lifecycle::Uninitialized => None,
        }
    }

    fn live_mut(&mut self) -> Option<&mut LiveChart<B::Instance>> {
        match &mut self.lifecycle {
            Lifecycle::Ready { live, .. } => live.as_mut(),
            Lifecycle::Uninitialized => None,
        }
    }

    fn destroy_live(&mut self) {
        if let Lifecycle::Ready { live, .. } = &mut self.lifecycle {
            if let Some(mut previous) = live.take() {
                debug!(kind = %previous.config.kind, "destroying chart instance");
                previous.instance.destroy();
            }
        }
    }

    fn rebuild(
        &mut self,
        inputs: &ChartInputs,
        theme_overrides: &OptionsTree,
    ) -> ChartResult<Reconciliation> {
        if matches!(self.lifecycle, Lifecycle::Uninitialized) {
            return Ok(Reconciliation::Skipped);
        }
        let config = build_chart_config(inputs, theme_overrides)?;
        self.destroy_live();

        let Lifecycle::Ready { surface, live } = &mut self.lifecycle else {
            return Ok(Reconciliation::Skipped);
        };
        let instance = self.backend.create(surface, &config, &self.plugins)?;
        debug!(kind = %config.kind, datasets = config.datasets.len(), "created chart instance");
        *live = Some(LiveChart {
            config,
            instance,
            legend: None,
        });
        Ok(Reconciliation::Rebuilt)
    }

    fn patch(
        &mut self,
        patches: Vec<Patch>,
        changes: &ChangeSet<'_>,
        theme_overrides: &OptionsTree,
    ) -> ChartResult<Reconciliation> {
        if self.live().is_none() {
            return self.rebuild(changes.current, theme_overrides);
        }
        let Some(live) = self.live_mut() else {
            return Ok(Reconciliation::Skipped);
        };

        let mut config = live.config.clone();
        for patch in &patches {
            apply_patch(&mut config, *patch, changes)?;
        }
        if patches.contains(&Patch::Legend) {
            live.legend = Some(live.instance.generate_legend(&config));
        }
        live.config = config;
        live.instance.update(&live.config)?;
        trace!(?patches, "patched chart instance");
        Ok(Reconciliation::Patched(patches))
    }

    fn reconcile(
        &mut self,
        changes: &ChangeSet<'_>,
        theme_overrides: &OptionsTree,
    ) -> ChartResult<Reconciliation> {
        if matches!(self.lifecycle, Lifecycle::Uninitialized) {
            return Ok(Reconciliation::Skipped);
        }
        match classify(changes) {
            ReconcilePlan::Incremental(patches) => self.patch(patches, changes, theme_overrides),
            ReconcilePlan::Rebuild => self.rebuild(changes.current, theme_overrides),
        }
    }
}

/// Keeps one chart engine instance in sync with declarative host inputs.
///
/// Starts uninitialized; `attach` hands over the drawing surface exactly once
/// per lifecycle. Before that every reconciliation is skipped. Afterwards a
/// pass without any series fails with `ChartError::Configuration`. At most one
/// engine instance is alive at a time and it is always destroyed before its
/// replacement is created.
pub struct ChartBinding<B: ChartBackend> {
    runtime: Runtime<B>,
    inputs: ChartInputs,
    theme_overrides: OptionsTree,
    theme_subscription: Option<ThemeSubscription>,
}

impl<B: ChartBackend> ChartBinding<B> {
    #[must_use]
    pub fn new(backend: B, plugins: PluginRegistry, inputs: ChartInputs) -> Self {
        Self {
            runtime: Runtime {
                backend,
                plugins,
                lifecycle: Lifecycle::Uninitialized,
            },
            inputs,
            theme_overrides: OptionsTree::new(),
            theme_subscription: None,
        }
    }

    /// Supplies the drawing surface and builds the first chart.
    ///
    /// The surface is kept even when the first build fails, so a later
    /// `update_inputs` that supplies data builds the chart.
    pub fn attach(&mut self, surface: B::Surface) -> ChartResult<Reconciliation> {
        if self.is_ready() {
            return Err(ChartError::AlreadyAttached);
        }
        self.runtime.lifecycle = Lifecycle::Ready {
            surface,
            live: None,
        };
        debug!(kind = %self.inputs.kind, "attached drawing surface");
        self.refresh()
    }

    /// Replaces the host inputs and reconciles the difference.
    ///
    /// On error the previous inputs are restored, so resubmitting the same
    /// inputs runs the reconciliation again.
    pub fn update_inputs(&mut self, inputs: ChartInputs) -> ChartResult<Reconciliation> {
        let previous = std::mem::replace(&mut self.inputs, inputs);
        let changes = ChangeSet::between(&previous, &self.inputs);
        if changes.is_empty() {
            return Ok(Reconciliation::Unchanged);
        }
        let outcome = self.runtime.reconcile(&changes, &self.theme_overrides);
        if let Err(err) = &outcome {
            warn!(error = %err, "reconciliation failed, keeping previous inputs");
            self.inputs = previous;
        }
        outcome
    }

    /// Forces a full rebuild from the current inputs.
    pub fn refresh(&mut self) -> ChartResult<Reconciliation> {
        self.runtime.rebuild(&self.inputs, &self.theme_overrides)
    }

    /// Stores new theme overrides and runs a full reconciliation pass.
    pub fn apply_theme(&mut self, overrides: OptionsTree) -> ChartResult<Reconciliation> {
        self.theme_overrides = overrides;
        self.refresh()
    }

    /// Toggles visibility of dataset `index` and redraws.
    pub fn hide_dataset(&mut self, index: usize, hidden: bool) -> ChartResult<()> {
        let live = self.runtime.live_mut().ok_or(ChartError::NotReady)?;
        live.instance.set_dataset_hidden(index, hidden)?;
        live.instance.update(&live.config)
    }

    /// `None` when no chart is alive or `index` is unknown to it.
    #[must_use]
    pub fn is_dataset_hidden(&self, index: usize) -> Option<bool> {
        self.runtime
            .live()
            .and_then(|live| live.instance.dataset_meta(index))
            .map(|meta| meta.hidden)
    }

    pub fn to_base64_image(&self) -> ChartResult<String> {
        self.runtime
            .live()
            .ok_or(ChartError::NotReady)?
            .instance
            .to_base64_image()
    }

    /// Registers a plugin in the shared registry passed at construction.
    pub fn register_plugin(&self, plugin: PluginDescriptor) -> ChartResult<()> {
        self.runtime.plugins.register(plugin)
    }

    /// Unregisters a plugin from the shared registry. Returns `true` when removed.
    pub fn unregister_plugin(&self, plugin_id: &str) -> bool {
        self.runtime.plugins.unregister(plugin_id)
    }

    /// Destroys the live chart, drops the theme subscription and returns to
    /// the uninitialized state.
    pub fn teardown(&mut self) {
        self.runtime.destroy_live();
        self.runtime.lifecycle = Lifecycle::Uninitialized;
        self.theme_subscription = None;
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.runtime.lifecycle, Lifecycle::Ready { .. })
    }

    /// Configuration the live chart was last drawn from.
    #[must_use]
    pub fn config(&self) -> Option<&ChartConfig> {
        self.runtime.live().map(|live| &live.config)
    }

    /// Legend markup produced by the last legend patch.
    #[must_use]
    pub fn legend(&self) -> Option<&str> {
        self.runtime.live().and_then(|live| live.legend.as_deref())
    }

    #[must_use]
    pub fn inputs(&self) -> &ChartInputs {
        &self.inputs
    }

    #[must_use]
    pub fn theme_overrides(&self) -> &OptionsTree {
        &self.theme_overrides
    }

    #[must_use]
    pub fn plugins(&self) -> &PluginRegistry {
        &self.runtime.plugins
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.runtime.backend
    }
}

impl<B: ChartBackend + 'static> ChartBinding<B> {
    /// Subscribes a shared binding to `theme`.
    ///
    /// The current overrides are applied immediately; each later emission runs
    /// one full reconciliation pass. The subscription ends on `teardown`.
    pub fn bind_theme(this: &Rc<RefCell<Self>>, theme: &ThemeService) {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(this);
        let subscription = theme.subscribe(move |overrides| {
            let Some(binding) = weak.upgrade() else {
                return;
            };
            let Ok(mut binding) = binding.try_borrow_mut() else {
                warn!("chart binding busy, dropping theme notification");
                return;
            };
            if let Err(err) = binding.apply_theme(overrides.clone()) {
                warn!(error = %err, "theme reconciliation failed");
            }
        });
        this.borrow_mut().theme_subscription = Some(subscription);
    }
}

impl<B: ChartBackend> Drop for ChartBinding<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
