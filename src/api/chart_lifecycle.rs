use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::WidgetId;
use crate::error::{DeckError, DeckResult};
use crate::render::{ChartConfig, ChartInstance, GraphicsBackend, SurfaceId};

/// Exclusive owner of one chart surface and its live instance.
///
/// The instance slot is emptied before a new instance is created, so two
/// live instances on one surface cannot be expressed through this type.
#[derive(Debug)]
pub struct ChartBinding<I: ChartInstance> {
    surface: SurfaceId,
    instance: Option<I>,
    config: ChartConfig,
}

impl<I: ChartInstance> ChartBinding<I> {
    pub fn create<B>(backend: &mut B, surface: SurfaceId, config: ChartConfig) -> DeckResult<Self>
    where
        B: GraphicsBackend<Instance = I> + ?Sized,
    {
        let instance = backend.create(surface, &config)?;
        Ok(Self {
            surface,
            instance: Some(instance),
            config,
        })
    }

    /// Destroys the current instance, then creates one from `config`.
    ///
    /// On a backend error the binding stays empty and keeps its previous
    /// configuration.
    pub fn rebind<B>(&mut self, backend: &mut B, config: ChartConfig) -> DeckResult<()>
    where
        B: GraphicsBackend<Instance = I> + ?Sized,
    {
        self.destroy();
        let instance = backend.create(self.surface, &config)?;
        self.instance = Some(instance);
        self.config = config;
        Ok(())
    }

    /// Destroys and clears the instance. Returns `false` when already empty.
    pub fn destroy(&mut self) -> bool {
        match self.instance.take() {
            Some(instance) => {
                instance.destroy();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn instance(&self) -> Option<&I> {
        self.instance.as_ref()
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.instance.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MountOutcome {
    Created,
    /// A previous instance was destroyed first.
    Rebound { shape_changed: bool },
    /// The surface is no longer attached; nothing was created.
    SurfaceMissing,
}

/// Keeps at most one live chart instance per widget.
pub struct ChartLifecycleManager<B: GraphicsBackend> {
    backend: B,
    bindings: IndexMap<WidgetId, ChartBinding<B::Instance>>,
}

impl<B: GraphicsBackend> ChartLifecycleManager<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            bindings: IndexMap::new(),
        }
    }

    /// Binds `config` to `widget` on `surface`.
    ///
    /// An existing instance for the widget is destroyed before the new one
    /// is created, whether or not the configuration changed. A surface that
    /// another widget already draws on is refused with `DoubleBind` before
    /// the backend is reached. When the surface is gone the widget's previous
    /// instance is released and nothing is created.
    pub fn mount(
        &mut self,
        widget: WidgetId,
        surface: SurfaceId,
        config: ChartConfig,
    ) -> DeckResult<MountOutcome> {
        config.validate()?;
        if !self.backend.surface_exists(surface) {
            if let Some(mut stale) = self.bindings.shift_remove(&widget) {
                if stale.destroy() {
                    debug!(chart = %widget, surface = %stale.surface(), "chart destroyed");
                }
            }
            warn!(chart = %widget, %surface, "chart surface is gone; skipping mount");
            return Ok(MountOutcome::SurfaceMissing);
        }
        if let Some(owner) = self.live_owner_of(surface).filter(|owner| *owner != &widget) {
            warn!(chart = %widget, %surface, %owner, "surface already holds a live chart");
            return Err(DeckError::DoubleBind { surface });
        }

        let mut previous_shape = None;
        if let Some(binding) = self.bindings.get_mut(&widget) {
            let shape = binding.config().shape();
            if binding.surface() == surface {
                binding.rebind(&mut self.backend, config)?;
                let shape_changed = binding.config().shape() != shape;
                debug!(chart = %widget, %surface, shape_changed, "chart rebound");
                return Ok(MountOutcome::Rebound { shape_changed });
            }
            if binding.destroy() {
                debug!(chart = %widget, from = %binding.surface(), to = %surface, "chart moved to another surface");
            }
            previous_shape = Some(shape);
        }

        let shape = config.shape();
        let binding = ChartBinding::create(&mut self.backend, surface, config)?;
        self.bindings.insert(widget.clone(), binding);
        match previous_shape {
            Some(previous) => {
                let shape_changed = previous != shape;
                debug!(chart = %widget, %surface, shape_changed, "chart rebound");
                Ok(MountOutcome::Rebound { shape_changed })
            }
            None => {
                debug!(chart = %widget, %surface, kind = ?shape.kind, "chart created");
                Ok(MountOutcome::Created)
            }
        }
    }

    /// Destroys the widget's instance. Returns `false` (and never reaches
    /// the backend) when nothing was live.
    pub fn unmount(&mut self, widget: &WidgetId) -> bool {
        let Some(mut binding) = self.bindings.shift_remove(widget) else {
            return false;
        };
        let destroyed = binding.destroy();
        if destroyed {
            debug!(chart = %widget, surface = %binding.surface(), "chart destroyed");
        }
        destroyed
    }

    /// Destroys every instance. Returns how many were live.
    pub fn unmount_all(&mut self) -> usize {
        let mut destroyed = 0;
        for (widget, mut binding) in self.bindings.drain(..) {
            if binding.destroy() {
                debug!(chart = %widget, surface = %binding.surface(), "chart destroyed");
                destroyed += 1;
            }
        }
        destroyed
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[must_use]
    pub fn binding(&self, widget: &WidgetId) -> Option<&ChartBinding<B::Instance>> {
        self.bindings.get(widget)
    }

    #[must_use]
    pub fn is_bound(&self, widget: &WidgetId) -> bool {
        self.bindings
            .get(widget)
            .is_some_and(ChartBinding::is_live)
    }

    #[must_use]
    pub fn live_instance_count(&self) -> usize {
        self.bindings.values().filter(|binding| binding.is_live()).count()
    }

    pub fn widgets(&self) -> impl Iterator<Item = &WidgetId> {
        self.bindings.keys()
    }

    /// Widget whose live instance is drawn on `surface`, if any.
    #[must_use]
    pub fn live_owner_of(&self, surface: SurfaceId) -> Option<&WidgetId> {
        self.bindings
            .iter()
            .find(|(_, binding)| binding.is_live() && binding.surface() == surface)
            .map(|(widget, _)| widget)
    }
}

impl<B: GraphicsBackend + std::fmt::Debug> std::fmt::Debug for ChartLifecycleManager<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartLifecycleManager")
            .field("backend", &self.backend)
            .field("bindings", &self.bindings.len())
            .finish()
    }
}
