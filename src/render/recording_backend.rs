use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{DeckError, DeckResult};

use super::{ChartConfig, ChartInstance, GraphicsBackend, SurfaceId};

#[derive(Debug, Default)]
struct Ledger {
    created: usize,
    destroyed: usize,
    live: IndexMap<SurfaceId, u64>,
    last_config: IndexMap<SurfaceId, ChartConfig>,
    retired: BTreeSet<SurfaceId>,
}

/// Headless backend used by tests and tooling.
///
/// It draws nothing but keeps a ledger of instances per surface and refuses a
/// second live instance on the same surface, so double binds fail loudly.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    ledger: Rc<RefCell<Ledger>>,
    next_serial: u64,
    fail_next_create: Option<String>,
}

impl RecordingBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn created_count(&self) -> usize {
        self.ledger.borrow().created
    }

    #[must_use]
    pub fn destroyed_count(&self) -> usize {
        self.ledger.borrow().destroyed
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.ledger.borrow().live.len()
    }

    #[must_use]
    pub fn is_live(&self, surface: SurfaceId) -> bool {
        self.ledger.borrow().live.contains_key(&surface)
    }

    /// Config of the most recent instance created on `surface`.
    #[must_use]
    pub fn last_config(&self, surface: SurfaceId) -> Option<ChartConfig> {
        self.ledger.borrow().last_config.get(&surface).cloned()
    }

    /// Detaches `surface` from the page; later creates on it fail.
    pub fn retire_surface(&mut self, surface: SurfaceId) {
        self.ledger.borrow_mut().retired.insert(surface);
    }

    /// Makes the next `create` call fail with a backend error.
    pub fn fail_next_create(&mut self, reason: impl Into<String>) {
        self.fail_next_create = Some(reason.into());
    }
}

impl GraphicsBackend for RecordingBackend {
    type Instance = RecordingInstance;

    fn create(&mut self, surface: SurfaceId, config: &ChartConfig) -> DeckResult<Self::Instance> {
        if let Some(reason) = self.fail_next_create.take() {
            return Err(DeckError::Backend(reason));
        }

        let mut ledger = self.ledger.borrow_mut();
        if ledger.retired.contains(&surface) {
            return Err(DeckError::MissingTarget(surface.to_string()));
        }
        if ledger.live.contains_key(&surface) {
            return Err(DeckError::DoubleBind { surface });
        }

        self.next_serial += 1;
        ledger.created += 1;
        ledger.live.insert(surface, self.next_serial);
        ledger.last_config.insert(surface, config.clone());

        Ok(RecordingInstance {
            serial: self.next_serial,
            surface,
            ledger: Rc::clone(&self.ledger),
        })
    }

    fn surface_exists(&self, surface: SurfaceId) -> bool {
        !self.ledger.borrow().retired.contains(&surface)
    }
}

/// Instance handle issued by `RecordingBackend`.
#[derive(Debug)]
pub struct RecordingInstance {
    serial: u64,
    surface: SurfaceId,
    ledger: Rc<RefCell<Ledger>>,
}

impl RecordingInstance {
    #[must_use]
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

impl ChartInstance for RecordingInstance {
    fn surface(&self) -> SurfaceId {
        self.surface
    }

    fn destroy(self) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.destroyed += 1;
        if ledger.live.get(&self.surface) == Some(&self.serial) {
            ledger.live.shift_remove(&self.surface);
        }
    }
}
