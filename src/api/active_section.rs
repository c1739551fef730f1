use std::fmt;

use crate::core::SectionId;
use crate::error::{DeckError, DeckResult};

/// Consumer notified whenever the active section changes.
pub trait ActiveSectionListener {
    fn id(&self) -> &str;
    fn on_active_section_changed(&mut self, previous: &SectionId, current: &SectionId);
}

/// Single-writer cell holding the page's active section.
///
/// Only the activity tracker writes it; everyone else reads through `get` or
/// subscribes. It always holds a value, starting from the seeded id.
pub struct ActiveSectionCell {
    current: SectionId,
    listeners: Vec<Box<dyn ActiveSectionListener>>,
}

impl ActiveSectionCell {
    #[must_use]
    pub fn new(initial: SectionId) -> Self {
        Self {
            current: initial,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(&self) -> &SectionId {
        &self.current
    }

    /// Stores `next` and notifies listeners. Returns `false` when unchanged.
    pub(crate) fn set(&mut self, next: SectionId) -> bool {
        if next == self.current {
            return false;
        }
        let previous = std::mem::replace(&mut self.current, next);
        for listener in &mut self.listeners {
            listener.on_active_section_changed(&previous, &self.current);
        }
        true
    }

    pub fn subscribe(&mut self, listener: Box<dyn ActiveSectionListener>) -> DeckResult<()> {
        if self
            .listeners
            .iter()
            .any(|existing| existing.id() == listener.id())
        {
            return Err(DeckError::InvalidData(format!(
                "listener id `{}` is already subscribed",
                listener.id()
            )));
        }
        self.listeners.push(listener);
        Ok(())
    }

    pub fn unsubscribe(&mut self, listener_id: &str) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id() != listener_id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for ActiveSectionCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveSectionCell")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
