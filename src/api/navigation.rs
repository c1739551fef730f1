use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::SectionId;
use crate::platform::{ScrollBehavior, ScrollHost};

use super::SectionActivityTracker;

/// One entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub target: SectionId,
}

impl NavItem {
    #[must_use]
    pub fn new(label: impl Into<String>, target: SectionId) -> Self {
        Self {
            label: label.into(),
            target,
        }
    }
}

/// Render model of a nav link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLinkView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Scrolled { top: f64 },
    TargetMissing,
}

/// What happened when a nav link was activated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkActivation {
    /// The host's default anchor jump must not run.
    pub default_prevented: bool,
    pub outcome: NavigationOutcome,
}

/// Navigation bar: link highlighting and header-aware scrolling.
///
/// It only reads the active section; scrolling updates the active section
/// indirectly through the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationController {
    items: Vec<NavItem>,
    behavior: ScrollBehavior,
}

impl NavigationController {
    #[must_use]
    pub fn new(items: Vec<NavItem>, behavior: ScrollBehavior) -> Self {
        Self { items, behavior }
    }

    #[must_use]
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    #[must_use]
    pub fn behavior(&self) -> ScrollBehavior {
        self.behavior
    }

    #[must_use]
    pub fn is_active(target: &SectionId, active: &SectionId) -> bool {
        target == active
    }

    #[must_use]
    pub fn links(&self, active: &SectionId) -> Vec<NavLinkView> {
        self.items
            .iter()
            .map(|item| NavLinkView {
                label: item.label.clone(),
                href: item.target.anchor(),
                active: Self::is_active(&item.target, active),
            })
            .collect()
    }

    /// Scrolls `target` to just below the fixed header.
    ///
    /// The default navigation is always prevented; a target without a
    /// registered, attached region is a no-op.
    pub fn on_link_activate<H>(
        &self,
        target: &SectionId,
        tracker: &SectionActivityTracker,
        host: &mut H,
    ) -> LinkActivation
    where
        H: ScrollHost + ?Sized,
    {
        let region_top = tracker
            .region_of(target)
            .and_then(|region| host.region_top(region));
        let Some(region_top) = region_top else {
            debug!(section = %target, "navigation target missing");
            return LinkActivation {
                default_prevented: true,
                outcome: NavigationOutcome::TargetMissing,
            };
        };

        let top = region_top + host.scroll_y() - host.header_height();
        host.scroll_to(top, self.behavior);
        debug!(section = %target, top, behavior = ?self.behavior, "navigation scroll");
        LinkActivation {
            default_prevented: true,
            outcome: NavigationOutcome::Scrolled { top },
        }
    }
}
