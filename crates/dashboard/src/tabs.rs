//! Tab container: an ordered set of labelled views with exactly one
//! selected at a time.
//!
//! Switching tabs is a pure state transition; the only side effect is
//! an analytics event when a bus is attached. A container with fewer
//! than two tabs is a programming mistake, rejected at construction.

use std::sync::Arc;

use covdash_events::{AnalyticsBus, AnalyticsEvent};

/// Minimum number of tabs a container must hold.
const MIN_TABS: usize = 2;

/// Errors from tab container construction.
#[derive(Debug, thiserror::Error)]
pub enum TabError {
    /// The container was built with fewer than two tabs.
    #[error("a tab container needs at least {MIN_TABS} tabs, got {0}")]
    TooFewTabs(usize),
}

/// One labelled tab and its content.
#[derive(Debug, Clone)]
pub struct Tab<C> {
    pub label: String,
    pub content: C,
}

impl<C> Tab<C> {
    pub fn new(label: impl Into<String>, content: C) -> Self {
        Self {
            label: label.into(),
            content,
        }
    }
}

/// An ordered tab set with a single selection, defaulting to the
/// first tab.
pub struct TabSet<C> {
    tabs: Vec<Tab<C>>,
    selected: usize,
    analytics: Option<Arc<AnalyticsBus>>,
}

impl<C> TabSet<C> {
    /// Build a container. Fails fast when fewer than two tabs are
    /// declared; that is a usage error, not a runtime condition.
    pub fn new(tabs: Vec<Tab<C>>) -> Result<Self, TabError> {
        if tabs.len() < MIN_TABS {
            return Err(TabError::TooFewTabs(tabs.len()));
        }

        Ok(Self {
            tabs,
            selected: 0,
            analytics: None,
        })
    }

    /// Attach an analytics bus notified on every tab change.
    pub fn with_analytics(mut self, bus: Arc<AnalyticsBus>) -> Self {
        self.analytics = Some(bus);
        self
    }

    /// Declared tab labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|t| t.label.as_str())
    }

    /// Label of the currently selected tab.
    pub fn selected(&self) -> &str {
        &self.tabs[self.selected].label
    }

    /// Content of the currently selected tab.
    pub fn selected_content(&self) -> &C {
        &self.tabs[self.selected].content
    }

    /// Select the tab with the given label.
    ///
    /// Unknown labels are refused without a state change. A successful
    /// selection (including re-selecting the current tab, which is
    /// still a click) publishes an `Interaction / Tab change` event.
    pub fn select(&mut self, label: &str) -> bool {
        let Some(index) = self.tabs.iter().position(|t| t.label == label) else {
            tracing::debug!(label, "Ignoring selection of unknown tab");
            return false;
        };

        self.selected = index;

        if let Some(bus) = &self.analytics {
            bus.publish(AnalyticsEvent::new("Interaction", "Tab change", label));
        }

        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
