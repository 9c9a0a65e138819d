//! View orchestration for the dashboard: tab containers, tab views
//! wiring query to shaper to renderer, and page metadata effects.

pub mod content;
pub mod page;
pub mod tabs;

pub use content::{BarMode, BreakdownTabView, MetricTabView, MultiAreaTabView, Renderer, TabKind};
pub use page::{MetadataSink, PageMetadata};
pub use tabs::{Tab, TabError, TabSet};
