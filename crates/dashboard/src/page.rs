//! Page metadata as an explicit effect.
//!
//! The document title is computed as a value and applied through a
//! [`MetadataSink`] owned by the navigation collaborator, so data
//! shaping and rendering stay free of global document effects.

/// Site-wide title prefix.
const TITLE_PREFIX: &str = "Coronavirus (COVID-19) in the UK";

/// Collaborator that owns the document/window metadata.
pub trait MetadataSink {
    fn set_title(&self, title: &str);
}

/// Computed metadata for one page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// Document title, always page-scoped.
    pub title: String,
    /// On-page heading, localised when an area is selected.
    pub heading: String,
}

impl PageMetadata {
    /// Metadata for a named page, e.g. `"Testing"`, optionally
    /// localised to an area (`"Testing in Wales"`).
    pub fn for_page(page_name: &str, area_name: Option<&str>) -> Self {
        let heading = match area_name {
            Some(area) => format!("{page_name} in {area}"),
            None => page_name.to_string(),
        };
        Self {
            title: format!("{TITLE_PREFIX}: {page_name}"),
            heading,
        }
    }

    /// Push the metadata to the sink.
    pub fn apply(&self, sink: &dyn MetadataSink) {
        sink.set_title(&self.title);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        titles: Mutex<Vec<String>>,
    }

    impl MetadataSink for RecordingSink {
        fn set_title(&self, title: &str) {
            self.titles.lock().unwrap().push(title.to_string());
        }
    }

    #[test]
    fn title_is_prefixed_with_site_name() {
        let meta = PageMetadata::for_page("Testing", None);
        assert_eq!(meta.title, "Coronavirus (COVID-19) in the UK: Testing");
        assert_eq!(meta.heading, "Testing");
    }

    #[test]
    fn heading_is_localised_but_title_is_not() {
        let meta = PageMetadata::for_page("Testing", Some("Wales"));
        assert_eq!(meta.title, "Coronavirus (COVID-19) in the UK: Testing");
        assert_eq!(meta.heading, "Testing in Wales");
    }

    #[test]
    fn apply_pushes_title_to_sink() {
        let sink = RecordingSink::default();
        PageMetadata::for_page("Healthcare", None).apply(&sink);

        let titles = sink.titles.lock().unwrap();
        assert_eq!(
            titles.as_slice(),
            ["Coronavirus (COVID-19) in the UK: Healthcare"]
        );
    }
}
