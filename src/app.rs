//! Site controller: the single owner of scroll progress and the open overlay.

use crate::backdrop::Backdrop;
use crate::header::HeaderTransform;
use crate::mapper::{map_progress_to_visual, VisualTarget};
use crate::progress::Progress;
use crate::sections::{self, SectionId};

#[derive(Clone, Debug, Default)]
pub struct SiteState {
    progress: Progress,
    expanded: Option<SectionId>,
}

/// Read-only projection handed to the DOM views each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteView {
    pub progress: Progress,
    pub expanded: Option<SectionId>,
    pub header: HeaderTransform,
    pub backdrop: Backdrop,
    pub visible_section: Option<SectionId>,
    pub indicators: [bool; 6],
    pub cta_visible: bool,
    /// Page scrolling is disabled while an overlay covers it.
    pub scroll_locked: bool,
}

impl SiteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn expanded(&self) -> Option<SectionId> {
        self.expanded
    }

    /// Accepts a new progress unless an overlay is open, in which case the
    /// scene stays frozen at the last accepted value. Returns whether the
    /// value was taken.
    pub fn set_progress(&mut self, progress: Progress) -> bool {
        if self.expanded.is_some() {
            return false;
        }
        self.progress = progress;
        true
    }

    pub fn set_expanded_section(&mut self, section: Option<SectionId>) {
        if self.expanded != section {
            match section {
                Some(id) => log::info!("opening {} overlay", id.key()),
                None => log::info!("closing overlay"),
            }
        }
        self.expanded = section;
    }

    /// Opens the overlay named by a DOM key. Unknown keys leave the state
    /// untouched and return `None`.
    pub fn expand_key(&mut self, key: &str) -> Option<SectionId> {
        let Some(id) = SectionId::from_key(key) else {
            log::warn!("ignoring unknown section key {key:?}");
            return None;
        };
        self.set_expanded_section(Some(id));
        Some(id)
    }

    pub fn close(&mut self) {
        self.set_expanded_section(None);
    }

    pub fn visual_target(&self, elapsed: f32) -> VisualTarget {
        map_progress_to_visual(self.progress, self.expanded, elapsed)
    }

    pub fn view(&self) -> SiteView {
        let p = self.progress;
        SiteView {
            progress: p,
            expanded: self.expanded,
            header: HeaderTransform::at(p),
            backdrop: Backdrop::at(p),
            visible_section: sections::visible_section(p),
            indicators: sections::indicators(p),
            cta_visible: sections::cta_visible(p),
            scroll_locked: self.expanded.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_freezes_while_overlay_open() {
        let mut site = SiteState::new();
        assert!(site.set_progress(Progress::new(0.3)));
        site.set_expanded_section(Some(SectionId::Journal));
        assert!(!site.set_progress(Progress::new(0.8)));
        assert_eq!(site.progress().get(), 0.3);

        site.close();
        assert!(site.set_progress(Progress::new(0.8)));
        assert_eq!(site.progress().get(), 0.8);
    }

    #[test]
    fn unknown_key_renders_nothing() {
        let mut site = SiteState::new();
        assert_eq!(site.expand_key("ORACLE"), None);
        assert_eq!(site.expanded(), None);
        assert!(!site.view().scroll_locked);

        assert_eq!(site.expand_key("MOON"), Some(SectionId::Moon));
        assert!(site.view().scroll_locked);
    }

    #[test]
    fn view_projects_current_progress() {
        let mut site = SiteState::new();
        site.set_progress(Progress::new(0.20));
        let view = site.view();
        assert_eq!(view.visible_section, Some(SectionId::Id));
        assert!(view.indicators[0]);
        assert!(!view.cta_visible);
        assert_eq!(view.header.scale, 1.0);

        site.set_progress(Progress::new(0.95));
        let view = site.view();
        assert_eq!(view.visible_section, None);
        assert!(view.cta_visible);
    }
}
