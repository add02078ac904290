//! Scroll-derived page state: the active section, nav highlighting and the
//! header's scrolled/hidden flags, recomputed at most once per frame.

use crate::config::UiConfig;

/// Geometry of one `section[id]`, measured in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Sections in explicit document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionMap {
    sections: Vec<(usize, SectionBounds)>,
}

impl SectionMap {
    /// `sections` pairs each bound with its document position; the map
    /// sorts on that position so callers need not trust query order.
    pub fn new(sections: impl IntoIterator<Item = (usize, SectionBounds)>) -> Self {
        let mut sections: Vec<_> = sections.into_iter().collect();
        sections.sort_by_key(|(position, _)| *position);
        Self { sections }
    }

    pub fn from_document_order(sections: impl IntoIterator<Item = SectionBounds>) -> Self {
        Self::new(sections.into_iter().enumerate())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Last section in document order whose `top - height / divisor` is at
    /// or above `scroll_y`.
    pub fn active_section(&self, scroll_y: f64, divisor: f64) -> Option<&str> {
        self.sections
            .iter()
            .rev()
            .find(|(_, section)| scroll_y >= section.top - section.height / divisor)
            .map(|(_, section)| section.id.as_str())
    }
}

/// Which nav items should carry `active`. Items without a link are left
/// untouched (`None`).
pub fn nav_highlight(hrefs: &[Option<String>], active_section: Option<&str>) -> Vec<Option<bool>> {
    let target = active_section.map(|id| format!("#{id}"));
    hrefs
        .iter()
        .map(|href| {
            href.as_ref()
                .map(|href| target.as_deref() == Some(href.as_str()))
        })
        .collect()
}

/// What a click on an in-page link should do, decided from the `href` the
/// link carries at click time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorAction<'a> {
    /// Not an in-page link (anymore); the browser handles it.
    Follow,
    /// A bare `#`: swallow the jump to the top.
    Suppress,
    /// Smooth-scroll to this selector if it matches an element.
    ScrollTo(&'a str),
}

pub fn anchor_action(href: Option<&str>) -> AnchorAction<'_> {
    match href {
        Some("#") => AnchorAction::Suppress,
        Some(href) if href.starts_with('#') => AnchorAction::ScrollTo(href),
        _ => AnchorAction::Follow,
    }
}

pub fn should_fade_in(element_top: f64, viewport_height: f64, offset: f64) -> bool {
    element_top < viewport_height - offset
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderState {
    pub scrolled: bool,
    pub hidden: bool,
}

impl HeaderState {
    pub fn transform(self, header_height: f64) -> String {
        if self.hidden {
            format!("translateY(-{header_height}px)")
        } else {
            "translateY(0)".to_string()
        }
    }
}

/// Direction-aware header rule. While the drawer is open the hidden flag
/// and the remembered offset are frozen.
#[derive(Clone, Debug, Default)]
pub struct HeaderTracker {
    last_scroll_top: f64,
    state: HeaderState,
}

impl HeaderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }

    pub fn update(
        &mut self,
        scroll_y: f64,
        header_height: f64,
        scrolled_threshold: f64,
        drawer_open: bool,
    ) -> HeaderState {
        self.state.scrolled = scroll_y > scrolled_threshold;

        if !drawer_open {
            self.state.hidden = scroll_y > self.last_scroll_top && scroll_y > header_height;
            self.last_scroll_top = scroll_y.max(0.0);
        }

        self.state
    }
}

/// Coalesces bursts of scroll events into a single frame callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// Returns `true` when the caller should schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn complete(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// One measurement of the page taken inside a frame callback.
#[derive(Clone, Debug, Default)]
pub struct ViewportSample {
    pub scroll_y: f64,
    pub header_height: f64,
    pub sections: SectionMap,
    pub nav_hrefs: Vec<Option<String>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportUpdate {
    pub active_section: Option<String>,
    /// `None` when there is nothing to highlight against.
    pub nav_active: Option<Vec<Option<bool>>>,
    pub header: HeaderState,
}

/// Owns all scroll-derived UI state for the page.
#[derive(Clone, Debug)]
pub struct ViewportSync {
    config: UiConfig,
    header: HeaderTracker,
    frame: FrameGate,
}

impl ViewportSync {
    pub fn new(config: UiConfig) -> Self {
        Self {
            config,
            header: HeaderTracker::new(),
            frame: FrameGate::default(),
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn header(&self) -> &HeaderTracker {
        &self.header
    }

    pub fn request_frame(&mut self) -> bool {
        self.frame.request()
    }

    pub fn frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    pub fn recompute(&mut self, sample: &ViewportSample, drawer_open: bool) -> ViewportUpdate {
        self.frame.complete();

        let active_section = sample
            .sections
            .active_section(sample.scroll_y, self.config.section_threshold_divisor)
            .map(str::to_string);

        let nav_active = (!sample.sections.is_empty() && !sample.nav_hrefs.is_empty())
            .then(|| nav_highlight(&sample.nav_hrefs, active_section.as_deref()));

        let header = self.header.update(
            sample.scroll_y,
            sample.header_height,
            self.config.scrolled_threshold_px,
            drawer_open,
        );

        ViewportUpdate {
            active_section,
            nav_active,
            header,
        }
    }
}
