//! Tabbed content panel with a mobile accordion.
//!
//! The panel shows the same tabs twice: as a tab list with one active panel
//! for wide screens, and as an accordion of `<details>` sections for narrow
//! ones. Tab images are the main consumer of the resolver here: the desktop
//! panel shows its image at a third of the row (`third` preset), the accordion
//! at full width (`full`).
//!
//! Panels are defined in TOML:
//!
//! ```toml
//! [[tabs]]
//! title = "Design"
//! body = "We start with **research**."
//!
//! [tabs.image]
//! src = "tabs/design.jpg"
//! width = 1200
//! height = 900
//! alt = "Sketches on a desk"
//! ```
//!
//! Bodies are markdown. Transition effects are left to the site's CSS.

use crate::config::ImagesConfig;
use crate::preset::Preset;
use crate::render::ResponsiveImage;
use crate::resolver::{ImageDescriptor, ResolveError, ResolveRequest, Resolver};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("tab panel has no tabs")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TabImage {
    pub src: String,
    pub width: u32,
    #[serde(default)]
    pub height: Option<u32>,
    /// Defaults to the tab title.
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TabItem {
    pub title: String,
    /// Markdown.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image: Option<TabImage>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TabsFile {
    tabs: Vec<TabItem>,
}

/// A non-empty list of tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPanel {
    tabs: Vec<TabItem>,
}

impl TabPanel {
    pub fn new(tabs: Vec<TabItem>) -> Result<Self, TabsError> {
        if tabs.is_empty() {
            return Err(TabsError::Empty);
        }
        Ok(Self { tabs })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, TabsError> {
        let file: TabsFile = toml::from_str(content)?;
        Self::new(file.tabs)
    }

    pub fn load(path: &Path) -> Result<Self, TabsError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn tabs(&self) -> &[TabItem] {
        &self.tabs
    }

    /// Initial view state: first tab active, first section open.
    pub fn initial_state(&self) -> TabState {
        TabState::new(self.tabs.len())
    }
}

/// Which tab is active and which accordion section is open.
///
/// Exactly one tab is active at any time. Independently, zero or one
/// accordion section is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabState {
    count: usize,
    active: usize,
    open_section: Option<usize>,
}

impl TabState {
    /// State for `count` tabs. Outside the crate, states come from
    /// [`TabPanel::initial_state`], which guarantees a non-zero count.
    pub(crate) fn new(count: usize) -> Self {
        Self {
            count,
            active: 0,
            open_section: (count > 0).then_some(0),
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn open_section(&self) -> Option<usize> {
        self.open_section
    }

    /// Activate tab `index`. Returns false when it was already active or out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index == self.active || index >= self.count {
            return false;
        }
        self.active = index;
        true
    }

    /// Open section `index`, or close it if it is the open one.
    ///
    /// Returns false (and changes nothing) when `index` is out of range.
    pub fn toggle_section(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.open_section = if self.open_section == Some(index) {
            None
        } else {
            Some(index)
        };
        true
    }
}

/// Rendered panel plus any image resolutions that fell back.
#[derive(Debug)]
pub struct RenderedPanel {
    pub markup: Markup,
    /// `(tab title, error)` for every tab image that needed a fallback.
    pub errors: Vec<(String, ResolveError)>,
}

fn markdown_to_html(body: &str) -> String {
    let parser = Parser::new(body);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

pub fn render_tab_panel(
    panel: &TabPanel,
    state: &TabState,
    resolver: &Resolver,
    images: &ImagesConfig,
) -> RenderedPanel {
    let mut errors = Vec::new();
    let mut tab_image = |tab: &TabItem, preset: Preset| -> Option<Markup> {
        let img = tab.image.as_ref()?;
        let descriptor = ImageDescriptor {
            width: img.width,
            height: img.height,
        };
        let outcome =
            resolver.resolve_or_fallback(&descriptor, &ResolveRequest::new().preset(preset.name()));
        errors.extend(outcome.errors.into_iter().map(|e| (tab.title.clone(), e)));
        let alt = img.alt.as_deref().unwrap_or(&tab.title);
        let responsive = ResponsiveImage::new(
            &img.src,
            alt,
            descriptor,
            &outcome.resolution,
            &images.url_pattern,
            images.loading,
        );
        Some(responsive.render())
    };

    // A state built for a different panel may point past the last tab
    let active_index = if state.active() < panel.tabs.len() {
        state.active()
    } else {
        0
    };
    let active = &panel.tabs[active_index];
    let active_image = tab_image(active, Preset::Third);
    let sections: Vec<(usize, &TabItem, Option<Markup>)> = panel
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| (i, tab, tab_image(tab, Preset::Full)))
        .collect();

    let markup = html! {
        div.tab-panel {
            div.tabs-desktop {
                div.tab-list role="tablist" {
                    @for (i, tab) in panel.tabs.iter().enumerate() {
                        button.tab.active[i == active_index]
                            type="button"
                            role="tab"
                            id=(format!("tab-{i}"))
                            aria-selected=(if i == active_index { "true" } else { "false" })
                            aria-controls=(format!("tab-panel-{i}")) {
                            (tab.title)
                        }
                    }
                }
                div.tab-content
                    role="tabpanel"
                    id=(format!("tab-panel-{active_index}"))
                    aria-labelledby=(format!("tab-{active_index}")) {
                    @if let Some(image) = &active_image {
                        div.tab-image { (image) }
                    }
                    div.tab-body { (PreEscaped(markdown_to_html(&active.body))) }
                }
            }
            div.tabs-mobile {
                @for (i, tab, image) in &sections {
                    details.accordion-section open[state.open_section() == Some(*i)] {
                        summary { (tab.title) }
                        div.accordion-body {
                            @if let Some(image) = image {
                                div.tab-image { (image) }
                            }
                            (PreEscaped(markdown_to_html(&tab.body)))
                        }
                    }
                }
            }
        }
    };

    RenderedPanel { markup, errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANEL: &str = r#"
[[tabs]]
title = "Design"
body = "We start with **research**."

[tabs.image]
src = "tabs/design.jpg"
width = 1200
height = 900

[[tabs]]
title = "Build"
body = "Then we *ship*."
"#;

    fn render(panel: &TabPanel, state: &TabState) -> String {
        render_tab_panel(panel, state, &Resolver::default(), &ImagesConfig::default())
            .markup
            .into_string()
    }

    #[test]
    fn parse_panel_from_toml() {
        let panel = TabPanel::from_toml_str(PANEL).unwrap();
        assert_eq!(panel.tabs().len(), 2);
        assert_eq!(panel.tabs()[0].image.as_ref().unwrap().width, 1200);
        assert!(panel.tabs()[1].image.is_none());
    }

    #[test]
    fn empty_panel_rejected() {
        assert!(matches!(TabPanel::new(vec![]), Err(TabsError::Empty)));
        assert!(matches!(
            TabPanel::from_toml_str("tabs = []"),
            Err(TabsError::Empty)
        ));
    }

    #[test]
    fn unknown_fields_rejected() {
        let toml = "[[tabs]]\ntitle = \"A\"\ncolour = \"red\"\n";
        assert!(matches!(
            TabPanel::from_toml_str(toml),
            Err(TabsError::Toml(_))
        ));
    }

    #[test]
    fn initial_state() {
        let state = TabState::new(3);
        assert_eq!(state.active(), 0);
        assert_eq!(state.open_section(), Some(0));
    }

    #[test]
    fn select_changes_active_tab() {
        let mut state = TabState::new(3);
        assert!(state.select(2));
        assert_eq!(state.active(), 2);
        // Already active
        assert!(!state.select(2));
        // Out of range
        assert!(!state.select(3));
        assert_eq!(state.active(), 2);
    }

    #[test]
    fn select_leaves_accordion_alone() {
        let mut state = TabState::new(3);
        state.select(1);
        assert_eq!(state.open_section(), Some(0));
    }

    #[test]
    fn toggle_section_opens_and_closes() {
        let mut state = TabState::new(3);
        assert!(state.toggle_section(0));
        assert_eq!(state.open_section(), None);
        assert!(state.toggle_section(2));
        assert_eq!(state.open_section(), Some(2));
        assert!(state.toggle_section(1));
        assert_eq!(state.open_section(), Some(1));
        assert!(!state.toggle_section(5));
        assert_eq!(state.open_section(), Some(1));
    }

    #[test]
    fn render_marks_active_tab() {
        let panel = TabPanel::from_toml_str(PANEL).unwrap();
        let mut state = panel.initial_state();
        state.select(1);
        let html = render(&panel, &state);
        assert!(html.contains(r#"id="tab-1" aria-selected="true""#));
        assert!(html.contains(r#"id="tab-0" aria-selected="false""#));
        assert!(html.contains(r#"id="tab-panel-1""#));
        assert!(html.contains("<em>ship</em>"));
    }

    #[test]
    fn render_with_state_from_larger_panel_falls_back_to_first_tab() {
        let panel = TabPanel::from_toml_str(PANEL).unwrap();
        let mut state = TabState::new(5);
        assert!(state.select(4));
        assert!(state.toggle_section(3));
        let html = render(&panel, &state);
        assert!(html.contains(r#"id="tab-0" aria-selected="true""#));
        assert!(html.contains(r#"id="tab-1" aria-selected="false""#));
        assert!(html.contains(r#"id="tab-panel-0""#));
        assert!(html.contains("<strong>research</strong>"));
        assert_eq!(html.matches(" open").count(), 0);
    }

    #[test]
    fn render_desktop_image_uses_third_preset() {
        let panel = TabPanel::from_toml_str(PANEL).unwrap();
        let html = render(&panel, &panel.initial_state());
        assert!(html.contains("(min-width: 1024px) 33vw"));
        assert!(html.contains("design-1024.jpg 1024w"));
        assert!(html.contains(r#"alt="Design""#));
    }

    #[test]
    fn render_accordion_open_section() {
        let panel = TabPanel::from_toml_str(PANEL).unwrap();
        let mut state = panel.initial_state();
        state.toggle_section(1);
        let html = render(&panel, &state);
        assert_eq!(html.matches("<details").count(), 2);
        assert_eq!(html.matches(" open").count(), 1);
        let open_at = html.find(" open").unwrap();
        let build_at = html.rfind("<summary>Build</summary>").unwrap();
        assert!(open_at < build_at);
        assert!(html[..open_at].contains("<summary>Design</summary>"));
    }

    #[test]
    fn render_reports_zero_width_image() {
        let toml = "[[tabs]]\ntitle = \"A\"\n[tabs.image]\nsrc = \"a.jpg\"\nwidth = 0\n";
        let panel = TabPanel::from_toml_str(toml).unwrap();
        let rendered = render_tab_panel(
            &panel,
            &panel.initial_state(),
            &Resolver::default(),
            &ImagesConfig::default(),
        );
        // Desktop and accordion each resolve the image once
        assert_eq!(rendered.errors.len(), 2);
        assert_eq!(rendered.errors[0], ("A".to_string(), ResolveError::InvalidDimension));
        assert!(rendered.markup.into_string().contains(r#"src="a.jpg""#));
    }
}
