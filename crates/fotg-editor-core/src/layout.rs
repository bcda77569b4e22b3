//! Page layout state: view mode, pane resizing and the mobile tab layout.

use crate::config::ResizeConfig;

/// Which panes the main container shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    Editor,
    #[default]
    Split,
    Preview,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [Self::Editor, Self::Split, Self::Preview];

    /// Class added to the main container. Split mode uses none.
    pub fn container_class(self) -> Option<&'static str> {
        match self {
            Self::Editor => Some("view-editor"),
            Self::Split => None,
            Self::Preview => Some("view-preview"),
        }
    }

    /// Every class this switcher may add, for removal before switching.
    pub fn all_container_classes() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().filter_map(Self::container_class)
    }

    pub fn button_id(self) -> &'static str {
        match self {
            Self::Editor => "btn-view-editor",
            Self::Split => "btn-view-split",
            Self::Preview => "btn-view-preview",
        }
    }
}

/// Tab selected in the narrow-screen layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MobileTab {
    #[default]
    Editor,
    Preview,
}

impl MobileTab {
    pub fn tab_id(self) -> &'static str {
        match self {
            Self::Editor => "tab-editor",
            Self::Preview => "tab-preview",
        }
    }
}

/// Inline `display` value for a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneDisplay {
    /// No inline style; the stylesheet decides.
    Stylesheet,
    Flex,
    Hidden,
}

impl PaneDisplay {
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Stylesheet => "",
            Self::Flex => "flex",
            Self::Hidden => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneVisibility {
    pub editor: PaneDisplay,
    pub preview: PaneDisplay,
}

/// Pane visibility for a window `window_width` pixels wide.
///
/// At or below `breakpoint` only the active tab's pane is shown.
pub fn pane_visibility(tab: MobileTab, window_width: f64, breakpoint: f64) -> PaneVisibility {
    if window_width > breakpoint {
        return PaneVisibility {
            editor: PaneDisplay::Stylesheet,
            preview: PaneDisplay::Stylesheet,
        };
    }
    match tab {
        MobileTab::Editor => PaneVisibility {
            editor: PaneDisplay::Flex,
            preview: PaneDisplay::Hidden,
        },
        MobileTab::Preview => PaneVisibility {
            editor: PaneDisplay::Hidden,
            preview: PaneDisplay::Flex,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
}

impl PointerKind {
    /// Mouse drags suspend pointer events on both panes while active.
    pub fn suspends_panes(self) -> bool {
        matches!(self, Self::Mouse)
    }
}

/// Clamp a dragged editor width to `[min_width, container_width - min_width]`.
///
/// The lower bound is applied first, so in a container narrower than twice the
/// minimum the upper bound wins.
pub fn clamp_pane_width(pointer_x: f64, container_width: f64, min_width: f64) -> f64 {
    let max_width = container_width - min_width;
    let width = if pointer_x < min_width { min_width } else { pointer_x };
    if width > max_width { max_width } else { width }
}

/// CSS `flex` shorthand pinning the editor pane to `width` pixels.
pub fn flex_basis(width: f64) -> String {
    format!("0 0 {width}px")
}

/// Drag state of the splitter between the panes.
#[derive(Debug, Clone, Default)]
pub struct PaneResizer {
    config: ResizeConfig,
    active: Option<PointerKind>,
}

impl PaneResizer {
    pub fn new(config: ResizeConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    pub fn start(&mut self, kind: PointerKind) {
        self.active = Some(kind);
    }

    pub fn active(&self) -> Option<PointerKind> {
        self.active
    }

    /// New editor width for a pointer at `pointer_x`, or `None` if no drag is
    /// in progress.
    pub fn drag(&self, pointer_x: f64, container_width: f64) -> Option<f64> {
        let min_width = match self.active? {
            PointerKind::Mouse => self.config.mouse_min_width,
            PointerKind::Touch => self.config.touch_min_width,
        };
        Some(clamp_pane_width(pointer_x, container_width, min_width))
    }

    /// End the drag. Returns the pointer kind if one was in progress.
    pub fn finish(&mut self) -> Option<PointerKind> {
        self.active.take()
    }
}

/// Parse a persisted pane width, ignoring anything unusable.
pub fn parse_pane_width(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_classes() {
        assert_eq!(ViewMode::default(), ViewMode::Split);
        assert_eq!(ViewMode::Split.container_class(), None);
        assert_eq!(
            ViewMode::all_container_classes().collect::<Vec<_>>(),
            vec!["view-editor", "view-preview"]
        );
    }

    #[test]
    fn test_mobile_visibility() {
        let wide = pane_visibility(MobileTab::Preview, 1024.0, 768.0);
        assert_eq!(wide.editor, PaneDisplay::Stylesheet);
        assert_eq!(wide.preview.css_value(), "");

        let narrow = pane_visibility(MobileTab::Preview, 768.0, 768.0);
        assert_eq!(narrow.editor, PaneDisplay::Hidden);
        assert_eq!(narrow.preview, PaneDisplay::Flex);

        let narrow = pane_visibility(MobileTab::Editor, 400.0, 768.0);
        assert_eq!(narrow.editor.css_value(), "flex");
        assert_eq!(narrow.preview.css_value(), "none");
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp_pane_width(50.0, 1000.0, 200.0), 200.0);
        assert_eq!(clamp_pane_width(950.0, 1000.0, 200.0), 800.0);
        assert_eq!(clamp_pane_width(412.5, 1000.0, 200.0), 412.5);
        // container too narrow for both minimums
        assert_eq!(clamp_pane_width(50.0, 300.0, 200.0), 100.0);
    }

    #[test]
    fn test_resizer_uses_pointer_minimum() {
        let mut resizer = PaneResizer::new(ResizeConfig::default());
        assert_eq!(resizer.drag(10.0, 1000.0), None);

        resizer.start(PointerKind::Touch);
        assert_eq!(resizer.drag(10.0, 1000.0), Some(100.0));
        assert_eq!(resizer.finish(), Some(PointerKind::Touch));

        resizer.start(PointerKind::Mouse);
        assert_eq!(resizer.drag(10.0, 1000.0), Some(200.0));
        assert_eq!(resizer.finish(), Some(PointerKind::Mouse));
        assert_eq!(resizer.finish(), None);
    }

    #[test]
    fn test_flex_basis_and_parse() {
        assert_eq!(flex_basis(412.0), "0 0 412px");
        assert_eq!(flex_basis(412.5), "0 0 412.5px");
        assert_eq!(parse_pane_width("412.5"), Some(412.5));
        assert_eq!(parse_pane_width("0"), None);
        assert_eq!(parse_pane_width("wide"), None);
    }
}
