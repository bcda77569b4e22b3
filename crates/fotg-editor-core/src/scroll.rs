//! Scroll synchronization between the editor and preview panes.
//!
//! A scroll on one pane is converted to a fraction of its scrollable range and
//! applied to the other pane. Moving a pane programmatically makes it emit a
//! scroll event of its own; the guard for that pane swallows exactly that one
//! event so it does not bounce back.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    Editor,
    Preview,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Self::Editor => Self::Preview,
            Self::Preview => Self::Editor,
        }
    }
}

/// Geometry of a scrollable element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Largest reachable `scroll_top`.
    pub fn range(&self) -> f64 {
        self.scroll_height - self.client_height
    }

    /// Current position as a fraction of the range, or `None` when the pane
    /// cannot scroll.
    pub fn fraction(&self) -> Option<f64> {
        let range = self.range();
        if range.is_nan() || range <= 0.0 {
            return None;
        }
        let fraction = self.scroll_top / range;
        fraction.is_finite().then(|| fraction.clamp(0.0, 1.0))
    }

    /// `scroll_top` that puts this pane at `fraction`.
    pub fn offset_for(&self, fraction: f64) -> Option<f64> {
        let range = self.range();
        if range.is_nan() || range <= 0.0 || !fraction.is_finite() {
            return None;
        }
        Some(fraction * range)
    }
}

/// A pane whose scroll position can be read and set.
pub trait ScrollPane {
    fn metrics(&self) -> ScrollMetrics;
    fn set_scroll_top(&mut self, top: f64);
}

impl<T: ScrollPane + ?Sized> ScrollPane for &mut T {
    fn metrics(&self) -> ScrollMetrics {
        (**self).metrics()
    }

    fn set_scroll_top(&mut self, top: f64) {
        (**self).set_scroll_top(top)
    }
}

/// What a scroll handler invocation did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOutcome {
    /// Sync is turned off.
    Disabled,
    /// The event was the echo of our own programmatic scroll.
    Echo,
    /// One of the panes has nothing to scroll.
    NotScrollable,
    /// The other pane is already in place.
    InPlace,
    /// The other pane was moved to `offset`.
    Synced { fraction: f64, offset: f64 },
}

/// Differences below a pixel do not produce a scroll event.
const MIN_SCROLL_DELTA: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollSync {
    enabled: bool,
    ignore_editor: bool,
    ignore_preview: bool,
}

impl Default for ScrollSync {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ScrollSync {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ignore_editor: false,
            ignore_preview: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turning sync off also forgets any pending echo.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.ignore_editor = false;
            self.ignore_preview = false;
        }
    }

    /// Flip sync on/off and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Whether the next scroll event from `pane` will be ignored.
    pub fn is_guarded(&self, pane: Pane) -> bool {
        match pane {
            Pane::Editor => self.ignore_editor,
            Pane::Preview => self.ignore_preview,
        }
    }

    fn guard_mut(&mut self, pane: Pane) -> &mut bool {
        match pane {
            Pane::Editor => &mut self.ignore_editor,
            Pane::Preview => &mut self.ignore_preview,
        }
    }

    /// Handle a scroll event from `pane`, mirroring it onto `target`.
    pub fn on_scroll<S, T>(&mut self, pane: Pane, source: &S, target: &mut T) -> ScrollOutcome
    where
        S: ScrollPane + ?Sized,
        T: ScrollPane + ?Sized,
    {
        if !self.enabled {
            return ScrollOutcome::Disabled;
        }
        if std::mem::take(self.guard_mut(pane)) {
            return ScrollOutcome::Echo;
        }

        let Some(fraction) = source.metrics().fraction() else {
            return ScrollOutcome::NotScrollable;
        };
        let target_metrics = target.metrics();
        let Some(offset) = target_metrics.offset_for(fraction) else {
            return ScrollOutcome::NotScrollable;
        };
        if (target_metrics.scroll_top - offset).abs() < MIN_SCROLL_DELTA {
            return ScrollOutcome::InPlace;
        }

        *self.guard_mut(pane) = false;
        *self.guard_mut(pane.other()) = true;
        target.set_scroll_top(offset);
        ScrollOutcome::Synced { fraction, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, Default)]
    struct FakePane {
        metrics: ScrollMetrics,
        writes: usize,
    }

    impl FakePane {
        fn new(scroll_height: f64, client_height: f64) -> Self {
            Self {
                metrics: ScrollMetrics {
                    scroll_top: 0.0,
                    scroll_height,
                    client_height,
                },
                writes: 0,
            }
        }

        fn at(mut self, top: f64) -> Self {
            self.metrics.scroll_top = top;
            self
        }
    }

    impl ScrollPane for FakePane {
        fn metrics(&self) -> ScrollMetrics {
            self.metrics
        }

        fn set_scroll_top(&mut self, top: f64) {
            self.metrics.scroll_top = top;
            self.writes += 1;
        }
    }

    #[test]
    fn test_half_way_maps_to_half_way_without_echo() {
        let mut sync = ScrollSync::default();
        let mut editor = FakePane::new(1000.0, 500.0).at(250.0);
        let mut preview = FakePane::new(2000.0, 400.0);

        let outcome = sync.on_scroll(Pane::Editor, &editor, &mut preview);
        assert_eq!(
            outcome,
            ScrollOutcome::Synced {
                fraction: 0.5,
                offset: 800.0
            }
        );
        assert_eq!(preview.metrics.scroll_top, 800.0);
        assert!(sync.is_guarded(Pane::Preview));
        assert!(!sync.is_guarded(Pane::Editor));

        // the preview now reports its programmatic scroll
        let echo = sync.on_scroll(Pane::Preview, &preview, &mut editor);
        assert_eq!(echo, ScrollOutcome::Echo);
        assert_eq!(editor.writes, 0);
        assert_eq!(editor.metrics.scroll_top, 250.0);

        // a real user scroll on the preview syncs back
        preview.metrics.scroll_top = 1600.0;
        let back = sync.on_scroll(Pane::Preview, &preview, &mut editor);
        assert!(matches!(back, ScrollOutcome::Synced { .. }));
        assert_eq!(editor.metrics.scroll_top, 500.0);
    }

    #[test]
    fn test_non_scrollable_panes_are_left_alone() {
        let mut sync = ScrollSync::default();
        let short = FakePane::new(300.0, 400.0);
        let mut tall = FakePane::new(2000.0, 400.0).at(10.0);
        assert_eq!(
            sync.on_scroll(Pane::Editor, &short, &mut tall),
            ScrollOutcome::NotScrollable
        );
        assert_eq!(tall.writes, 0);

        let mut short = short;
        assert_eq!(
            sync.on_scroll(Pane::Preview, &tall, &mut short),
            ScrollOutcome::NotScrollable
        );
        assert_eq!(short.writes, 0);

        // zero-height panes
        let mut empty = FakePane::default();
        assert_eq!(
            sync.on_scroll(Pane::Editor, &FakePane::default(), &mut empty),
            ScrollOutcome::NotScrollable
        );
        assert!(!sync.is_guarded(Pane::Editor));
        assert!(!sync.is_guarded(Pane::Preview));
    }

    #[test]
    fn test_toggle_disables_and_resumes() {
        let mut sync = ScrollSync::default();
        let editor = FakePane::new(1000.0, 500.0).at(500.0);
        let mut preview = FakePane::new(1000.0, 500.0);

        assert!(!sync.toggle());
        assert_eq!(
            sync.on_scroll(Pane::Editor, &editor, &mut preview),
            ScrollOutcome::Disabled
        );
        assert_eq!(preview.writes, 0);

        assert!(sync.toggle());
        assert!(matches!(
            sync.on_scroll(Pane::Editor, &editor, &mut preview),
            ScrollOutcome::Synced { .. }
        ));
        assert_eq!(preview.metrics.scroll_top, 500.0);
    }

    #[test]
    fn test_disabling_clears_guards() {
        let mut sync = ScrollSync::default();
        let editor = FakePane::new(1000.0, 500.0).at(500.0);
        let mut preview = FakePane::new(1000.0, 500.0);
        sync.on_scroll(Pane::Editor, &editor, &mut preview);
        assert!(sync.is_guarded(Pane::Preview));
        sync.set_enabled(false);
        assert!(!sync.is_guarded(Pane::Preview));
    }

    #[test]
    fn test_target_already_in_place_sets_no_guard() {
        let mut sync = ScrollSync::default();
        let editor = FakePane::new(1000.0, 500.0).at(250.0);
        let mut preview = FakePane::new(1000.0, 500.0).at(250.0);
        assert_eq!(
            sync.on_scroll(Pane::Editor, &editor, &mut preview),
            ScrollOutcome::InPlace
        );
        assert_eq!(preview.writes, 0);
        assert!(!sync.is_guarded(Pane::Preview));
    }
}
