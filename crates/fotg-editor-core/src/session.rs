//! Per-page editor state.
//!
//! One `EditorSession` exists for the lifetime of the page and owns all of the
//! mutable state the handlers share: the document mirror, the pending render,
//! the scroll guards, the store and the preferences. Platform layers call into
//! it from their event handlers and apply the returned values to the page.

use std::time::Duration;

use fotg_renderer::export::{html_download, markdown_download};
use fotg_renderer::{
    DiagramRenderer, Download, PreviewSurface, RenderPipeline, RenderReport, Theme,
};
use web_time::Instant;

use crate::actions::FormatAction;
use crate::config::EditorConfig;
use crate::debounce::RenderDebouncer;
use crate::document::EditorDocument;
use crate::error::EditorError;
use crate::layout::{
    MobileTab, PaneResizer, PaneVisibility, PointerKind, ViewMode, parse_pane_width,
    pane_visibility,
};
use crate::scroll::{Pane, ScrollOutcome, ScrollPane, ScrollSync};
use crate::storage::KeyValueStore;
use crate::types::Selection;

/// Text and selection to push back into the editing widget after a format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    pub text: String,
    pub selection: Selection,
}

pub struct EditorSession<S: KeyValueStore> {
    config: EditorConfig,
    store: S,
    document: EditorDocument,
    debouncer: RenderDebouncer,
    scroll: ScrollSync,
    resizer: PaneResizer,
    theme: Theme,
    view_mode: ViewMode,
    mobile_tab: MobileTab,
    pane_width: Option<f64>,
}

impl<S: KeyValueStore> EditorSession<S> {
    /// Restore the saved document and preferences from `store`.
    ///
    /// Missing values fall back to the placeholder text and the system theme.
    /// A theme resolved from the system is not written back until toggled.
    pub fn open(store: S, config: EditorConfig, system_prefers_dark: bool) -> Self {
        let text = store
            .get(&config.keys.content)
            .map(normalize_newlines)
            .unwrap_or_else(|| config.placeholder.clone());
        let theme = store
            .get(&config.keys.theme)
            .and_then(|saved| match saved.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(err) => {
                    tracing::debug!(error = %err, "ignoring saved theme");
                    None
                }
            })
            .unwrap_or_else(|| Theme::from_system(system_prefers_dark));
        let pane_width = store
            .get(&config.keys.pane_width)
            .as_deref()
            .and_then(parse_pane_width);

        tracing::debug!(chars = text.chars().count(), %theme, ?pane_width, "session opened");

        Self {
            debouncer: RenderDebouncer::new(config.debounce_delay()),
            scroll: ScrollSync::new(config.sync_scroll),
            resizer: PaneResizer::new(config.resize),
            document: EditorDocument::from_text(&text),
            theme,
            view_mode: ViewMode::default(),
            mobile_tab: MobileTab::default(),
            pane_width,
            store,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn document(&self) -> &EditorDocument {
        &self.document
    }

    /// Current document text.
    pub fn text(&self) -> String {
        self.document.content_string()
    }

    /// The widget's text changed: persist it, then restart the render delay.
    ///
    /// Line endings are normalized to `\n`, as a textarea reports them, so
    /// widget offsets stay valid. The render is scheduled even when persisting
    /// fails; the storage error is returned afterwards.
    pub fn document_changed(&mut self, text: String, now: Instant) -> Result<Duration, EditorError> {
        let text = normalize_newlines(text);
        let persisted = self.store.set(&self.config.keys.content, &text);
        self.document.replace_all(&text);
        let delay = self.debouncer.schedule(text, now);
        persisted?;
        Ok(delay)
    }

    /// Record the widget's current selections (char offsets).
    pub fn set_selections(&mut self, selections: Vec<Selection>, main: usize) {
        self.document.set_selections(selections, main);
    }

    /// Wrap every selection with `action`'s markers.
    ///
    /// This is a document change like any other: it persists and schedules
    /// a render. A failed write is logged; the widget still gets the new text.
    pub fn apply_format(&mut self, action: FormatAction, now: Instant) -> FormatOutcome {
        let selection = self.document.apply_format(action);
        let text = self.document.content_string();
        tracing::debug!(?action, ?selection, "format applied");
        if let Err(err) = self.document_changed(text.clone(), now) {
            tracing::warn!(error = %err, "formatted document not persisted");
        }
        FormatOutcome { text, selection }
    }

    /// Replace the document with an imported file's contents.
    pub fn import(&mut self, contents: String, now: Instant) -> Result<Duration, EditorError> {
        tracing::info!(chars = contents.chars().count(), "document imported");
        self.document_changed(contents, now)
    }

    /// Clear the document.
    pub fn reset(&mut self, now: Instant) -> Result<Duration, EditorError> {
        tracing::info!("document reset");
        self.document_changed(String::new(), now)
    }

    pub fn debouncer(&self) -> &RenderDebouncer {
        &self.debouncer
    }

    /// Text to render, once the quiet period has passed.
    pub fn take_due_render(&mut self, now: Instant) -> Option<String> {
        self.debouncer.take_if_ready(now)
    }

    /// Delay until the pending render is due, `None` when idle.
    pub fn render_delay(&self, now: Instant) -> Option<Duration> {
        self.debouncer.sleep_duration(now)
    }

    /// Render the pending text if it is due.
    pub async fn render_due<P, D>(
        &mut self,
        now: Instant,
        pipeline: &RenderPipeline,
        surface: &mut P,
        diagrams: &D,
    ) -> Option<RenderReport>
    where
        P: PreviewSurface,
        D: DiagramRenderer,
    {
        let text = self.take_due_render(now)?;
        Some(pipeline.render(&text, self.theme, surface, diagrams).await)
    }

    /// Render the current text right away, leaving any pending render alone.
    pub async fn render_now<P, D>(&self, pipeline: &RenderPipeline, surface: &mut P, diagrams: &D) -> RenderReport
    where
        P: PreviewSurface,
        D: DiagramRenderer,
    {
        pipeline.render(&self.text(), self.theme, surface, diagrams).await
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch and persist the theme.
    ///
    /// The new theme is in effect even if persisting it fails.
    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme, EditorError> {
        self.theme = theme;
        tracing::debug!(%theme, "theme set");
        self.store.set(&self.config.keys.theme, theme.as_str())?;
        Ok(theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, EditorError> {
        self.set_theme(self.theme.toggled())
    }

    pub fn scroll_sync(&self) -> &ScrollSync {
        &self.scroll
    }

    /// Flip scroll sync, returning the new state.
    pub fn toggle_scroll_sync(&mut self) -> bool {
        let enabled = self.scroll.toggle();
        tracing::debug!(enabled, "scroll sync toggled");
        enabled
    }

    /// Mirror a scroll of `pane` onto `target`.
    pub fn on_scroll<A, B>(&mut self, pane: Pane, source: &A, target: &mut B) -> ScrollOutcome
    where
        A: ScrollPane + ?Sized,
        B: ScrollPane + ?Sized,
    {
        self.scroll.on_scroll(pane, source, target)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn mobile_tab(&self) -> MobileTab {
        self.mobile_tab
    }

    pub fn select_tab(&mut self, tab: MobileTab) {
        self.mobile_tab = tab;
    }

    pub fn pane_visibility(&self, window_width: f64) -> PaneVisibility {
        pane_visibility(self.mobile_tab, window_width, self.config.mobile_breakpoint)
    }

    /// Editor pane width restored from the store.
    pub fn pane_width(&self) -> Option<f64> {
        self.pane_width
    }

    pub fn start_resize(&mut self, kind: PointerKind) {
        self.resizer.start(kind);
    }

    pub fn resizing(&self) -> Option<PointerKind> {
        self.resizer.active()
    }

    /// Width for the editor pane while dragging, `None` when not dragging.
    pub fn drag_resize(&self, pointer_x: f64, container_width: f64) -> Option<f64> {
        self.resizer.drag(pointer_x, container_width)
    }

    /// End a drag and persist the pane's final rendered width.
    ///
    /// Returns the pointer kind that was dragging, `None` if no drag was active.
    pub fn finish_resize(&mut self, final_width: f64) -> Result<Option<PointerKind>, EditorError> {
        let Some(kind) = self.resizer.finish() else {
            return Ok(None);
        };
        self.pane_width = Some(final_width);
        self.store
            .set(&self.config.keys.pane_width, &final_width.to_string())?;
        Ok(Some(kind))
    }

    /// Standalone HTML page around the rendered preview markup.
    pub fn export_html(&self, preview_html: &str) -> Download {
        html_download(preview_html, &self.config.export)
    }

    /// The raw document as a `.md` file.
    pub fn save_markdown(&self) -> Download {
        markdown_download(&self.text())
    }
}

/// `\r\n` and lone `\r` become `\n`.
fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
