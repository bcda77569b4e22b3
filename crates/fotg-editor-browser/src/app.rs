//! Page wiring: binds one `EditorSession` to the page's elements.
//!
//! All listeners hold a `Weak<App>`; the mounted app itself lives in a
//! thread-local for the lifetime of the page. No `RefCell` borrow of the
//! session is held across an `.await`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use fotg_editor_core::fotg_renderer::{RenderPipeline, SyntaxCss};
use fotg_editor_core::layout::flex_basis;
use fotg_editor_core::{
    EditorCommand, EditorError, EditorSession, FormatAction, Key, KeyCombo, KeydownResult,
    MobileTab, Modifiers, Pane, PointerKind, ViewMode,
};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, Event, EventTarget, HtmlDialogElement, HtmlInputElement, KeyboardEvent, MouseEvent,
    TouchEvent,
};
use web_time::Instant;

use crate::dom::{by_id, set_class, set_style};
use crate::download::{IMPORT_ACCEPT, offer_download, read_file_text};
use crate::mermaid::MermaidRenderer;
use crate::preview::DomPreview;
use crate::scroll::DomPane;
use crate::storage::LocalStore;
use crate::theme::{self, THEME_CHANGED_EVENT};
use crate::widget::TextareaWidget;

pub const PREVIEW_CONTAINER_ID: &str = "preview-container";
pub const WORD_COUNT_ID: &str = "word-count";

thread_local! {
    static MOUNTED: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

pub struct App {
    session: RefCell<EditorSession<LocalStore>>,
    pipeline: RenderPipeline,
    mermaid: MermaidRenderer,
    syntax_css: Option<SyntaxCss>,
    widget: TextareaWidget,
    preview: DomPreview,
    main_content: Option<Element>,
    editor_pane: Option<Element>,
    preview_pane: Option<Element>,
    render_timer: RefCell<Option<Timeout>>,
    file_listener: RefCell<Option<EventListener>>,
    listeners: RefCell<Vec<EventListener>>,
}

/// Build the editor on the current page and keep it alive.
pub fn mount() -> Result<Rc<App>, JsValue> {
    let config = crate::config::load();
    let syntax_css = SyntaxCss::generate(&config.syntax_themes.light, &config.syntax_themes.dark)
        .inspect_err(|err| tracing::warn!(error = %err, "code highlighting css unavailable"))
        .ok();
    let session = EditorSession::open(LocalStore, config, theme::system_prefers_dark());

    let widget = TextareaWidget::mount(&session.text())
        .ok_or_else(|| JsValue::from_str("missing #editor-container"))?;
    let container = by_id::<Element>(PREVIEW_CONTAINER_ID)
        .ok_or_else(|| JsValue::from_str("missing #preview-container"))?;

    let app = Rc::new(App {
        session: RefCell::new(session),
        pipeline: RenderPipeline::new(),
        mermaid: MermaidRenderer,
        syntax_css,
        widget,
        preview: DomPreview::new(container, by_id(WORD_COUNT_ID)),
        main_content: by_id("main-content"),
        editor_pane: by_id("editor-pane"),
        preview_pane: by_id("preview-pane"),
        render_timer: RefCell::new(None),
        file_listener: RefCell::new(None),
        listeners: RefCell::new(Vec::new()),
    });

    app.restore_layout();
    app.show_theme();
    app.bind_document_events();
    app.bind_scroll_sync();
    app.bind_toolbar();
    app.bind_view_modes();
    app.bind_theme_toggle();
    app.bind_resizer();
    app.bind_mobile_tabs();
    app.bind_reset_dialog();
    app.bind_files();
    app.render_now();

    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(Rc::clone(&app)));
    tracing::info!("editor mounted");
    Ok(app)
}

/// Drop the mounted app and all of its listeners.
pub fn unmount() {
    MOUNTED.with(|mounted| mounted.borrow_mut().take());
}

impl App {
    /// Read access to the session, for tests.
    pub fn with_session<R>(&self, f: impl FnOnce(&EditorSession<LocalStore>) -> R) -> R {
        f(&self.session.borrow())
    }

    pub fn widget(&self) -> &TextareaWidget {
        &self.widget
    }

    pub fn preview(&self) -> &DomPreview {
        &self.preview
    }

    fn listen<F>(self: &Rc<Self>, target: &EventTarget, event: &'static str, handler: F)
    where
        F: Fn(&Rc<App>, &Event) + 'static,
    {
        let weak = Rc::downgrade(self);
        let listener = EventListener::new(target, event, move |e| {
            if let Some(app) = weak.upgrade() {
                handler(&app, e);
            }
        });
        self.listeners.borrow_mut().push(listener);
    }

    /// Like `listen`, but the handler may call `prevent_default`.
    fn listen_active<F>(self: &Rc<Self>, target: &EventTarget, event: &'static str, handler: F)
    where
        F: Fn(&Rc<App>, &Event) + 'static,
    {
        let weak = Rc::downgrade(self);
        let listener = EventListener::new_with_options(
            target,
            event,
            EventListenerOptions::enable_prevent_default(),
            move |e| {
                if let Some(app) = weak.upgrade() {
                    handler(&app, e);
                }
            },
        );
        self.listeners.borrow_mut().push(listener);
    }

    fn on_click<F>(self: &Rc<Self>, id: &str, handler: F)
    where
        F: Fn(&Rc<App>) + 'static,
    {
        if let Some(button) = by_id::<Element>(id) {
            self.listen(&button, "click", move |app, _| handler(app));
        }
    }

    // --- rendering ---

    fn render_now(self: &Rc<Self>) {
        let text = self.session.borrow().text();
        self.spawn_render(text);
    }

    fn spawn_render(self: &Rc<Self>, text: String) {
        let theme = self.session.borrow().theme();
        let app = Rc::clone(self);
        spawn_local(async move {
            let mut surface = app.preview.clone();
            let report = app
                .pipeline
                .render(&text, theme, &mut surface, &app.mermaid)
                .await;
            tracing::debug!(
                pass = report.pass,
                diagrams = report.diagrams.rendered,
                failed = report.diagrams.failed.len(),
                "preview rendered"
            );
        });
    }

    /// (Re)arm the render timer for the session's pending render.
    ///
    /// Replacing the stored `Timeout` clears the previous one.
    fn arm_render_timer(self: &Rc<Self>, now: Instant) {
        let Some(delay) = self.session.borrow().render_delay(now) else {
            return;
        };
        let weak = Rc::downgrade(self);
        let timeout = Timeout::new(millis(delay), move || {
            if let Some(app) = weak.upgrade() {
                app.on_render_timer();
            }
        });
        *self.render_timer.borrow_mut() = Some(timeout);
    }

    fn on_render_timer(self: &Rc<Self>) {
        let now = Instant::now();
        let due = self.session.borrow_mut().take_due_render(now);
        match due {
            Some(text) => {
                self.render_timer.borrow_mut().take();
                self.spawn_render(text);
            }
            // fired early
            None => self.arm_render_timer(now),
        }
    }

    // --- document ---

    fn on_input(self: &Rc<Self>) {
        let now = Instant::now();
        let text = self.widget.value();
        let changed = self.session.borrow_mut().document_changed(text, now);
        if let Err(err) = changed {
            tracing::warn!(error = %err, "document not persisted");
        }
        self.arm_render_timer(now);
    }

    fn apply_format(self: &Rc<Self>, action: FormatAction) {
        let now = Instant::now();
        let mut session = self.session.borrow_mut();
        let selection = self.widget.selection(session.document());
        session.set_selections(vec![selection], 0);
        let outcome = session.apply_format(action, now);
        self.widget
            .set_contents(&outcome.text, outcome.selection, session.document());
        drop(session);
        self.arm_render_timer(now);
    }

    fn run_command(self: &Rc<Self>, command: EditorCommand) {
        match command {
            EditorCommand::Format(action) => self.apply_format(action),
            EditorCommand::SaveMarkdown => self.save_markdown(),
        }
    }

    fn after_replace(self: &Rc<Self>, now: Instant, result: Result<Duration, EditorError>) {
        if let Err(err) = result {
            tracing::warn!(error = %err, "document not persisted");
        }
        self.arm_render_timer(now);
    }

    fn reset_document(self: &Rc<Self>) {
        let now = Instant::now();
        self.widget.set_value("");
        let result = self.session.borrow_mut().reset(now);
        self.after_replace(now, result);
    }

    fn import_document(self: &Rc<Self>, text: String) {
        let now = Instant::now();
        self.widget.set_value(&text);
        let result = self.session.borrow_mut().import(text, now);
        self.after_replace(now, result);
    }

    fn save_markdown(&self) {
        let download = self.session.borrow().save_markdown();
        if let Err(e) = offer_download(&download) {
            tracing::warn!("markdown download failed: {:?}", e);
        }
    }

    fn export_html(&self) {
        let download = self.session.borrow().export_html(&self.preview.inner_html());
        if let Err(e) = offer_download(&download) {
            tracing::warn!("html export failed: {:?}", e);
        }
    }

    fn bind_document_events(self: &Rc<Self>) {
        let textarea = self.widget.element().clone();
        self.listen(&textarea, "input", |app, _| app.on_input());

        self.listen_active(&gloo_utils::document(), "keydown", |app, e| {
            let Some(event) = e.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let combo = KeyCombo::with_modifiers(
                Key::from_dom(&event.key()),
                Modifiers {
                    ctrl: event.ctrl_key(),
                    alt: event.alt_key(),
                    shift: event.shift_key(),
                    meta: event.meta_key(),
                },
            );
            if let KeydownResult::Handled(command) = KeydownResult::for_combo(&combo) {
                event.prevent_default();
                app.run_command(command);
            }
        });

        self.listen(&gloo_utils::window(), THEME_CHANGED_EVENT, |app, _| app.render_now());
    }

    fn bind_toolbar(self: &Rc<Self>) {
        for action in FormatAction::ALL {
            self.on_click(action.button_id(), move |app| app.apply_format(action));
        }
        self.on_click("btn-export", |app| app.export_html());
        self.on_click("btn-print", |_| {
            if let Err(e) = gloo_utils::window().print() {
                tracing::warn!("print failed: {:?}", e);
            }
        });
    }

    // --- scrolling ---

    fn on_scroll(&self, pane: Pane) {
        let editor = DomPane(self.widget.element().clone().into());
        let preview = DomPane(self.preview.container().clone());
        let (source, mut target) = match pane {
            Pane::Editor => (editor, preview),
            Pane::Preview => (preview, editor),
        };
        let outcome = self.session.borrow_mut().on_scroll(pane, &source, &mut target);
        tracing::trace!(?pane, ?outcome, "scroll");
    }

    fn bind_scroll_sync(self: &Rc<Self>) {
        let textarea = self.widget.element().clone();
        self.listen(&textarea, "scroll", |app, _| app.on_scroll(Pane::Editor));
        let container = self.preview.container().clone();
        self.listen(&container, "scroll", |app, _| app.on_scroll(Pane::Preview));

        if let Some(button) = by_id::<Element>("btn-sync-scroll") {
            set_class(&button, "active", self.session.borrow().scroll_sync().is_enabled());
            self.listen(&button.clone(), "click", move |app, _| {
                let enabled = app.session.borrow_mut().toggle_scroll_sync();
                set_class(&button, "active", enabled);
            });
        }
    }

    // --- layout ---

    fn set_view_mode(&self, mode: ViewMode) {
        self.session.borrow_mut().set_view_mode(mode);
        if let Some(main) = &self.main_content {
            for class in ViewMode::all_container_classes() {
                set_class(main, class, mode.container_class() == Some(class));
            }
        }
        for other in ViewMode::ALL {
            if let Some(button) = by_id::<Element>(other.button_id()) {
                set_class(&button, "active", other == mode);
            }
        }
    }

    fn bind_view_modes(self: &Rc<Self>) {
        for mode in ViewMode::ALL {
            self.on_click(mode.button_id(), move |app| app.set_view_mode(mode));
        }
    }

    fn show_theme(&self) {
        theme::apply(self.session.borrow().theme(), self.syntax_css.as_ref());
    }

    fn bind_theme_toggle(self: &Rc<Self>) {
        self.on_click("theme-toggle", |app| {
            let toggled = app.session.borrow_mut().toggle_theme();
            if let Err(err) = toggled {
                tracing::warn!(error = %err, "theme not persisted");
            }
            app.show_theme();
            if let Err(e) = theme::broadcast_change() {
                tracing::warn!("theme broadcast failed: {:?}", e);
            }
        });
    }

    fn restore_layout(&self) {
        if let (Some(pane), Some(width)) = (&self.editor_pane, self.session.borrow().pane_width()) {
            set_style(pane, "flex", &flex_basis(width));
        }
    }

    /// Suspend (or restore) text selection and pointer events on both panes.
    fn suspend_panes(&self, suspended: bool) {
        let (select, pointer) = if suspended { ("none", "none") } else { ("", "") };
        for pane in [&self.editor_pane, &self.preview_pane].into_iter().flatten() {
            set_style(pane, "user-select", select);
            set_style(pane, "pointer-events", pointer);
        }
        if let Some(body) = gloo_utils::document().body() {
            set_style(&body, "cursor", if suspended { "col-resize" } else { "" });
        }
    }

    fn start_resize(&self, kind: PointerKind) {
        self.session.borrow_mut().start_resize(kind);
        if kind.suspends_panes() {
            self.suspend_panes(true);
        }
    }

    fn drag_resize(&self, pointer_x: f64) {
        let (Some(main), Some(pane)) = (&self.main_content, &self.editor_pane) else {
            return;
        };
        let width = self
            .session
            .borrow()
            .drag_resize(pointer_x, main.client_width() as f64);
        if let Some(width) = width {
            set_style(pane, "flex", &flex_basis(width));
        }
    }

    fn finish_resize(&self) {
        let Some(kind) = self.session.borrow().resizing() else {
            return;
        };
        if kind.suspends_panes() {
            self.suspend_panes(false);
        }
        let width = self
            .editor_pane
            .as_ref()
            .map_or(0.0, |pane| pane.get_bounding_client_rect().width());
        let finished = self.session.borrow_mut().finish_resize(width);
        if let Err(err) = finished {
            tracing::warn!(error = %err, "pane width not persisted");
        }
    }

    fn bind_resizer(self: &Rc<Self>) {
        let Some(resizer) = by_id::<Element>("resizer") else {
            return;
        };
        let document = gloo_utils::document();

        self.listen(&resizer, "mousedown", |app, _| app.start_resize(PointerKind::Mouse));
        self.listen(&document, "mousemove", |app, e| {
            if let Some(event) = e.dyn_ref::<MouseEvent>() {
                app.drag_resize(event.client_x() as f64);
            }
        });
        self.listen(&document, "mouseup", |app, _| app.finish_resize());

        self.listen(&resizer, "touchstart", |app, _| app.start_resize(PointerKind::Touch));
        self.listen(&document, "touchmove", |app, e| {
            let touch = e
                .dyn_ref::<TouchEvent>()
                .and_then(|event| event.touches().get(0));
            if let Some(touch) = touch {
                app.drag_resize(touch.client_x() as f64);
            }
        });
        self.listen(&document, "touchend", |app, _| app.finish_resize());
    }

    fn update_mobile_visibility(&self) {
        let width = gloo_utils::window()
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(f64::INFINITY);
        let visibility = self.session.borrow().pane_visibility(width);
        if let Some(pane) = &self.editor_pane {
            set_style(pane, "display", visibility.editor.css_value());
        }
        if let Some(pane) = &self.preview_pane {
            set_style(pane, "display", visibility.preview.css_value());
        }
    }

    fn select_tab(&self, tab: MobileTab) {
        self.session.borrow_mut().select_tab(tab);
        for other in [MobileTab::Editor, MobileTab::Preview] {
            if let Some(button) = by_id::<Element>(other.tab_id()) {
                set_class(&button, "active", other == tab);
            }
        }
        self.update_mobile_visibility();
    }

    fn bind_mobile_tabs(self: &Rc<Self>) {
        if by_id::<Element>(MobileTab::Editor.tab_id()).is_some()
            && by_id::<Element>(MobileTab::Preview.tab_id()).is_some()
        {
            for tab in [MobileTab::Editor, MobileTab::Preview] {
                self.on_click(tab.tab_id(), move |app| app.select_tab(tab));
            }
        }
        self.listen(&gloo_utils::window(), "resize", |app, _| app.update_mobile_visibility());
        self.update_mobile_visibility();
    }

    // --- dialogs and files ---

    fn bind_reset_dialog(self: &Rc<Self>) {
        let Some(dialog) = by_id::<HtmlDialogElement>("reset-dialog") else {
            return;
        };

        let opener = dialog.clone();
        self.on_click("btn-reset", move |_| {
            if let Err(e) = opener.show_modal() {
                tracing::warn!("could not open reset dialog: {:?}", e);
            }
        });

        let closer = dialog.clone();
        self.on_click("btn-dialog-cancel", move |_| closer.close());

        // backdrop clicks target the dialog itself
        let backdrop = dialog.clone();
        self.listen(&dialog, "click", move |_, e| {
            let dialog_value: &JsValue = backdrop.as_ref();
            let target: Option<JsValue> = e.target().map(Into::into);
            if target.as_ref() == Some(dialog_value) {
                backdrop.close();
            }
        });

        self.on_click("btn-dialog-confirm", move |app| {
            app.reset_document();
            dialog.close();
        });
    }

    /// Let the user pick a file and replace the document with its text.
    fn open_file(self: &Rc<Self>) {
        let input = gloo_utils::document()
            .create_element("input")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let Some(input) = input else {
            return;
        };
        input.set_type("file");
        input.set_accept(IMPORT_ACCEPT);

        let weak = Rc::downgrade(self);
        let picker = input.clone();
        let listener = EventListener::once(&input, "change", move |_| {
            let Some(file) = picker.files().and_then(|files| files.get(0)) else {
                return;
            };
            spawn_local(async move {
                let contents = read_file_text(&file).await;
                let Some(app) = weak.upgrade() else {
                    return;
                };
                match contents {
                    Ok(text) => app.import_document(text),
                    Err(err) => tracing::warn!(error = %err, "import failed"),
                }
            });
        });
        // a newer picker replaces an abandoned one
        *self.file_listener.borrow_mut() = Some(listener);
        input.click();
    }

    fn bind_files(self: &Rc<Self>) {
        self.on_click("btn-save", |app| app.save_markdown());
        self.on_click("btn-open", |app| app.open_file());
    }
}

fn millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}
