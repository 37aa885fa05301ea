//! Clipboard session exposed to JavaScript
//!
//! One session per editor instance. It owns the editor state, the clipboard
//! cache and the current mode, and drives the JS editor shell for mode changes,
//! DOM restoration and change notification.
//!
//! Shell calls made while the session is borrowed are queued and flushed once
//! the borrow is released, so a shell callback may safely call back into the
//! session (e.g. `contentSnapshot()` from `restoreEditorDOM`).

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::browser::{BrowserClipboardEvent, DomSelectionCapture};
use super::helpers::{
    clipboard_error, deserialize, deserialize_or_default, serialize, validate_selection,
    validation_error,
};
use crate::clipboard::{
    begin_cut, copy, ClipboardCache, CopyOutcome, EditorHost, EditorMode, PendingCut,
    ScrollPosition,
};
use crate::config::ClipboardConfig;
use crate::converters::raw::{content_from_raw, content_to_raw, encode, RawContent};
use crate::models::{ContentState, EditorState, SelectionState};
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};

#[wasm_bindgen]
extern "C" {
    /// The JS editor shell
    pub type EditorShell;

    #[wasm_bindgen(method, js_name = setMode)]
    fn set_mode(this: &EditorShell, mode: &str);

    #[wasm_bindgen(method, js_name = exitCurrentMode)]
    fn exit_current_mode(this: &EditorShell);

    #[wasm_bindgen(method, js_name = getScrollPosition)]
    fn scroll_position(this: &EditorShell) -> JsValue;

    #[wasm_bindgen(method, js_name = restoreEditorDOM)]
    fn restore_editor_dom(this: &EditorShell, scroll: JsValue);

    #[wasm_bindgen(method, js_name = onChange)]
    fn on_change(this: &EditorShell, content: JsValue, selection: JsValue);
}

/// Shell call deferred until the session borrow is released
enum ShellCall {
    SetMode(EditorMode),
    ExitCurrentMode,
    RestoreEditorDom(ScrollPosition),
    Changed,
}

/// Editor state plus the shell it reports to
struct ShellHost {
    shell: EditorShell,
    state: EditorState,
    mode: EditorMode,
    queued: Vec<ShellCall>,
}

impl EditorHost for ShellHost {
    fn editor_state(&self) -> &EditorState {
        &self.state
    }

    fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        self.queued.push(ShellCall::SetMode(mode));
    }

    fn exit_current_mode(&mut self) {
        self.mode = EditorMode::Edit;
        self.queued.push(ShellCall::ExitCurrentMode);
    }

    fn scroll_position(&self) -> ScrollPosition {
        serde_wasm_bindgen::from_value(self.shell.scroll_position()).unwrap_or_else(|e| {
            wasm_warn!("shell returned an unreadable scroll position: {}", e);
            ScrollPosition::default()
        })
    }

    fn restore_editor_dom(&mut self, scroll: ScrollPosition) {
        self.queued.push(ShellCall::RestoreEditorDom(scroll));
    }

    fn update(&mut self, state: EditorState) {
        self.state = state;
        self.queued.push(ShellCall::Changed);
    }
}

struct SessionInner {
    host: ShellHost,
    cache: ClipboardCache,
    config: ClipboardConfig,
}

#[wasm_bindgen]
pub struct ClipboardSession {
    inner: Rc<RefCell<SessionInner>>,
}

#[wasm_bindgen]
impl ClipboardSession {
    /// Create a session bound to an editor shell; `config` may be omitted
    #[wasm_bindgen(constructor)]
    pub fn new(shell: EditorShell, config: JsValue) -> Result<ClipboardSession, JsValue> {
        let config: ClipboardConfig = deserialize_or_default(config, "Invalid clipboard config")?;
        wasm_info!("ClipboardSession created (content attribute: {})", config.content_attribute);

        Ok(ClipboardSession {
            inner: Rc::new(RefCell::new(SessionInner {
                host: ShellHost {
                    shell,
                    state: EditorState::new(ContentState::default()),
                    mode: EditorMode::Edit,
                    queued: Vec::new(),
                },
                cache: ClipboardCache::new(),
                config,
            })),
        })
    }

    /// Replace the document with raw content; history is reset
    #[wasm_bindgen(js_name = loadContent)]
    pub fn load_content(&self, raw: JsValue) -> Result<(), JsValue> {
        let raw: RawContent = deserialize(raw, "Invalid raw content")?;
        let content = content_from_raw(raw).map_err(clipboard_error)?;
        wasm_info!("loadContent: {} blocks", content.blocks().len());

        self.inner.borrow_mut().host.state = EditorState::new(content);
        Ok(())
    }

    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(&self, selection: JsValue) -> Result<(), JsValue> {
        let selection: SelectionState = deserialize(selection, "Invalid selection")?;
        let mut inner = self.inner.borrow_mut();
        validate_selection(&inner.host.state.content, &selection).map_err(validation_error)?;

        wasm_log!(
            "setSelection: {}@{} .. {}@{}",
            selection.anchor_key,
            selection.anchor_offset,
            selection.focus_key,
            selection.focus_offset
        );
        inner.host.state.selection = selection;
        Ok(())
    }

    /// Handle a native `copy` event
    ///
    /// Returns the `{ plainText, html }` written to the clipboard, or `null`
    /// when nothing was written.
    #[wasm_bindgen(js_name = onCopy)]
    pub fn on_copy(&self, event: web_sys::ClipboardEvent) -> Result<JsValue, JsValue> {
        let mut event = BrowserClipboardEvent::new(event);
        let mut inner = self.inner.borrow_mut();
        if inner.host.mode == EditorMode::Cut {
            wasm_warn!("onCopy ignored: a cut is still in flight");
            return Ok(JsValue::NULL);
        }

        let inner = &mut *inner;
        let outcome = copy(
            &inner.host.state,
            &mut inner.cache,
            &DomSelectionCapture::new(),
            &mut event,
            &inner.config,
        )
        .map_err(clipboard_error)?;

        outcome_to_js(&outcome)
    }

    /// Handle a native `cut` event; the removal runs on the next task
    #[wasm_bindgen(js_name = onCut)]
    pub fn on_cut(&self, event: web_sys::ClipboardEvent) -> Result<JsValue, JsValue> {
        let mut event = BrowserClipboardEvent::new(event);
        let pending = {
            let mut inner = self.inner.borrow_mut();
            if inner.host.mode == EditorMode::Cut {
                wasm_warn!("onCut ignored: a cut is still in flight");
                return Ok(JsValue::NULL);
            }

            let inner = &mut *inner;
            begin_cut(
                &mut inner.host,
                &mut inner.cache,
                &DomSelectionCapture::new(),
                &mut event,
                &inner.config,
            )
            .map_err(clipboard_error)?
        };
        self.flush_shell_calls();

        let Some(pending) = pending else {
            return Ok(JsValue::NULL);
        };
        let result = outcome_to_js(pending.outcome());
        self.schedule_resume(pending)?;
        result
    }

    /// Cached fragment as raw content, or `null`
    #[wasm_bindgen(js_name = cachedFragment)]
    pub fn cached_fragment(&self) -> Result<JsValue, JsValue> {
        let inner = self.inner.borrow();
        match inner.cache.get() {
            Some(fragment) => serialize(
                &encode(fragment.blocks(), fragment.entity_map()),
                "Failed to serialize cached fragment",
            ),
            None => Ok(JsValue::NULL),
        }
    }

    /// Current document as raw content
    #[wasm_bindgen(js_name = contentSnapshot)]
    pub fn content_snapshot(&self) -> Result<JsValue, JsValue> {
        let inner = self.inner.borrow();
        serialize(&content_to_raw(&inner.host.state.content), "Failed to serialize content")
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.borrow().host.mode.as_str().to_string()
    }

    /// Undo the last edit; returns whether anything changed
    pub fn undo(&self) -> bool {
        self.step_history(EditorState::undo, "undo")
    }

    /// Redo the last undone edit; returns whether anything changed
    pub fn redo(&self) -> bool {
        self.step_history(EditorState::redo, "redo")
    }
}

impl ClipboardSession {
    fn step_history(&self, step: fn(&EditorState) -> Option<EditorState>, label: &str) -> bool {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let next = step(&inner.host.state);
            match next {
                Some(state) => {
                    inner.host.update(state);
                    true
                }
                None => false,
            }
        };
        wasm_log!("{}: changed={}", label, changed);
        self.flush_shell_calls();
        changed
    }

    fn schedule_resume(&self, pending: PendingCut) -> Result<(), JsValue> {
        let session = ClipboardSession {
            inner: Rc::clone(&self.inner),
        };
        let slot = Rc::new(RefCell::new(Some(pending)));
        let scheduled_slot = Rc::clone(&slot);
        let callback = Closure::once_into_js(move || {
            let Some(pending) = scheduled_slot.borrow_mut().take() else {
                return;
            };
            let result = {
                let mut inner = session.inner.borrow_mut();
                pending.resume(&mut inner.host)
            };
            if let Err(e) = result {
                wasm_error!("cut: removal failed: {}", e);
            }
            session.flush_shell_calls();
        });

        let scheduled = web_sys::window()
            .ok_or_else(|| validation_error("No window to schedule cut on"))
            .and_then(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref::<js_sys::Function>(),
                    0,
                )
            });

        if let Err(e) = scheduled {
            wasm_error!("cut: could not schedule removal, leaving cut mode: {:?}", e);
            if let Some(pending) = slot.borrow_mut().take() {
                pending.abandon(&mut self.inner.borrow_mut().host);
            }
            self.flush_shell_calls();
            return Err(e);
        }
        Ok(())
    }

    /// Run queued shell calls in order with no session borrow held
    fn flush_shell_calls(&self) {
        let (shell, calls) = {
            let mut inner = self.inner.borrow_mut();
            let calls = std::mem::take(&mut inner.host.queued);
            (inner.host.shell.clone(), calls)
        };

        for call in calls {
            match call {
                ShellCall::SetMode(mode) => shell.set_mode(mode.as_str()),
                ShellCall::ExitCurrentMode => shell.exit_current_mode(),
                ShellCall::RestoreEditorDom(scroll) => {
                    match serialize(&scroll, "Failed to serialize scroll") {
                        Ok(scroll) => shell.restore_editor_dom(scroll),
                        Err(_) => shell.restore_editor_dom(JsValue::UNDEFINED),
                    }
                }
                ShellCall::Changed => match self.change_payload() {
                    Ok((content, selection)) => shell.on_change(content, selection),
                    Err(e) => wasm_error!("onChange payload failed: {:?}", e),
                },
            }
        }
    }

    fn change_payload(&self) -> Result<(JsValue, JsValue), JsValue> {
        let inner = self.inner.borrow();
        let state = &inner.host.state;
        Ok((
            serialize(&content_to_raw(&state.content), "Failed to serialize content")?,
            serialize(&state.selection, "Failed to serialize selection")?,
        ))
    }
}

fn outcome_to_js(outcome: &CopyOutcome) -> Result<JsValue, JsValue> {
    match outcome {
        CopyOutcome::Written(payload) => {
            serialize(payload, "Failed to serialize clipboard payload")
        }
        CopyOutcome::Skipped | CopyOutcome::CachedOnly => Ok(JsValue::NULL),
    }
}
