//! Copy (non-destructive clipboard export)

use super::cache::ClipboardCache;
use super::host::{ClipboardEventSink, SelectionCapture, MIME_HTML, MIME_PLAIN_TEXT};
use crate::config::ClipboardConfig;
use crate::error::Result;
use crate::fragment::extract;
use crate::html_layout::{build_export_html, Element};
use crate::models::EditorState;
use serde::{Deserialize, Serialize};

/// What was written to the platform clipboard
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardPayload {
    pub plain_text: String,
    pub html: String,
}

/// Result of a copy (or of the clipboard half of a cut)
#[derive(Clone, Debug, PartialEq)]
pub enum CopyOutcome {
    /// Selection was collapsed; nothing was touched
    Skipped,
    /// Fragment cached; the platform offered no clipboard data to write
    CachedOnly,
    /// Fragment cached and both clipboard channels written
    Written(ClipboardPayload),
}

/// Handle a copy event
///
/// The default action is suppressed whenever this runs: with a collapsed
/// selection nothing else happens, otherwise the selection is cached and, when
/// the event exposes clipboard data, exported as plain text and HTML.
pub fn copy<E, C>(
    state: &EditorState,
    cache: &mut ClipboardCache,
    capture: &C,
    event: &mut E,
    config: &ClipboardConfig,
) -> Result<CopyOutcome>
where
    E: ClipboardEventSink + ?Sized,
    C: SelectionCapture + ?Sized,
{
    if state.selection.is_collapsed() {
        log::debug!("copy: collapsed selection, nothing to copy");
        event.prevent_default();
        return Ok(CopyOutcome::Skipped);
    }

    let outcome = populate_clipboard(state, cache, capture, event, config);
    event.prevent_default();
    outcome
}

/// Extract, cache and (when possible) export the current selection
///
/// Shared by copy and cut; the caller has already rejected a collapsed
/// selection and owns default-action suppression.
pub(crate) fn populate_clipboard<E, C>(
    state: &EditorState,
    cache: &mut ClipboardCache,
    capture: &C,
    event: &mut E,
    config: &ClipboardConfig,
) -> Result<CopyOutcome>
where
    E: ClipboardEventSink + ?Sized,
    C: SelectionCapture + ?Sized,
{
    let fragment = extract(&state.content, &state.selection)?;
    cache.set(fragment.clone());

    let Some(data) = event.clipboard_data() else {
        log::info!("clipboard data API unavailable, cached {} blocks only", fragment.len());
        return Ok(CopyOutcome::CachedOnly);
    };

    let mut captured = capture
        .capture_selection()
        .unwrap_or_else(|| Element::new(config.fallback_tag.as_str()));
    captured.strip_non_editable(config);

    let html = build_export_html(&fragment, &state.content, &state.selection, &captured, config)?;
    let mut plain_text = capture.selection_text();
    if plain_text.is_empty() {
        plain_text = fragment.plain_text();
    }

    data.set_data(MIME_PLAIN_TEXT, &plain_text)?;
    data.set_data(MIME_HTML, &html)?;

    log::info!(
        "clipboard written: {} blocks, {} bytes html",
        fragment.len(),
        html.len()
    );
    Ok(CopyOutcome::Written(ClipboardPayload { plain_text, html }))
}
