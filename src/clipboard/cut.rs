//! Cut (clipboard export followed by deferred range removal)
//!
//! Cut runs in two phases. `begin_cut` fills the clipboard synchronously, while
//! the selection still shows the content being cut, and suspends the editor's
//! event handling. The returned `PendingCut` is resumed by the host scheduler
//! on a later turn, after the native cut has touched the DOM: it hands DOM
//! control back to the editor and applies the removal to the model.

use super::cache::ClipboardCache;
use super::copy::{populate_clipboard, CopyOutcome};
use super::host::{ClipboardEventSink, EditorHost, EditorMode, ScrollPosition, SelectionCapture};
use crate::config::ClipboardConfig;
use crate::error::Result;
use crate::models::SelectionState;
use crate::structure::{remove_range, RemovalDirection};
use crate::undo::ChangeType;

/// Second phase of a cut, to be resumed exactly once
#[must_use = "a pending cut must be resumed after the native cut has run"]
#[derive(Debug)]
pub struct PendingCut {
    selection: SelectionState,
    scroll: ScrollPosition,
    outcome: CopyOutcome,
}

impl PendingCut {
    /// Clipboard result of the first phase
    pub fn outcome(&self) -> &CopyOutcome {
        &self.outcome
    }

    /// Selection being cut
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Restore the editor DOM, leave cut mode, then remove the cut range
    pub fn resume<H: EditorHost + ?Sized>(self, host: &mut H) -> Result<()> {
        host.restore_editor_dom(self.scroll);
        host.exit_current_mode();

        let state = host.editor_state();
        let removed = remove_range(&state.content, &self.selection, RemovalDirection::Forward)?;
        let next = state
            .push(removed.content, ChangeType::RemoveRange)
            .select(removed.selection_after);

        log::info!(
            "cut: removed {}@{} .. {}@{}",
            self.selection.start_key(),
            self.selection.start_offset(),
            self.selection.end_key(),
            self.selection.end_offset()
        );
        host.update(next);
        Ok(())
    }

    /// Drop the cut without removing anything, leaving cut mode
    ///
    /// For hosts that could not schedule the second phase. The clipboard keeps
    /// what the first phase wrote.
    pub fn abandon<H: EditorHost + ?Sized>(self, host: &mut H) {
        log::warn!(
            "cut: abandoned {}@{} .. {}@{}",
            self.selection.start_key(),
            self.selection.start_offset(),
            self.selection.end_key(),
            self.selection.end_offset()
        );
        host.exit_current_mode();
    }
}

/// Handle a cut event
///
/// Returns `None` for a collapsed selection (default action suppressed,
/// nothing else touched). Otherwise the clipboard is populated exactly as for
/// copy, the editor enters `Cut` mode, and the pending second phase is returned.
pub fn begin_cut<H, E, C>(
    host: &mut H,
    cache: &mut ClipboardCache,
    capture: &C,
    event: &mut E,
    config: &ClipboardConfig,
) -> Result<Option<PendingCut>>
where
    H: EditorHost + ?Sized,
    E: ClipboardEventSink + ?Sized,
    C: SelectionCapture + ?Sized,
{
    let selection = host.editor_state().selection.clone();
    if selection.is_collapsed() {
        log::debug!("cut: collapsed selection, nothing to cut");
        event.prevent_default();
        return Ok(None);
    }

    let outcome = populate_clipboard(host.editor_state(), cache, capture, event, config);
    event.prevent_default();
    let outcome = outcome?;

    let scroll = host.scroll_position();
    host.set_mode(EditorMode::Cut);

    Ok(Some(PendingCut {
        selection,
        scroll,
        outcome,
    }))
}
