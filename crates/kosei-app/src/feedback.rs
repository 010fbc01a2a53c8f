//! Clipboard delivery and audible cues.
//!
//! On Windows, corrected text is placed on the system clipboard as
//! `CF_UNICODETEXT` and cues are played with `MessageBeep`. On non-Windows,
//! clipboard copy fails with an error and cues only log.

#[cfg(not(target_os = "windows"))]
use tracing::warn;

use kosei_core::error::KoseiError;
use kosei_core::CueKind;

/// User-facing feedback channel: clipboard plus sound cues.
pub struct Feedback;

impl Feedback {
    pub fn new() -> Self {
        Self
    }

    /// Copy the given text to the system clipboard.
    #[cfg(target_os = "windows")]
    pub fn copy_to_clipboard(&self, text: &str) -> Result<(), KoseiError> {
        use windows_sys::Win32::Foundation::{GlobalFree, HANDLE};
        use windows_sys::Win32::System::DataExchange::{
            CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData,
        };
        use windows_sys::Win32::System::Memory::{GlobalAlloc, GlobalLock, GlobalUnlock, GMEM_MOVEABLE};
        use windows_sys::Win32::System::Ole::CF_UNICODETEXT;

        // UTF-16 with a terminating NUL, as CF_UNICODETEXT requires.
        let wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
        let byte_len = wide.len() * std::mem::size_of::<u16>();

        unsafe {
            if OpenClipboard(0) == 0 {
                return Err(KoseiError::Clipboard("failed to open clipboard".into()));
            }
            if EmptyClipboard() == 0 {
                CloseClipboard();
                return Err(KoseiError::Clipboard("failed to empty clipboard".into()));
            }

            let handle = GlobalAlloc(GMEM_MOVEABLE, byte_len);
            if handle == 0 {
                CloseClipboard();
                return Err(KoseiError::Clipboard("failed to allocate clipboard buffer".into()));
            }

            let dest = GlobalLock(handle) as *mut u16;
            if dest.is_null() {
                GlobalFree(handle as HANDLE);
                CloseClipboard();
                return Err(KoseiError::Clipboard("failed to lock clipboard buffer".into()));
            }
            std::ptr::copy_nonoverlapping(wide.as_ptr(), dest, wide.len());
            GlobalUnlock(handle);

            // On success the clipboard owns the handle.
            if SetClipboardData(CF_UNICODETEXT as u32, handle as HANDLE) == 0 {
                GlobalFree(handle as HANDLE);
                CloseClipboard();
                return Err(KoseiError::Clipboard("failed to set clipboard data".into()));
            }
            CloseClipboard();
        }

        tracing::info!(chars = text.chars().count(), "Corrected text copied to clipboard");
        Ok(())
    }

    /// Stub clipboard copy on non-Windows: logs and returns an error.
    #[cfg(not(target_os = "windows"))]
    pub fn copy_to_clipboard(&self, text: &str) -> Result<(), KoseiError> {
        warn!(
            chars = text.chars().count(),
            "Feedback: clipboard not available on this platform"
        );
        Err(KoseiError::Clipboard(
            "Clipboard copy is only available on Windows".into(),
        ))
    }

    /// Play an audible cue for the given feedback kind.
    #[cfg(target_os = "windows")]
    pub fn play_cue(&self, kind: CueKind) {
        use windows_sys::Win32::UI::WindowsAndMessaging::{
            MessageBeep, MB_ICONEXCLAMATION, MB_OK,
        };

        let tone = match kind {
            CueKind::Success => MB_OK,
            CueKind::Warning => MB_ICONEXCLAMATION,
        };
        unsafe {
            MessageBeep(tone);
        }
    }

    /// Stub cue on non-Windows: logs the kind but makes no sound.
    #[cfg(not(target_os = "windows"))]
    pub fn play_cue(&self, kind: CueKind) {
        tracing::debug!(?kind, "Feedback: sound cues not available on this platform");
    }
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_creation() {
        let _feedback = Feedback::new();
    }

    #[test]
    fn test_play_cue_does_not_panic() {
        let feedback = Feedback::new();
        feedback.play_cue(CueKind::Success);
        feedback.play_cue(CueKind::Warning);
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_clipboard_returns_error_on_non_windows() {
        let feedback = Feedback::new();
        let result = feedback.copy_to_clipboard("hello");
        assert!(matches!(result, Err(KoseiError::Clipboard(_))));
    }
}
