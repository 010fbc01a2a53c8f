//! The conversion session itself.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{info, warn};

use kosei_core::{ConversionOutcome, ConversionRequest, CorrectionSettings};
use kosei_extract::extract_corrected_text;
use kosei_llm::CorrectionBackend;

use crate::state::{SessionState, StateGate};

/// Single-flight driver for correction round trips.
///
/// Accepted requests run on a background task. Exactly one
/// [`ConversionOutcome`] is sent per accepted request, and the session is
/// back to [`SessionState::Idle`] before the outcome is sent.
pub struct ConversionSession {
    gate: StateGate,
    backend: Arc<dyn CorrectionBackend>,
    outcome_tx: mpsc::UnboundedSender<ConversionOutcome>,
    settings: Mutex<CorrectionSettings>,
}

impl ConversionSession {
    /// Create a session and the receiver its outcomes arrive on.
    pub fn new(
        backend: Arc<dyn CorrectionBackend>,
        settings: CorrectionSettings,
    ) -> (Self, mpsc::UnboundedReceiver<ConversionOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let session = Self {
            gate: StateGate::new(),
            backend,
            outcome_tx,
            settings: Mutex::new(settings),
        };
        (session, outcome_rx)
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.gate.current()
    }

    /// Snapshot of the active settings.
    pub fn settings(&self) -> CorrectionSettings {
        self.settings.lock().expect("settings mutex poisoned").clone()
    }

    /// Replace the active settings. Takes effect for the next submission;
    /// a conversion already in flight keeps the settings it started with.
    pub fn update_settings(&self, settings: CorrectionSettings) {
        *self.settings.lock().expect("settings mutex poisoned") = settings;
    }

    /// Submit raw user input under the active settings.
    ///
    /// Returns `false` when the input is empty after trimming or another
    /// conversion is in flight; no outcome is emitted in either case.
    pub fn submit_input(&self, input_text: &str) -> bool {
        let settings = self.settings();
        let request = match ConversionRequest::new(
            input_text,
            &settings.conversion_policy,
            &settings.reference_text,
        ) {
            Some(request) => request,
            None => {
                warn!("Rejected empty input");
                return false;
            }
        };
        self.submit(request)
    }

    /// Submit a prepared request.
    ///
    /// Returns `true` if the request was accepted and a background conversion
    /// started, `false` if the session was busy.
    pub fn submit(&self, request: ConversionRequest) -> bool {
        if self.gate.transition(SessionState::Busy).is_err() {
            warn!("Rejected submission: conversion already in flight");
            return false;
        }
        info!(
            input_chars = request.input_text().chars().count(),
            "Conversion accepted"
        );

        let gate = self.gate.clone();
        let backend = Arc::clone(&self.backend);
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = run_conversion(backend.as_ref(), &request).await;
            // Back to Idle before the outcome goes out, so the receiver can
            // resubmit from its handler.
            if gate.transition(SessionState::Idle).is_err() {
                gate.reset();
            }
            if outcome_tx.send(outcome).is_err() {
                warn!("Outcome receiver dropped; discarding conversion result");
            }
        });
        true
    }
}

/// One backend round trip plus extraction, folded into an outcome.
async fn run_conversion(
    backend: &dyn CorrectionBackend,
    request: &ConversionRequest,
) -> ConversionOutcome {
    let raw = match backend.correct(request).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Conversion failed: {e}");
            return ConversionOutcome::Error(format!("conversion failed: {e}"));
        }
    };
    match extract_corrected_text(&raw) {
        Ok(extraction) => {
            info!(strategy = ?extraction.strategy, "Conversion complete");
            ConversionOutcome::Corrected(extraction.text)
        }
        Err(e) => {
            warn!("Conversion produced an unusable response: {e}");
            ConversionOutcome::Error(e.to_string())
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
