//! Session store: the ordered turn log and its state machine.
//!
//! Owns the lifecycle of every turn, gates submissions (one generation in
//! flight at a time), and publishes a read-only snapshot over a watch
//! channel for the presentation layer to render.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;

use nyaya_core::config::ChatConfig;
use nyaya_core::types::{RevealState, SessionSnapshot, Turn};

use crate::generator::ResponseGenerator;
use crate::reveal::{Epoch, RevealScheduler};

/// Interior session state, guarded by a mutex that is never held across an
/// await point.
#[derive(Debug, Default)]
struct SessionInner {
    turns: Vec<Turn>,
    pending: bool,
    draft: String,
    next_seq: u64,
}

/// The conversational session engine.
///
/// Created when the chat surface mounts, discarded when it unmounts; no
/// state survives the instance. All timing (thinking delay, reveal steps)
/// runs on spawned tokio tasks that check a shared [`Epoch`] before every
/// mutation, so nothing fires after [`SessionEngine::shutdown`].
pub struct SessionEngine {
    inner: Arc<Mutex<SessionInner>>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    epoch: Epoch,
    generator: Arc<ResponseGenerator>,
    thinking_delay: Duration,
    reveal_step: Duration,
    reveal_start_delay: Duration,
}

impl SessionEngine {
    /// Create an empty session with the given timing configuration.
    pub fn new(config: &ChatConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::default());
        Self {
            inner: Arc::new(Mutex::new(SessionInner::default())),
            snapshot_tx,
            epoch: Epoch::new(),
            generator: Arc::new(ResponseGenerator::new()),
            thinking_delay: Duration::from_millis(config.thinking_delay_ms),
            reveal_step: Duration::from_millis(config.reveal_interval_ms),
            reveal_start_delay: Duration::from_millis(config.reveal_start_delay_ms),
        }
    }

    /// Submit a query.
    ///
    /// A silent no-op (no turn created) when the trimmed text is empty or a
    /// generation is already in flight; callers gate on `pending` rather
    /// than expecting an error. Otherwise the user turn is appended
    /// synchronously and the response computation is scheduled.
    pub fn submit(&self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            tracing::debug!("Blank submission ignored");
            return;
        }

        {
            let mut state = match self.inner.lock() {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %e, "Session lock poisoned; submission dropped");
                    return;
                }
            };
            if state.pending {
                tracing::debug!("Submission rejected: a response is already in flight");
                return;
            }
            let seq = state.next_seq;
            state.next_seq += 1;
            state.turns.push(Turn::user(seq, trimmed.to_string(), Utc::now()));
            state.pending = true;
            state.draft.clear();
            publish(&self.snapshot_tx, &state);
        }

        tracing::debug!(query_len = trimmed.len(), "User turn appended");
        self.spawn_response(trimmed.to_string());
    }

    /// Copy a suggestion into the pending-input field. Never submits.
    pub fn select_suggestion(&self, text: &str) {
        if let Ok(mut state) = self.inner.lock() {
            state.draft = text.to_string();
        }
    }

    /// The current pending-input text.
    pub fn draft(&self) -> String {
        self.inner
            .lock()
            .map(|s| s.draft.clone())
            .unwrap_or_default()
    }

    /// The current read-only session view.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribe to snapshot changes (turn appends and reveal steps).
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Tear the session down.
    ///
    /// Any pending thinking timer and any in-progress reveal observe the
    /// stale epoch before their next step and stop without mutating the
    /// discarded state. Idempotent.
    pub fn shutdown(&self) {
        self.epoch.bump();
        tracing::debug!("Session torn down");
    }

    /// Schedule the assistant response for an accepted submission.
    fn spawn_response(&self, query: String) {
        let inner = Arc::clone(&self.inner);
        let snapshot_tx = self.snapshot_tx.clone();
        let guard = self.epoch.observe();
        let generator = Arc::clone(&self.generator);
        let thinking_delay = self.thinking_delay;
        let scheduler = RevealScheduler::new(self.reveal_step, self.reveal_start_delay);

        tokio::spawn(async move {
            // Simulated thinking time before the generator runs.
            tokio::time::sleep(thinking_delay).await;
            if !guard.is_current() {
                return;
            }

            let body = generator.generate(&query);
            let total_chars = body.chars().count();

            // Append the assistant turn and release the submission gate.
            // Reveal completion is not part of the gate: the next query may
            // be accepted while this turn is still revealing.
            let turn_index = {
                let mut state = match inner.lock() {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::error!(error = %e, "Session lock poisoned; response dropped");
                        return;
                    }
                };
                if !guard.is_current() {
                    return;
                }
                let seq = state.next_seq;
                state.next_seq += 1;
                state.turns.push(Turn::assistant(seq, body, Utc::now()));
                state.pending = false;
                publish(&snapshot_tx, &state);
                state.turns.len() - 1
            };
            tracing::debug!(total_chars, "Assistant turn appended, reveal starting");

            let inner_steps = Arc::clone(&inner);
            let tx_steps = snapshot_tx.clone();
            let completed = scheduler
                .run(total_chars, &guard, |prefix_len| {
                    if let Ok(mut state) = inner_steps.lock() {
                        if let Some(turn) = state.turns.get_mut(turn_index) {
                            turn.revealed_chars = prefix_len;
                        }
                        publish(&tx_steps, &state);
                    }
                })
                .await;

            if completed && guard.is_current() {
                if let Ok(mut state) = inner.lock() {
                    if let Some(turn) = state.turns.get_mut(turn_index) {
                        turn.reveal_state = RevealState::Settled;
                    }
                    publish(&snapshot_tx, &state);
                }
                tracing::debug!("Reveal settled");
            }
        });
    }
}

impl Drop for SessionEngine {
    fn drop(&mut self) {
        self.epoch.bump();
    }
}

/// Publish the current state as a fresh snapshot.
fn publish(tx: &watch::Sender<SessionSnapshot>, state: &SessionInner) {
    tx.send_replace(SessionSnapshot {
        turns: state.turns.clone(),
        pending: state.pending,
    });
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CONSUMER_GUIDANCE;
    use nyaya_core::types::Role;

    fn engine() -> SessionEngine {
        SessionEngine::new(&ChatConfig::default())
    }

    /// Default thinking delay plus a small scheduling margin.
    const PAST_THINKING: Duration = Duration::from_millis(1505);
    /// Far beyond any reveal completion for every catalog template.
    const FAR_FUTURE: Duration = Duration::from_secs(120);

    // ---- submit: user turn appended synchronously ----

    #[tokio::test(start_paused = true)]
    async fn test_submit_appends_user_turn_synchronously() {
        let engine = engine();
        engine.submit("What are my rights as a tenant?");

        let snap = engine.snapshot();
        assert_eq!(snap.turns.len(), 1);
        assert_eq!(snap.turns[0].role, Role::User);
        assert_eq!(snap.turns[0].content, "What are my rights as a tenant?");
        assert!(snap.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_trims_content() {
        let engine = engine();
        engine.submit("  tenant rights  ");
        assert_eq!(engine.snapshot().turns[0].content, "tenant rights");
    }

    // ---- submit: blank input is a silent no-op ----

    #[tokio::test(start_paused = true)]
    async fn test_submit_empty_is_noop() {
        let engine = engine();
        engine.submit("");
        tokio::time::sleep(FAR_FUTURE).await;
        assert!(engine.snapshot().turns.is_empty());
        assert!(!engine.snapshot().pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_whitespace_is_noop() {
        let engine = engine();
        engine.submit("   ");
        engine.submit("\n\t");
        tokio::time::sleep(FAR_FUTURE).await;
        assert!(engine.snapshot().turns.is_empty());
    }

    // ---- assistant turn appears after the thinking delay ----

    #[tokio::test(start_paused = true)]
    async fn test_assistant_turn_after_delay() {
        let engine = engine();
        engine.submit("my landlord kept the deposit");

        // Not yet: still thinking.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(engine.snapshot().turns.len(), 1);
        assert!(engine.snapshot().pending);

        tokio::time::sleep(Duration::from_millis(505)).await;
        let snap = engine.snapshot();
        assert_eq!(snap.turns.len(), 2);
        assert_eq!(snap.turns[1].role, Role::Assistant);
        assert_eq!(snap.turns[1].reveal_state, RevealState::Revealing);
        assert!(!snap.pending);
    }

    // ---- submission gating: one generation in flight ----

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_while_pending_is_noop() {
        let engine = engine();
        engine.submit("first consumer question");
        engine.submit("second question");

        tokio::time::sleep(FAR_FUTURE).await;
        let snap = engine.snapshot();
        // Only the first query's pair exists.
        assert_eq!(snap.turns.len(), 2);
        assert_eq!(snap.turns[0].content, "first consumer question");
        assert_eq!(snap.turns[1].role, Role::Assistant);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_allowed_while_previous_reveal_running() {
        let engine = engine();
        engine.submit("first consumer question");
        tokio::time::sleep(PAST_THINKING).await;

        // Assistant turn appended and revealing; the gate is already open.
        let snap = engine.snapshot();
        assert_eq!(snap.turns.len(), 2);
        assert_eq!(snap.turns[1].reveal_state, RevealState::Revealing);
        assert!(!snap.pending);

        engine.submit("second tenant question");
        let snap = engine.snapshot();
        assert_eq!(snap.turns.len(), 3);
        assert!(snap.pending);

        // Both assistant turns eventually settle.
        tokio::time::sleep(FAR_FUTURE).await;
        let snap = engine.snapshot();
        assert_eq!(snap.turns.len(), 4);
        assert_eq!(snap.turns[1].reveal_state, RevealState::Settled);
        assert_eq!(snap.turns[3].reveal_state, RevealState::Settled);
    }

    // ---- turn ids strictly increasing ----

    #[tokio::test(start_paused = true)]
    async fn test_turn_ids_strictly_increasing() {
        let engine = engine();
        engine.submit("first consumer question");
        tokio::time::sleep(PAST_THINKING).await;
        engine.submit("second tenant question");
        tokio::time::sleep(FAR_FUTURE).await;

        let snap = engine.snapshot();
        assert_eq!(snap.turns.len(), 4);
        for pair in snap.turns.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    // ---- reveal: monotonic, terminates, settles permanently ----

    #[tokio::test(start_paused = true)]
    async fn test_reveal_monotonic_and_settles() {
        let engine = engine();
        let mut rx = engine.subscribe();
        engine.submit("what is a trust deed");

        let mut seen_lengths: Vec<usize> = Vec::new();
        loop {
            rx.changed().await.unwrap();
            let snap = rx.borrow_and_update().clone();
            let Some(turn) = snap.turns.get(1) else {
                continue;
            };
            seen_lengths.push(turn.visible_content().chars().count());
            if turn.reveal_state == RevealState::Settled {
                break;
            }
        }

        // Strictly increasing (watch may coalesce steps, never regress).
        for pair in seen_lengths.windows(2) {
            assert!(pair[0] < pair[1], "displayed length regressed: {:?}", pair);
        }
        let snap = engine.snapshot();
        assert_eq!(
            *seen_lengths.last().unwrap(),
            snap.turns[1].content.chars().count()
        );
        assert_eq!(snap.turns[1].visible_content(), snap.turns[1].content);

        // Settled is terminal.
        tokio::time::sleep(FAR_FUTURE).await;
        assert_eq!(engine.snapshot().turns[1].reveal_state, RevealState::Settled);
    }

    // ---- cancellation ----

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_thinking_timer() {
        let engine = engine();
        engine.submit("first consumer question");
        engine.shutdown();

        tokio::time::sleep(FAR_FUTURE).await;
        // No assistant turn was ever appended.
        assert_eq!(engine.snapshot().turns.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_mid_reveal_freezes_display() {
        let engine = engine();
        engine.submit("what is a trust deed");

        // Past the thinking delay and one reveal step.
        tokio::time::sleep(Duration::from_millis(1517)).await;
        let snap = engine.snapshot();
        let revealed = snap.turns[1].revealed_chars;
        assert!(revealed >= 1);
        assert!(revealed < snap.turns[1].char_count());

        engine.shutdown();
        tokio::time::sleep(FAR_FUTURE).await;

        // No further observable mutation: same prefix, never settled.
        let snap = engine.snapshot();
        assert_eq!(snap.turns[1].revealed_chars, revealed);
        assert_eq!(snap.turns[1].reveal_state, RevealState::Revealing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timers() {
        let engine = engine();
        let mut rx = engine.subscribe();
        engine.submit("first consumer question");
        drop(engine);

        tokio::time::sleep(FAR_FUTURE).await;
        // Only the synchronous user-turn publish ever happened.
        let snap = rx.borrow_and_update().clone();
        assert_eq!(snap.turns.len(), 1);
    }

    // ---- end to end ----

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_consumer_complaint() {
        let engine = engine();
        engine.submit("How to file a consumer complaint?");

        tokio::time::sleep(PAST_THINKING).await;
        let snap = engine.snapshot();
        assert_eq!(snap.turns.len(), 2);
        assert_eq!(snap.turns[1].content, CONSUMER_GUIDANCE);

        tokio::time::sleep(FAR_FUTURE).await;
        let snap = engine.snapshot();
        assert_eq!(snap.turns[1].reveal_state, RevealState::Settled);
        assert_eq!(snap.turns[1].visible_content(), CONSUMER_GUIDANCE);
    }

    // ---- suggestions and draft ----

    #[tokio::test(start_paused = true)]
    async fn test_select_suggestion_sets_draft_without_submitting() {
        let engine = engine();
        engine.select_suggestion("Property dispute resolution options");

        assert_eq!(engine.draft(), "Property dispute resolution options");
        assert!(engine.snapshot().turns.is_empty());
        assert!(!engine.snapshot().pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepted_submit_clears_draft() {
        let engine = engine();
        engine.select_suggestion("Property dispute resolution options");
        engine.submit(&engine.draft());

        assert!(engine.draft().is_empty());
        assert_eq!(engine.snapshot().turns.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_submit_keeps_draft() {
        let engine = engine();
        engine.submit("first consumer question");
        engine.select_suggestion("queued up next");
        engine.submit("rejected while pending");

        assert_eq!(engine.draft(), "queued up next");
    }

    // ---- observability ----

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_notified_on_append() {
        let engine = engine();
        let mut rx = engine.subscribe();
        engine.submit("tenant question");

        rx.changed().await.unwrap();
        let snap = rx.borrow_and_update().clone();
        assert_eq!(snap.turns.len(), 1);
        assert!(snap.pending);
    }
}
