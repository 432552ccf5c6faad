//! Input session controller.
//!
//! One session is one open → capture one keystroke → close cycle of the
//! mark overlay. The controller is the only owner of session state: there
//! is never more than one active session, and every exit path (jump,
//! dismissal, invalid key, failed open, forced reopen) tears the overlay
//! down.

use crate::config::OverlayConfig;
use crate::host::EditorHost;
use crate::overlay::OverlayView;

/// Jump semantics of the trigger prefix.
///
/// `` ` `` jumps to the mark's exact line and column; `'` jumps to the
/// start (first non-blank) of the mark's line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpStyle {
    Exact,
    Line,
}

impl JumpStyle {
    /// The trigger character carrying these semantics.
    pub const fn prefix(self) -> char {
        match self {
            Self::Exact => '`',
            Self::Line => '\'',
        }
    }

    pub const fn from_prefix(c: char) -> Option<Self> {
        match c {
            '`' => Some(Self::Exact),
            '\'' => Some(Self::Line),
            _ => None,
        }
    }
}

/// How a captured keystroke resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A navigation command was dispatched for this mark.
    Jumped(char),
    /// The session ended with no navigation side effect.
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Overlay created, waiting for the host to paint it.
    Opening,
    /// Painted; the next keystroke belongs to this session.
    AwaitingKey,
}

struct ActiveSession {
    view: OverlayView,
    style: JumpStyle,
    phase: Phase,
}

/// Orchestrates mark overlay sessions against a host.
///
/// Owned by the host's event loop; the loop paints a frame after `open`,
/// calls [`notify_painted`](Self::notify_painted), and routes the next key
/// event to [`handle_key`](Self::handle_key).
pub struct SessionController {
    config: OverlayConfig,
    active: Option<ActiveSession>,
}

impl SessionController {
    pub const fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the session has been painted and is waiting on a keystroke.
    pub fn is_awaiting_key(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|s| s.phase == Phase::AwaitingKey)
    }

    /// Start a session with the given prefix semantics.
    ///
    /// Any session already active is force-closed first, so at most one
    /// overlay exists afterwards. Returns `false` when no overlay was
    /// created (special buffer, or surface failure); the caller goes
    /// straight back to normal input handling and no key is captured.
    pub fn open<H: EditorHost + ?Sized>(&mut self, host: &mut H, style: JumpStyle) -> bool {
        self.close(host);

        let mut view = OverlayView::new();
        if !view.open(host, &self.config) {
            return false;
        }
        tracing::debug!(
            marks = view.cache().len(),
            trigger = %style.prefix(),
            "mark overlay session opened"
        );
        self.active = Some(ActiveSession {
            view,
            style,
            phase: Phase::Opening,
        });
        true
    }

    /// The host painted a frame; a session created before that paint may
    /// now capture input.
    pub fn notify_painted(&mut self) {
        if let Some(session) = &mut self.active {
            session.phase = Phase::AwaitingKey;
        }
    }

    /// Resume with the captured keystroke.
    ///
    /// Teardown is unconditional and precedes dispatch: the overlay closes
    /// no matter what the key is. The key is validated against the snapshot
    /// taken at open time, never a fresh query: the overlay showed a fixed
    /// list and navigation honors exactly that list.
    pub fn handle_key<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: Option<char>,
    ) -> SessionOutcome {
        let Some(mut session) = self.active.take() else {
            return SessionOutcome::Dismissed;
        };
        if session.phase == Phase::Opening {
            tracing::debug!("keystroke arrived before paint notification");
        }

        let names: Vec<char> = session.view.cache().iter().map(|m| m.name).collect();
        session.view.close(host);

        let Some(ch) = key else {
            return SessionOutcome::Dismissed;
        };
        if !ch.is_ascii_alphanumeric() {
            return SessionOutcome::Dismissed;
        }
        if !names.contains(&ch) {
            tracing::debug!(mark = %ch, "keystroke does not match a shown mark");
            return SessionOutcome::Dismissed;
        }

        match host.jump_to_mark(session.style, ch) {
            Ok(()) => SessionOutcome::Jumped(ch),
            Err(err) => {
                tracing::warn!(%err, mark = %ch, "jump dispatch failed");
                host.warn(&format!("jump failed: {err}"));
                SessionOutcome::Dismissed
            }
        }
    }

    /// Tear down the active session, if any. Idempotent.
    pub fn close<H: EditorHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(mut session) = self.active.take() {
            session.view.close(host);
        }
    }
}
