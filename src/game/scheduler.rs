use crate::core::PlayerId;
use std::time::{Duration, Instant};

/// What a fired timer should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// One-shot "thinking" delay before a bot move is applied.
    BotThink(PlayerId),
    /// Recurring tick that advances a log replay.
    ReplayTick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token(u64);

#[derive(Debug)]
struct Pending {
    token: Token,
    kind: TaskKind,
    due: Instant,
    repeat: Option<Duration>,
}

/// Single-slot timer for the session loop. Holding at most one pending task
/// keeps the two suspension kinds (bot delay, replay tick) from overlapping,
/// and a cancelled token can never fire against a board it was not scheduled
/// for.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Option<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler::default()
    }

    pub fn schedule_once(&mut self, delay: Duration, kind: TaskKind) -> Token {
        self.arm(delay, kind, None)
    }

    pub fn schedule_repeating(&mut self, interval: Duration, kind: TaskKind) -> Token {
        self.arm(interval, kind, Some(interval))
    }

    fn arm(&mut self, delay: Duration, kind: TaskKind, repeat: Option<Duration>) -> Token {
        self.next_id += 1;
        let token = Token(self.next_id);
        self.pending = Some(Pending {
            token,
            kind,
            due: Instant::now() + delay,
            repeat,
        });
        token
    }

    pub fn cancel(&mut self, token: Token) {
        if self.pending.as_ref().map(|p| p.token) == Some(token) {
            self.pending = None;
        }
    }

    pub fn cancel_all(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_kind(&self) -> Option<TaskKind> {
        self.pending.as_ref().map(|p| p.kind)
    }

    /// Fires the pending task if it is due at `now`. A repeating task is
    /// re-armed with the same token, a one-shot task is consumed.
    pub fn poll(&mut self, now: Instant) -> Option<TaskKind> {
        let due = self.pending.as_ref().map_or(false, |p| now >= p.due);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        if let Some(interval) = pending.repeat {
            self.pending = Some(Pending {
                due: now + interval,
                ..pending
            });
        }
        Some(pending.kind)
    }
}
