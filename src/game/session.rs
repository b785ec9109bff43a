use super::log::save_game_log;
use super::replay::{GameLogPlayer, ReplayStatus};
use super::scheduler::{Scheduler, TaskKind};
use super::{GameState, GameStatus};
use crate::core::{MoveRecord, PlayerId, PlayerKind, PlayerSlot, COLS};
use crate::display::{render_board, DisplayState};
use crate::logic;
use crate::network::BotClient;
use crate::player::BotController;
use crate::selfplay;
use crossterm::event::{self, Event, KeyCode};
use std::time::{Duration, Instant};

/// Simulated thinking time before a bot move lands.
const BOT_DELAY: Duration = Duration::from_millis(1000);
/// Cadence of log replay.
const REPLAY_TICK: Duration = Duration::from_millis(1000);
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Where a replayed game log comes from.
pub enum LogSource {
    /// The external simulation service.
    Service(BotClient),
    /// Local bot-vs-bot simulation.
    LocalSim,
    /// A previously saved log.
    File(Vec<MoveRecord>),
}

/// One interactive game session. Owns the single mutable `GameState` and
/// drives it from discrete events: key presses, the bot-delay timer, and the
/// replay tick. All scheduled work is cancelled on reset, and a fired timer
/// re-checks the state it was scheduled against before applying anything.
pub struct GameSession {
    state: GameState,
    slots: [PlayerSlot; 2],
    bots: [Option<Box<dyn BotController>>; 2],
    log_source: Option<LogSource>,
    replay: GameLogPlayer,
    scheduler: Scheduler,
    history: Vec<MoveRecord>,
    cursor_col: usize,
    status_msg: Option<String>,
    /// Set when the bot produced no move; cleared by Enter (manual
    /// re-trigger) or reset. No automatic retry.
    bot_stalled: bool,
}

impl GameSession {
    pub fn new(
        slots: [PlayerSlot; 2],
        bots: [Option<Box<dyn BotController>>; 2],
        log_source: Option<LogSource>,
    ) -> Self {
        GameSession {
            state: GameState::new(),
            slots,
            bots,
            log_source,
            replay: GameLogPlayer::new(),
            scheduler: Scheduler::new(),
            history: Vec::new(),
            cursor_col: COLS / 2,
            status_msg: None,
            bot_stalled: false,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        if self.log_source.is_some() {
            self.begin_replay().await;
        }

        loop {
            self.render();
            self.arm_scheduler();

            if event::poll(INPUT_POLL)? {
                if let Event::Key(key) = event::read()? {
                    if !self.handle_key(key.code).await {
                        break;
                    }
                }
            }

            if let Some(kind) = self.scheduler.poll(Instant::now()) {
                match kind {
                    TaskKind::BotThink(player) => self.bot_move(player).await,
                    TaskKind::ReplayTick => self.replay_tick(),
                }
            }
        }
        Ok(())
    }

    /// Returns false when the session should end.
    async fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('r') => self.reset().await,
            KeyCode::Char('s') => self.save_log(),
            KeyCode::Enter if self.bot_stalled => {
                self.bot_stalled = false;
                self.status_msg = None;
            }
            _ if self.human_may_move() => match code {
                KeyCode::Left => self.cursor_col = self.cursor_col.saturating_sub(1),
                KeyCode::Right => {
                    if self.cursor_col < COLS - 1 {
                        self.cursor_col += 1;
                    }
                }
                KeyCode::Enter => self.human_drop(self.cursor_col),
                KeyCode::Char(c @ '1'..='7') => {
                    let col = c as usize - '1' as usize;
                    self.cursor_col = col;
                    self.human_drop(col);
                }
                _ => {}
            },
            _ => {}
        }
        true
    }

    fn slot(&self, player: PlayerId) -> PlayerSlot {
        self.slots[player.index()]
    }

    /// Human input is only accepted while the game is live and the active
    /// slot is human-controlled; bot turns and replays ignore clicks.
    fn human_may_move(&self) -> bool {
        self.log_source.is_none()
            && self.state.status() == GameStatus::InProgress
            && self.slot(self.state.current_player()).kind == PlayerKind::Human
    }

    fn human_drop(&mut self, column: usize) {
        let player = self.state.current_player();
        match self.state.apply_move(player, column) {
            Ok(_) => {
                self.history.push(MoveRecord::new(player, column));
                self.status_msg = None;
            }
            Err(err) => self.status_msg = Some(err.to_string()),
        }
    }

    /// Applies a bot move after the thinking delay. The timer may be stale
    /// (reset pressed, turn changed), so everything it assumed is re-checked
    /// before any effect.
    async fn bot_move(&mut self, player: PlayerId) {
        if self.state.status() != GameStatus::InProgress
            || self.state.current_player() != player
            || self.slot(player).kind != PlayerKind::Bot
        {
            return;
        }

        let chosen = match &self.bots[player.index()] {
            Some(bot) => bot.choose_column(&self.state).await,
            None => return,
        };

        match chosen {
            Ok(column) => match self.state.apply_move(player, column) {
                Ok(_) => {
                    self.history.push(MoveRecord::new(player, column));
                    self.status_msg = None;
                }
                Err(err) => self.stall_bot(format!("{}: {}", player.label(), err)),
            },
            Err(err) => self.stall_bot(format!("{}: {}", player.label(), err)),
        }
    }

    fn stall_bot(&mut self, reason: String) {
        self.bot_stalled = true;
        self.status_msg = Some(format!("{} -- [Enter] retry, [r] restart", reason));
    }

    fn replay_tick(&mut self) {
        if let Some(note) = self.replay.step(&mut self.state) {
            self.status_msg = Some(note);
        }
        if self.replay.status() != ReplayStatus::Playing {
            self.scheduler.cancel_all();
        }
    }

    /// Arms the next suspension when nothing is pending: the replay tick
    /// while a log is playing, otherwise the bot thinking delay when the
    /// active slot is bot-controlled.
    fn arm_scheduler(&mut self) {
        if self.scheduler.has_pending() {
            return;
        }
        if self.replay.status() == ReplayStatus::Playing {
            self.scheduler
                .schedule_repeating(REPLAY_TICK, TaskKind::ReplayTick);
        } else if self.log_source.is_none()
            && !self.bot_stalled
            && self.state.status() == GameStatus::InProgress
            && self.slot(self.state.current_player()).kind == PlayerKind::Bot
        {
            self.scheduler
                .schedule_once(BOT_DELAY, TaskKind::BotThink(self.state.current_player()));
        }
    }

    /// Reset transition: cancel pending work first so no stale timer fires
    /// against the cleared board, then start over (fetching a fresh log for
    /// replayed sessions).
    async fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.bot_stalled = false;
        self.cursor_col = COLS / 2;
        self.history.clear();
        self.status_msg = None;
        self.state.reset();
        if self.log_source.is_some() {
            self.replay.stop();
            self.begin_replay().await;
        }
    }

    async fn begin_replay(&mut self) {
        self.status_msg = Some("Loading game...".to_string());
        self.render();

        let log = match self.log_source.as_ref() {
            Some(LogSource::Service(client)) => match client.simulate_game().await {
                Ok(log) => log,
                Err(err) => {
                    self.status_msg = Some(format!("{} -- [r] retry", err));
                    return;
                }
            },
            Some(LogSource::LocalSim) => {
                let (Some(p1), Some(p2)) = (&self.bots[0], &self.bots[1]) else {
                    return;
                };
                match selfplay::simulate_game(p1.as_ref(), p2.as_ref()).await {
                    Ok(log) => log,
                    Err(err) => {
                        self.status_msg = Some(format!("{} -- [r] retry", err));
                        return;
                    }
                }
            }
            Some(LogSource::File(moves)) => moves.clone(),
            None => return,
        };

        self.status_msg = None;
        self.replay.load(log);
    }

    fn save_log(&mut self) {
        if self.state.status() == GameStatus::InProgress
            && self.replay.status() != ReplayStatus::Finished
        {
            self.status_msg = Some("nothing to save yet".to_string());
            return;
        }
        let moves: Vec<MoveRecord> = if self.log_source.is_some() {
            self.replay.consumed().to_vec()
        } else {
            self.history.clone()
        };
        if moves.is_empty() {
            self.status_msg = Some("nothing to save yet".to_string());
            return;
        }
        match save_game_log(&moves, self.state.status()) {
            Ok(path) => self.status_msg = Some(format!("saved to {}", path.display())),
            Err(err) => self.status_msg = Some(format!("save failed: {}", err)),
        }
    }

    fn render(&self) {
        let mut ds = DisplayState::default();
        ds.cursor_col = self.human_may_move().then_some(self.cursor_col);
        ds.status_msg = self.status_msg.clone().or_else(|| self.default_status());
        ds.hint_msg = Some(self.hint_line());

        if self.state.status() == GameStatus::InProgress {
            ds.active = Some(self.state.current_player());
        }
        if let GameStatus::Won(_) = self.state.status() {
            if let Some((_, line)) = logic::winning_line(self.state.grid()) {
                ds.highlights = line.to_vec();
            }
        }

        render_board(self.state.grid(), &self.slots, &ds);
    }

    fn default_status(&self) -> Option<String> {
        match self.state.status() {
            GameStatus::Won(player) => Some(format!("{} wins!", player.label())),
            GameStatus::Draw => Some("It's a draw!".to_string()),
            GameStatus::InProgress => {
                if self.replay.status() == ReplayStatus::Playing {
                    let (done, total) = self.replay.progress();
                    Some(format!("Replaying bot game... move {}/{}", done, total))
                } else if let Some(TaskKind::BotThink(player)) = self.scheduler.pending_kind() {
                    Some(format!("{} is thinking...", player.label()))
                } else {
                    let player = self.state.current_player();
                    Some(format!("{}'s turn", player.label()))
                }
            }
        }
    }

    fn hint_line(&self) -> String {
        let mut hints = Vec::new();
        if self.human_may_move() {
            hints.push("[<-/->] aim");
            hints.push("[Enter/1-7] drop");
        }
        hints.push("[r] restart");
        if self.state.status() != GameStatus::InProgress
            || self.replay.status() == ReplayStatus::Finished
        {
            hints.push("[s] save log");
        }
        hints.push("[q] quit");
        hints.join("  ")
    }
}
