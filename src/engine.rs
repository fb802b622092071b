use crate::domain::{CompletedTimer, CreateTimerInput, Timer, TimerState};
use crate::persistence::TimerStore;
use crate::ticker::Ticker;
use anyhow::Result;
use chrono::Local;
use std::time::Instant;
use uuid::Uuid;

/// Typed failure of an engine command
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid timer: {0}")]
    Validation(String),
    #[error("no timer with id {0}")]
    NotFound(Uuid),
    #[error("timer \"{0}\" has already completed")]
    AlreadyCompleted(String),
    #[error("failed to persist timer state: {0}")]
    Persistence(#[from] anyhow::Error),
}

/// Event emitted by the tick loop for the notification sink
///
/// The engine only reports these; how they are presented (sound, haptic,
/// desktop notification) is the caller's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A timer crossed its configured progress percentage
    Alert {
        timer_id: Uuid,
        name: String,
        alert_percentage: u8,
    },
    /// A timer ran to zero
    Completed { timer_id: Uuid, name: String },
}

/// The timer engine: canonical owner of the live timer list and the
/// completed-timer history
///
/// All mutations funnel through `&mut self` methods, so tick and command
/// writes are fully ordered. Every mutation writes a full snapshot of the
/// changed collections before reporting success; a failed write keeps the
/// in-memory change, leaves the dirty flag set and is retried by the next
/// persisting operation.
///
/// `now` parameters are the wall-clock instant the command applies at; the
/// TUI passes `Instant::now()`, tests pass synthetic instants.
pub struct TimerEngine {
    timers: Vec<Timer>,
    history: Vec<CompletedTimer>,
    store: TimerStore,
    ticker: Ticker,
    timers_dirty: bool,
    history_dirty: bool,
}

impl TimerEngine {
    /// Load both collections from the store
    ///
    /// Missing files load as empty lists. Loaded records are normalized and
    /// persisted Running timers are coerced to Paused: nothing ran while the
    /// process was down, so they resume from the last persisted remaining
    /// time.
    pub fn load(store: TimerStore) -> Result<Self> {
        let mut timers = store.load_timers()?;
        let history = store.load_history()?;

        for timer in &mut timers {
            timer.normalize();
            timer.coerce_running_to_paused();
        }

        Ok(Self {
            timers,
            history,
            store,
            ticker: Ticker::new(),
            timers_dirty: false,
            history_dirty: false,
        })
    }

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn history(&self) -> &[CompletedTimer] {
        &self.history
    }

    pub fn find(&self, id: Uuid) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id == id)
    }

    /// Whether the shared tick loop is currently scheduled
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    /// Create a new idle timer
    pub fn create(&mut self, input: CreateTimerInput) -> Result<Uuid, EngineError> {
        if input.name.trim().is_empty() {
            return Err(EngineError::Validation("timer name cannot be empty".to_string()));
        }
        let total = input.total_seconds();
        if total == 0 {
            return Err(EngineError::Validation(
                "duration must be greater than zero".to_string(),
            ));
        }
        if total > u64::from(u32::MAX) {
            return Err(EngineError::Validation(
                "duration is too large".to_string(),
            ));
        }
        if let Some(pct) = input.alert_percentage {
            if pct > 100 {
                return Err(EngineError::Validation(format!(
                    "alert percentage must be between 0 and 100, got {}",
                    pct
                )));
            }
        }

        let timer = Timer::new(input);
        let id = timer.id;
        self.timers.push(timer);
        self.timers_dirty = true;
        self.persist()?;
        Ok(id)
    }

    /// Toggle a timer between running and paused
    ///
    /// Completed timers are rejected: there is nothing left to run and reset
    /// is the only way out of that state.
    pub fn toggle(&mut self, id: Uuid, now: Instant) -> Result<(), EngineError> {
        let timer = self.find_mut(id)?;
        if !timer.state.is_toggleable() {
            return Err(EngineError::AlreadyCompleted(timer.name.clone()));
        }

        match timer.state {
            TimerState::Running => timer.pause(),
            _ => timer.start(),
        }

        self.timers_dirty = true;
        self.sync_ticker(now);
        self.persist()
    }

    /// Reset a timer to idle with its full duration, from any state
    pub fn reset(&mut self, id: Uuid, now: Instant) -> Result<(), EngineError> {
        self.find_mut(id)?.reset();
        self.timers_dirty = true;
        self.sync_ticker(now);
        self.persist()
    }

    /// Delete a timer; its history entries stay
    pub fn delete(&mut self, id: Uuid, now: Instant) -> Result<(), EngineError> {
        let pos = self
            .timers
            .iter()
            .position(|t| t.id == id)
            .ok_or(EngineError::NotFound(id))?;
        self.timers.remove(pos);
        self.timers_dirty = true;
        self.sync_ticker(now);
        self.persist()
    }

    /// Start every target timer; one combined persistence write
    ///
    /// Validated up front: an unknown or completed target rejects the whole
    /// batch before anything is touched. Already-running targets are left
    /// alone.
    pub fn start_many(&mut self, ids: &[Uuid], now: Instant) -> Result<(), EngineError> {
        for id in ids {
            let timer = self.find(*id).ok_or(EngineError::NotFound(*id))?;
            if !timer.state.is_toggleable() {
                return Err(EngineError::AlreadyCompleted(timer.name.clone()));
            }
        }

        for timer in self.timers.iter_mut().filter(|t| ids.contains(&t.id)) {
            timer.start();
        }
        self.timers_dirty = true;
        self.sync_ticker(now);
        self.persist()
    }

    /// Pause every target timer; one combined persistence write
    ///
    /// Targets that are not running are left alone.
    pub fn pause_many(&mut self, ids: &[Uuid], now: Instant) -> Result<(), EngineError> {
        self.ensure_all_exist(ids)?;

        for timer in self.timers.iter_mut().filter(|t| ids.contains(&t.id)) {
            timer.pause();
        }
        self.timers_dirty = true;
        self.sync_ticker(now);
        self.persist()
    }

    /// Reset every target timer; one combined persistence write
    pub fn reset_many(&mut self, ids: &[Uuid], now: Instant) -> Result<(), EngineError> {
        self.ensure_all_exist(ids)?;

        for timer in self.timers.iter_mut().filter(|t| ids.contains(&t.id)) {
            timer.reset();
        }
        self.timers_dirty = true;
        self.sync_ticker(now);
        self.persist()
    }

    /// Remove completed timers from the live list; history is untouched
    pub fn clear_completed(&mut self, now: Instant) -> Result<(), EngineError> {
        self.timers.retain(|t| t.remaining > 0);
        self.timers_dirty = true;
        self.sync_ticker(now);
        self.persist()
    }

    /// Empty the completed-timer history log
    pub fn clear_history(&mut self) -> Result<(), EngineError> {
        self.history.clear();
        self.history_dirty = true;
        self.persist()
    }

    /// Delete every live timer; history is untouched
    pub fn delete_all(&mut self, now: Instant) -> Result<(), EngineError> {
        self.timers.clear();
        self.timers_dirty = true;
        self.sync_ticker(now);
        self.persist()
    }

    /// Advance every due logical tick and return the emitted events
    ///
    /// Polls the ticker for whole elapsed seconds and replays each as one
    /// tick, so a slow poll never loses time. Events are returned even when
    /// the snapshot write fails; the write outcome is reported alongside.
    pub fn tick_due(&mut self, now: Instant) -> (Vec<TimerEvent>, Result<(), EngineError>) {
        let steps = self.ticker.poll(now);
        let mut events = Vec::new();
        let mut changed = false;

        for _ in 0..steps {
            changed |= self.tick_once(&mut events);
        }

        self.sync_ticker(now);

        if changed {
            self.timers_dirty = true;
            (events, self.persist())
        } else {
            (events, Ok(()))
        }
    }

    /// One logical one-second tick over all running timers
    fn tick_once(&mut self, events: &mut Vec<TimerEvent>) -> bool {
        let completed_at = Local::now();
        let mut changed = false;

        for timer in &mut self.timers {
            if !timer.is_running() {
                continue;
            }
            changed = true;
            timer.remaining = timer.remaining.saturating_sub(1);

            if let Some(pct) = timer.alert_percentage {
                if !timer.alert_fired && timer.percentage_completed() == pct {
                    timer.alert_fired = true;
                    events.push(TimerEvent::Alert {
                        timer_id: timer.id,
                        name: timer.name.clone(),
                        alert_percentage: pct,
                    });
                }
            }

            if timer.remaining == 0 {
                timer.state = TimerState::Completed;
                timer.completed_at = Some(completed_at);
                self.history
                    .insert(0, CompletedTimer::snapshot(timer, completed_at));
                self.history_dirty = true;
                events.push(TimerEvent::Completed {
                    timer_id: timer.id,
                    name: timer.name.clone(),
                });
            }
        }

        changed
    }

    /// Start the ticker when any timer runs, stop it once none do
    fn sync_ticker(&mut self, now: Instant) {
        if self.timers.iter().any(Timer::is_running) {
            self.ticker.start(now);
        } else {
            self.ticker.stop();
        }
    }

    fn find_mut(&mut self, id: Uuid) -> Result<&mut Timer, EngineError> {
        self.timers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(EngineError::NotFound(id))
    }

    fn ensure_all_exist(&self, ids: &[Uuid]) -> Result<(), EngineError> {
        for id in ids {
            self.find(*id).ok_or(EngineError::NotFound(*id))?;
        }
        Ok(())
    }

    /// Write dirty collections through to the store
    ///
    /// Dirty flags are cleared only on success, so a failed write is retried
    /// by whichever persisting operation comes next.
    fn persist(&mut self) -> Result<(), EngineError> {
        if self.timers_dirty {
            self.store.save_timers(&self.timers)?;
            self.timers_dirty = false;
        }
        if self.history_dirty {
            self.store.save_history(&self.history)?;
            self.history_dirty = false;
        }
        Ok(())
    }
}
