//! Game session
//!
//! Owns one simulation plus everything a host needs around it: the intent
//! queue, frame clock, best-score record, settings and storage. Hosts feed
//! it intents and animation timestamps; it never touches the platform
//! directly.

use crate::best_score::BestScore;
use crate::persistence::KeyValueStore;
use crate::platform::{FrameClock, FrameIntents, Intent, IntentQueue, Viewport};
use crate::renderer::{Surface, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, autopilot, start, tick};
use crate::tuning::Tuning;

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Events raised by the simulation this frame
    pub events: Vec<GameEvent>,
    /// Whether the host should schedule another frame
    pub keep_running: bool,
}

pub struct Session {
    state: GameState,
    intents: IntentQueue,
    clock: FrameClock,
    best: BestScore,
    settings: Settings,
    store: Box<dyn KeyValueStore>,
    /// Demo mode: the autopilot steers instead of the pointer
    pub autopilot: bool,
}

impl Session {
    /// Load best score, settings and tuning from `store`
    pub fn new(seed: u64, store: Box<dyn KeyValueStore>) -> Self {
        let tuning = Tuning::load(store.as_ref());
        let settings = Settings::load(store.as_ref());
        let best = BestScore::load(store.as_ref());

        let mut state = GameState::new(seed, tuning);
        state.best_score = best.value();

        Self {
            clock: FrameClock::new(state.tuning.max_frame_delta),
            state,
            intents: IntentQueue::new(),
            best,
            settings,
            store,
            autopilot: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace and persist settings
    pub fn set_settings(&mut self, settings: Settings) {
        if let Err(e) = settings.save(self.store.as_mut()) {
            log::warn!("Settings not saved: {e}");
        }
        self.settings = settings;
    }

    /// Queue an intent from an input handler; the next frame consumes it.
    ///
    /// `Start` is dropped while a run is in progress. Returns true when the
    /// host should schedule a frame to pick up a start.
    pub fn submit(&mut self, intent: Intent) -> bool {
        if intent == Intent::Start {
            if self.state.phase == GamePhase::Running {
                return false;
            }
            self.intents.push(intent);
            return true;
        }
        self.intents.push(intent);
        false
    }

    /// Run one animation frame: simulate, react to events, draw.
    ///
    /// `surface` is None when the host has nothing to draw on; the frame is
    /// then skipped entirely and the loop told to stop.
    pub fn frame(
        &mut self,
        now_ms: f64,
        surface: Option<&mut dyn Surface>,
        viewport: &Viewport,
    ) -> FrameReport {
        let Some(surface) = surface else {
            log::warn!("No drawing surface; frame skipped");
            return FrameReport::default();
        };

        let FrameIntents {
            start: wants_start,
            mut input,
        } = self.intents.drain();
        if wants_start && self.state.phase != GamePhase::Running {
            self.clock.reset();
            start(&mut self.state);
        }

        let dt = self.clock.delta(now_ms);
        if self.autopilot {
            input.target_x = autopilot::steer(&self.state).or(input.target_x);
        }
        tick(&mut self.state, &input, dt);

        let events = self.state.drain_events();
        for event in &events {
            self.on_event(*event);
        }

        draw_frame(surface, &self.state, viewport, now_ms, &self.settings);

        let flash = self.settings.effective_flash();
        FrameReport {
            keep_running: self.state.phase == GamePhase::Running,
            events: events
                .into_iter()
                .filter(|e| flash || !matches!(e, GameEvent::Flash { .. }))
                .collect(),
        }
    }

    fn on_event(&mut self, event: GameEvent) {
        if let GameEvent::Crashed { score } = event {
            if self.best.record(score, self.store.as_mut()) {
                log::info!("New best score: {score}");
            }
            self.state.best_score = self.best.value();
        }
    }
}
