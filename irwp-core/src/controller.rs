//! Controller context
//!
//! Owns the system state, pattern engine, safety interlock and output
//! driver. The main loop calls [`Controller::poll`] once per iteration with
//! the current time and at most one decoded command. Each poll:
//!
//! 1. samples the safety inputs and enters emergency if the latch is set
//! 2. handles the command
//! 3. samples again and advances the pattern engine by one tick
//!
//! Once in emergency every later poll only re-asserts outputs off.

use heapless::{String, Vec};
use irwp_protocol::{
    Command, CommandKind, GroupPayload, Response, StatusRecord, PATTERN_NAME_LEN,
};

use crate::config::ControllerConfig;
use crate::pattern::{
    apply_group, ApplyOutcome, AttackPattern, CatalogEntry, PatternEngine, PatternError,
    TickOutcome,
};
use crate::safety::{SafetyInterlock, SafetyStatus};
use crate::state::{Event, SystemState, TransitionGuard};
use crate::traits::{InterlockSwitch, OutputDriver};

/// Most replies a single poll can produce
pub const MAX_RESPONSES: usize = 4;

/// Result of one controller iteration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Poll {
    /// Replies to send, in order
    pub responses: Vec<Response, MAX_RESPONSES>,
    /// System is in emergency; the caller should start the alert
    pub halted: bool,
    /// Cycling but held because the interlock is open
    pub frozen: bool,
}

impl Poll {
    fn push(&mut self, response: Response) {
        // Capacity covers the worst case: reply, cycle report, target report, emergency
        let _ = self.responses.push(response);
    }
}

/// Main-loop context
pub struct Controller<'l, O, S> {
    state: SystemState,
    engine: PatternEngine,
    interlock: SafetyInterlock<'l, S>,
    output: O,
    catalog: &'static [CatalogEntry],
    config: ControllerConfig,
}

impl<'l, O: OutputDriver, S: InterlockSwitch> Controller<'l, O, S> {
    /// Create a controller in `Idle` with outputs off
    pub fn new(
        config: ControllerConfig,
        mut output: O,
        interlock: SafetyInterlock<'l, S>,
        catalog: &'static [CatalogEntry],
    ) -> Self {
        output.all_off();
        Self {
            state: SystemState::Idle,
            engine: PatternEngine::new(config.flicker),
            interlock,
            output,
            catalog,
            config,
        }
    }

    /// Load a pattern restored from storage
    pub fn restore_pattern(
        &mut self,
        pattern: AttackPattern,
        now_ms: u32,
    ) -> Result<(), PatternError> {
        self.engine.load(pattern, now_ms)
    }

    pub fn state(&self) -> SystemState {
        self.state
    }

    pub fn engine(&self) -> &PatternEngine {
        &self.engine
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Run one loop iteration
    pub fn poll(&mut self, now_ms: u32, command: Option<Command>) -> Poll {
        let mut poll = Poll::default();

        if self.state.is_terminal() {
            self.output.all_off();
            poll.halted = true;
            return poll;
        }

        let safety = self.interlock.read();
        if safety.emergency_latched {
            self.enter_emergency(&mut poll);
            return poll;
        }

        if let Some(command) = command {
            self.handle_command(now_ms, command, safety, &mut poll);
            if self.state.is_terminal() {
                return poll;
            }
        }

        // The latch may have been set while the command ran
        let safety = self.interlock.read();
        if safety.emergency_latched {
            self.enter_emergency(&mut poll);
            return poll;
        }

        poll.frozen = self.state.playback_allowed() && !safety.interlock_engaged;

        let latch = self.interlock.latch();
        match self
            .engine
            .tick(now_ms, self.state, safety, &mut self.output, latch)
        {
            TickOutcome::CycleCompleted(n) => poll.push(Response::CycleComplete(n)),
            TickOutcome::TargetReached(n) => {
                poll.push(Response::CycleComplete(n));
                poll.push(Response::PatternComplete(n));
            }
            TickOutcome::BurstAborted => self.enter_emergency(&mut poll),
            TickOutcome::Gated | TickOutcome::Waiting | TickOutcome::Advanced => {}
        }

        poll
    }

    /// Snapshot for `GET_STATUS`
    fn status_from(&self, safety: SafetyStatus) -> StatusRecord {
        StatusRecord {
            state_code: self.state.code(),
            interlock_engaged: safety.interlock_engaged,
            armed: self.state.is_armed(),
            cycle: self.engine.completed_cycles(),
        }
    }

    fn enter_emergency(&mut self, poll: &mut Poll) {
        self.interlock.mark_emergency();
        self.state = SystemState::Emergency;
        self.output.all_off();
        poll.push(Response::EmergencyStopped);
        poll.halted = true;
    }

    fn handle_command(
        &mut self,
        now_ms: u32,
        command: Command,
        safety: SafetyStatus,
        poll: &mut Poll,
    ) {
        if let Some(event) = Event::from_command(&command) {
            self.handle_event(now_ms, event, command.kind(), safety, poll);
            return;
        }

        match command {
            Command::LoadPattern(index) => self.load_from_catalog(now_ms, index, poll),
            Command::SetGroup(payload) => self.set_group(payload, safety, poll),
            Command::GetStatus => poll.push(Response::Status(self.status_from(safety))),
            Command::Identify => poll.push(Response::Identity),
            Command::AllOff => self.output.all_off(),
            // State events were dispatched above
            Command::Arm
            | Command::Disarm
            | Command::StartCycle
            | Command::StopCycle
            | Command::Emergency => {}
        }
    }

    fn handle_event(
        &mut self,
        now_ms: u32,
        event: Event,
        kind: CommandKind,
        safety: SafetyStatus,
        poll: &mut Poll,
    ) {
        if event == Event::Emergency {
            self.enter_emergency(poll);
            return;
        }

        let guard = TransitionGuard {
            interlock_engaged: safety.interlock_engaged,
            pattern_loaded: self.engine.is_loaded(),
        };
        let Some(next) = self.state.transition(event, guard) else {
            poll.push(Response::Rejected(kind));
            return;
        };

        if event.forces_outputs_off() {
            self.output.all_off();
        }
        if event == Event::StartCycle {
            self.engine.restart(now_ms);
        }
        self.state = next;

        let reply = match event {
            Event::Arm => Response::Armed,
            Event::Disarm => Response::Disarmed,
            Event::StartCycle => Response::CycleStarted,
            Event::StopCycle => Response::CycleStopped,
            Event::Emergency => Response::EmergencyStopped,
        };
        poll.push(reply);
    }

    fn load_from_catalog(&mut self, now_ms: u32, index: u16, poll: &mut Poll) {
        let Some(entry) = self.catalog.get(usize::from(index)) else {
            poll.push(Response::Rejected(CommandKind::LoadPattern));
            return;
        };

        let loaded = entry.to_pattern().and_then(|pattern| {
            let name: String<PATTERN_NAME_LEN> = pattern.name().clone();
            self.engine.load(pattern, now_ms).map(|()| name)
        });

        match loaded {
            Ok(name) => poll.push(Response::PatternLoaded(name)),
            Err(_) => poll.push(Response::Rejected(CommandKind::LoadPattern)),
        }
    }

    fn set_group(&mut self, payload: GroupPayload, safety: SafetyStatus, poll: &mut Poll) {
        if !safety.interlock_engaged {
            poll.push(Response::Rejected(CommandKind::SetGroup));
            return;
        }

        let latch = self.interlock.latch();
        match apply_group(
            &mut self.output,
            payload.group,
            payload.intensity,
            &self.config.flicker,
            latch,
        ) {
            ApplyOutcome::Applied => poll.push(Response::GroupSet),
            ApplyOutcome::Aborted => self.enter_emergency(poll),
        }
    }
}
