use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use log::{debug, trace};
use ndarray::{arr1, Array1};
use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{
    Action, Env, EnvError, GridWorldObservation, Info, ObservationSpace, ResetOptions, SpaceInfo,
    SpaceTypeBounds, Transition,
};
use crate::utils::{l1_distance, l2_norm};

pub const WINDOW_SIZE: u32 = 512;
pub const RENDER_FPS: u32 = 4;
pub const DT: f64 = 0.1;
pub const MOVE_DRAIN_FACTOR: f64 = 0.5;
pub const REST_DRAIN_FACTOR: f64 = 0.1;
pub const GOAL_RADIUS: f64 = 0.5;
pub const INITIAL_TIME: f64 = 5.0;
pub const BATTERY_RANGE: Range<i64> = 50..100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Human,
    RgbArray,
}

impl RenderMode {
    pub const MODES: [&'static str; 2] = ["human", "rgb_array"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => Self::MODES[0],
            Self::RgbArray => Self::MODES[1],
        }
    }
}

impl FromStr for RenderMode {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(Self::Human),
            "rgb_array" => Ok(Self::RgbArray),
            other => Err(EnvError::UnsupportedRenderMode(other.to_string())),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction time settings. Nothing here changes once an environment is built.
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorldConfig {
    pub render_mode: Option<RenderMode>,
    /// Extent of the square world, also the number of cells across the window.
    pub size: f64,
    /// Report `truncated` once `time_remaining` runs out.
    pub truncate_on_time_limit: bool,
}

impl GridWorldConfig {
    pub fn new(render_mode: Option<&str>, size: f64) -> Result<Self, EnvError> {
        let render_mode = render_mode.map(RenderMode::from_str).transpose()?;
        let config = Self {
            render_mode,
            size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_time_limit(mut self, truncate_on_time_limit: bool) -> Self {
        self.truncate_on_time_limit = truncate_on_time_limit;
        self
    }

    pub fn validate(&self) -> Result<(), EnvError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(EnvError::InvalidSize(self.size));
        }
        Ok(())
    }
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self {
            render_mode: None,
            size: 20.0,
            truncate_on_time_limit: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeState {
    pub agent_location: Array1<f64>,
    pub target_location: Array1<f64>,
    pub agent_battery: f64,
    pub time_remaining: f64,
}

impl EpisodeState {
    pub fn new(agent: [f64; 2], target: [f64; 2], agent_battery: f64, time_remaining: f64) -> Self {
        Self {
            agent_location: arr1(&agent),
            target_location: arr1(&target),
            agent_battery,
            time_remaining,
        }
    }

    pub fn agent(&self) -> [f64; 2] {
        [self.agent_location[0], self.agent_location[1]]
    }

    pub fn target(&self) -> [f64; 2] {
        [self.target_location[0], self.target_location[1]]
    }

    /// Euclidean distance between agent and target.
    pub fn gap(&self) -> f64 {
        l2_norm(&(&self.target_location - &self.agent_location))
    }

    pub fn observation(&self) -> GridWorldObservation {
        GridWorldObservation::new(
            self.agent(),
            self.target(),
            self.agent_battery,
            self.time_remaining,
        )
    }

    pub fn info(&self) -> Info {
        Info::new(l1_distance(&self.agent_location, &self.target_location))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeStatus {
    Uninitialized,
    Running,
    Terminated,
}

/// Battery limited agent chasing a target over `[0, size)^2`.
#[derive(Debug, Clone)]
pub struct GridWorldEnv {
    size: f64,
    rng: StdRng,
    state: Option<EpisodeState>,
    status: EpisodeStatus,
}

impl GridWorldEnv {
    pub fn new(config: &GridWorldConfig) -> Result<Self, EnvError> {
        config.validate()?;
        Ok(Self {
            size: config.size,
            rng: StdRng::from_entropy(),
            state: None,
            status: EpisodeStatus::Uninitialized,
        })
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    pub fn state(&self) -> Option<&EpisodeState> {
        self.state.as_ref()
    }

    /// Replaces the live episode, e.g. to replay a known situation.
    pub fn set_state(&mut self, state: EpisodeState) {
        self.state = Some(state);
        self.status = EpisodeStatus::Running;
    }

    fn sample_episode(&mut self) -> EpisodeState {
        let position = Uniform::new(0.0, self.size);
        let agent_location = Array1::random_using(2, position, &mut self.rng);
        let agent_battery = self.rng.gen_range(BATTERY_RANGE) as f64;
        let target_location = Array1::random_using(2, position, &mut self.rng);
        EpisodeState {
            agent_location,
            target_location,
            agent_battery,
            time_remaining: INITIAL_TIME,
        }
    }

    /// Steps with a raw action code.
    ///
    /// Codes other than 0 and 1 neither move the agent nor drain the battery,
    /// but reward, termination and the clock are still evaluated.
    pub fn step_code(
        &mut self,
        code: i64,
    ) -> Result<Transition<GridWorldObservation>, EnvError> {
        self.advance(Action::try_from(code).ok())
    }

    fn advance(
        &mut self,
        action: Option<Action>,
    ) -> Result<Transition<GridWorldObservation>, EnvError> {
        let state = self.state.as_mut().ok_or(EnvError::EnvNotReady)?;
        if self.status == EpisodeStatus::Terminated {
            debug!("stepping an episode that already terminated");
        }

        let delta = &state.target_location - &state.agent_location;
        let gap = l2_norm(&delta);
        match action {
            Some(Action::Pursue) => {
                state.agent_location.scaled_add(DT, &delta);
                state.agent_battery -= MOVE_DRAIN_FACTOR * gap;
            }
            Some(Action::Rest) => {
                state.agent_battery -= REST_DRAIN_FACTOR;
            }
            None => trace!("unknown action code, agent holds position"),
        }

        // the goal test uses the distance from before the move
        let (reward, terminated) = if gap < GOAL_RADIUS {
            debug!("target reached at gap {:.3}", gap);
            (1, true)
        } else if state.agent_battery < 0.0 {
            debug!("battery exhausted at {:.3}", state.agent_battery);
            (-1, true)
        } else {
            (0, false)
        };

        let observation = state.observation();
        let info = state.info();
        state.time_remaining -= DT;

        if terminated {
            self.status = EpisodeStatus::Terminated;
        }
        Ok(Transition {
            observation,
            reward,
            terminated,
            truncated: false,
            info,
        })
    }
}

impl Env<GridWorldObservation, Action> for GridWorldEnv {
    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&ResetOptions>,
    ) -> (GridWorldObservation, Info) {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        if let Some(options) = options {
            trace!("ignoring {} reset option(s)", options.len());
        }
        let state = self.sample_episode();
        debug!(
            "new episode: agent {:?}, target {:?}, battery {}",
            state.agent(),
            state.target(),
            state.agent_battery
        );
        let result = (state.observation(), state.info());
        self.state = Some(state);
        self.status = EpisodeStatus::Running;
        result
    }

    fn step(&mut self, action: Action) -> Result<Transition<GridWorldObservation>, EnvError> {
        self.advance(Some(action))
    }

    fn observation_space(&self) -> ObservationSpace {
        let location = SpaceInfo::new(vec![
            SpaceTypeBounds::Continuous(0.0, self.size),
            SpaceTypeBounds::Continuous(0.0, self.size),
        ]);
        let scalar = SpaceInfo::new(vec![SpaceTypeBounds::Continuous(0.0, 100.0)]);
        let mut space = ObservationSpace::default();
        space.insert(GridWorldObservation::KEYS[0], location.clone());
        space.insert(GridWorldObservation::KEYS[1], location);
        space.insert(GridWorldObservation::KEYS[2], scalar.clone());
        space.insert(GridWorldObservation::KEYS[3], scalar);
        space
    }

    fn action_space(&self) -> SpaceInfo {
        SpaceInfo::new(vec![SpaceTypeBounds::Discrete(Action::RANGE)])
    }
}
