mod action;
mod grid_world;
mod observation;
mod space;

use indexmap::IndexMap;
use fxhash::FxBuildHasher;

pub use action::Action;
pub use grid_world::{
    EpisodeState, EpisodeStatus, GridWorldConfig, GridWorldEnv, RenderMode, BATTERY_RANGE, DT,
    GOAL_RADIUS, INITIAL_TIME, MOVE_DRAIN_FACTOR, RENDER_FPS, REST_DRAIN_FACTOR, WINDOW_SIZE,
};
pub use observation::{GridWorldObservation, Info, ObsValue};
pub use space::{ObservationSpace, SpaceInfo, SpaceType, SpaceTypeBounds};

/// Insertion ordered map used for observations, infos and reset options.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Extra arguments accepted by `reset`. The grid world ignores them.
pub type ResetOptions = FxIndexMap<String, f64>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnvError {
    #[error("environment must be reset before it can be stepped")]
    EnvNotReady,
    #[error("unsupported render mode `{0}`, expected one of \"human\" or \"rgb_array\"")]
    UnsupportedRenderMode(String),
    #[error("grid size must be a positive finite number, got {0}")]
    InvalidSize(f64),
    #[error("action {0} is not a member of the action space")]
    InvalidAction(i64),
}

/// Result of a single `step` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    pub observation: T,
    pub reward: i32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: Info,
}

pub trait Env<T, A> {
    fn reset(&mut self, seed: Option<u64>, options: Option<&ResetOptions>) -> (T, Info);
    fn step(&mut self, action: A) -> Result<Transition<T>, EnvError>;
    fn observation_space(&self) -> ObservationSpace;
    fn action_space(&self) -> SpaceInfo;
}
