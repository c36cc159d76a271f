use log::debug;

use crate::env::{
    Action, Env, EnvError, EpisodeStatus, GridWorldConfig, GridWorldEnv, GridWorldObservation,
    Info, ObservationSpace, RenderMode, ResetOptions, SpaceInfo, Transition, RENDER_FPS,
    WINDOW_SIZE,
};
use crate::render::{Frame, Render, RenderError, Renderer};

/// Time below which the clock counts as run out.
const TIME_EPSILON: f64 = 1e-9;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Env(#[from] EnvError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Drives a [`GridWorldEnv`] the way a training loop expects.
///
/// Checks action codes against the declared action space before they reach
/// the simulation, and in human mode presents a frame after every reset and step.
pub struct GridWorldHost {
    config: GridWorldConfig,
    env: GridWorldEnv,
    renderer: Option<Renderer>,
}

impl GridWorldHost {
    pub fn new(config: GridWorldConfig) -> Result<Self, EnvError> {
        let env = GridWorldEnv::new(&config)?;
        let renderer = config
            .render_mode
            .map(|mode| Renderer::for_mode(mode, WINDOW_SIZE, RENDER_FPS));
        Ok(Self {
            config,
            env,
            renderer,
        })
    }

    pub fn config(&self) -> &GridWorldConfig {
        &self.config
    }

    pub fn env(&self) -> &GridWorldEnv {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut GridWorldEnv {
        &mut self.env
    }

    pub fn observation_space(&self) -> ObservationSpace {
        self.env.observation_space()
    }

    pub fn action_space(&self) -> SpaceInfo {
        self.env.action_space()
    }

    pub fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&ResetOptions>,
    ) -> Result<(GridWorldObservation, Info), HostError> {
        let result = self.env.reset(seed, options);
        self.present()?;
        Ok(result)
    }

    pub fn step(&mut self, code: i64) -> Result<Transition<GridWorldObservation>, HostError> {
        let action = Action::try_from(code)?;
        let mut transition = self.env.step(action)?;
        if self.config.truncate_on_time_limit && !transition.terminated {
            transition.truncated = self
                .env
                .state()
                .map_or(false, |s| s.time_remaining <= TIME_EPSILON);
            if transition.truncated {
                debug!("time limit reached");
            }
        }
        self.present()?;
        Ok(transition)
    }

    /// Current frame in `rgb_array` mode, `None` in every other mode.
    pub fn render(&mut self) -> Result<Option<Frame>, HostError> {
        if self.config.render_mode != Some(RenderMode::RgbArray) {
            return Ok(None);
        }
        match (self.renderer.as_mut(), self.env.state()) {
            (Some(renderer), Some(state)) => Ok(renderer.render(state, self.env.size())?),
            _ => Ok(None),
        }
    }

    pub fn close(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.close();
        }
    }

    /// Whether a human surface is currently held open.
    pub fn is_render_open(&self) -> bool {
        matches!(&self.renderer, Some(Renderer::Human(human)) if human.is_open())
    }

    pub fn status(&self) -> EpisodeStatus {
        self.env.status()
    }

    fn present(&mut self) -> Result<(), RenderError> {
        if self.config.render_mode != Some(RenderMode::Human) {
            return Ok(());
        }
        if let (Some(renderer), Some(state)) = (self.renderer.as_mut(), self.env.state()) {
            renderer.render(state, self.env.size())?;
        }
        Ok(())
    }
}

impl Drop for GridWorldHost {
    fn drop(&mut self) {
        self.close();
    }
}
