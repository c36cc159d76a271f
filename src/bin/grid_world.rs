use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use battery_grid_world::env::{GridWorldConfig, WINDOW_SIZE};
use battery_grid_world::policy::{EnumPolicy, Policy};
use battery_grid_world::render::save_frame;
use battery_grid_world::utils::{moving_average, plot_moving_average};
use battery_grid_world::GridWorldHost;
use kdam::{tqdm, BarExt};
use log::{error, info};
use plotters::style::{BLUE, GREEN};

extern crate structopt;

use structopt::StructOpt;

/// Run a controller on the battery grid world and report how its episodes end
#[derive(StructOpt, Debug)]
#[structopt(name = "RLRust - GridWorld")]
struct Cli {
    /// Number of episodes to run
    #[structopt(long = "n_episodes", short = "n", default_value = "1000")]
    n_episodes: u64,

    /// Seed for the first reset, later resets continue the same stream
    #[structopt(long = "seed")]
    seed: Option<u64>,

    /// Extent of the square world
    #[structopt(long = "size", default_value = "20")]
    size: f64,

    /// One of "human" or "rgb_array"
    #[structopt(long = "render_mode")]
    render_mode: Option<String>,

    /// Controller: random, pursue or battery
    #[structopt(long = "policy", default_value = "battery")]
    policy: String,

    /// End episodes as truncated once the clock runs out
    #[structopt(long = "truncate_on_time_limit")]
    truncate_on_time_limit: bool,

    /// Hard cap on steps per episode
    #[structopt(long = "max_steps", default_value = "1000")]
    max_steps: u64,

    /// Moving average window used for the reward plot
    #[structopt(long = "moving_average_window", default_value = "50")]
    moving_average_window: usize,

    /// Where to write the reward plot
    #[structopt(long = "plot", parse(from_os_str))]
    plot: Option<PathBuf>,

    /// Where to write a picture of the final state
    #[structopt(long = "snapshot", parse(from_os_str))]
    snapshot: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Outcomes {
    wins: u64,
    losses: u64,
    unfinished: u64,
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = GridWorldConfig::new(cli.render_mode.as_deref(), cli.size)?
        .with_time_limit(cli.truncate_on_time_limit);
    let mut host = GridWorldHost::new(config)?;
    let mut policy = EnumPolicy::from_name(&cli.policy, cli.seed).ok_or_else(|| {
        format!(
            "unknown policy `{}`, expected one of {:?}",
            cli.policy,
            EnumPolicy::NAMES
        )
    })?;

    let mut outcomes = Outcomes::default();
    let mut rewards: Vec<f64> = vec![];
    let mut lengths: Vec<f64> = vec![];

    let now = Instant::now();
    let mut pb = tqdm!(total = cli.n_episodes as usize);
    for episode in 0..cli.n_episodes {
        let seed = if episode == 0 { cli.seed } else { None };
        let (mut obs, _info) = host.reset(seed, None)?;
        let mut steps: u64 = 0;
        let mut epi_reward: i32 = 0;
        loop {
            steps += 1;
            let action = policy.get_action(&obs);
            let transition = host.step(action.into())?;
            obs = transition.observation;
            epi_reward += transition.reward;
            if transition.terminated {
                if transition.reward > 0 {
                    outcomes.wins += 1;
                } else {
                    outcomes.losses += 1;
                }
                break;
            }
            if transition.truncated || steps >= cli.max_steps {
                outcomes.unfinished += 1;
                break;
            }
        }
        rewards.push(epi_reward as f64);
        lengths.push(steps as f64);
        pb.set_postfix(format!(
            "wins={}, losses={}",
            outcomes.wins, outcomes.losses
        ));
        pb.update(1);
    }
    eprintln!();

    let total = cli.n_episodes.max(1) as f64;
    info!("{} episodes in {:.2?}", cli.n_episodes, now.elapsed());
    info!(
        "{} has win-rate of {:.3}, loss-rate of {:.3} and unfinished-rate of {:.3}",
        cli.policy,
        outcomes.wins as f64 / total,
        outcomes.losses as f64 / total,
        outcomes.unfinished as f64 / total
    );

    if let Some(path) = cli.plot.as_deref() {
        let window = cli.moving_average_window;
        plot_moving_average(
            path,
            &[moving_average(window, &rewards), moving_average(window, &lengths)],
            &[BLUE, GREEN],
            &["Reward", "Episode length"],
            &cli.policy,
        )?;
        info!("reward plot written to {}", path.display());
    }

    if let (Some(path), Some(state)) = (cli.snapshot.as_deref(), host.env().state()) {
        save_frame(path, state, host.env().size(), WINDOW_SIZE)?;
        info!("snapshot written to {}", path.display());
    }

    host.close();
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli: Cli = Cli::from_args();
    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}
