//! Pendulum swing-up.
use anyhow::{ensure, Result};
use episim_core::{ActionBounds, Env, Step};
use log::info;
use ndarray::{arr1, ArrayD};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const MAX_SPEED: f64 = 8.0;
const MAX_TORQUE: f64 = 2.0;
const DT: f64 = 0.05;
const MASS: f64 = 1.0;
const LENGTH: f64 = 1.0;

/// A continuous action.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuousAct(pub Vec<f32>);

impl episim_core::Act for ContinuousAct {}

impl From<Vec<f32>> for ContinuousAct {
    fn from(v: Vec<f32>) -> Self {
        Self(v)
    }
}

/// Configuration of [`Pendulum`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PendulumConfig {
    /// Episodes are truncated after this number of steps.
    pub max_steps: usize,

    /// Gravitational acceleration.
    pub g: f64,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            max_steps: 200,
            g: 10.0,
        }
    }
}

impl PendulumConfig {
    /// Sets the maximum number of steps of an episode.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the gravitational acceleration.
    pub fn g(mut self, v: f64) -> Self {
        self.g = v;
        self
    }
}

/// An inverted pendulum starting at a random angle.
///
/// The observation is `[cos(theta), sin(theta), theta_dot]` and the action is the
/// torque in `[-2, 2]` applied to the joint. The reward
/// `-(theta^2 + 0.1 * theta_dot^2 + 0.001 * torque^2)` is maximal (zero) when the
/// pendulum stands still upright.
pub struct Pendulum {
    config: PendulumConfig,
    rng: fastrand::Rng,
    th: f64,
    thdot: f64,
    t: usize,
    last_u: f64,
}

fn angle_normalize(x: f64) -> f64 {
    (x + PI).rem_euclid(2.0 * PI) - PI
}

impl Pendulum {
    fn obs(&self) -> ArrayD<f64> {
        arr1(&[self.th.cos(), self.th.sin(), self.thdot]).into_dyn()
    }
}

impl Env for Pendulum {
    type Config = PendulumConfig;
    type Obs = ArrayD<f64>;
    type Act = ContinuousAct;
    type Info = ();

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        ensure!(config.max_steps > 0, "max_steps must be at least 1");
        Ok(Self {
            config: config.clone(),
            rng: fastrand::Rng::with_seed(seed as u64),
            th: 0.0,
            thdot: 0.0,
            t: 0,
            last_u: 0.0,
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.th = PI * (2.0 * self.rng.f64() - 1.0);
        self.thdot = 2.0 * self.rng.f64() - 1.0;
        self.t = 0;
        self.last_u = 0.0;
        Ok(self.obs())
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        ensure!(a.0.len() == 1, "expected a 1-dimensional action, got {:?}", a);
        let u = (a.0[0] as f64).max(-MAX_TORQUE).min(MAX_TORQUE);
        let (th, thdot, g) = (self.th, self.thdot, self.config.g);

        let cost = angle_normalize(th).powi(2) + 0.1 * thdot.powi(2) + 0.001 * u.powi(2);
        let thdot = thdot
            + (3.0 * g / (2.0 * LENGTH) * th.sin() + 3.0 / (MASS * LENGTH.powi(2)) * u) * DT;
        self.thdot = thdot.max(-MAX_SPEED).min(MAX_SPEED);
        self.th = th + self.thdot * DT;
        self.last_u = u;
        self.t += 1;

        let is_truncated = self.t >= self.config.max_steps;
        Ok(Step::new(
            self.obs(),
            a.clone(),
            -cost as f32,
            false,
            is_truncated,
            (),
        ))
    }

    fn action_bounds(&self) -> ActionBounds {
        ActionBounds::new(vec![-MAX_TORQUE as f32], vec![MAX_TORQUE as f32])
    }

    fn sample_action(&mut self) -> Self::Act {
        let u = MAX_TORQUE * (2.0 * self.rng.f64() - 1.0);
        ContinuousAct(vec![u as f32])
    }

    fn render(&mut self) -> Result<()> {
        // Angle 0 is upright, drawn in the middle of the gauge
        const WIDTH: usize = 41;
        let pos = (angle_normalize(self.th) + PI) / (2.0 * PI) * (WIDTH - 1) as f64;
        let mut gauge = vec!['-'; WIDTH];
        gauge[WIDTH / 2] = '|';
        gauge[(pos.round() as usize).min(WIDTH - 1)] = 'o';
        info!(
            "[{}] t = {:3}, theta = {:+.3}, torque = {:+.3}",
            gauge.into_iter().collect::<String>(),
            self.t,
            angle_normalize(self.th),
            self.last_u
        );
        Ok(())
    }
}
