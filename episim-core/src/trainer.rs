//! Train [`Agent`].
mod config;
mod history;
use crate::{
    record::{Record, RecordValue, Recorder},
    Agent, ConvergenceTracker, Env, EpisodeRunner, ExperienceBufferBase,
};
use anyhow::Result;
use chrono::Local;
pub use config::TrainerConfig;
pub use history::TrainingHistory;
use log::{debug, info};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the training loop.
///
/// # Training loop
///
/// 0. Given an environment implementing [`Env`], an agent implementing [`Agent`],
///    an [`EpisodeRunner`] and a [`Recorder`].
/// 1. Initialize the episode counter `episode = 0` and a [`ConvergenceTracker`]
///    over `process_average_over` episodes, whose rolling mean is `-inf`.
/// 2. If `rolling_mean >= target_score` or `episode == max_episodes`, finish.
/// 3. Run an episode with the runner, rendering it if the episode is in an
///    inspection window (see [`Trainer::is_inspection_episode`]).
/// 4. Push the transitions of the episode into the memory of the agent and
///    call [`Agent::learn_end_episode`].
/// 5. Record the return of the episode in the tracker and the
///    [`TrainingHistory`], call [`Agent::report_progress`], close the
///    environment and write a [`Record`] to the recorder.
/// 6. `episode += 1` and back to step 2.
///
/// Any error aborts the training run.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|Env::Obs|C[StateCompositor]
///     C -->|State|A
///     C -->|Transition|D[Agent memory]
///     B -->|episode return|E[ConvergenceTracker]
///     E -->|rolling mean|F[Trainer]
/// ```
pub struct Trainer {
    /// Training stops when the rolling mean reaches this value.
    target_score: f32,

    /// The maximum number of episodes.
    max_episodes: usize,

    /// Size of the window of the rolling mean.
    process_average_over: usize,

    /// Period of the inspection windows in episodes.
    test_every: usize,

    /// The number of rendered episodes in each inspection window.
    test_on: usize,
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            target_score: config.target_score,
            max_episodes: config.max_episodes,
            process_average_over: config.process_average_over,
            test_every: config.test_every,
            test_on: config.test_on,
        })
    }

    /// Returns `true` if the episode of the given (0-based) index is rendered.
    ///
    /// Counting episodes from 1, the first `test_on` episodes of every period of
    /// `test_every` episodes are rendered, except for the very first window.
    pub fn is_inspection_episode(&self, episode: usize) -> bool {
        if self.test_on == 0 {
            return false;
        }
        let n = episode + 1;
        n > self.test_on && n % self.test_every < self.test_on
    }

    /// Runs a training episode, returning its return and a record.
    ///
    /// Transitions are pushed into the memory of the agent, followed by the
    /// learning step.
    pub fn train_episode<E, A>(
        &self,
        env: &mut E,
        agent: &mut A,
        runner: &EpisodeRunner,
        visualize: bool,
    ) -> Result<(f32, Record)>
    where
        E: Env,
        A: Agent<E>,
    {
        let episode = runner.run(env, agent, true, visualize)?;
        let n_steps = episode.len();
        let memory = agent.memory();
        for transition in episode.transitions {
            memory.push(transition)?;
        }
        let mut record = agent.learn_end_episode()?;
        record.insert("episode_steps", RecordValue::Scalar(n_steps as f32));
        Ok((episode.episode_return, record))
    }

    /// Train the agent.
    ///
    /// A run which does not reach the target score within `max_episodes` is not
    /// an error; see [`TrainingHistory::is_converged`].
    pub fn train<E, A>(
        &self,
        env: &mut E,
        agent: &mut A,
        runner: &EpisodeRunner,
        recorder: &mut dyn Recorder,
    ) -> Result<TrainingHistory>
    where
        E: Env,
        A: Agent<E>,
    {
        info!("{:-^100}", " Training ");
        let mut tracker = ConvergenceTracker::new(self.process_average_over)?;
        let mut history = TrainingHistory::with_capacity(self.target_score, self.max_episodes);
        let mut rolling_mean = tracker.current_mean();
        let mut episode = 0;

        while rolling_mean < self.target_score && episode < self.max_episodes {
            let visualize = self.is_inspection_episode(episode);
            let (episode_return, mut record) =
                self.train_episode(env, agent, runner, visualize)?;

            tracker.record(episode_return);
            rolling_mean = tracker.current_mean();
            history.push(episode_return, rolling_mean);
            agent.report_progress(episode, self.max_episodes, episode_return, rolling_mean);
            env.close();
            debug!(
                "episode {}: return = {}, rolling mean = {}",
                episode, episode_return, rolling_mean
            );

            record.insert("episode", RecordValue::Scalar(episode as f32));
            record.insert("episode_return", RecordValue::Scalar(episode_return));
            record.insert("rolling_mean", RecordValue::Scalar(rolling_mean));
            record.insert("datetime", RecordValue::DateTime(Local::now()));
            recorder.write(record);
            episode += 1;
        }
        recorder.flush();
        info!("{:-^100}", " Training Done ");

        if history.is_converged() {
            info!(
                "Reached the target score {} after {} episodes",
                self.target_score, episode
            );
        } else {
            info!(
                "Did not reach the target score {} within {} episodes (rolling mean = {})",
                self.target_score, episode, rolling_mean
            );
        }

        Ok(history)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        dummy::{ScriptedAgent, ScriptedEnv, ScriptedEnvConfig},
        record::BufferedRecorder,
        ActionBounds, AgentConfig, Configurable, StateCompositor,
    };

    fn setup(episodes: Vec<Vec<f32>>) -> Result<(ScriptedEnv, ScriptedAgent, EpisodeRunner)> {
        let env = ScriptedEnv::build(&ScriptedEnvConfig::new(episodes), 0)?;
        let bounds = ActionBounds::new(vec![-1.0], vec![1.0]);
        let agent = ScriptedAgent::build(&[4], &bounds, AgentConfig::default(), 0)?;
        let runner = EpisodeRunner::new(StateCompositor::new(1)?);
        Ok((env, agent, runner))
    }

    #[test]
    fn test_non_convergent_run() -> Result<()> {
        let (mut env, mut agent, runner) = setup(vec![
            vec![2.0],
            vec![1.0, 3.0],
            vec![6.0],
            vec![4.0, 4.0],
            vec![5.0, 5.0],
        ])?;
        let trainer = Trainer::build(
            TrainerConfig::default()
                .target_score(10.0)
                .max_episodes(5)
                .process_average_over(5),
        )?;
        let mut recorder = BufferedRecorder::new();
        let history = trainer.train(&mut env, &mut agent, &runner, &mut recorder)?;

        assert_eq!(history.scores(), &[2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(history.rolling_means(), &[2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(!history.is_converged());
        assert_eq!(agent.n_learns, 5);
        assert_eq!(agent.n_transitions, 8);
        assert_eq!(env.n_closes, 5);
        assert_eq!(agent.progress.borrow().len(), 5);

        assert_eq!(recorder.len(), 5);
        let last = recorder.iter().last().unwrap();
        assert_eq!(last.get_scalar("episode")?, 4.0);
        assert_eq!(last.get_scalar("rolling_mean")?, 6.0);
        assert_eq!(last.get_scalar("episode_steps")?, 2.0);
        assert_eq!(last.get_scalar("n_transitions")?, 2.0);
        Ok(())
    }

    #[test]
    fn test_stops_at_first_convergent_episode() -> Result<()> {
        let (mut env, mut agent, runner) = setup(vec![vec![1.0], vec![3.0], vec![8.0]])?;
        let trainer = Trainer::build(
            TrainerConfig::default()
                .target_score(4.0)
                .max_episodes(100)
                .process_average_over(3),
        )?;
        let history = trainer.train(&mut env, &mut agent, &runner, &mut BufferedRecorder::new())?;

        // Rolling means are 1, 2, 4
        assert_eq!(history.len(), 3);
        assert_eq!(history.last_rolling_mean(), Some(4.0));
        assert!(history.is_converged());
        Ok(())
    }

    #[test]
    fn test_zero_episodes() -> Result<()> {
        let (mut env, mut agent, runner) = setup(vec![vec![1.0]])?;
        let trainer = Trainer::build(TrainerConfig::default().max_episodes(0))?;
        let history = trainer.train(&mut env, &mut agent, &runner, &mut BufferedRecorder::new())?;
        assert!(history.is_empty());
        assert!(!history.is_converged());
        Ok(())
    }

    #[test]
    fn test_inspection_episodes() -> Result<()> {
        let trainer = Trainer::build(TrainerConfig::default().test_every(5).test_on(2))?;
        let selected: Vec<usize> = (0..16).filter(|&e| trainer.is_inspection_episode(e)).collect();
        // Episodes 5, 6, 10, 11, 15, 16 counting from 1
        assert_eq!(selected, vec![4, 5, 9, 10, 14, 15]);

        let trainer = Trainer::build(TrainerConfig::default().test_on(0))?;
        assert!((0..100).all(|e| !trainer.is_inspection_episode(e)));
        Ok(())
    }

    #[test]
    fn test_rendered_episodes() -> Result<()> {
        let (mut env, mut agent, runner) = setup(vec![vec![0.0, 0.0]])?;
        let trainer = Trainer::build(
            TrainerConfig::default()
                .max_episodes(12)
                .test_every(4)
                .test_on(1),
        )?;
        trainer.train(&mut env, &mut agent, &runner, &mut BufferedRecorder::new())?;
        // Episodes 4, 8, 12 counting from 1
        assert_eq!(env.rendered_episodes, vec![3, 7, 11]);
        Ok(())
    }

    #[test]
    fn test_collaborator_error_aborts_run() -> Result<()> {
        let mut config = ScriptedEnvConfig::new(vec![vec![1.0, 1.0]]);
        config.fail_on_episode = Some(2);
        let mut env = ScriptedEnv::build(&config, 0)?;
        let bounds = ActionBounds::new(vec![-1.0], vec![1.0]);
        let mut agent = ScriptedAgent::build(&[4], &bounds, AgentConfig::default(), 0)?;
        let runner = EpisodeRunner::new(StateCompositor::new(1)?);
        let trainer = Trainer::build(TrainerConfig::default().max_episodes(10))?;
        let mut recorder = BufferedRecorder::new();

        assert!(trainer
            .train(&mut env, &mut agent, &runner, &mut recorder)
            .is_err());
        assert_eq!(agent.n_learns, 2);
        assert_eq!(recorder.len(), 2);
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        assert!(Trainer::build(TrainerConfig::default().test_every(3).test_on(4)).is_err());
    }
}
