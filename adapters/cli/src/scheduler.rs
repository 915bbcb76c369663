//! Periodic driver that ticks a [`Simulation`] while it is running.

use std::{thread, time::Duration};

use anyhow::Result;
use life_core::{Command, Event};
use life_world::{self as world, query, Simulation};

/// Source of the delay between ticks.
pub(crate) trait Pacer {
    /// Blocks for roughly `interval`.
    fn wait(&mut self, interval: Duration);
}

/// Paces ticks with real wall-clock sleeps.
#[derive(Debug, Default)]
pub(crate) struct ThreadSleep;

impl Pacer for ThreadSleep {
    fn wait(&mut self, interval: Duration) {
        thread::sleep(interval);
    }
}

/// Ticks as fast as possible.
#[derive(Debug, Default)]
pub(crate) struct Unpaced;

impl Pacer for Unpaced {
    fn wait(&mut self, _interval: Duration) {}
}

/// Summary of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RunOutcome {
    /// Generations computed during the run.
    pub(crate) generations: u64,
    /// Whether the run ended because the state stopped changing.
    pub(crate) settled: bool,
}

/// Drives the simulation for a bounded number of generations.
#[derive(Debug)]
pub(crate) struct Scheduler<P> {
    pacer: P,
    stop_when_settled: bool,
}

impl<P: Pacer> Scheduler<P> {
    pub(crate) fn new(pacer: P) -> Self {
        Self {
            pacer,
            stop_when_settled: false,
        }
    }

    /// Configures whether the run pauses once a tick leaves the state unchanged.
    pub(crate) fn stop_when_settled(mut self, enabled: bool) -> Self {
        self.stop_when_settled = enabled;
        self
    }

    /// Starts the simulation, ticks it up to `generations` times, then pauses it.
    ///
    /// `on_frame` observes the simulation after every tick together with the
    /// events that tick produced.
    pub(crate) fn run<F>(
        &mut self,
        simulation: &mut Simulation,
        generations: u64,
        mut on_frame: F,
    ) -> Result<RunOutcome>
    where
        F: FnMut(&Simulation, &[Event]) -> Result<()>,
    {
        let mut events = Vec::new();
        world::apply(simulation, Command::Start, &mut events)?;

        let ticked = self.tick_until_done(simulation, generations, &mut events, &mut on_frame);

        events.clear();
        world::apply(simulation, Command::Pause, &mut events)?;
        ticked
    }

    fn tick_until_done<F>(
        &mut self,
        simulation: &mut Simulation,
        generations: u64,
        events: &mut Vec<Event>,
        on_frame: &mut F,
    ) -> Result<RunOutcome>
    where
        F: FnMut(&Simulation, &[Event]) -> Result<()>,
    {
        let mut outcome = RunOutcome {
            generations: 0,
            settled: false,
        };
        while query::is_running(simulation) && outcome.generations < generations {
            if outcome.generations > 0 {
                self.pacer.wait(query::tick_interval(simulation));
            }

            let before = query::current_state(simulation).clone();
            events.clear();
            world::apply(simulation, Command::Tick, events)?;
            outcome.generations += 1;
            on_frame(simulation, events)?;

            if self.stop_when_settled && query::current_state(simulation) == &before {
                log::info!(
                    "state settled after {} generations",
                    query::iteration(simulation)
                );
                outcome.settled = true;
                break;
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::LifeState;

    #[derive(Debug, Default)]
    struct RecordingPacer {
        waits: Vec<Duration>,
    }

    impl Pacer for RecordingPacer {
        fn wait(&mut self, interval: Duration) {
            self.waits.push(interval);
        }
    }

    fn loaded(notation: &str) -> Simulation {
        let mut simulation = Simulation::default();
        let mut events = Vec::new();
        let state = LifeState::parse(notation).expect("state");
        world::apply(&mut simulation, Command::LoadState { state }, &mut events).expect("load");
        simulation
    }

    #[test]
    fn run_ticks_requested_generations_and_pauses() {
        let mut simulation = loaded("-----\n-----\n-***-\n-----\n-----");
        let mut scheduler = Scheduler::new(RecordingPacer::default());
        let mut frames = Vec::new();

        let outcome = scheduler
            .run(&mut simulation, 3, |simulation, events| {
                frames.push((query::iteration(simulation), events.to_vec()));
                Ok(())
            })
            .expect("run");

        assert_eq!(
            outcome,
            RunOutcome {
                generations: 3,
                settled: false
            }
        );
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2], (3, vec![Event::Iterated { iteration: 3 }]));
        assert_eq!(scheduler.pacer.waits.len(), 2);
        assert_eq!(scheduler.pacer.waits[0], query::tick_interval(&simulation));
        assert!(!query::is_running(&simulation));
    }

    #[test]
    fn run_stops_once_settled() {
        let mut simulation = loaded("----\n-**-\n-**-\n----");
        let mut scheduler = Scheduler::new(Unpaced).stop_when_settled(true);

        let outcome = scheduler
            .run(&mut simulation, 50, |_, _| Ok(()))
            .expect("run");

        assert_eq!(
            outcome,
            RunOutcome {
                generations: 1,
                settled: true
            }
        );
        assert_eq!(query::iteration(&simulation), 1);
    }

    #[test]
    fn frame_errors_abort_the_run() {
        let mut simulation = loaded("*");
        let mut scheduler = Scheduler::new(Unpaced);

        let result = scheduler.run(&mut simulation, 5, |_, _| anyhow::bail!("sink closed"));

        assert!(result.is_err());
        assert_eq!(query::iteration(&simulation), 1);
        assert!(!query::is_running(&simulation));
    }
}
