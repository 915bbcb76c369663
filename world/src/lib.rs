#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state management for Life.
//!
//! [`Simulation`] owns the current state, the snapshot restored by `reset`,
//! the iteration counter, the active geometry, and the tick cadence. It never
//! schedules itself: an external driver calls [`Simulation::tick`] while the
//! simulation reports itself as running. Every mutation reports what happened
//! by pushing [`Event`] values into the caller's buffer.
//!
//! The controller is not synchronised. Hosts that drive it from several
//! threads must wrap it in a single lock.

use life_core::{CellCoord, Command, Event, GeometryKind, GridSize, LifeError, LifeState, Speed};
use life_system_generation::next_generation;
use log::debug;

/// Lifecycle phase derived from the controller's flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Iteration zero with the initial snapshot on display.
    Reset,
    /// A scheduler is expected to tick the simulation.
    Running,
    /// At least one generation has passed and ticking is suspended.
    Paused,
}

/// Represents the authoritative Life simulation.
#[derive(Clone, Debug)]
pub struct Simulation {
    size: GridSize,
    initial: LifeState,
    current: LifeState,
    iteration: u64,
    geometry: GeometryKind,
    speed: Speed,
    running: bool,
}

impl Simulation {
    /// Creates an all-dead simulation of the provided size.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        let initial = LifeState::new(size);
        Self {
            size,
            current: initial.clone(),
            initial,
            iteration: 0,
            geometry: GeometryKind::default(),
            speed: Speed::default(),
            running: false,
        }
    }

    /// Clears the simulation to an all-dead state of the current size.
    pub fn new_game(&mut self, out_events: &mut Vec<Event>) {
        self.running = false;
        self.iteration = 0;
        self.initial = LifeState::new(self.size);
        self.current = self.initial.clone();
        debug!("renewed simulation at {}", self.size);
        out_events.push(Event::Renewed);
    }

    /// Clears the simulation to an all-dead state of a new size.
    pub fn set_size(&mut self, size: GridSize, out_events: &mut Vec<Event>) {
        self.resize_to(size, out_events);
        self.new_game(out_events);
    }

    /// Adopts `state` as both the initial snapshot and the current state.
    ///
    /// The grid is resized to match the state when dimensions differ.
    pub fn load_state(&mut self, state: LifeState, out_events: &mut Vec<Event>) {
        self.running = false;
        self.iteration = 0;
        self.resize_to(state.size(), out_events);
        self.current = state.clone();
        self.initial = state;
        debug!(
            "loaded {} state with {} live cells",
            self.size,
            self.current.population()
        );
        out_events.push(Event::Reset);
    }

    /// Restores the initial snapshot and rewinds the iteration counter.
    pub fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.running = false;
        self.iteration = 0;
        self.current = self.initial.clone();
        debug!("reset simulation to its initial snapshot");
        out_events.push(Event::Reset);
    }

    /// Enters the running state.
    pub fn start(&mut self, out_events: &mut Vec<Event>) {
        if self.running {
            return;
        }
        self.running = true;
        debug!("started simulation at iteration {}", self.iteration);
        out_events.push(Event::Started);
    }

    /// Leaves the running state.
    pub fn pause(&mut self, out_events: &mut Vec<Event>) {
        if !self.running {
            return;
        }
        self.running = false;
        debug!("paused simulation at iteration {}", self.iteration);
        out_events.push(Event::Paused);
    }

    /// Replaces the current state with the next generation.
    pub fn tick(&mut self, out_events: &mut Vec<Event>) {
        self.current = next_generation(&self.current, &self.geometry);
        self.iteration = self.iteration.saturating_add(1);
        out_events.push(Event::Iterated {
            iteration: self.iteration,
        });
    }

    /// Flips a single cell of the current state, returning its new value.
    ///
    /// At iteration zero the edit is also written into the initial snapshot,
    /// so a later `reset` keeps it. After the first tick only the current
    /// state changes.
    pub fn toggle(
        &mut self,
        cell: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<bool, LifeError> {
        let alive = self.current.toggle(cell)?;
        if self.iteration == 0 {
            let _ = self.initial.set_alive(cell, alive)?;
        }
        out_events.push(Event::CellToggled { cell, alive });
        Ok(alive)
    }

    /// Selects the adjacency rule used by subsequent ticks.
    pub fn set_geometry(&mut self, geometry: GeometryKind, out_events: &mut Vec<Event>) {
        if self.geometry == geometry {
            return;
        }
        self.geometry = geometry;
        debug!("geometry set to {geometry}");
        out_events.push(Event::GeometryChanged { geometry });
    }

    /// Selects the adjacency rule by numeric selector (`0` flat, `1` toroidal).
    pub fn set_geometry_index(
        &mut self,
        index: u8,
        out_events: &mut Vec<Event>,
    ) -> Result<(), LifeError> {
        let geometry = GeometryKind::from_index(index)?;
        self.set_geometry(geometry, out_events);
        Ok(())
    }

    /// Updates the cadence an external scheduler should tick at.
    pub fn set_speed(&mut self, speed: Speed, out_events: &mut Vec<Event>) {
        if self.speed == speed {
            return;
        }
        self.speed = speed;
        debug!("speed set to {} iterations per 10s", speed.get());
        out_events.push(Event::SpeedChanged { speed });
    }

    fn resize_to(&mut self, size: GridSize, out_events: &mut Vec<Event>) {
        if self.size == size {
            return;
        }
        debug!("resizing simulation from {} to {size}", self.size);
        self.size = size;
        out_events.push(Event::Resized { size });
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}

/// Applies the provided command to the simulation.
///
/// Failing commands leave the simulation untouched and emit no events.
pub fn apply(
    simulation: &mut Simulation,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), LifeError> {
    match command {
        Command::NewGame => simulation.new_game(out_events),
        Command::Resize { size } => simulation.set_size(size, out_events),
        Command::LoadState { state } => simulation.load_state(state, out_events),
        Command::Reset => simulation.reset(out_events),
        Command::Start => simulation.start(out_events),
        Command::Pause => simulation.pause(out_events),
        Command::Tick => simulation.tick(out_events),
        Command::Toggle { cell } => {
            let _ = simulation.toggle(cell, out_events)?;
        }
        Command::SetGeometry { geometry } => simulation.set_geometry(geometry, out_events),
        Command::SetSpeed { speed } => simulation.set_speed(speed, out_events),
    }
    Ok(())
}

/// Query functions that provide read-only access to the simulation.
pub mod query {
    use std::time::Duration;

    use super::{Phase, Simulation};
    use life_core::{GeometryKind, GridSize, LifeState, Speed};

    /// Dimensions of the current grid.
    #[must_use]
    pub fn size(simulation: &Simulation) -> GridSize {
        simulation.size
    }

    /// State currently on display.
    #[must_use]
    pub fn current_state(simulation: &Simulation) -> &LifeState {
        &simulation.current
    }

    /// Snapshot restored by `reset`.
    #[must_use]
    pub fn initial_state(simulation: &Simulation) -> &LifeState {
        &simulation.initial
    }

    /// Number of generations computed since the last reset, load, or new game.
    #[must_use]
    pub fn iteration(simulation: &Simulation) -> u64 {
        simulation.iteration
    }

    /// Adjacency rule applied by ticks.
    #[must_use]
    pub fn geometry(simulation: &Simulation) -> GeometryKind {
        simulation.geometry
    }

    /// Cadence the scheduler should honour.
    #[must_use]
    pub fn speed(simulation: &Simulation) -> Speed {
        simulation.speed
    }

    /// Delay between ticks implied by the current cadence.
    #[must_use]
    pub fn tick_interval(simulation: &Simulation) -> Duration {
        simulation.speed.tick_interval()
    }

    /// Reports whether a scheduler should be ticking the simulation.
    #[must_use]
    pub fn is_running(simulation: &Simulation) -> bool {
        simulation.running
    }

    /// Reports whether the simulation sits at iteration zero.
    #[must_use]
    pub fn is_reset(simulation: &Simulation) -> bool {
        simulation.iteration == 0
    }

    /// Lifecycle phase of the simulation.
    #[must_use]
    pub fn phase(simulation: &Simulation) -> Phase {
        if simulation.running {
            Phase::Running
        } else if simulation.iteration == 0 {
            Phase::Reset
        } else {
            Phase::Paused
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: u32, height: u32) -> GridSize {
        GridSize::new(width, height).expect("valid size")
    }

    #[test]
    fn default_simulation_uses_default_dimensions() {
        let simulation = Simulation::default();
        assert_eq!(query::size(&simulation), size(50, 30));
        assert_eq!(query::current_state(&simulation).population(), 0);
        assert_eq!(query::phase(&simulation), Phase::Reset);
        assert_eq!(query::geometry(&simulation), GeometryKind::Flat);
        assert_eq!(query::speed(&simulation), Speed::DEFAULT);
    }

    #[test]
    fn start_and_pause_emit_only_on_transition() {
        let mut simulation = Simulation::new(size(3, 3));
        let mut events = Vec::new();

        simulation.start(&mut events);
        simulation.start(&mut events);
        simulation.pause(&mut events);
        simulation.pause(&mut events);

        assert_eq!(events, vec![Event::Started, Event::Paused]);
    }

    #[test]
    fn phase_tracks_lifecycle() {
        let mut simulation = Simulation::new(size(3, 3));
        let mut events = Vec::new();

        simulation.start(&mut events);
        assert_eq!(query::phase(&simulation), Phase::Running);
        simulation.tick(&mut events);
        simulation.pause(&mut events);
        assert_eq!(query::phase(&simulation), Phase::Paused);
        simulation.reset(&mut events);
        assert_eq!(query::phase(&simulation), Phase::Reset);
    }

    #[test]
    fn set_size_resizes_and_renews() {
        let mut simulation = Simulation::new(size(3, 3));
        let mut events = Vec::new();

        simulation.set_size(size(6, 4), &mut events);

        assert_eq!(
            events,
            vec![
                Event::Resized { size: size(6, 4) },
                Event::Renewed
            ]
        );
        assert_eq!(query::current_state(&simulation).size(), size(6, 4));
        assert_eq!(query::initial_state(&simulation).size(), size(6, 4));
    }

    #[test]
    fn geometry_index_rejects_unknown_selector() {
        let mut simulation = Simulation::new(size(3, 3));
        let mut events = Vec::new();

        assert_eq!(
            simulation.set_geometry_index(7, &mut events),
            Err(LifeError::InvalidGeometry("7".to_owned()))
        );
        assert!(events.is_empty());
        assert_eq!(query::geometry(&simulation), GeometryKind::Flat);

        simulation
            .set_geometry_index(1, &mut events)
            .expect("toroidal selector");
        assert_eq!(
            events,
            vec![Event::GeometryChanged {
                geometry: GeometryKind::Toroidal
            }]
        );
    }
}
