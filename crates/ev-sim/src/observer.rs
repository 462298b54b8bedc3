//! Simulation observer trait for rendering, export, and data collection.

use ev_core::Tick;

use crate::StepSnapshot;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// Observers are passive: they receive snapshots by reference and cannot
/// reach back into simulation state.  Both methods default to no-ops.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SimObserver for Progress {
///     fn on_step(&mut self, snap: &StepSnapshot) {
///         println!("{}: {} escaped", snap.tick, snap.escaped.len());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called with the tick-0 snapshot and after every committed tick.
    fn on_step(&mut self, _snapshot: &StepSnapshot) {}

    /// Called once when the run stops, with the last committed tick.
    /// Exporters flush here.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Forwards every callback to each wrapped observer, in insertion order.
#[derive(Default)]
pub struct Fanout<'a> {
    observers: Vec<&'a mut dyn SimObserver>,
}

impl<'a> Fanout<'a> {
    pub fn new() -> Self {
        Self { observers: Vec::new() }
    }

    pub fn with(mut self, observer: &'a mut dyn SimObserver) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn push(&mut self, observer: &'a mut dyn SimObserver) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl SimObserver for Fanout<'_> {
    fn on_step(&mut self, snapshot: &StepSnapshot) {
        for o in &mut self.observers {
            o.on_step(snapshot);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        for o in &mut self.observers {
            o.on_sim_end(final_tick);
        }
    }
}
