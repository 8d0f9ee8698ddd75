//-------------------------------------------------------------------//
//    eduPIC-CCP : 1d3v PIC/MCC benchmark driver for capacitively    //
//                 coupled radio-frequency helium discharges         //
//-------------------------------------------------------------------//
// Disclaimer: The eduPIC (educational Particle-in-Cell/Monte Carlo  //
// Collisions simulation code), Copyright (C) 2021                   //
// Zoltan Donko et al. is free software: you can redistribute it     //
// and/or modify it under the terms of the GNU General Public License//
// as published by the Free Software Foundation, version 3.          //
// This program is distributed in the hope that it will be useful,   //
// but WITHOUT ANY WARRANTY; without even the implied warranty of    //
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU  //
// General Public License for more details at                        //
// https://www.gnu.org/licenses/gpl-3.0.html.                        //
//-------------------------------------------------------------------//

//! Publish/subscribe of simulation lifecycle events.
//!
//! Actions are registered per [`Event`] before the run and are notified
//! synchronously, in registration order, with a read-only [`State`] view.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::simulation::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Start,
    Step,
    End,
}

impl Event {
    const COUNT: usize = 3;

    #[inline]
    fn index(self) -> usize {
        match self {
            Event::Start => 0,
            Event::Step => 1,
            Event::End => 2,
        }
    }
}

/// A diagnostic attached to one or more simulation events.
///
/// The state view is only valid for the duration of the call. An error
/// aborts the run.
pub trait EventAction {
    fn notify(&mut self, state: &State<'_>) -> Result<()>;
}

/// Adapter turning a closure into an [`EventAction`].
pub struct FnAction<F>(F);

/// Wraps `f` so it can be registered with [`EventBus::add_action`].
pub fn action<F>(f: F) -> FnAction<F>
where
    F: FnMut(&State<'_>) -> Result<()>,
{
    FnAction(f)
}

impl<F> EventAction for FnAction<F>
where
    F: FnMut(&State<'_>) -> Result<()>,
{
    fn notify(&mut self, state: &State<'_>) -> Result<()> {
        (self.0)(state)
    }
}

type SharedAction = Rc<RefCell<dyn EventAction>>;

#[derive(Default)]
pub struct EventBus {
    actions: [Vec<SharedAction>; Event::COUNT],
}

impl EventBus {
    pub fn new() -> Self {
        EventBus::default()
    }

    /// Registers `action` for `event` and returns a shared handle to it.
    ///
    /// Other actions may keep a `Weak` of the handle (see
    /// `Rc::downgrade`) to read its results later.
    pub fn add_action<A: EventAction + 'static>(&mut self, event: Event, action: A) -> Rc<RefCell<A>> {
        let shared = Rc::new(RefCell::new(action));
        self.add_shared(event, shared.clone());
        shared
    }

    /// Registers an already shared action, e.g. one action for several events.
    pub fn add_shared<A: EventAction + 'static>(&mut self, event: Event, action: Rc<RefCell<A>>) {
        let action: SharedAction = action;
        self.actions[event.index()].push(action);
    }

    pub fn count(&self, event: Event) -> usize {
        self.actions[event.index()].len()
    }

    /// Notifies every action registered for `event`, in registration order.
    /// The first error stops the dispatch and is returned.
    pub fn publish(&self, event: Event, state: &State<'_>) -> Result<()> {
        for action in &self.actions[event.index()] {
            action.borrow_mut().notify(state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::parameters::BenchmarkCase;
    use crate::particles::ChargedSpecies;
    use crate::simulation::Counters;

    fn with_state<F: FnOnce(&State<'_>)>(step: usize, f: F) {
        let par = BenchmarkCase::One.parameters().unwrap();
        let species = ChargedSpecies::new(-1.0, 1.0);
        let grid = vec![0.0; par.nx()];
        let counters = Counters::default();
        let state = State {
            step,
            parameters: &par,
            electrons: &species,
            ions: &species,
            electron_density: &grid,
            ion_density: &grid,
            rho: &grid,
            phi: &grid,
            efield: &grid,
            counters: &counters,
        };
        f(&state)
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for id in 0..3 {
            let log = log.clone();
            bus.add_action(Event::Step, action(move |state| {
                log.borrow_mut().push((id, state.step));
                Ok(())
            }));
        }
        assert_eq!(bus.count(Event::Step), 3);
        assert_eq!(bus.count(Event::End), 0);

        with_state(7, |state| {
            bus.publish(Event::Step, state).unwrap();
            bus.publish(Event::End, state).unwrap();
        });
        assert_eq!(*log.borrow(), vec![(0, 7), (1, 7), (2, 7)]);
    }

    #[test]
    fn test_error_stops_dispatch() {
        let calls = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        bus.add_action(Event::End, action(|_| {
            Err(SimError::Diagnostic { action: "failing", reason: "disk full".into() })
        }));
        let counter = calls.clone();
        bus.add_action(Event::End, action(move |_| {
            *counter.borrow_mut() += 1;
            Ok(())
        }));

        with_state(0, |state| {
            let err = bus.publish(Event::End, state).unwrap_err();
            assert!(matches!(err, SimError::Diagnostic { action: "failing", .. }));
        });
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_shared_action_on_several_events() {
        struct Counter(usize);
        impl EventAction for Counter {
            fn notify(&mut self, _state: &State<'_>) -> Result<()> {
                self.0 += 1;
                Ok(())
            }
        }

        let mut bus = EventBus::new();
        let counter = bus.add_action(Event::Start, Counter(0));
        bus.add_shared(Event::End, counter.clone());

        with_state(0, |state| {
            bus.publish(Event::Start, state).unwrap();
            bus.publish(Event::Step, state).unwrap();
            bus.publish(Event::End, state).unwrap();
        });
        assert_eq!(counter.borrow().0, 2);
    }
}
