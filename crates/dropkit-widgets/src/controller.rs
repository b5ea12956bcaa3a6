//! Open / closed / search-focused state machine for a picker.
//!
//! The controller holds no rendering state.  Every input is an [`Event`];
//! [`Controller::handle`] applies the transition and reports the side
//! effects it implies as [`Effect`]s, so hosts and tests can observe focus
//! moves and listener attachment without a terminal.

use crate::selection::Mode;
use std::fmt;

/// Where a picker is in its interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// Overlay hidden.  Initial state, and where every interaction ends.
    #[default]
    Closed,
    /// Overlay shown, keyboard on the option list.
    Open,
    /// Overlay shown, keyboard in the search line.  Searchable pickers only.
    OpenSearching,
}

impl InteractionState {
    /// `true` for [`Open`](Self::Open) and [`OpenSearching`](Self::OpenSearching).
    pub fn is_open(self) -> bool {
        !matches!(self, InteractionState::Closed)
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionState::Closed => write!(f, "closed"),
            InteractionState::Open => write!(f, "open"),
            InteractionState::OpenSearching => write!(f, "open-searching"),
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The trigger was activated (clicked, or Space/Down on it).
    Activate,
    /// Enter was pressed on the trigger.
    EnterOnTrigger,
    /// A pointer went down outside the picker.
    OutsidePointerDown,
    /// Escape was pressed.
    Escape,
    /// A selection was committed in the given mode.
    Committed(Mode),
    /// The owner or the user asked to close (e.g. the trigger clicked again).
    CloseRequested,
}

/// Side effects a transition implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start the global listeners (outside click, Escape).
    AttachListeners,
    /// Move keyboard focus into the search line.
    FocusSearch,
    /// The query was reset to "".
    ResetQuery,
    /// Stop the global listeners.
    DetachListeners,
}

/// Outcome of one [`Controller::handle`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State before the event.
    pub from: InteractionState,
    /// State after the event.
    pub to: InteractionState,
    /// Effects, in the order they were applied.
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: InteractionState) -> Self {
        Self {
            from: state,
            to: state,
            effects: Vec::new(),
        }
    }

    /// Whether the event changed the state.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// Whether the event closed an open picker.
    pub fn closed(&self) -> bool {
        self.from.is_open() && !self.to.is_open()
    }

    /// Whether `effect` was applied.
    pub fn has(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }
}

/// The interaction state machine of one picker instance.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: InteractionState,
    query: String,
    searchable: bool,
    disabled: bool,
}

impl Controller {
    /// A closed controller.
    pub fn new(searchable: bool) -> Self {
        Self {
            searchable,
            ..Self::default()
        }
    }

    /// Current state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Whether the overlay is shown.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Whether keyboard focus is in the search line.
    pub fn is_searching(&self) -> bool {
        self.state == InteractionState::OpenSearching
    }

    /// Current query; always "" while closed.
    pub fn query(&self) -> &str {
        if self.is_open() {
            &self.query
        } else {
            ""
        }
    }

    /// Whether the picker opens into the search line.
    pub fn searchable(&self) -> bool {
        self.searchable
    }

    /// Whether activation is currently refused.
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the picker.  Disabling an open picker closes it.
    pub fn set_disabled(&mut self, disabled: bool) -> Transition {
        self.disabled = disabled;
        if disabled && self.is_open() {
            self.handle(Event::CloseRequested)
        } else {
            Transition::stay(self.state)
        }
    }

    /// Apply `event` and return what happened.
    ///
    /// Closing resets the query in the same call, so the state is never
    /// observable as closed with a stale query.
    pub fn handle(&mut self, event: Event) -> Transition {
        let from = self.state;
        let transition = match (from, event) {
            (InteractionState::Closed, Event::Activate | Event::EnterOnTrigger) => {
                if self.disabled {
                    Transition::stay(from)
                } else {
                    self.open()
                }
            }
            (
                InteractionState::Open | InteractionState::OpenSearching,
                Event::OutsidePointerDown
                | Event::Escape
                | Event::CloseRequested
                | Event::Committed(Mode::Single),
            ) => self.close(),
            _ => Transition::stay(from),
        };

        if transition.changed() {
            tracing::debug!(
                from = %transition.from,
                to = %transition.to,
                ?event,
                "picker transition"
            );
        }
        transition
    }

    /// Append a character to the query.  Ignored unless searching.
    pub fn push_query(&mut self, c: char) -> bool {
        if !self.is_searching() || c.is_control() {
            return false;
        }
        self.query.push(c);
        true
    }

    /// Remove the last character of the query.  Ignored unless searching.
    pub fn pop_query(&mut self) -> bool {
        self.is_searching() && self.query.pop().is_some()
    }

    /// Replace the query.  Ignored unless searching.
    pub fn set_query(&mut self, query: &str) -> bool {
        if !self.is_searching() {
            return false;
        }
        self.query = query.chars().filter(|c| !c.is_control()).collect();
        true
    }

    fn open(&mut self) -> Transition {
        let from = self.state;
        let mut effects = vec![Effect::AttachListeners];
        self.state = if self.searchable {
            effects.push(Effect::FocusSearch);
            InteractionState::OpenSearching
        } else {
            InteractionState::Open
        };
        Transition {
            from,
            to: self.state,
            effects,
        }
    }

    fn close(&mut self) -> Transition {
        let from = self.state;
        self.query.clear();
        self.state = InteractionState::Closed;
        Transition {
            from,
            to: self.state,
            effects: vec![Effect::ResetQuery, Effect::DetachListeners],
        }
    }
}
