//! This module defines the `TuringMachine` struct, the execution engine of the
//! simulator. It owns the dynamic state of a run: the sparse tape, head position,
//! current state, halted flag, verdict, and the step/transition history.

use crate::definition::MachineDefinition;
use crate::types::{Move, Outcome, Snapshot, Status, BOUNDARY_SYMBOL, INPUT_BLANK_SYMBOL};
use std::collections::BTreeMap;

/// The execution engine for a deterministic single-tape Turing Machine.
///
/// Each simulation session constructs its own instance around a
/// [`MachineDefinition`]; there is no shared global machine. The engine owns
/// and exclusively mutates the tape; collaborators read snapshots through the
/// accessors after each step.
///
/// The tape is sparse: absent positions implicitly hold the blank symbol, and
/// rule-driven writes of the blank remove the entry instead of storing it, so
/// the map never holds blanks written during execution.
pub struct TuringMachine {
    definition: MachineDefinition,
    tape: BTreeMap<i64, char>,
    head: i64,
    state: String,
    halted: bool,
    result: Outcome,
    history: Vec<Snapshot>,
    transition_log: Vec<String>,
    loaded: bool,
}

impl TuringMachine {
    /// Creates a new engine for the given definition, in the `Ready` status.
    ///
    /// The definition is expected to have passed [`MachineDefinition::validate`]
    /// without errors; the engine does not re-validate.
    pub fn new(definition: MachineDefinition) -> Self {
        let state = definition.initial_state.clone();
        Self {
            definition,
            tape: BTreeMap::new(),
            head: 0,
            state,
            halted: false,
            result: Outcome::Unset,
            history: Vec::new(),
            transition_log: Vec::new(),
            loaded: false,
        }
    }

    /// Returns the engine to the `Ready` status from any state: empty tape,
    /// head at 0, initial state, no verdict, empty history.
    pub fn reset(&mut self) {
        self.tape.clear();
        self.head = 0;
        self.state = self.definition.initial_state.clone();
        self.halted = false;
        self.result = Outcome::Unset;
        self.history.clear();
        self.transition_log.clear();
        self.loaded = false;
    }

    /// Loads an input string, constructing the initial tape configuration.
    ///
    /// The tape becomes `⊳` at position 0 and `_` at position 1, followed by
    /// the input characters from position 2 onward; characters equal to the
    /// blank symbol are skipped (left as implicit blanks). The head starts at
    /// position 1 and the machine enters the `Running` status.
    ///
    /// Symbol validation is a precondition: callers must run
    /// [`MachineDefinition::check_input`] first and refuse input containing
    /// characters outside the alphabet.
    pub fn load_input(&mut self, input: &str) {
        self.tape.clear();
        self.tape.insert(0, BOUNDARY_SYMBOL);
        self.tape.insert(1, INPUT_BLANK_SYMBOL);
        for (i, c) in input.chars().enumerate() {
            if c != self.definition.blank {
                self.tape.insert(2 + i as i64, c);
            }
        }

        self.head = 1;
        self.state = self.definition.initial_state.clone();
        self.halted = false;
        self.result = Outcome::Unset;
        self.history.clear();
        self.transition_log.clear();
        self.loaded = true;

        // Setup snapshot; step() records one pre-transition snapshot per step.
        self.push_snapshot();
    }

    /// Executes a single step.
    ///
    /// # Returns
    ///
    /// * `true` if a transition was executed.
    /// * `false` if the machine halted without executing one: it was already
    ///   halted (a no-op, never an error), the current state is a halting
    ///   state, or no rule matches the current `(state, symbol)` pair.
    pub fn step(&mut self) -> bool {
        if self.halted {
            return false;
        }
        if self.definition.halting_states.contains(&self.state) {
            self.halted = true;
            return false;
        }

        let symbol = self.read();
        let Some(rule) = self.definition.first_rule(&self.state, symbol).cloned() else {
            self.halted = true;
            return false;
        };

        self.push_snapshot();
        self.transition_log.push(format!(
            "δ({}, {}) = {}, {}, {}",
            self.state, symbol, rule.next_state, rule.write, rule.mv
        ));

        // The single enforcement point of the no-stored-blanks invariant.
        if rule.write == self.definition.blank {
            self.tape.remove(&self.head);
        } else {
            self.tape.insert(self.head, rule.write);
        }

        match rule.mv {
            Move::Accept => {
                self.halted = true;
                self.result = Outcome::Accept;
                self.state = rule.next_state;
            }
            Move::Reject => {
                self.halted = true;
                self.result = Outcome::Reject;
                self.state = rule.next_state;
            }
            Move::Left | Move::Right => {
                self.head += if rule.mv == Move::Right { 1 } else { -1 };
                self.state = rule.next_state;
                // Entering a halting state halts without a verdict: the
                // Unset result distinguishes this from explicit Y/N halts.
                if self.definition.halting_states.contains(&self.state) {
                    self.halted = true;
                }
            }
        }

        true
    }

    /// Runs the machine until it halts or the caller declines to continue.
    ///
    /// `continue_prompt` is invoked with `step_limit` every time that many
    /// consecutive steps have executed; returning `true` resets the counter
    /// and resumes, returning `false` stops the run promptly (the machine is
    /// left un-halted and can be stepped further).
    ///
    /// After halting, a machine whose verdict is still unset and whose final
    /// state is not a halting state ran off the transition table; its result
    /// becomes [`Outcome::RejectNoTransition`].
    pub fn run(
        &mut self,
        step_limit: usize,
        mut continue_prompt: impl FnMut(usize) -> bool,
    ) -> Outcome {
        let mut steps = 0;
        while !self.halted {
            if steps >= step_limit {
                if !continue_prompt(step_limit) {
                    break;
                }
                steps = 0;
            }
            if !self.step() {
                break;
            }
            steps += 1;
        }

        if self.halted
            && self.result == Outcome::Unset
            && !self.definition.halting_states.contains(&self.state)
        {
            self.result = Outcome::RejectNoTransition;
        }

        self.result
    }

    /// Renders the occupied tape span as a string.
    ///
    /// The span runs from the minimum to the maximum stored position
    /// inclusive, with unoccupied positions rendered as the blank symbol.
    /// Returns the empty string when the tape is empty.
    pub fn tape_content(&self) -> String {
        let (Some((&min, _)), Some((&max, _))) =
            (self.tape.first_key_value(), self.tape.last_key_value())
        else {
            return String::new();
        };

        (min..=max)
            .map(|pos| self.tape.get(&pos).copied().unwrap_or(self.definition.blank))
            .collect()
    }

    /// Returns the current state identifier.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the current head position.
    pub fn head_position(&self) -> i64 {
        self.head
    }

    /// Checks whether the machine has halted.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Returns the verdict of the execution so far.
    pub fn result(&self) -> Outcome {
        self.result
    }

    /// Returns the lifecycle status: `Ready` before input is loaded, `Running`
    /// while stepping, `Halted` once halted.
    pub fn status(&self) -> Status {
        if self.halted {
            Status::Halted
        } else if self.loaded {
            Status::Running
        } else {
            Status::Ready
        }
    }

    /// Returns the recorded configuration snapshots, setup snapshot first.
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Returns the formatted transition descriptions, one per executed step.
    pub fn transition_log(&self) -> &[String] {
        &self.transition_log
    }

    /// Returns a read-only view of the sparse tape.
    pub fn tape(&self) -> &BTreeMap<i64, char> {
        &self.tape
    }

    /// Returns the machine definition this engine executes.
    pub fn definition(&self) -> &MachineDefinition {
        &self.definition
    }

    /// Returns the symbol under the head, or the blank symbol if the position
    /// is not stored.
    fn read(&self) -> char {
        self.tape
            .get(&self.head)
            .copied()
            .unwrap_or(self.definition.blank)
    }

    fn push_snapshot(&mut self) {
        self.history.push(Snapshot {
            state: self.state.clone(),
            tape: self.tape_content(),
            head: self.head,
        });
    }
}
