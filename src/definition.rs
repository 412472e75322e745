//! This module defines the `MachineDefinition` struct: the static description of a
//! Turing Machine (states, tape alphabet, initial state, blank symbol, halting states,
//! transition rules) together with rule-text parsing and validation.

use crate::types::{
    Move, ParseMode, Rule, TuringMachineError, BOUNDARY_SYMBOL, DEFAULT_BLANK_SYMBOL,
    INPUT_BLANK_SYMBOL,
};
use std::collections::{BTreeSet, HashMap, HashSet};

/// The key of the transition table: the current state and the symbol under the head.
pub type RuleKey = (String, char);

/// The static description of a deterministic single-tape Turing Machine.
///
/// A definition is pure data plus validation; the dynamic execution state lives in
/// [`crate::machine::TuringMachine`]. Rules are keyed by exact `(state, symbol)`
/// pairs; a missing key means no transition is defined for that configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineDefinition {
    /// The set of state identifiers.
    pub states: HashSet<String>,
    /// The tape alphabet. Always contains `⊳`, `_`, and the blank symbol.
    pub tape_alphabet: HashSet<char>,
    /// The initial state; must belong to `states`.
    pub initial_state: String,
    /// The blank symbol.
    pub blank: char,
    /// The halting states; a subset of `states`, possibly empty.
    pub halting_states: HashSet<String>,
    /// The transition table. Later rules for the same key append; only the
    /// first rule per key is ever applied.
    pub rules: HashMap<RuleKey, Vec<Rule>>,
    /// How malformed rule lines are treated by [`MachineDefinition::load_rules`].
    pub mode: ParseMode,
}

impl Default for MachineDefinition {
    fn default() -> Self {
        Self {
            states: HashSet::new(),
            tape_alphabet: HashSet::from([BOUNDARY_SYMBOL, INPUT_BLANK_SYMBOL]),
            initial_state: "q0".to_string(),
            blank: DEFAULT_BLANK_SYMBOL,
            halting_states: HashSet::new(),
            rules: HashMap::new(),
            mode: ParseMode::default(),
        }
    }
}

/// The outcome of [`MachineDefinition::validate`]: every problem found, split into
/// errors (must block loading) and warnings (informational).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// Problems that make the definition unusable.
    pub errors: Vec<String>,
    /// Suspicious but non-fatal findings.
    pub warnings: Vec<String>,
}

impl Validation {
    /// Returns `true` when no errors were collected (warnings are allowed).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl MachineDefinition {
    /// Builds a definition from its textual components.
    ///
    /// `states_text` is a whitespace-separated state list; `alphabet_text` a
    /// comma-separated symbol list. The boundary marker `⊳`, the input blank
    /// marker `_`, and `blank` itself are force-inserted into the alphabet,
    /// so repeating them in `alphabet_text` is harmless.
    pub fn define(
        states_text: &str,
        alphabet_text: &str,
        initial_state: &str,
        blank: char,
    ) -> Self {
        let states = states_text
            .split_whitespace()
            .map(str::to_string)
            .collect::<HashSet<_>>();

        let mut tape_alphabet = alphabet_text
            .split(',')
            .filter_map(|entry| parse_symbol(entry.trim()))
            .collect::<HashSet<_>>();
        tape_alphabet.extend([BOUNDARY_SYMBOL, INPUT_BLANK_SYMBOL, blank]);

        Self {
            states,
            tape_alphabet,
            initial_state: initial_state.trim().to_string(),
            blank,
            halting_states: HashSet::new(),
            rules: HashMap::new(),
            mode: ParseMode::default(),
        }
    }

    /// Sets the parse mode for subsequent [`MachineDefinition::load_rules`] calls.
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parses line-oriented rule text and a whitespace-separated halting state list.
    ///
    /// Each non-blank, non-`#`-comment line must tokenize into exactly five
    /// whitespace-separated fields: `from read write move to`, where `move` is
    /// one of `L`, `R`, `Y`, `N` (case-insensitive) and the symbol fields are
    /// single characters. Rules accumulate: a later line with the same
    /// `(from, read)` key appends rather than replaces.
    ///
    /// In [`ParseMode::Lenient`] (the default) lines that do not fit the shape
    /// are silently skipped; in [`ParseMode::Strict`] they abort loading with
    /// [`TuringMachineError::MalformedRule`].
    pub fn load_rules(
        &mut self,
        rules_text: &str,
        halting_states_text: &str,
    ) -> Result<(), TuringMachineError> {
        self.rules.clear();
        self.halting_states = halting_states_text
            .split_whitespace()
            .map(str::to_string)
            .collect();

        for (index, raw_line) in rules_text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_rule_line(line) {
                Some((key, rule)) => {
                    self.rules.entry(key).or_default().push(rule);
                }
                None => {
                    if self.mode == ParseMode::Strict {
                        return Err(TuringMachineError::MalformedRule {
                            line: index + 1,
                            text: line.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Checks the definition for consistency, collecting every problem found.
    ///
    /// Errors: empty initial state; initial state not in `states`; halting
    /// states not in `states`; rule states (source or target) not in `states`;
    /// rule symbols (other than the `_` blank literal) not in the alphabet.
    /// Warning: the alphabet holds nothing beyond the forced special symbols.
    ///
    /// Validation never fails early; callers must refuse to run a machine
    /// whose validation carries errors.
    pub fn validate(&self) -> Validation {
        let mut validation = Validation::default();

        if self.initial_state.is_empty() {
            validation.errors.push("initial state is not defined".to_string());
        } else if !self.states.contains(&self.initial_state) {
            validation.errors.push(format!(
                "initial state '{}' is not in the defined state set",
                self.initial_state
            ));
        }

        let undefined_halting: BTreeSet<&String> = self
            .halting_states
            .iter()
            .filter(|s| !self.states.contains(*s))
            .collect();
        if !undefined_halting.is_empty() {
            validation.errors.push(format!(
                "halting states not in the defined state set: {}",
                join_states(&undefined_halting)
            ));
        }

        if self
            .tape_alphabet
            .iter()
            .all(|&c| c == BOUNDARY_SYMBOL || c == INPUT_BLANK_SYMBOL || c == self.blank)
        {
            validation
                .warnings
                .push("tape alphabet defines no symbols beyond the required specials".to_string());
        }

        let mut undefined_states = BTreeSet::new();
        let mut undefined_symbols = BTreeSet::new();
        for ((from, read), rules) in &self.rules {
            if !self.states.contains(from) {
                undefined_states.insert(from);
            }
            if *read != INPUT_BLANK_SYMBOL && !self.tape_alphabet.contains(read) {
                undefined_symbols.insert(*read);
            }
            for rule in rules {
                if !self.states.contains(&rule.next_state) {
                    undefined_states.insert(&rule.next_state);
                }
                if rule.write != INPUT_BLANK_SYMBOL && !self.tape_alphabet.contains(&rule.write) {
                    undefined_symbols.insert(rule.write);
                }
            }
        }
        if !undefined_states.is_empty() {
            validation.errors.push(format!(
                "rules reference undefined states: {}",
                join_states(&undefined_states)
            ));
        }
        if !undefined_symbols.is_empty() {
            validation.errors.push(format!(
                "rules use symbols outside the tape alphabet: {}",
                undefined_symbols
                    .iter()
                    .map(|c| format!("'{c}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        validation
    }

    /// Checks an input string against the tape alphabet before it may be loaded.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if every character of `input` belongs to the alphabet.
    /// * `Err(TuringMachineError::InvalidInputSymbols)` carrying the sorted set
    ///   of offending characters otherwise.
    pub fn check_input(&self, input: &str) -> Result<(), TuringMachineError> {
        let invalid: BTreeSet<char> = input
            .chars()
            .filter(|c| !self.tape_alphabet.contains(c))
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(TuringMachineError::InvalidInputSymbols(
                invalid.into_iter().collect(),
            ))
        }
    }

    /// Returns the rule applied for `(state, symbol)`: the first rule listed
    /// for the key, or `None` when no transition is defined.
    ///
    /// Ties among multiple rules for the same key are broken by definition
    /// order. This first-match policy is the documented behavior, not an NFA
    /// exploration.
    pub fn first_rule(&self, state: &str, symbol: char) -> Option<&Rule> {
        self.rules
            .get(&(state.to_string(), symbol))
            .and_then(|rules| rules.first())
    }
}

/// Parses a token that must be exactly one character.
fn parse_symbol(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Parses a single rule line into its key and rule, or `None` if malformed.
fn parse_rule_line(line: &str) -> Option<(RuleKey, Rule)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [from, read, write, mv, to] = tokens.as_slice() else {
        return None;
    };

    let read = parse_symbol(read)?;
    let write = parse_symbol(write)?;
    let mv: Move = mv.parse().ok()?;

    Some((
        (from.to_string(), read),
        Rule {
            write,
            mv,
            next_state: to.to_string(),
        },
    ))
}

fn join_states(states: &BTreeSet<&String>) -> String {
    states
        .iter()
        .map(|s| format!("'{s}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_definition() -> MachineDefinition {
        MachineDefinition::define("q0 q1 qH", "a,b", "q0", '_')
    }

    #[test]
    fn test_define_parses_states_and_alphabet() {
        let def = simple_definition();

        assert_eq!(
            def.states,
            HashSet::from(["q0".to_string(), "q1".to_string(), "qH".to_string()])
        );
        assert!(def.tape_alphabet.contains(&'a'));
        assert!(def.tape_alphabet.contains(&'b'));
        assert_eq!(def.initial_state, "q0");
        assert_eq!(def.blank, '_');
    }

    #[test]
    fn test_define_force_inserts_special_symbols() {
        let def = MachineDefinition::define("q0", "", "q0", 'B');

        assert!(def.tape_alphabet.contains(&BOUNDARY_SYMBOL));
        assert!(def.tape_alphabet.contains(&INPUT_BLANK_SYMBOL));
        assert!(def.tape_alphabet.contains(&'B'));
        // Idempotent: repeating them in the alphabet text changes nothing
        let repeated = MachineDefinition::define("q0", "⊳,_,B", "q0", 'B');
        assert_eq!(def.tape_alphabet, repeated.tape_alphabet);
    }

    #[test]
    fn test_load_rules_parses_five_field_lines() {
        let mut def = simple_definition();
        def.load_rules("q0 a b R q1\nq1 b a L q0", "qH").unwrap();

        assert_eq!(def.halting_states, HashSet::from(["qH".to_string()]));
        let rule = def.first_rule("q0", 'a').unwrap();
        assert_eq!(
            rule,
            &Rule {
                write: 'b',
                mv: Move::Right,
                next_state: "q1".to_string(),
            }
        );
        assert!(def.first_rule("q1", 'b').is_some());
    }

    #[test]
    fn test_load_rules_skips_blank_comment_and_malformed_lines() {
        let mut def = simple_definition();
        def.load_rules(
            "# a comment\n\nq0 a b R q1\nnot a rule\nq0 ab b R q1\nq0 a b X q1",
            "",
        )
        .unwrap();

        // Only the well-formed line survives
        assert_eq!(def.rules.len(), 1);
        assert!(def.first_rule("q0", 'a').is_some());
    }

    #[test]
    fn test_load_rules_strict_mode_reports_malformed_line() {
        let mut def = simple_definition().with_mode(ParseMode::Strict);
        let err = def
            .load_rules("q0 a b R q1\nq0 a b X q1", "")
            .unwrap_err();

        assert_eq!(
            err,
            TuringMachineError::MalformedRule {
                line: 2,
                text: "q0 a b X q1".to_string(),
            }
        );
    }

    #[test]
    fn test_load_rules_same_key_appends_in_order() {
        let mut def = simple_definition();
        def.load_rules("q0 a x R q1\nq0 a y R qH", "qH").unwrap();

        let rules = &def.rules[&("q0".to_string(), 'a')];
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].write, 'x');
        assert_eq!(rules[1].write, 'y');
        // First-match policy: the first listed rule wins
        assert_eq!(def.first_rule("q0", 'a').unwrap().write, 'x');
    }

    #[test]
    fn test_load_rules_normalizes_move_case() {
        let mut def = simple_definition();
        def.load_rules("q0 a a r q1\nq1 a a y qH", "qH").unwrap();

        assert_eq!(def.first_rule("q0", 'a').unwrap().mv, Move::Right);
        assert_eq!(def.first_rule("q1", 'a').unwrap().mv, Move::Accept);
    }

    #[test]
    fn test_validate_accepts_consistent_definition() {
        let mut def = simple_definition();
        def.load_rules("q0 a b R q1\nq1 _ _ Y qH", "qH").unwrap();

        let validation = def.validate();
        assert!(validation.is_valid());
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_validate_collects_all_errors_at_once() {
        let mut def = MachineDefinition::define("q0", "a", "qZ", '_');
        def.load_rules("q0 c c R q9", "qX qY").unwrap();

        let validation = def.validate();
        assert_eq!(validation.errors.len(), 4);
        assert!(validation.errors[0].contains("initial state 'qZ'"));
        assert!(validation.errors[1].contains("'qX', 'qY'"));
        assert!(validation.errors[2].contains("'q9'"));
        assert!(validation.errors[3].contains("'c'"));
    }

    #[test]
    fn test_validate_empty_initial_state() {
        let def = MachineDefinition::define("q0", "a", "", '_');
        let validation = def.validate();

        assert_eq!(
            validation.errors,
            vec!["initial state is not defined".to_string()]
        );
    }

    #[test]
    fn test_validate_warns_on_empty_alphabet() {
        let def = MachineDefinition::define("q0", "", "q0", '_');
        let validation = def.validate();

        assert!(validation.is_valid());
        assert_eq!(validation.warnings.len(), 1);
        assert!(validation.warnings[0].contains("tape alphabet"));
    }

    #[test]
    fn test_validate_allows_blank_literal_in_rules() {
        let mut def = simple_definition();
        def.load_rules("q0 _ _ R q1", "").unwrap();

        assert!(def.validate().is_valid());
    }

    #[test]
    fn test_check_input_collects_offending_characters() {
        let def = simple_definition();

        assert!(def.check_input("abba").is_ok());
        assert!(def.check_input("").is_ok());

        let err = def.check_input("ax!x").unwrap_err();
        assert_eq!(err, TuringMachineError::InvalidInputSymbols(vec!['!', 'x']));
    }

    #[test]
    fn test_first_rule_missing_key() {
        let mut def = simple_definition();
        def.load_rules("q0 a a R q1", "").unwrap();

        assert!(def.first_rule("q0", 'b').is_none());
        assert!(def.first_rule("q1", 'a').is_none());
    }
}
