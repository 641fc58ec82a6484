//! Caller-facing solve requests and saved presets.
//!
//! A [`SolveRequest`] carries operators as strings, the way they arrive
//! from a form or a JSON body. [`SolveRequest::prepare`] validates it against
//! the set of stats the caller knows about and yields a [`PreparedRequest`]
//! that the engine accepts without further checks.

use std::collections::HashSet;
use std::time::Instant;

use crate::bnb::{solve, SolverOutput};
use crate::error::RequestError;
use crate::model::{Constraint, LoadoutProblem, Priority, Slot, StatId};

/// Largest `top_n` a request may ask for.
pub const MAX_TOP_N: usize = 20;

/// Default `top_n` for requests and presets.
pub const DEFAULT_TOP_N: usize = 5;

/// Longest preset name, in characters.
pub const MAX_PRESET_NAME: usize = 200;

/// A constraint as submitted, with the operator still unparsed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintSpec {
    pub stat: StatId,
    pub operator: String,
    pub value: f64,
}

impl ConstraintSpec {
    pub fn new(stat: StatId, operator: impl Into<String>, value: f64) -> Self {
        Self {
            stat,
            operator: operator.into(),
            value,
        }
    }
}

/// An unvalidated solve request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    #[cfg_attr(feature = "serde", serde(default))]
    pub constraints: Vec<ConstraintSpec>,
    pub priorities: Vec<Priority>,
    #[cfg_attr(feature = "serde", serde(default = "default_top_n"))]
    pub top_n: usize,
}

#[cfg(feature = "serde")]
fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for SolveRequest {
    fn default() -> Self {
        Self {
            constraints: Vec::new(),
            priorities: Vec::new(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl SolveRequest {
    /// Validates the request.
    ///
    /// Zero-weight priorities are dropped rather than rejected; a request
    /// left with none fails with [`RequestError::NoEffectivePriority`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashSet;
    /// use u_loadout::model::Priority;
    /// use u_loadout::request::{ConstraintSpec, SolveRequest};
    ///
    /// let known: HashSet<u32> = [1, 2].into();
    /// let request = SolveRequest {
    ///     constraints: vec![ConstraintSpec::new(2, "<=", 30.0)],
    ///     priorities: vec![Priority::new(1, 1.0), Priority::new(2, 0.0)],
    ///     top_n: 5,
    /// };
    /// let prepared = request.prepare(&known).unwrap();
    /// assert_eq!(prepared.priorities().len(), 1);
    /// ```
    pub fn prepare(&self, known_stats: &HashSet<StatId>) -> Result<PreparedRequest, RequestError> {
        if !(1..=MAX_TOP_N).contains(&self.top_n) {
            return Err(RequestError::TopNOutOfRange {
                got: self.top_n,
                max: MAX_TOP_N,
            });
        }

        let constraints = self
            .constraints
            .iter()
            .map(|spec| {
                check_stat(known_stats, spec.stat, spec.value)?;
                Constraint::parse(spec.stat, &spec.operator, spec.value).map_err(|source| {
                    RequestError::InvalidOperator {
                        stat: spec.stat,
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for p in &self.priorities {
            check_stat(known_stats, p.stat, p.weight)?;
        }
        let priorities: Vec<Priority> = self
            .priorities
            .iter()
            .copied()
            .filter(|p| p.weight != 0.0)
            .collect();
        if priorities.is_empty() {
            return Err(RequestError::NoEffectivePriority);
        }

        Ok(PreparedRequest {
            constraints,
            priorities,
            top_n: self.top_n,
        })
    }
}

fn check_stat(known: &HashSet<StatId>, stat: StatId, value: f64) -> Result<(), RequestError> {
    if !known.contains(&stat) {
        return Err(RequestError::UnknownStat(stat));
    }
    if !value.is_finite() {
        return Err(RequestError::NonFinite(stat));
    }
    Ok(())
}

/// A validated request. Only obtainable through [`SolveRequest::prepare`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    constraints: Vec<Constraint>,
    priorities: Vec<Priority>,
    top_n: usize,
}

impl PreparedRequest {
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Non-zero priorities, never empty.
    pub fn priorities(&self) -> &[Priority] {
        &self.priorities
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Attaches the request to a concrete slot list.
    pub fn into_problem(self, slots: Vec<Slot>) -> LoadoutProblem {
        LoadoutProblem::new(slots)
            .with_constraints(self.constraints)
            .with_priorities(self.priorities)
    }

    /// Runs the engine over `slots` with the request's `top_n`.
    pub fn solve(&self, slots: &[Slot], deadline: Option<Instant>) -> SolverOutput {
        solve(
            slots,
            &self.constraints,
            &self.priorities,
            self.top_n,
            deadline,
        )
    }
}

/// A named, reusable set of constraints and priorities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Preset {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub constraints: Vec<ConstraintSpec>,
    pub priorities: Vec<Priority>,
}

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
            priorities: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ConstraintSpec) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priorities.push(priority);
        self
    }

    /// Checks the preset before it is stored.
    ///
    /// The name must be non-blank and at most [`MAX_PRESET_NAME`] characters,
    /// at least one priority is required and every operator must parse.
    /// Stat ids are checked later, by [`SolveRequest::prepare`].
    ///
    /// ```
    /// use u_loadout::error::RequestError;
    /// use u_loadout::request::Preset;
    ///
    /// assert_eq!(Preset::new("").validate(), Err(RequestError::EmptyPresetName));
    /// ```
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.name.trim().is_empty() {
            return Err(RequestError::EmptyPresetName);
        }
        let len = self.name.chars().count();
        if len > MAX_PRESET_NAME {
            return Err(RequestError::PresetNameTooLong {
                len,
                max: MAX_PRESET_NAME,
            });
        }
        if self.priorities.is_empty() {
            return Err(RequestError::MissingPriority);
        }
        for spec in &self.constraints {
            Constraint::parse(spec.stat, &spec.operator, spec.value).map_err(|source| {
                RequestError::InvalidOperator {
                    stat: spec.stat,
                    source,
                }
            })?;
        }
        Ok(())
    }

    /// A request reproducing this preset.
    pub fn to_request(&self, top_n: usize) -> SolveRequest {
        SolveRequest {
            constraints: self.constraints.clone(),
            priorities: self.priorities.clone(),
            top_n,
        }
    }
}
