//! JavaScript bindings.
//!
//! Inputs and outputs cross the boundary as plain JS objects with the same
//! field names as the Rust types. Requests go through the same validation as
//! [`SolveRequest::prepare`].

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

use crate::bnb::{BnbConfig, BnbRunner};
use crate::error::{ConfigError, RequestError};
use crate::model::{LoadoutProblem, Slot, StatId};
use crate::request::SolveRequest;

#[derive(Debug, Deserialize)]
struct JsRequest {
    slots: Vec<Slot>,
    #[serde(flatten)]
    request: SolveRequest,
    /// Stat ids the profile defines. Defaults to every stat carried by an item.
    #[serde(default)]
    stats: Option<Vec<StatId>>,
    #[serde(default)]
    time_limit_ms: Option<u64>,
}

#[derive(Debug, Error)]
enum InputError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl JsRequest {
    fn into_problem(self) -> Result<(LoadoutProblem, BnbConfig), InputError> {
        let known: HashSet<StatId> = match self.stats {
            Some(stats) => stats.into_iter().collect(),
            None => self
                .slots
                .iter()
                .flat_map(|s| s.items.iter())
                .flat_map(|i| i.stats.keys().copied())
                .collect(),
        };
        let prepared = self.request.prepare(&known)?;

        let mut config = BnbConfig::default().with_top_n(prepared.top_n());
        if let Some(ms) = self.time_limit_ms {
            config = config.with_time_limit_ms(ms);
        }
        config.validate()?;

        Ok((prepared.into_problem(self.slots), config))
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Solves `{ slots, constraints, priorities, top_n?, stats?, time_limit_ms? }`
/// and returns the solver output.
#[wasm_bindgen(js_name = solveLoadout)]
pub fn solve_loadout(input: JsValue) -> Result<JsValue, JsValue> {
    let request: JsRequest = serde_wasm_bindgen::from_value(input)?;
    let (problem, config) = request.into_problem().map_err(to_js_error)?;
    let output = BnbRunner::run(&problem, &config);
    serde_wasm_bindgen::to_value(&output).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(json: &str) -> JsRequest {
        serde_json::from_str(json).unwrap()
    }

    const SLOTS: &str = r#""slots": [{"id": 1, "name": "Head", "items": [
        {"id": 1, "name": "Helm", "stats": {"1": 10.0, "2": 5.0}}
    ]}]"#;

    #[test]
    fn test_valid_input_builds_problem() {
        let request = parse(&format!(
            r#"{{ {SLOTS}, "constraints": [{{"stat": 2, "operator": "<=", "value": 30}}],
                "priorities": [{{"stat": 1, "weight": 1.0}}], "top_n": 3, "time_limit_ms": 250 }}"#
        ));
        let (problem, config) = request.into_problem().unwrap();
        assert_eq!(problem.constraints.len(), 1);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.time_limit, Duration::from_millis(250));

        let output = BnbRunner::run(&problem, &config);
        assert_eq!(output.results[0].score, 10.0);
    }

    #[test]
    fn test_top_n_out_of_range_rejected() {
        let request = parse(&format!(
            r#"{{ {SLOTS}, "priorities": [{{"stat": 1, "weight": 1.0}}], "top_n": 500 }}"#
        ));
        assert!(matches!(
            request.into_problem(),
            Err(InputError::Request(RequestError::TopNOutOfRange { got: 500, .. }))
        ));
    }

    #[test]
    fn test_unknown_stat_rejected() {
        let request = parse(&format!(
            r#"{{ {SLOTS}, "priorities": [{{"stat": 9, "weight": 1.0}}] }}"#
        ));
        assert!(matches!(
            request.into_problem(),
            Err(InputError::Request(RequestError::UnknownStat(9)))
        ));

        let declared = parse(&format!(
            r#"{{ {SLOTS}, "stats": [1, 2, 9], "priorities": [{{"stat": 9, "weight": 1.0}}] }}"#
        ));
        assert!(declared.into_problem().is_ok());
    }

    #[test]
    fn test_zero_time_limit_rejected() {
        let request = parse(&format!(
            r#"{{ {SLOTS}, "priorities": [{{"stat": 1, "weight": 1.0}}], "time_limit_ms": 0 }}"#
        ));
        assert!(matches!(
            request.into_problem(),
            Err(InputError::Config(ConfigError::ZeroTimeLimit))
        ));
    }
}
