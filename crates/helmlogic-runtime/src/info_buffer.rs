//! Variable store fed by the telemetry layer
//!
//! The `InfoBuffer` keeps the latest text value and the latest numeric value
//! posted for each variable name. The two kinds are stored independently: a
//! numeric post never erases a text value posted earlier under the same name,
//! and vice versa. It also records when each variable was last updated and
//! keeps the values posted since the last call to `clear_deltas`.

use crate::error::Result;
use helmlogic_parser::Condition;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Store handle shared between the telemetry layer and its consumers
pub type SharedInfoBuffer = Arc<RwLock<InfoBuffer>>;

/// Read access to current variable values
pub trait VariableStore {
    /// Latest text value posted for `name`
    fn query_text(&self, name: &str) -> Option<String>;

    /// Latest numeric value posted for `name`
    fn query_number(&self, name: &str) -> Option<f64>;

    /// Query both kinds for each name
    fn sample(&self, names: &[String]) -> Vec<Sample> {
        names
            .iter()
            .map(|name| Sample {
                name: name.clone(),
                text: self.query_text(name),
                number: self.query_number(name),
            })
            .collect()
    }
}

/// Values of one variable taken at a single point in time
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub text: Option<String>,
    pub number: Option<f64>,
}

impl Sample {
    /// Bind this sample into a condition.
    ///
    /// Text is bound before the number, so when both kinds are present the
    /// text value takes the kind-lock and the numeric bind is ignored.
    pub fn apply_to(&self, condition: &mut Condition) {
        if let Some(text) = &self.text {
            condition.set_var_val_text(&self.name, text);
        }
        if let Some(number) = self.number {
            condition.set_var_val_number(&self.name, number);
        }
    }
}

/// In-memory variable store
#[derive(Debug, Clone, Default, Serialize)]
pub struct InfoBuffer {
    /// Current time, supplied by the host
    curr_time: f64,

    text_values: HashMap<String, String>,
    number_values: HashMap<String, f64>,

    /// Buffer time of the latest post, per variable
    update_times: HashMap<String, f64>,
    /// Time stamped on the latest incoming message, per variable
    message_times: HashMap<String, f64>,

    text_deltas: HashMap<String, Vec<String>>,
    number_deltas: HashMap<String, Vec<f64>>,
}

impl InfoBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the buffer in a shareable handle
    pub fn into_shared(self) -> SharedInfoBuffer {
        Arc::new(RwLock::new(self))
    }

    pub fn set_curr_time(&mut self, time: f64) {
        self.curr_time = time;
    }

    pub fn curr_time(&self) -> f64 {
        self.curr_time
    }

    /// Post a text value, stamped with the current buffer time
    pub fn set_text(&mut self, var: &str, value: &str) {
        self.set_text_at(var, value, 0.0);
    }

    /// Post a text value carrying its own message time (0 means "now")
    pub fn set_text_at(&mut self, var: &str, value: &str, msg_time: f64) {
        self.text_values.insert(var.to_string(), value.to_string());
        self.text_deltas
            .entry(var.to_string())
            .or_default()
            .push(value.to_string());
        self.stamp(var, msg_time);
    }

    /// Post a numeric value, stamped with the current buffer time
    pub fn set_number(&mut self, var: &str, value: f64) {
        self.set_number_at(var, value, 0.0);
    }

    /// Post a numeric value carrying its own message time (0 means "now")
    pub fn set_number_at(&mut self, var: &str, value: f64, msg_time: f64) {
        self.number_values.insert(var.to_string(), value);
        self.number_deltas
            .entry(var.to_string())
            .or_default()
            .push(value);
        self.stamp(var, msg_time);
    }

    fn stamp(&mut self, var: &str, msg_time: f64) {
        let msg_time = if msg_time == 0.0 { self.curr_time } else { msg_time };
        self.update_times.insert(var.to_string(), self.curr_time);
        self.message_times.insert(var.to_string(), msg_time);
    }

    pub fn text(&self, var: &str) -> Option<&str> {
        self.text_values.get(var).map(String::as_str)
    }

    pub fn number(&self, var: &str) -> Option<f64> {
        self.number_values.get(var).copied()
    }

    /// Buffer time at which the variable was last posted
    pub fn update_time(&self, var: &str) -> Option<f64> {
        self.update_times.get(var).copied()
    }

    /// Seconds since the variable was last posted
    pub fn time_since_update(&self, var: &str) -> Option<f64> {
        self.update_time(var).map(|t| self.curr_time - t)
    }

    /// Message time of the latest post
    pub fn message_time(&self, var: &str) -> Option<f64> {
        self.message_times.get(var).copied()
    }

    /// Seconds since the message time of the latest post
    pub fn time_since_message(&self, var: &str) -> Option<f64> {
        self.message_time(var).map(|t| self.curr_time - t)
    }

    /// Text values posted since the last `clear_deltas`
    pub fn text_deltas(&self, var: &str) -> Option<&[String]> {
        self.text_deltas.get(var).map(Vec::as_slice)
    }

    /// Numeric values posted since the last `clear_deltas`
    pub fn number_deltas(&self, var: &str) -> Option<&[f64]> {
        self.number_deltas.get(var).map(Vec::as_slice)
    }

    /// Forget the per-cycle history of posted values
    pub fn clear_deltas(&mut self) {
        self.text_deltas.clear();
        self.number_deltas.clear();
    }

    /// True if the variable was ever posted, as text or number
    pub fn is_known(&self, var: &str) -> bool {
        self.update_times.contains_key(var)
    }

    /// Names of all variables ever posted, sorted
    pub fn known_vars(&self) -> Vec<String> {
        let mut vars: Vec<String> = self.update_times.keys().cloned().collect();
        vars.sort();
        vars
    }

    /// JSON dump of the buffer contents
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl VariableStore for InfoBuffer {
    fn query_text(&self, name: &str) -> Option<String> {
        self.text(name).map(str::to_string)
    }

    fn query_number(&self, name: &str) -> Option<f64> {
        self.number(name)
    }
}
