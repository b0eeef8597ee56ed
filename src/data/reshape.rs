use std::collections::BTreeMap;

use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::data::log::{is_reserved, numeric, Record, XKey};

/// Field-picker defaults derived once per loaded history.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub x_key: XKey,
    pub selected_fields: Vec<String>,
}

/// Metric fields whose names end with this are selected on load.
pub const DEFAULT_FIELD_SUFFIX: &str = "_accuracy";

/// One merged point of the chart: the x-value under its own name plus every
/// selected field some contributing record defined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PlotRow {
    #[serde(skip)]
    x: f64,
    values: Map<String, Value>,
}

pub type PlotTable = Vec<PlotRow>;

impl PlotRow {
    fn new(x_key: XKey, x: f64, raw_x: Value) -> Self {
        let mut values = Map::new();
        values.insert(x_key.as_str().to_string(), raw_x);
        Self { x, values }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn numeric(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }
}

/// Union of every non-reserved key, in first-seen order.
pub fn derive_field_set(log_history: &[Record]) -> Vec<String> {
    let mut fields: IndexSet<&str> = IndexSet::new();
    for record in log_history {
        for key in record.keys() {
            if !is_reserved(key) {
                fields.insert(key.as_str());
            }
        }
    }
    fields.into_iter().map(str::to_string).collect()
}

/// Pick the initial x-axis and field selection.
///
/// `epoch` is preferred unless no record has a numeric epoch or every record's
/// epoch is exactly zero (trainers that only log by step).
pub fn derive_defaults(log_history: &[Record], field_set: &[String]) -> Defaults {
    let selected_fields = field_set
        .iter()
        .filter(|f| f.ends_with(DEFAULT_FIELD_SUFFIX))
        .cloned()
        .collect();

    let has_epoch = log_history.iter().any(|r| numeric(r, "epoch").is_some());
    let all_zero = log_history
        .iter()
        .all(|r| numeric(r, "epoch") == Some(0.0));

    let x_key = if !has_epoch || all_zero {
        XKey::Step
    } else {
        XKey::Epoch
    };

    Defaults {
        x_key,
        selected_fields,
    }
}

/// Merge records sharing an x-value into one row, last non-null value wins,
/// and sort rows ascending by x.
///
/// Records without a numeric value for `x_key` are skipped. The row keeps the
/// raw x-value of the first record that created it.
pub fn reshape(log_history: &[Record], x_key: XKey, selected_fields: &[String]) -> PlotTable {
    let key = x_key.as_str();
    let mut rows: BTreeMap<OrderedFloat<f64>, PlotRow> = BTreeMap::new();

    for record in log_history {
        let Some(raw_x) = record.get(key) else {
            continue;
        };
        let Some(x) = raw_x.as_f64() else {
            continue;
        };

        let row = rows
            .entry(OrderedFloat(x))
            .or_insert_with(|| PlotRow::new(x_key, x, raw_x.clone()));

        for field in selected_fields {
            if field == key {
                continue;
            }
            match record.get(field) {
                Some(Value::Null) | None => {}
                Some(value) => {
                    row.values.insert(field.clone(), value.clone());
                }
            }
        }
    }

    rows.into_values().collect()
}

/// Contiguous `[x, y]` runs for one field. A row without a numeric value for
/// the field ends the current run so the chart shows a gap there.
pub fn series_segments(table: &[PlotRow], field: &str) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();

    for row in table {
        match row.numeric(field) {
            Some(y) => current.push([row.x(), y]),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn history(value: Value) -> Vec<Record> {
        value
            .as_array()
            .expect("array")
            .iter()
            .map(|v| v.as_object().expect("object").clone())
            .collect()
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn field_set_is_union_without_reserved_keys() {
        let log = history(json!([
            {"epoch": 0, "step": 1, "loss": 1.0},
            {"epoch": 1, "step": 2, "eval_loss": 0.9, "loss": 0.8},
            {"step": 3, "train_accuracy": 0.5}
        ]));
        assert_eq!(
            derive_field_set(&log),
            fields(&["loss", "eval_loss", "train_accuracy"])
        );
    }

    #[test]
    fn default_fields_are_accuracy_metrics() {
        let log = history(json!([{"epoch": 1, "train_accuracy": 0.1, "loss": 2.0}]));
        let set = derive_field_set(&log);
        let defaults = derive_defaults(&log, &set);
        assert_eq!(defaults.selected_fields, fields(&["train_accuracy"]));
    }

    #[test]
    fn default_fields_may_be_empty() {
        let log = history(json!([{"epoch": 1, "loss": 2.0, "accuracy": 0.4}]));
        let set = derive_field_set(&log);
        assert!(derive_defaults(&log, &set).selected_fields.is_empty());
    }

    #[test]
    fn all_zero_epochs_default_to_step() {
        let log = history(json!([{"epoch": 0, "step": 1}, {"epoch": 0, "step": 2}]));
        assert_eq!(derive_defaults(&log, &[]).x_key, XKey::Step);
    }

    #[test]
    fn real_epochs_default_to_epoch() {
        let log = history(json!([{"epoch": 1, "loss": 1.0}, {"epoch": 2, "loss": 0.5}]));
        assert_eq!(derive_defaults(&log, &[]).x_key, XKey::Epoch);
    }

    #[test]
    fn missing_epochs_default_to_step() {
        let log = history(json!([{"step": 1}, {"step": 2}]));
        assert_eq!(derive_defaults(&log, &[]).x_key, XKey::Step);
        assert_eq!(derive_defaults(&[], &[]).x_key, XKey::Step);
    }

    #[test]
    fn one_nonzero_epoch_keeps_epoch() {
        let log = history(json!([{"epoch": 0, "step": 1}, {"epoch": 0.5, "step": 2}]));
        assert_eq!(derive_defaults(&log, &[]).x_key, XKey::Epoch);
    }

    #[test]
    fn zero_epochs_mixed_with_missing_epochs_keep_epoch() {
        // A record without epoch breaks "every epoch is zero".
        let log = history(json!([{"epoch": 0, "step": 1}, {"step": 2}]));
        assert_eq!(derive_defaults(&log, &[]).x_key, XKey::Epoch);
    }

    #[test]
    fn later_records_win_within_an_x_value() {
        let log = history(json!([{"epoch": 1, "acc": 0.5}, {"epoch": 1, "acc": 0.9}]));
        let table = reshape(&log, XKey::Epoch, &fields(&["acc"]));
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!([{"epoch": 1, "acc": 0.9}])
        );
    }

    #[test]
    fn nulls_do_not_overwrite_earlier_values() {
        let log = history(json!([
            {"step": 4, "loss": 0.7},
            {"step": 4, "loss": null, "eval_loss": 0.9}
        ]));
        let table = reshape(&log, XKey::Step, &fields(&["loss", "eval_loss"]));
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!([{"step": 4, "loss": 0.7, "eval_loss": 0.9}])
        );
    }

    #[test]
    fn rows_are_sorted_by_x() {
        let log = history(json!([
            {"step": 30, "loss": 0.3},
            {"step": 10, "loss": 0.9},
            {"step": 20, "loss": 0.5},
            {"step": 2.5, "loss": 1.2}
        ]));
        let table = reshape(&log, XKey::Step, &fields(&["loss"]));
        let xs: Vec<f64> = table.iter().map(PlotRow::x).collect();
        assert_eq!(xs, vec![2.5, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn records_without_the_x_key_are_skipped() {
        let log = history(json!([
            {"epoch": 1, "loss": 0.4},
            {"step": 100, "loss": 0.2},
            {"epoch": null, "step": 200, "loss": 0.1},
            {"epoch": "two", "step": 300, "loss": 0.1}
        ]));
        let table = reshape(&log, XKey::Epoch, &fields(&["loss"]));
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!([{"epoch": 1, "loss": 0.4}])
        );
    }

    #[test]
    fn integer_and_float_forms_of_an_x_value_merge() {
        let log = history(json!([{"epoch": 1, "a": 1}, {"epoch": 1.0, "b": 2}]));
        let table = reshape(&log, XKey::Epoch, &fields(&["a", "b"]));
        assert_eq!(table.len(), 1);
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!([{"epoch": 1, "a": 1, "b": 2}])
        );
    }

    #[test]
    fn close_floats_do_not_merge() {
        let log = history(json!([{"epoch": 0.1, "a": 1}, {"epoch": 0.1000001, "a": 2}]));
        assert_eq!(reshape(&log, XKey::Epoch, &fields(&["a"])).len(), 2);
    }

    #[test]
    fn empty_selection_keeps_only_x_values() {
        let log = history(json!([{"epoch": 2, "loss": 1}, {"epoch": 1, "loss": 2}]));
        let table = reshape(&log, XKey::Epoch, &[]);
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!([{"epoch": 1}, {"epoch": 2}])
        );
    }

    #[test]
    fn empty_history_gives_empty_table() {
        assert!(reshape(&[], XKey::Step, &fields(&["loss"])).is_empty());
    }

    #[test]
    fn non_numeric_metric_values_pass_through() {
        let log = history(json!([{"step": 1, "phase": "warmup"}]));
        let table = reshape(&log, XKey::Step, &fields(&["phase"]));
        assert_eq!(table[0].get("phase"), Some(&json!("warmup")));
        assert_eq!(table[0].numeric("phase"), None);
    }

    #[test]
    fn reshape_does_not_touch_its_input() {
        let log = history(json!([{"epoch": 1, "acc": 0.5}, {"epoch": 0, "acc": 0.9}]));
        let before = log.clone();
        let selected = fields(&["acc"]);
        let first = reshape(&log, XKey::Epoch, &selected);
        let second = reshape(&log, XKey::Epoch, &selected);
        assert_eq!(first, second);
        assert_eq!(log, before);
    }

    #[test]
    fn segments_break_on_missing_values() {
        let log = history(json!([
            {"step": 1, "eval_loss": 0.9},
            {"step": 2, "eval_loss": 0.8},
            {"step": 3, "loss": 0.1},
            {"step": 4, "eval_loss": 0.6}
        ]));
        let table = reshape(&log, XKey::Step, &fields(&["eval_loss", "loss"]));
        assert_eq!(
            series_segments(&table, "eval_loss"),
            vec![vec![[1.0, 0.9], [2.0, 0.8]], vec![[4.0, 0.6]]]
        );
        assert_eq!(series_segments(&table, "loss"), vec![vec![[3.0, 0.1]]]);
        assert!(series_segments(&table, "absent").is_empty());
    }
}
