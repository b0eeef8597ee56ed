use pretty_assertions::assert_eq;
use serde_json::json;
use trainer_state_viz::data::ingest::{ingest, ingest_bytes, read_log_file};
use trainer_state_viz::data::log::XKey;
use trainer_state_viz::data::reshape::{derive_defaults, derive_field_set, reshape, series_segments};
use trainer_state_viz::state::viewer::ViewerState;

const FIXTURE: &str = include_str!("fixtures/trainer_state.json");

#[test]
fn end_to_end_scenario() {
    let raw = r#"{"log_history":[{"epoch":0,"loss":1.0},{"epoch":1,"loss":0.5,"val_accuracy":0.7},{"epoch":1,"loss":0.4,"val_accuracy":0.8}]}"#;
    let ingested = ingest(raw).expect("valid upload");

    let fields = derive_field_set(&ingested.log_history);
    assert_eq!(fields, vec!["loss".to_string(), "val_accuracy".to_string()]);

    let defaults = derive_defaults(&ingested.log_history, &fields);
    assert_eq!(defaults.selected_fields, vec!["val_accuracy".to_string()]);
    assert_eq!(defaults.x_key, XKey::Epoch);

    let table = reshape(&ingested.log_history, defaults.x_key, &defaults.selected_fields);
    assert_eq!(
        serde_json::to_value(&table).unwrap(),
        json!([{"epoch": 0}, {"epoch": 1, "val_accuracy": 0.8}])
    );
}

#[test]
fn hugging_face_trainer_state_fixture() {
    let ingested = ingest_bytes(FIXTURE.as_bytes()).expect("fixture is valid");
    assert_eq!(ingested.log_history.len(), 7);
    assert_eq!(ingested.document["global_step"], json!(200));

    let fields = derive_field_set(&ingested.log_history);
    assert_eq!(
        fields,
        [
            "grad_norm",
            "learning_rate",
            "loss",
            "eval_accuracy",
            "eval_loss",
            "eval_runtime",
            "total_flos",
            "train_loss",
            "train_runtime",
        ]
    );

    let defaults = derive_defaults(&ingested.log_history, &fields);
    assert_eq!(defaults.x_key, XKey::Epoch);
    assert_eq!(defaults.selected_fields, ["eval_accuracy"]);

    let selected = vec!["eval_accuracy".to_string(), "loss".to_string()];
    let by_step = reshape(&ingested.log_history, XKey::Step, &selected);
    assert_eq!(
        serde_json::to_value(&by_step).unwrap(),
        json!([
            {"step": 50, "loss": 0.6931},
            {"step": 100, "loss": 0.5512, "eval_accuracy": 0.7625},
            {"step": 150, "loss": 0.4420},
            {"step": 200, "loss": 0.3805, "eval_accuracy": 0.8125}
        ])
    );
    assert_eq!(
        series_segments(&by_step, "eval_accuracy"),
        vec![vec![[100.0, 0.7625]], vec![[200.0, 0.8125]]]
    );

    let by_epoch = reshape(&ingested.log_history, XKey::Epoch, &selected);
    let epochs: Vec<f64> = by_epoch.iter().map(|r| r.x()).collect();
    assert_eq!(epochs, vec![0.5, 1.0, 1.5, 2.0]);
}

#[test]
fn fixture_read_from_disk_loads_into_viewer() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/trainer_state.json");
    let ingested = read_log_file(&path);

    let mut viewer = ViewerState::new();
    assert!(viewer.finish_load("trainer_state.json", ingested));
    assert_eq!(viewer.x_key(), XKey::Epoch);
    assert_eq!(viewer.selected_fields(), ["eval_accuracy"]);
    assert_eq!(viewer.plot_table().len(), 4);
    assert_eq!(viewer.loaded().unwrap().document["best_metric"], json!(0.8125));
}

#[test]
fn step_only_logs_default_to_step_axis() {
    let raw = r#"{"log_history":[
        {"epoch":0,"step":10,"train_accuracy":0.2,"loss":2.1},
        {"epoch":0,"step":20,"train_accuracy":0.4,"loss":1.7}
    ]}"#;
    let mut viewer = ViewerState::new();
    viewer.load_text("steps.json", raw);
    assert_eq!(viewer.x_key(), XKey::Step);
    assert_eq!(
        serde_json::to_value(viewer.plot_table()).unwrap(),
        json!([{"step": 10, "train_accuracy": 0.2}, {"step": 20, "train_accuracy": 0.4}])
    );
}
