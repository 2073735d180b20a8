//! Integration test: job configuration resolution end-to-end

use autoomics::config::{Balancing, FeatureCount, RunConfig};
use autoomics::error::ConfigError;
use autoomics::registry::Registries;
use std::io::Write;

fn resolve(value: serde_json::Value) -> Result<RunConfig, ConfigError> {
    let raw: RunConfig = serde_json::from_value(value)?;
    raw.resolve(Registries::builtin())
}

fn job(data_type: &str, problem_type: &str, models: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "data": {
            "name": "job",
            "file_path": "/data/x.csv",
            "target": "label",
            "data_type": data_type,
        },
        "ml": {
            "problem_type": problem_type,
            "model_list": models,
        },
    })
}

#[test]
fn test_minimal_classification_job_resolves() {
    let cfg = resolve(job("tabular", "classification", &["RandomForestClassifier"])).unwrap();
    assert_eq!(cfg.ml.fit_scorer.as_deref(), Some("f1_score"));
    assert_eq!(cfg.ml.scorer_list, vec!["f1_score".to_string()]);
    assert!(cfg.tabular.is_some());
    assert!(cfg.prediction.is_none());
}

#[test]
fn test_r2g_scenario() {
    let cfg = resolve(job("R2G", "classification", &["RandomForestClassifier"])).unwrap();
    assert!(!cfg.ml.standardize);
    assert!(cfg.ml.feature_selection.is_none());
    assert_eq!(cfg.ml.balancing, Balancing::None);
    assert!(cfg.tabular.is_none());
    assert!(cfg.microbiome.is_none());
    assert!(cfg.metabolomic.is_none());
    assert!(cfg.gene_expression.is_none());
    assert!(cfg.data.metadata_file.is_none());
}

#[test]
fn test_each_data_type_keeps_only_its_section() {
    let cases = [
        ("tabular", "RandomForestClassifier"),
        ("microbiome", "RandomForestClassifier"),
        ("metabolomic", "RandomForestClassifier"),
        ("gene_expression", "RandomForestClassifier"),
    ];
    for (data_type, model) in cases {
        let cfg = resolve(job(data_type, "classification", &[model])).unwrap();
        assert_eq!(cfg.tabular.is_some(), data_type == "tabular");
        assert_eq!(cfg.microbiome.is_some(), data_type == "microbiome");
        assert_eq!(cfg.metabolomic.is_some(), data_type == "metabolomic");
        assert_eq!(cfg.gene_expression.is_some(), data_type == "gene_expression");
    }
}

#[test]
fn test_grid_tuning_clears_budget() {
    let mut value = job("tabular", "classification", &["RandomForestClassifier"]);
    value["ml"]["hyper_tuning"] = serde_json::json!("grid");
    value["ml"]["hyper_budget"] = serde_json::json!(50);
    let cfg = resolve(value).unwrap();
    assert!(cfg.ml.hyper_budget.is_none());
}

#[test]
fn test_regression_defaults() {
    let cfg = resolve(job("tabular", "regression", &["RandomForestRegressor"])).unwrap();
    assert_eq!(
        cfg.ml.fit_scorer.as_deref(),
        Some("mean_absolute_percentage_error")
    );
    assert!(cfg.ml.encoding.is_none());

    let fs = cfg.ml.feature_selection.unwrap();
    assert_eq!(fs.k, FeatureCount::Auto);
    let auto = fs.auto.unwrap();
    assert_eq!(auto.eval_model.as_deref(), Some("RandomForestRegressor"));
    assert_eq!(auto.eval_metric.as_deref(), Some("mean_squared_error"));
    assert!(auto.low, "mean_squared_error is lower-is-better");
}

#[test]
fn test_rfe_estimator_flows_into_auto_search() {
    let mut value = job("tabular", "classification", &["RandomForestClassifier"]);
    value["ml"]["feature_selection"] = serde_json::json!({
        "method": { "name": "RFE" },
    });
    let cfg = resolve(value).unwrap();
    let fs = cfg.ml.feature_selection.unwrap();
    let estimator = fs.method.unwrap().estimator.unwrap();
    assert_eq!(estimator, "RandomForestClassifier");
    assert_eq!(fs.auto.unwrap().eval_model, Some(estimator));
}

#[test]
fn test_select_k_best_metric_defaulted() {
    let mut value = job("tabular", "classification", &["RandomForestClassifier"]);
    value["ml"]["feature_selection"] = serde_json::json!({
        "method": { "name": "SelectKBest", "metric": null },
    });
    let cfg = resolve(value).unwrap();
    let method = cfg.ml.feature_selection.unwrap().method.unwrap();
    assert_eq!(method.metric.as_deref(), Some("f_classif"));
}

#[test]
fn test_regression_metric_rejected_for_classification_kbest() {
    let mut value = job("tabular", "classification", &["RandomForestClassifier"]);
    value["ml"]["feature_selection"] = serde_json::json!({
        "method": { "name": "SelectKBest", "metric": "mutual_info_regression" },
    });
    let err = resolve(value).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("mutual_info_regression"));
    assert!(msg.contains("classification"));
}

#[test]
fn test_classification_plot_invalid_for_regression() {
    let mut value = job("tabular", "regression", &["RandomForestRegressor"]);
    value["plotting"] = serde_json::json!({ "plot_method": ["roc_curve"] });
    let err = resolve(value).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("roc_curve"));
    assert!(msg.contains("regression"));
}

#[test]
fn test_prediction_without_file_has_no_outputs() {
    let mut value = job("tabular", "classification", &["RandomForestClassifier"]);
    value["prediction"] = serde_json::json!({
        "file_path": null,
        "outfile_name": "scores",
        "metadata_file": "/data/meta.csv",
    });
    let cfg = resolve(value).unwrap();
    let prediction = cfg.prediction.unwrap();
    assert!(prediction.outfile_name.is_none());
    assert!(prediction.metadata_file.is_none());
}

#[test]
fn test_invalid_model_error_enumerates_valid_set() {
    let err = resolve(job("tabular", "classification", &["RandomForestRegressor"])).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("RandomForestRegressor"));
    assert!(msg.contains("RandomForestClassifier"));
}

#[test]
fn test_failed_load_is_atomic() {
    // A late failure (plotting) must not hand back a partially-resolved
    // tree; the caller gets only the error.
    let mut value = job("tabular", "regression", &["RandomForestRegressor"]);
    value["plotting"] = serde_json::json!({ "plot_method": ["conf_matrix"] });
    let result = resolve(value);
    assert!(result.is_err());
}

#[test]
fn test_loader_round_trip_through_file() {
    let value = job("microbiome", "classification", &["RandomForestClassifier", "AutoLGBM"]);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();

    let cfg = autoomics::config::load_config(file.path()).unwrap();
    assert!(cfg.microbiome.is_some());
    assert!(cfg.ml.autolgbm_config.is_some());
    assert!(cfg.ml.autokeras_config.is_none());

    // The resolved tree serializes cleanly and pruned sections are absent.
    let rendered = cfg.to_json_pretty().unwrap();
    assert!(rendered.contains("\"microbiome\""));
    assert!(!rendered.contains("\"tabular\""));
    assert!(!rendered.contains("\"autokeras_config\""));
}

#[test]
fn test_resolution_is_idempotent() {
    let cfg = resolve(job("tabular", "classification", &["RandomForestClassifier"])).unwrap();
    let again = cfg.clone().resolve(Registries::builtin()).unwrap();
    assert_eq!(cfg.to_json_pretty().unwrap(), again.to_json_pretty().unwrap());
}
