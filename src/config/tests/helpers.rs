//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::TallyConfig;

/// Workflow variables read as fallbacks, all cleared.
pub const CLEARED_WORKFLOW_ENV: [(&str, Option<&str>); 4] = [
    ("GITHUB_TOKEN", None),
    ("GITHUB_REPOSITORY", None),
    ("GITHUB_EVENT_PATH", None),
    ("GITHUB_API_URL", None),
];

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Helper to compose a [`TallyConfig`] from a sequence of `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> TallyConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    TallyConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// A configuration with every required warehouse value set.
pub fn complete_config() -> TallyConfig {
    TallyConfig {
        project_id: Some("analytics-prod".to_owned()),
        dataset_id: Some("engineering".to_owned()),
        table_id: Some("pull_requests".to_owned()),
        comments_table_id: Some("pull_request_comments".to_owned()),
        access_token: Some("ya29.token".to_owned()),
        github_token: Some("ghp_example".to_owned()),
        repository: Some("acme/widgets".to_owned()),
        ..TallyConfig::default()
    }
}
