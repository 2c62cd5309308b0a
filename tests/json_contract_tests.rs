use chart_bind::api::{
    CHART_CONFIG_JSON_SCHEMA_V1, ChartBinding, ChartConfig, ChartInputs, PluginRegistry,
    build_chart_config,
};
use chart_bind::core::{ChartKind, DataPoint, OptionsTree, SeriesInput, Viewport};
use chart_bind::render::NullBackend;
use chart_bind::ChartError;
use serde_json::{Value, json};

fn config() -> ChartConfig {
    let inputs = ChartInputs::from_json_str(
        r##"{
            "chartType": "bar",
            "data": [[10, 20], [30, 40]],
            "labels": ["Q1", ["Q2", "late"]],
            "colors": [{"backgroundColor": "#123456"}],
            "legend": false
        }"##,
    )
    .expect("parse inputs");
    build_chart_config(&inputs, &OptionsTree::new()).expect("build")
}

#[test]
fn config_serializes_in_engine_shape() {
    let encoded: Value = serde_json::from_str(&config().to_json_pretty().expect("encode"))
        .expect("valid json");

    assert_eq!(encoded["type"], json!("bar"));
    assert_eq!(encoded["labels"], json!(["Q1", ["Q2", "late"]]));
    assert_eq!(encoded["options"], json!({"legend": {"display": false}}));
    assert_eq!(encoded["datasets"][0]["label"], json!("Q1"));
    assert_eq!(encoded["datasets"][0]["backgroundColor"], json!("#123456"));
    assert_eq!(encoded["datasets"][1]["label"], json!("Q2 late"));
    assert_eq!(encoded["datasets"][1]["data"], json!([30.0, 40.0]));
}

#[test]
fn contract_round_trips_envelope_and_bare_form() {
    let config = config();

    let envelope = config.to_json_contract_v1_pretty().expect("encode contract");
    let envelope_value: Value = serde_json::from_str(&envelope).expect("valid json");
    assert_eq!(envelope_value["schema_version"], json!(CHART_CONFIG_JSON_SCHEMA_V1));
    assert_eq!(ChartConfig::from_json_compat_str(&envelope).expect("decode"), config);

    let bare = config.to_json_pretty().expect("encode bare");
    assert_eq!(ChartConfig::from_json_compat_str(&bare).expect("decode"), config);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let payload = json!({"schema_version": 99, "config": config()}).to_string();
    let err = ChartConfig::from_json_compat_str(&payload).expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidData(message) if message.contains("99")));
}

#[test]
fn binding_exposes_live_config_contract() {
    let inputs = ChartInputs::new(ChartKind::Scatter)
        .with_data(SeriesInput::Single(vec![DataPoint::point(1.0, 2.0)]));
    let mut binding = ChartBinding::new(NullBackend::default(), PluginRegistry::new(), inputs);
    assert!(matches!(
        binding.config_json_contract_v1_pretty(),
        Err(ChartError::NotReady)
    ));

    binding.attach(Viewport::new(320, 200)).expect("attach");
    let contract = binding.config_json_contract_v1_pretty().expect("contract");
    let decoded = ChartConfig::from_json_compat_str(&contract).expect("decode");
    assert_eq!(decoded.datasets[0].data, vec![DataPoint::point(1.0, 2.0)]);
    assert_eq!(Some(&decoded), binding.config());
}
