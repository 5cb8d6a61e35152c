//! Focused unit tests covering CLI configuration, file checks and output.

use super::helpers::{utf8_tempdir, write_catalog, write_utf8};
use super::*;
use crate::fs::require_existing;
use crate::plan::{PlanArgs, PlanConfig, config_from_layers_for_test};
use crate::stats::{StatsArgs, run_stats_with};
use fuelwise_core::test_support::station;
use fuelwise_core::{CatalogStats, InvalidInputError, VehicleProfile};
use fuelwise_data::routing::DEFAULT_BASE_URL;
use geo::Coord;
use rstest::{fixture, rstest};

#[fixture]
fn args() -> PlanArgs {
    PlanArgs {
        start: Some("Austin, TX".to_owned()),
        end: Some("Dallas, TX".to_owned()),
        api_key: Some("key".to_owned()),
        ..PlanArgs::default()
    }
}

#[rstest]
#[case::start(ARG_START, ENV_START)]
#[case::end(ARG_END, ENV_END)]
#[case::api_key(ARG_API_KEY, ENV_API_KEY)]
fn converting_plan_without_required_field_errors(
    mut args: PlanArgs,
    #[case] missing: &'static str,
    #[case] expected_env: &'static str,
) {
    match missing {
        ARG_START => args.start = None,
        ARG_END => args.end = None,
        _ => args.api_key = None,
    }

    let err = PlanConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, missing);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_applies_defaults(args: PlanArgs) {
    let config = PlanConfig::try_from(args).expect("config should build");

    assert_eq!(config.stations_db, camino::Utf8PathBuf::from(DEFAULT_STATIONS_DB));
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.vehicle, VehicleProfile::new(500.0, 10.0));
    assert_eq!(config.margin_degrees, 0.5);
}

#[rstest]
fn optimizer_config_carries_vehicle_and_margin(mut args: PlanArgs) {
    args.vehicle_range = Some(320.0);
    args.vehicle_mpg = Some(25.0);
    args.margin = Some(1.5);

    let config = PlanConfig::try_from(args).expect("config should build");
    let optimizer = config.optimizer_config();

    assert_eq!(optimizer.vehicle_range_miles, 320.0);
    assert_eq!(optimizer.vehicle_mpg, 25.0);
    assert_eq!(optimizer.bounding_box_margin_degrees, 1.5);
    assert_eq!(optimizer.sample_interval_miles, 50.0);
}

#[rstest]
#[case::negative_range(Some(-10.0), None, None)]
#[case::zero_mpg(None, Some(0.0), None)]
#[case::zero_margin(None, None, Some(0.0))]
fn plan_config_rejects_invalid_settings(
    mut args: PlanArgs,
    #[case] range: Option<f64>,
    #[case] mpg: Option<f64>,
    #[case] margin: Option<f64>,
) {
    args.vehicle_range = range;
    args.vehicle_mpg = mpg;
    args.margin = margin;

    let err = PlanConfig::try_from(args).expect_err("invalid settings");
    assert!(
        matches!(
            err,
            CliError::InvalidSettings(
                InvalidInputError::NonPositiveRange { .. }
                    | InvalidInputError::NonPositiveMpg { .. }
                    | InvalidInputError::InvalidConfig { .. }
            )
        ),
        "unexpected error {err:?}"
    );
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "vehicle_range": "far" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "vehicle_range": 400.0,
            "vehicle_mpg": 12.0,
            "base_url": "http://from-file/route",
        }),
        None,
    );
    composer.push_environment(json!({
        "api_key": "from-env",
        "vehicle_mpg": 14.0,
    }));
    composer.push_cli(json!({
        "start": "Austin, TX",
        "end": "Dallas, TX",
        "vehicle_range": 300.0,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.api_key, "from-env");
    assert_eq!(config.vehicle, VehicleProfile::new(300.0, 14.0));
    assert_eq!(config.base_url, "http://from-file/route");
}

#[rstest]
fn require_existing_reports_missing_and_non_file_paths() {
    let (_tmp, root) = utf8_tempdir();
    let file = root.join("stations.db");
    write_utf8(&file, b"db");

    require_existing(&file, ARG_STATIONS_DB).expect("file exists");
    assert!(matches!(
        require_existing(&root.join("absent.db"), ARG_STATIONS_DB),
        Err(CliError::MissingSourceFile { field: ARG_STATIONS_DB, .. })
    ));
    assert!(matches!(
        require_existing(&root, ARG_STATIONS_DB),
        Err(CliError::SourcePathNotFile { .. })
    ));
}

#[rstest]
fn stats_command_prints_catalog_summary() {
    let (_tmp, root) = utf8_tempdir();
    let db = root.join("stations.db");
    write_catalog(
        &db,
        &[
            station(1, 3.19, Coord { x: -97.74, y: 30.27 }),
            station(2, 2.59, Coord { x: -96.80, y: 32.78 }),
        ],
    );
    let mut stdout = Vec::new();

    run_stats_with(
        StatsArgs {
            stations_db: Some(db),
        },
        &mut stdout,
    )
    .expect("stats should succeed");

    let text = String::from_utf8(stdout).expect("stdout utf-8");
    assert!(text.ends_with('\n'));
    let stats: CatalogStats = serde_json::from_str(&text).expect("stats JSON");
    assert_eq!(stats.total_stations, 2);
    assert_eq!(stats.states_covered, 1);
    assert_eq!(stats.cheapest_price, Some(2.59));
}

#[rstest]
fn stats_command_reports_unreadable_catalog() {
    let (_tmp, root) = utf8_tempdir();
    let db = root.join("stations.db");
    write_utf8(&db, b"not a database");

    let err = run_stats_with(
        StatsArgs {
            stations_db: Some(db.clone()),
        },
        &mut Vec::new(),
    )
    .expect_err("garbage catalog should fail");

    match err {
        CliError::OpenStationStore { path, .. } => assert_eq!(path, db),
        other => panic!("expected OpenStationStore, found {other:?}"),
    }
}

#[rstest]
fn cli_parses_plan_arguments() {
    let cli = Cli::try_parse_from([
        "fuelwise",
        "plan",
        "Austin, TX",
        "Dallas, TX",
        "--vehicle-range",
        "420",
    ])
    .expect("arguments should parse");

    match cli.command {
        Command::Plan(args) => {
            assert_eq!(args.start.as_deref(), Some("Austin, TX"));
            assert_eq!(args.vehicle_range, Some(420.0));
        }
        Command::Stats(_) => panic!("expected plan command"),
    }
}
