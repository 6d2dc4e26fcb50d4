//! Full runs rendered to a buffer

use chrono::{NaiveDate, TimeDelta};
use workcell_core::config::{StepConfig, WorkcellConfig};
use workcell_core::ProtocolError;
use workcell_drivers::{InstantDelay, ManualClock};
use workcell_sim::config::{embedded_config, parse_config, protocol_for};
use workcell_sim::run::execute;

fn clock() -> ManualClock {
    let start = NaiveDate::from_ymd_opt(2024, 5, 14)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap();
    ManualClock::new(start).with_tick(TimeDelta::seconds(1))
}

fn run_to_string(config: &WorkcellConfig) -> (String, u8) {
    let protocol = protocol_for(config);
    let mut out = Vec::new();
    let outcome = execute(config, &protocol, InstantDelay::new(), clock(), &mut out)
        .unwrap();
    (String::from_utf8(out).unwrap(), outcome.exit_code())
}

#[test]
fn test_default_run_report() {
    let config = embedded_config().unwrap();
    let (text, code) = run_to_string(&config);

    assert_eq!(code, 0);
    assert!(text.contains("AUTOMATED CELL LINE SCREENING"));
    assert!(text.contains("Workcell:   Cell Line Screening Workcell"));
    assert!(text.contains("Start time: 2024-05-14 09:30:00"));
    assert_eq!(text.matches(" success").count(), 5);
    assert!(text.contains("Transfers:      5 (5 succeeded, 0 failed)"));
    assert!(text.contains("Success rate:   100.0%"));
    assert!(text.contains("Robot moves:    11"));
    assert!(text.contains("Est. distance:  ~4400mm"));

    let status: Vec<Vec<&str>> = text
        .lines()
        .skip_while(|l| *l != "DEVICE STATUS")
        .skip(3)
        .take(5)
        .map(|l| l.split_whitespace().collect())
        .collect();
    assert_eq!(status[0], ["Storage", "loaded", "CELL_CULTURE_PLATE_001"]);
    assert!(status[1..].iter().all(|row| row[1] == "idle" && row[2] == "empty"));
}

#[test]
fn test_custom_protocol_with_failed_transfer() {
    let config = parse_config(
        r#"
        name = "Bench"

        [[device]]
        name = "Storage"
        x = 100.0
        y = 200.0
        z = 50.0

        [[device]]
        name = "PlateReader"
        x = 1000.0
        y = 200.0
        z = 90.0

        [[plate]]
        device = "Storage"
        id = "P1"

        [protocol]
        label = "Quick read"

        [[protocol.step]]
        action = "transfer"
        title = "Wrong way round"
        plate = "P1"
        from = "PlateReader"
        to = "Storage"

        [[protocol.step]]
        action = "transfer"
        title = "Fetch"
        plate = "P1"
        from = "Storage"
        to = "PlateReader"

        [[protocol.step]]
        action = "return_home"
        title = "Park"
        "#,
    )
    .unwrap();
    assert!(matches!(
        config.protocol.as_ref().unwrap().steps[0],
        StepConfig::Transfer { .. }
    ));

    let (text, code) = run_to_string(&config);

    assert_eq!(code, 0);
    assert!(text.contains("failed: PlateReader has no plate"));
    assert!(text.contains("Transfers:      2 (1 succeeded, 1 failed)"));
    assert!(text.contains("Success rate:   50.0%"));
}

#[test]
fn test_aborted_run_prints_partial_log() {
    let mut config = WorkcellConfig::reference();
    config.plates.clear();

    let protocol = protocol_for(&config);
    let mut out = Vec::new();
    let outcome = execute(&config, &protocol, InstantDelay::new(), clock(), &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_ne!(outcome.exit_code(), 0);
    assert!(matches!(
        outcome.result,
        Err(ProtocolError::Aborted { number: 2, .. })
    ));
    assert!(text.contains("TRANSFER LOG"));
    assert!(text.contains("failed: Storage has no plate"));
    assert!(text.contains("DEVICE STATUS"));
    assert!(text.contains(
        "PROTOCOL FAILED: step 2 (Add cell culture media and reagents) \
         failed: LiquidHandler has no plate"
    ));
    assert!(!text.contains("RUN SUMMARY"));
}
