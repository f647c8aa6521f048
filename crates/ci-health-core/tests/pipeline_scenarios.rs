use ci_health_core::arch::Arch;
use ci_health_core::config::parse_config;
use ci_health_core::contacts::parse_mention;
use ci_health_core::input::parse_snapshot;
use ci_health_core::pipeline::summarize_files;
use ci_health_core::report::build_summary;
use ci_health_core::HealthError;
use chrono::{TimeZone, Utc};
use std::path::Path;

const CONFIG: &str = r#"
maintainers:
  "@alice":
    name: Alice
    slack:
      kata-containers: U123
  "@carol":
    name: Carol
    slack:
      cncf: C456
"#;

fn snapshot_json() -> serde_json::Value {
    serde_json::json!({
        "allJobs": {
            "tests": [
                {
                    "name": "foo [s390x]",
                    "status": "failed",
                    "maintainers": ["@alice", "@bob"],
                    "runId": 991,
                    "jobId": "job-7",
                    "weatherHistory": [
                        {"date": "2024-01-01", "status": "passed"},
                        {"date": "2024-01-02", "status": "failed", "failureStep": "Run tests",
                         "failureDetails": {"failures": [{"name": "k8s-exec.bats"}]}},
                        {"date": "2024-01-03", "status": "failed", "failureStep": "Run tests"}
                    ]
                },
                {
                    "name": "flappy [arm64]",
                    "status": "passed",
                    "maintainers": ["@carol"],
                    "weatherHistory": [
                        {"date": "2024-01-03", "status": "passed"},
                        {"date": "2024-01-02", "status": "failed"},
                        {"date": "2024-01-01", "status": "passed"},
                        {"date": "2023-12-31", "status": "failed"},
                        {"date": "2023-12-30", "status": "passed"}
                    ]
                },
                {
                    "name": "steady",
                    "status": "passed",
                    "weatherHistory": [
                        {"date": "2024-01-01", "status": "passed"},
                        {"date": "2024-01-02", "status": "passed"},
                        {"date": "2024-01-03", "status": "passed"}
                    ]
                },
                {"name": "queued", "status": "not_run"},
                {"name": "idle", "status": "none"},
                {"name": "busy", "status": "running"}
            ]
        }
    })
}

#[test]
fn full_snapshot_summary() {
    let snap = parse_snapshot(&snapshot_json().to_string(), Path::new("data.json")).unwrap();
    let cfg = parse_config(CONFIG, Path::new("config.yaml")).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 1, 3, 8, 0, 0).unwrap();
    let s = build_summary(&snap, &cfg.maintainers, at);

    assert_eq!(s.total_tests, 6);
    assert_eq!(s.passed_count, 2);
    assert_eq!(s.failed_count, 1);
    assert_eq!(s.not_run_count, 2);
    assert_eq!(s.running_count, 1);
    assert_eq!(s.overall_pass_rate, 33);
    assert_eq!(s.sections[0].weather_label, "stormy");

    let foo = &s.failing_tests[0];
    assert_eq!(foo.name, "foo [s390x]");
    assert_eq!(foo.arch, Arch::S390x);
    assert_eq!(foo.days_failing, 2);
    assert_eq!(foo.error_step, "Run tests");
    assert!(foo.specific_failures.is_empty(), "most recent failure has no details");
    assert_eq!(foo.run_id, Some(serde_json::json!(991)));
    assert_eq!(foo.job_id, Some(serde_json::json!("job-7")));
    let contacts: Vec<&str> = foo.contacts.split(' ').collect();
    assert_eq!(parse_mention(contacts[0]), Some("U123"));
    assert_eq!(contacts[1], "@bob");

    assert_eq!(s.flaky_count, 1);
    let flappy = &s.flaky_tests[0];
    assert_eq!(flappy.arch, Arch::Arm64);
    assert_eq!(flappy.transitions, 4);
    assert_eq!(flappy.flaky_rate, 100);
    assert_eq!(parse_mention(&flappy.contacts), Some("C456"));
    assert_eq!(s.flaky_arch_summary, "arm64: 1");
    assert_eq!(s.failing_arch_summary, "s390x: 1");

    // Today is 2024-01-03; baseline days 01-02, 01-01, 12-31, 12-30 have
    // 2, 0, 1, 0 failing tests.
    assert_eq!(s.ten_day_avg_failed, 0.8);
    assert!((s.failed_delta - 0.2).abs() < 1e-9);
    assert_eq!(s.trend, "Stable");
}

#[test]
fn regressing_scenario_from_flat_baseline() {
    let mut tests = Vec::new();
    for i in 0..5 {
        let mut history: Vec<serde_json::Value> = (1..=9)
            .map(|d| {
                let status = if i < 3 { "failed" } else { "passed" };
                serde_json::json!({"date": format!("2024-02-{d:02}"), "status": status})
            })
            .collect();
        history.push(serde_json::json!({"date": "2024-02-10", "status": "failed"}));
        tests.push(serde_json::json!({
            "name": format!("t{i}"),
            "status": "failed",
            "weatherHistory": history
        }));
    }
    let raw = serde_json::json!({"allJobs": {"tests": tests}}).to_string();
    let snap = parse_snapshot(&raw, Path::new("data.json")).unwrap();
    let s = build_summary(&snap, &Default::default(), Utc::now());

    assert_eq!(s.failed_count, 5);
    assert_eq!(s.ten_day_avg_failed, 3.0);
    assert_eq!(s.failed_delta, 2.0);
    assert_eq!(s.trend, "Regressing");
}

#[test]
fn summarize_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data.json");
    let config = dir.path().join("config.yaml");
    std::fs::write(&data, snapshot_json().to_string()).unwrap();
    std::fs::write(&config, CONFIG).unwrap();

    let s = summarize_files(&data, &config, Utc::now()).unwrap();
    assert_eq!(s.total_tests, 6);
}

#[test]
fn missing_inputs_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data.json");
    let config = dir.path().join("config.yaml");

    let err = summarize_files(&data, &config, Utc::now()).unwrap_err();
    assert!(matches!(err, HealthError::SnapshotRead { .. }));

    std::fs::write(&data, "{}").unwrap();
    let err = summarize_files(&data, &config, Utc::now()).unwrap_err();
    assert!(matches!(err, HealthError::ConfigRead { .. }));
    assert_eq!(err.path(), Some(config.as_path()));
}
