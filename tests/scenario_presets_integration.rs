use std::process::Command;

#[derive(Debug)]
struct Summary {
    trucks_completed: usize,
    trucks_total: usize,
    clean_used_kwh: f64,
    co2_grams: f64,
    termination: String,
}

#[test]
fn scenario_files_run_via_cli_and_produce_distinct_dynamics() {
    let baseline = run_and_parse("scenarios/baseline.toml");
    let clean_mix = run_and_parse("scenarios/clean_mix.toml");
    let inductive = run_and_parse("scenarios/inductive_heavy.toml");

    assert_eq!(baseline.termination, "completed");
    assert_eq!(baseline.trucks_completed, baseline.trucks_total);
    assert_eq!(baseline.clean_used_kwh, 0.0);
    assert!(baseline.co2_grams > 0.0);

    assert!(
        clean_mix.clean_used_kwh > 0.0 && clean_mix.clean_used_kwh <= 1500.0,
        "expected clean_mix to draw from its budget: {clean_mix:?}"
    );

    assert!(inductive.trucks_completed <= inductive.trucks_total);
    assert!(
        inductive.termination == "completed"
            || inductive.termination.starts_with("stalled"),
        "unexpected termination for inductive_heavy: {inductive:?}"
    );
    assert_eq!(inductive.clean_used_kwh, 0.0);
}

#[test]
fn unknown_preset_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_truck-charge-sim"))
        .args(["--preset", "no_such_preset"])
        .output()
        .expect("truck-charge-sim process should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "stderr={stderr}");
}

fn run_and_parse(path: &str) -> Summary {
    let output = Command::new(env!("CARGO_BIN_EXE_truck-charge-sim"))
        .args(["--scenario", path])
        .output()
        .expect("truck-charge-sim process should run");

    assert!(
        output.status.success(),
        "scenario run failed for {path}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    parse_summary(&stdout)
}

fn parse_summary(stdout: &str) -> Summary {
    let completed = field(stdout, "Trucks completed:");
    let (done, total) = completed
        .split_once(" of ")
        .unwrap_or_else(|| panic!("invalid completion line `{completed}`"));

    Summary {
        trucks_completed: done.trim().parse().expect("completed count"),
        trucks_total: total.trim().parse().expect("total count"),
        clean_used_kwh: parse_metric(stdout, "Clean energy used:", "kWh"),
        co2_grams: parse_metric(stdout, "CO2 emissions:", "g"),
        termination: field(stdout, "Termination:").to_string(),
    }
}

fn field<'a>(stdout: &'a str, label: &str) -> &'a str {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing report line `{label}` in output: {stdout}"));

    line.split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid report format for line `{line}`"))
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let raw = field(stdout, label);
    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from report line `{raw}`"))
}
