//! Truck charging simulator entry point: CLI wiring and config-driven runs.

use std::path::Path;
use std::process;

use truck_charge_sim::config::ScenarioConfig;
use truck_charge_sim::io::export::export_csv;
use truck_charge_sim::runner::run_trials;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    runs_override: Option<usize>,
    telemetry_out: Option<String>,
    verbose: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("truck-charge-sim: electric truck fleet charging simulator");
    eprintln!();
    eprintln!("Usage: truck-charge-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --runs <n>               Override number of averaged runs");
    eprintln!("  --telemetry-out <path>   Export first-run tick records to CSV");
    eprintln!("  --verbose                Print one line per tick of the first run");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after simulation");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

/// Returns the value following flag `name`, or exits with an error.
fn flag_value<'a>(args: &'a [String], i: usize, name: &str, kind: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => {
            eprintln!("error: {name} requires a {kind} argument");
            process::exit(1);
        }
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, name: &str, kind: &str) -> T {
    raw.parse::<T>().unwrap_or_else(|_| {
        eprintln!("error: {name} value \"{raw}\" is not a valid {kind}");
        process::exit(1);
    })
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        runs_override: None,
        telemetry_out: None,
        verbose: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                cli.scenario_path = Some(flag_value(&args, i, "--scenario", "path").to_string());
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(flag_value(&args, i, "--preset", "name").to_string());
            }
            "--seed" => {
                i += 1;
                let raw = flag_value(&args, i, "--seed", "u64");
                cli.seed_override = Some(parse_number(raw, "--seed", "u64"));
            }
            "--runs" => {
                i += 1;
                let raw = flag_value(&args, i, "--runs", "count");
                cli.runs_override = Some(parse_number(raw, "--runs", "count"));
            }
            "--telemetry-out" => {
                i += 1;
                cli.telemetry_out =
                    Some(flag_value(&args, i, "--telemetry-out", "path").to_string());
            }
            "--verbose" | "-v" => {
                cli.verbose = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = flag_value(&args, i, "--port", "u16");
                cli.port = parse_number(raw, "--port", "u16");
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.scenario_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --scenario and --preset are mutually exclusive");
        process::exit(1);
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let loaded = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::baseline())
    };
    let mut scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(runs) = cli.runs_override {
        scenario.simulation.runs = runs;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    #[cfg(feature = "api")]
    let record = cli.verbose || cli.telemetry_out.is_some() || cli.serve;
    #[cfg(not(feature = "api"))]
    let record = cli.verbose || cli.telemetry_out.is_some();

    eprintln!(
        "Simulating {} trucks at {} charging groups, {} run(s), seed {}",
        scenario.fleet.trucks,
        scenario.groups.len(),
        scenario.simulation.runs,
        scenario.simulation.seed
    );

    let outcome = run_trials(&scenario, record).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    if cli.verbose {
        for t in &outcome.first_run_ticks {
            println!("{t}");
        }
    }

    for (i, report) in outcome.reports.iter().enumerate() {
        if outcome.reports.len() > 1 {
            println!("\n[run {}]", i + 1);
        }
        println!("{report}");
    }
    if outcome.reports.len() > 1 {
        println!("\n{}", outcome.summary);
    }

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&outcome.first_run_ticks, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let config = scenario.sim_config().unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        });
        let Some(report) = outcome.reports.first().cloned() else {
            eprintln!("error: no run to serve");
            process::exit(1);
        };
        let state = Arc::new(truck_charge_sim::api::AppState {
            config,
            report,
            ticks: outcome.first_run_ticks,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(truck_charge_sim::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
