//! Integration tests for the charging engine.

mod common;

use std::collections::HashSet;

use common::{group, hourly, truck};
use truck_charge_sim::runner::{build_engine, run_once};
use truck_charge_sim::sim::engine::Engine;
use truck_charge_sim::sim::scoring::{can_dock, effective_rate_kw, is_inductive_only};
use truck_charge_sim::sim::truck::{Port, TruckId};
use truck_charge_sim::sim::types::Termination;

#[test]
fn single_truck_charges_in_two_hours_without_loss() {
    let mut engine = Engine::new(
        hourly(0.0),
        vec![truck(100.0, 50.0, &[Port::Top])],
        vec![group(1, 100.0, &[Port::Top], false)],
    );
    assert_eq!(engine.groups()[0].docked(), &[TruckId(0)]);

    let results = engine.run();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].delivered_kwh, 50.0);
    assert_eq!(results[1].completed, 1);

    let report = engine.report();
    assert_eq!(report.termination, Some(Termination::Completed));
    assert_eq!(report.elapsed_hours, 2.0);
    assert_eq!(report.energy_loss_pct, 0.0);
}

#[test]
fn inductive_only_pairing_charges_slower() {
    let wired = truck(400.0, 200.0, &[Port::Top]);
    let coil = truck(400.0, 200.0, &[Port::Inductive]);
    let station = group(1, 200.0, &[Port::Top, Port::Inductive], false);

    assert!(!is_inductive_only(&wired, &station));
    assert!(is_inductive_only(&coil, &station));
    assert_eq!(effective_rate_kw(&wired, &station), 200.0);
    assert!((effective_rate_kw(&coil, &station) - 140.0).abs() < 1e-9);

    let mut fast = Engine::new(hourly(0.0), vec![wired], vec![station.clone()]);
    let mut slow = Engine::new(hourly(0.0), vec![coil], vec![station]);
    assert_eq!(fast.run().len(), 2);
    assert_eq!(slow.run().len(), 3);
    assert_eq!(slow.termination(), Some(Termination::Completed));
}

#[test]
fn clean_exhaustion_returns_truck_to_waiting_and_another_group_takes_it() {
    // truck 0 fits both groups, truck 1 only the grid-fed one
    let mut engine = Engine::new(
        hourly(10.0),
        vec![
            truck(20.0, 50.0, &[Port::Top, Port::Left]),
            truck(100.0, 50.0, &[Port::Left]),
        ],
        vec![
            group(1, 50.0, &[Port::Top], true),
            group(1, 50.0, &[Port::Left], false),
        ],
    );
    assert_eq!(engine.groups()[0].docked(), &[TruckId(0)]);
    assert_eq!(engine.groups()[1].docked(), &[TruckId(1)]);

    let first = engine.step().expect("first tick should run");
    assert!(first.clean_exhausted);
    assert_eq!(first.clean_drawn_kwh, 10.0);
    assert_eq!(first.evicted, 1);
    assert_eq!(engine.truck(TruckId(0)).current_charge_kwh(), 10.0);
    assert!(engine.groups()[0].docked().is_empty());
    assert_eq!(engine.waiting(), &[TruckId(0)]);

    // truck 1 finishes and truck 0 takes its slot in the same tick
    let second = engine.step().expect("second tick should run");
    assert_eq!(second.completed, 1);
    assert_eq!(second.assigned, 1);
    assert_eq!(engine.groups()[1].docked(), &[TruckId(0)]);

    engine.run();
    let report = engine.report();
    assert_eq!(report.termination, Some(Termination::Completed));
    assert_eq!(report.trucks_completed, 2);
    assert_eq!(report.clean_energy_used_kwh, 10.0);
    assert_eq!(report.energy_delivered_kwh, 160.0);
    assert_eq!(report.energy_received_kwh, 120.0);
    assert_eq!(report.co2_grams, 150.0 * 250.0);
}

#[test]
fn exhaustion_mid_pass_evicts_trucks_charged_earlier_in_the_pass() {
    // budget covers truck 0 fully and truck 1 only partly
    let mut engine = Engine::new(
        hourly(60.0),
        vec![
            truck(100.0, 50.0, &[Port::Top]),
            truck(100.0, 50.0, &[Port::Top]),
        ],
        vec![
            group(2, 50.0, &[Port::Top], true),
            group(2, 50.0, &[Port::Top], false),
        ],
    );
    assert_eq!(engine.groups()[0].docked(), &[TruckId(0), TruckId(1)]);

    let first = engine.step().expect("first tick should run");
    assert!(first.clean_exhausted);
    assert_eq!(first.evicted, 2);
    assert_eq!(first.clean_drawn_kwh, 60.0);
    assert_eq!(engine.truck(TruckId(0)).current_charge_kwh(), 50.0);
    assert_eq!(engine.truck(TruckId(1)).current_charge_kwh(), 10.0);
    assert!(engine.groups()[0].docked().is_empty());
    // both picked up by the grid-fed group in the same tick
    assert_eq!(first.assigned, 2);
    assert_eq!(engine.groups()[1].docked(), &[TruckId(0), TruckId(1)]);
    assert!(engine.all_assigned());

    let second = engine.step().expect("second tick should run");
    assert_eq!(second.evicted, 0);
    assert_eq!(second.completed, 1);
    assert_eq!(engine.truck(TruckId(0)).current_charge_kwh(), 100.0);
    assert_eq!(engine.truck(TruckId(1)).current_charge_kwh(), 60.0);
}

#[test]
fn higher_score_wins_the_single_slot() {
    // scores: 2.0 for truck 0, 5.0 for truck 1
    let engine = Engine::new(
        hourly(0.0),
        vec![
            truck(50.0, 50.0, &[Port::Top]),
            truck(125.0, 50.0, &[Port::Top]),
        ],
        vec![group(1, 100.0, &[Port::Top], false)],
    );
    assert_eq!(engine.groups()[0].docked(), &[TruckId(1)]);
    assert_eq!(engine.waiting(), &[TruckId(0)]);
}

#[test]
fn generated_runs_keep_every_truck_in_one_place() {
    let mut engine = build_engine(&common::coarse_baseline(25), 3).expect("scenario should build");
    let fleet_size = engine.fleet().len();
    let mut charge: Vec<f64> = engine.fleet().iter().map(|t| t.current_charge_kwh()).collect();
    let mut clean_left = engine.clean_budget().remaining_kwh();

    while let Some(result) = engine.step() {
        let mut seen = HashSet::new();
        for id in engine.waiting() {
            assert!(seen.insert(*id), "{id:?} held twice");
        }
        for g in engine.groups() {
            assert!(g.docked().len() <= g.slot_count());
            for id in g.docked() {
                assert!(seen.insert(*id), "{id:?} held twice");
                assert!(can_dock(engine.truck(*id), g), "{id:?} docked at incompatible group");
            }
        }
        assert_eq!(seen.len() + engine.completed(), fleet_size);
        assert_eq!(result.waiting + result.docked + engine.completed(), fleet_size);

        for (i, t) in engine.fleet().iter().enumerate() {
            assert!(t.current_charge_kwh() <= t.battery_capacity_kwh());
            assert!(t.current_charge_kwh() >= charge[i], "charge must not decrease");
            charge[i] = t.current_charge_kwh();
        }

        assert!(result.received_kwh <= result.delivered_kwh + 1e-9);
        assert!(engine.clean_budget().remaining_kwh() <= clean_left);
        clean_left = engine.clean_budget().remaining_kwh();
    }

    let report = engine.report();
    assert_eq!(report.termination, Some(Termination::Completed));
    assert_eq!(report.trucks_completed, fleet_size);
    assert!(report.energy_delivered_kwh >= report.total_requested_kwh - 1e-6);
    assert!((report.energy_received_kwh - report.total_requested_kwh).abs() < 1e-6);
}

#[test]
fn clean_mix_preset_respects_budget() {
    let mut cfg = truck_charge_sim::config::ScenarioConfig::clean_mix();
    cfg.simulation.tick_seconds = 600.0;
    let mut engine = build_engine(&cfg, 42).expect("scenario should build");

    let mut was_exhausted = false;
    while let Some(result) = engine.step() {
        if was_exhausted {
            assert!(result.clean_exhausted, "exhaustion is permanent");
            assert_eq!(result.clean_drawn_kwh, 0.0);
        }
        was_exhausted = result.clean_exhausted;
    }

    let report = engine.report();
    assert!(report.clean_energy_used_kwh <= 1500.0 + 1e-9);
    assert!(report.clean_energy_used_kwh > 0.0);
    assert!(report.energy_received_kwh <= report.energy_delivered_kwh + 1e-9);
}

#[test]
fn fully_docked_fleet_finishes_within_slowest_charge_time() {
    let station = group(
        12,
        150.0,
        &[Port::Top, Port::Right, Port::Left, Port::Inductive],
        false,
    );
    let cfg = common::coarse_baseline(12);
    let mut engine = Engine::new(
        cfg.sim_config().expect("config should be valid"),
        truck_charge_sim::fleet::generate_fleet(&cfg.fleet, 5).expect("fleet should generate"),
        vec![station.clone()],
    );
    assert!(engine.all_assigned(), "every truck should dock at the start");

    let tick_hours = engine.config().tick_hours;
    let max_capacity = engine
        .fleet()
        .iter()
        .map(|t| t.battery_capacity_kwh())
        .fold(0.0, f64::max);
    let min_rate = engine
        .fleet()
        .iter()
        .map(|t| effective_rate_kw(t, &station))
        .fold(f64::INFINITY, f64::min);
    let bound = (max_capacity / (min_rate * tick_hours)).ceil() as u64 + 1;

    engine.run();
    assert_eq!(engine.termination(), Some(Termination::Completed));
    assert!(
        engine.ticks() <= bound,
        "took {} ticks, bound {bound}",
        engine.ticks()
    );
}

#[test]
fn runs_stop_within_tick_bound() {
    let mut cfg = common::coarse_baseline(10);
    cfg.simulation.tick_seconds = 1.0;
    cfg.simulation.max_ticks = 50;
    let outcome = run_once(&cfg, 10, true).expect("scenario should run");

    assert_eq!(outcome.report.termination, Some(Termination::TickLimit));
    assert_eq!(outcome.report.ticks, 50);
    assert_eq!(outcome.ticks.len(), 50);
    assert!(outcome.report.trucks_unserved > 0);
}

#[test]
fn identical_seeds_reproduce_identical_runs() {
    let cfg = common::coarse_baseline(15);
    let a = run_once(&cfg, 99, true).expect("scenario should run");
    let b = run_once(&cfg, 99, true).expect("scenario should run");
    assert_eq!(a.report, b.report);
    assert_eq!(a.ticks, b.ticks);
}
