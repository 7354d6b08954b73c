use approx::assert_relative_eq;
use proptest::prelude::*;

use carbon::*;

fn pipeline(current_year: i32) -> Pipeline {
    Pipeline::new(load_emission_factors().unwrap(), current_year)
}

fn trip(fuel_type: &str, fuel_liters: f64, distance_km: f64, load_tons: f64, year: i32) -> Trip {
    Trip {
        trip_id: "T1".to_string(),
        date: "2025-06-01".to_string(),
        fleet_id: "CAM-01".to_string(),
        fuel_type: fuel_type.to_string(),
        fuel_liters,
        distance_km,
        load_tons,
        axle_count: 3,
        manufacture_year: year,
    }
}

/// A diesel truck of 2020 evaluated in 2025
#[test]
fn acceptance_diesel_truck() {
    let r = pipeline(2025).run_single(trip("Diesel S10", 100.0, 500.0, 10.0, 2020));

    assert_eq!(r.emission_factor, Some(0.002671));
    assert_relative_eq!(r.base_emission, 0.2671, epsilon = 1e-12);
    assert_eq!(r.vehicle_age, 5);
    assert_eq!(r.age_penalty_rate, 0.015);
    assert_relative_eq!(r.age_factor, 1.075, epsilon = 1e-12);
    assert_relative_eq!(r.final_emission, 0.287133, epsilon = 1e-6);
    assert_relative_eq!(r.intensity_per_ton, 0.0287133, epsilon = 1e-7);
    assert_relative_eq!(r.intensity_per_km, 0.000574, epsilon = 1e-6);
    assert_eq!(r.efficiency_km_per_liter, 5.0);
}

/// The same trip without cargo only changes the intensity per ton
#[test]
fn acceptance_zero_load() {
    let pipeline = pipeline(2025);
    let loaded = pipeline.run_single(trip("Diesel S10", 100.0, 500.0, 10.0, 2020));
    let empty = pipeline.run_single(trip("Diesel S10", 100.0, 500.0, 0.0, 2020));

    assert_eq!(empty.intensity_per_ton, 0.0);
    assert_eq!(empty.final_emission, loaded.final_emission);
    assert_eq!(empty.intensity_per_km, loaded.intensity_per_km);
    assert_eq!(empty.efficiency_km_per_liter, loaded.efficiency_km_per_liter);
    assert_eq!(empty.age_factor, loaded.age_factor);
}

#[test]
fn scalar_is_strict_batch_is_lenient() {
    let pipeline = pipeline(2025);

    let r = pipeline.single_emission(100.0, Some("Unknown"));
    assert!(matches!(r, Err(Error::InvalidArgument { .. })));

    let r = pipeline.single_emission(100.0, None);
    assert!(matches!(r, Err(Error::MissingArgument(_))));

    let r = pipeline.run(vec![
        trip("Unknown", 100.0, 500.0, 10.0, 2020),
        trip("Gasoline", 100.0, 500.0, 10.0, 2020),
    ]);
    assert_eq!(r[0].emission_factor, None);
    assert_eq!(r[0].base_emission, 0.0);
    assert_eq!(r[0].final_emission, 0.0);
    assert_eq!(r[0].intensity_per_km, 0.0);
    assert_relative_eq!(r[1].base_emission, 0.232, epsilon = 1e-12);
}

#[test]
fn fleet_csv() {
    let data = b"ID_Viagem,Data,Frota_ID,Combustivel_L,Tipo_Combustivel,KM_Rodado,Carga_Ton,Numero_Eixos,Ano_Fabricacao
V001,2024-01-15,CAM-01,250,Diesel S10,800,20,5,2015
V002,2024-01-16,CAM-02,0,Diesel S10,0,0,3,2030
V003,2024-01-17,CAM-01,40,Etanol,320,0,2,1994
";
    let trips = read_trips(data).unwrap();
    let results = pipeline(2025).run(trips);
    assert_eq!(results.len(), 3);

    // age 10 at 1.5%
    assert_relative_eq!(results[0].age_factor, 1.15, epsilon = 1e-12);
    assert_relative_eq!(
        results[0].final_emission,
        250.0 * 0.002671 * 1.15,
        epsilon = 1e-12
    );

    // manufactured in the future, without fuel nor distance
    assert_eq!(results[1].vehicle_age, 0);
    assert_eq!(results[1].age_factor, 1.0);
    assert_eq!(results[1].efficiency_km_per_liter, 0.0);
    assert_eq!(results[1].intensity_per_km, 0.0);

    // "Etanol" is not a key of the reference table
    assert_eq!(results[2].base_emission, 0.0);
    assert_eq!(results[2].age_penalty_rate, 0.05);

    let t = totals(&results);
    assert_eq!(t.trips, 3);
    assert_relative_eq!(t.base_emission, 250.0 * 0.002671, epsilon = 1e-12);
    assert_relative_eq!(t.final_emission, results[0].final_emission, epsilon = 1e-12);

    assert_eq!(trips_per_fleet(&results), vec![("CAM-01", 2), ("CAM-02", 1)]);

    let trips = consumptions(&results);
    assert_relative_eq!(trips[0].consumption_l_per_100km, 31.25, epsilon = 1e-12);
    assert_eq!(trips[1].consumption_l_per_100km, 0.0);
    assert_eq!(top_n(&trips, 1)[0].trip_id, "V001");
    assert_eq!(bottom_n(&trips, 1)[0].trip_id, "V002");
}

#[test]
fn invalid_quantities_are_rejected() {
    let data = b"ID_Viagem,Frota_ID,Combustivel_L,Tipo_Combustivel,KM_Rodado,Carga_Ton,Numero_Eixos,Ano_Fabricacao
F1,CAM-01,NaN,Diesel S10,500,NaN,3,2020
";
    assert!(matches!(
        read_trips(data),
        Err(Error::InvalidQuantity { .. })
    ));

    assert!(matches!(
        Input::parse("-100"),
        Err(Error::InvalidQuantity { .. })
    ));
}

#[test]
fn estimated_liters() {
    let consumptions = load_average_consumption().unwrap();
    let km_per_liter = average_consumption(&consumptions, VehicleType::Truck, "Diesel S10");
    let liters = estimate_liters(500.0, km_per_liter);
    assert_eq!(liters, 200.0);

    let r = pipeline(2025).run_single(Trip::single(
        "Diesel S10",
        liters,
        500.0,
        10.0,
        2020,
        time::macros::date!(2025 - 06 - 01),
    ));
    assert_eq!(r.efficiency_km_per_liter, 2.5);
    assert_relative_eq!(r.base_emission, 200.0 * 0.002671, epsilon = 1e-12);
}

#[test]
fn unsupported_input() {
    assert!(matches!(
        Input::parse("one hundred liters"),
        Err(Error::UnsupportedInputType(_))
    ));
}

fn fuel() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Diesel S10".to_string()),
        Just("Gasoline".to_string()),
        Just("Ethanol".to_string()),
        Just("Unknown".to_string()),
    ]
}

proptest! {
    #[test]
    fn older_vehicles_never_emit_less(
        fuel_type in fuel(),
        liters in 0.0..10_000.0f64,
        newer in 1950..2040i32,
        years_older in 0..60i32,
        current_year in 1990..2040i32,
    ) {
        let pipeline = pipeline(current_year);
        let r = pipeline.run(vec![
            trip(&fuel_type, liters, 100.0, 1.0, newer),
            trip(&fuel_type, liters, 100.0, 1.0, newer - years_older),
        ]);
        prop_assert!(r[1].final_emission >= r[0].final_emission);
    }

    #[test]
    fn zero_denominators_yield_zero(
        fuel_type in fuel(),
        liters in 0.0..10_000.0f64,
        distance in 0.0..10_000.0f64,
        load in 0.0..100.0f64,
        year in 1950..2040i32,
    ) {
        let pipeline = pipeline(2025);
        let r = pipeline.run(vec![
            trip(&fuel_type, liters, distance, 0.0, year),
            trip(&fuel_type, liters, 0.0, load, year),
            trip(&fuel_type, 0.0, distance, load, year),
        ]);
        prop_assert_eq!(r[0].intensity_per_ton, 0.0);
        prop_assert_eq!(r[1].intensity_per_km, 0.0);
        prop_assert_eq!(r[2].efficiency_km_per_liter, 0.0);
        for t in &r {
            prop_assert!(t.intensity_per_ton.is_finite());
            prop_assert!(t.intensity_per_km.is_finite());
            prop_assert!(t.efficiency_km_per_liter.is_finite());
        }
    }

    #[test]
    fn future_vehicles_are_not_penalized(
        fuel_type in fuel(),
        liters in 0.0..10_000.0f64,
        years_ahead in 1..50i32,
        current_year in 1990..2040i32,
    ) {
        let r = pipeline(current_year).run_single(
            trip(&fuel_type, liters, 100.0, 1.0, current_year + years_ahead),
        );
        prop_assert_eq!(r.vehicle_age, 0);
        prop_assert_eq!(r.age_factor, 1.0);
        prop_assert_eq!(r.final_emission, r.base_emission);
    }

    #[test]
    fn runs_are_deterministic(
        fuel_type in fuel(),
        liters in 0.0..10_000.0f64,
        distance in 0.0..10_000.0f64,
        load in 0.0..100.0f64,
        year in 1950..2040i32,
    ) {
        let pipeline = pipeline(2025);
        let trips = vec![trip(&fuel_type, liters, distance, load, year); 3];
        prop_assert_eq!(pipeline.run(trips.clone()), pipeline.run(trips));
    }
}
