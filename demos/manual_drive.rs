//! Manual Drive
//!
//! Drives a manual car through first and second gear, shifting whenever
//! the engine reaches its redline.
//!
//! Key concepts:
//! - Clutch in / shift / clutch out sequencing
//! - Redline as a warning the driver reacts to
//! - Dashboard stats after each gear
//!
//! Run with: RUST_LOG=debug cargo run --example manual_drive

use powertrain::{Car, PowertrainError};
use tracing_subscriber::EnvFilter;

fn accelerate_until_redline(car: &mut Car) -> Result<(), PowertrainError> {
    for _ in 0..200 {
        match car.accelerate() {
            Ok(()) => {}
            Err(PowertrainError::EngineRedline { rpm }) => {
                println!("  Redline at {rpm:.0} rpm. Shifting now!");
                return Ok(());
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn shift(car: &mut Car, gear: &str) -> Result<(), PowertrainError> {
    car.clutch_in();
    car.shift(gear)?;
    car.clutch_out()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    println!("=== Manual Drive ===\n");

    let mut car = Car::builder().manual().build()?;
    car.start()?;
    println!("Engine started:\n{}", car.stats());

    shift(&mut car, "1")?;
    println!("First gear:");
    accelerate_until_redline(&mut car)?;
    println!("{}", car.stats());

    shift(&mut car, "2")?;
    println!("Second gear:");
    accelerate_until_redline(&mut car)?;
    println!("{}", car.stats());
    println!("Snapshot: {}", car.stats().to_json()?);

    println!("Engine lifecycle:");
    for state in car.engine().history().get_path() {
        println!("  {state:?}");
    }

    println!("\n=== Drive Complete ===");
    Ok(())
}
