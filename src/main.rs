mod camera;
mod config;
mod controller;
mod db;
mod error;
mod gate;
mod meter;
mod ocr;
mod plate;
mod sensor;

use camera::V4lCamera;
use config::Config;
use controller::Controller;
use db::PgRegistry;
use env_logger::Env;
use gate::{ServoDrive, ServoGate};
use log::{error, info};
use ocr::VisionClient;
use rppal::gpio::Gpio;
use sensor::IrSensor;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Starting gate-controller");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let gpio = Gpio::new().expect("Unable to access GPIO");
    let sensor = IrSensor::new(&gpio).expect("Unable to claim sensor pin");
    let drive = ServoDrive::new(&gpio).expect("Unable to claim gate pin");

    let mut controller = Controller::new(
        sensor,
        V4lCamera::new("images"),
        VisionClient::new(config.vision),
        PgRegistry::new(config.db),
        ServoGate::new(drive),
    );
    controller.run().await;
}
