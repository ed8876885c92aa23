use crate::camera::{Camera, Capture, CaptureRole};
use crate::db::Registry;
use crate::gate::Gate;
use crate::ocr::{TextBlock, TextReader};
use crate::sensor::PresenceSensor;
use crate::{meter, plate};
use log::{debug, error, info, warn};
use std::fs;
use std::time::Duration;
use tokio::time::sleep;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// The polling loop. Two states: idle (no vehicle) and processing one pass.
/// Every failure aborts the current pass only; the loop always returns to
/// sensing.
pub struct Controller<S, C, O, R, G> {
    sensor: S,
    camera: C,
    ocr: O,
    registry: R,
    gate: G,
}

impl<S, C, O, R, G> Controller<S, C, O, R, G>
where
    S: PresenceSensor,
    C: Camera,
    O: TextReader,
    R: Registry,
    G: Gate,
{
    pub fn new(sensor: S, camera: C, ocr: O, registry: R, gate: G) -> Controller<S, C, O, R, G> {
        Controller {
            sensor,
            camera,
            ocr,
            registry,
            gate,
        }
    }

    pub async fn run(&mut self) {
        info!("Watching for vehicles");
        loop {
            self.run_once().await;
            sleep(POLL_INTERVAL).await;
        }
    }

    /// One pass: sense, and if a vehicle is present, capture, read the
    /// plate, authorize, and on success actuate the gate and read the meter.
    pub async fn run_once(&mut self) {
        match self.sensor.vehicle_present() {
            Ok(true) => {}
            Ok(false) => {
                debug!("No vehicle");
                return;
            }
            Err(e) => {
                error!("Failed to read presence sensor: {}", e);
                return;
            }
        }
        info!("Vehicle detected");

        let capture = match self.camera.capture(CaptureRole::Vehicle) {
            Ok(capture) => capture,
            Err(e) => {
                error!("Vehicle capture failed: {}", e);
                return;
            }
        };
        let plate = match self.read_plate(&capture).await {
            Some(plate) => plate,
            None => return,
        };

        if self.registry.is_authorized(&plate).await {
            info!("Vehicle {} is registered, opening gate", plate);
            if let Err(e) = self.gate.open() {
                error!("Gate actuation failed: {}", e);
                return;
            }
            self.read_meter().await;
        } else {
            info!("Not a registered vehicle: {}", plate);
        }
    }

    async fn read_plate(&mut self, capture: &Capture) -> Option<String> {
        let blocks = self.read_text(capture).await?;
        match plate::select_plate(&blocks) {
            Some(plate) => {
                info!("Capture {}: read registration number '{}'", capture.id, plate);
                Some(plate)
            }
            None => {
                warn!("No vehicle registration detected in image");
                None
            }
        }
    }

    async fn read_meter(&mut self) {
        let capture = match self.camera.capture(CaptureRole::Meter) {
            Ok(capture) => capture,
            Err(e) => {
                error!("Meter capture failed: {}", e);
                return;
            }
        };
        let blocks = match self.read_text(&capture).await {
            Some(blocks) => blocks,
            None => return,
        };
        let (amount, volume) = meter::parse_meter(&blocks);
        if let (Some(amount), Some(volume)) = (amount, volume) {
            info!("Meter reading: amount {:.1}, volume {:.1}", amount, volume);
        }
    }

    async fn read_text(&mut self, capture: &Capture) -> Option<Vec<TextBlock>> {
        let image = match fs::read(&capture.path) {
            Ok(image) => image,
            Err(e) => {
                error!("Failed to read {} image back: {}", capture.role, e);
                return None;
            }
        };
        match self.ocr.read_text(&image).await {
            Ok(blocks) => Some(blocks),
            Err(e) => {
                error!("OCR on {} image failed: {}", capture.role, e);
                None
            }
        }
    }
}
