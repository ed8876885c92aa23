use crate::camera::CaptureRole;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing environment variable '{0}'")]
    MissingEnv(&'static str),
    #[error("Invalid value for environment variable '{0}'")]
    InvalidEnv(&'static str),
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),
    #[error("No camera available for role '{0}'")]
    NoCamera(CaptureRole),
    #[error("Camera for role '{0}' did not return a frame")]
    EmptyFrame(CaptureRole),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR request failed: {0}")]
    OcrRequest(#[from] reqwest::Error),
    #[error("OCR operation failed or timed out")]
    OcrFailed,
    #[error("Database error: {0}")]
    Db(#[from] tokio_postgres::Error),
}
