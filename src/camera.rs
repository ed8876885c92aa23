use crate::error::Error;
use log::info;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture as _;
use v4l::{Device, FourCC};

const FRAME_WIDTH: u32 = 640;
const FRAME_HEIGHT: u32 = 480;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRole {
    Vehicle,
    Meter,
}

impl CaptureRole {
    /// Position of the role's camera in the enumerated device list.
    fn device_index(self) -> usize {
        match self {
            CaptureRole::Vehicle => 0,
            CaptureRole::Meter => 1,
        }
    }

    fn directory(self) -> &'static str {
        match self {
            CaptureRole::Vehicle => "vehicle_reg_numbers",
            CaptureRole::Meter => "meter_readings",
        }
    }
}

impl fmt::Display for CaptureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureRole::Vehicle => write!(f, "vehicle"),
            CaptureRole::Meter => write!(f, "meter"),
        }
    }
}

/// One saved frame. The file is never deleted by this process.
#[derive(Debug)]
pub struct Capture {
    pub id: Uuid,
    pub role: CaptureRole,
    pub path: PathBuf,
}

pub trait Camera {
    fn capture(&mut self, role: CaptureRole) -> Result<Capture, Error>;
}

pub struct V4lCamera {
    image_dir: PathBuf,
}

impl V4lCamera {
    pub fn new(image_dir: impl Into<PathBuf>) -> V4lCamera {
        V4lCamera {
            image_dir: image_dir.into(),
        }
    }

    fn device_for(role: CaptureRole) -> Result<PathBuf, Error> {
        let mut nodes = v4l::context::enum_devices();
        nodes.sort_by_key(|node| node.index());
        nodes
            .get(role.device_index())
            .map(|node| node.path().to_path_buf())
            .ok_or(Error::NoCamera(role))
    }
}

impl Camera for V4lCamera {
    fn capture(&mut self, role: CaptureRole) -> Result<Capture, Error> {
        let device_path = Self::device_for(role)?;
        let device = Device::with_path(&device_path)?;
        let mut format = device.format()?;
        format.width = FRAME_WIDTH;
        format.height = FRAME_HEIGHT;
        format.fourcc = FourCC::new(b"MJPG");
        device.set_format(&format)?;

        // The stream (and with it the device) is released when this scope ends.
        let mut stream = Stream::with_buffers(&device, Type::VideoCapture, 1)?;
        let (frame, _meta) = stream.next()?;
        if frame.is_empty() {
            return Err(Error::EmptyFrame(role));
        }

        let id = Uuid::new_v4();
        let dir = self.image_dir.join(role.directory());
        fs::create_dir_all(&dir)?;
        let path = image_path(&self.image_dir, role, id);
        fs::write(&path, frame)?;
        info!("Saved {} image to {}", role, path.display());
        Ok(Capture { id, role, path })
    }
}

pub fn image_path(base: &Path, role: CaptureRole, id: Uuid) -> PathBuf {
    base.join(role.directory()).join(format!("{}.jpg", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_paths_are_unique_and_role_scoped() {
        let base = Path::new("images");
        let first = image_path(base, CaptureRole::Vehicle, Uuid::new_v4());
        let second = image_path(base, CaptureRole::Vehicle, Uuid::new_v4());
        assert_ne!(first, second);
        assert!(first.starts_with("images/vehicle_reg_numbers"));
        assert_eq!(first.extension().unwrap(), "jpg");

        let meter = image_path(base, CaptureRole::Meter, Uuid::new_v4());
        assert!(meter.starts_with("images/meter_readings"));
    }
}
