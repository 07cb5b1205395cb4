use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::{info, warn};

pub const DEFAULT_ASSET_PATH: &str = "assets/background.png";

const PLACEHOLDER_WIDTH: u32 = 270;
const PLACEHOLDER_HEIGHT: u32 = 640;
const PAPER: Rgba<u8> = Rgba([245, 241, 232, 255]);
const PAPER_EDGE: Rgba<u8> = Rgba([120, 114, 102, 255]);
const PAPER_RULE: Rgba<u8> = Rgba([214, 208, 196, 255]);

/// The immutable base image. Its pixel dimensions define the drawing
/// surface's dimensions.
pub struct Background {
    image: RgbaImage,
}

impl Background {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("open background asset {}", path.display()))?
            .to_rgba8();
        Ok(Self { image })
    }

    /// Receipt-style stand-in used when no asset file is present.
    pub fn placeholder() -> Self {
        let mut image = RgbaImage::from_pixel(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, PAPER);
        for x in 0..PLACEHOLDER_WIDTH {
            image.put_pixel(x, 0, PAPER_EDGE);
            image.put_pixel(x, PLACEHOLDER_HEIGHT - 1, PAPER_EDGE);
        }
        for y in 0..PLACEHOLDER_HEIGHT {
            image.put_pixel(0, y, PAPER_EDGE);
            image.put_pixel(PLACEHOLDER_WIDTH - 1, y, PAPER_EDGE);
        }
        // Ruled lines so there is something to doodle around.
        let mut y = 48;
        while y < PLACEHOLDER_HEIGHT - 32 {
            for x in 24..PLACEHOLDER_WIDTH - 24 {
                image.put_pixel(x, y, PAPER_RULE);
            }
            y += 40;
        }
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// One-shot background load running off the UI thread. The GUI polls
/// [`BackgroundLoader::try_take`] each frame; drawing and export stay gated
/// until the image arrives.
pub struct BackgroundLoader {
    rx: Receiver<Background>,
}

impl BackgroundLoader {
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let background = match Background::load(&path) {
                Ok(background) => {
                    info!(path = %path.display(), "background asset loaded");
                    background
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "background asset unavailable, using placeholder"
                    );
                    Background::placeholder()
                }
            };
            let _ = tx.send(background);
        });
        Self { rx }
    }

    /// Returns the background once, when the worker has finished decoding.
    pub fn try_take(&self) -> Option<Background> {
        match self.rx.try_recv() {
            Ok(background) => Some(background),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}
