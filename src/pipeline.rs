use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::{
    canvas::paint,
    compose::{blank_overlay, composite, grayscale_base},
    project, render, Projection, ProjectionError, RigConfig, Scan,
};

pub const OVERLAY_FILE: &str = "points_only.png";
pub const COMPOSITE_FILE: &str = "combined.png";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Can't access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Can't parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Both rasters of one run, kept in memory until [`OverlayOutput::write`]
pub struct OverlayOutput {
    pub overlay: RgbaImage,
    pub composite: RgbaImage,
    pub projection: Projection,
    pub skipped_samples: usize,
}

fn read(path: &Path) -> Result<Vec<u8>, PipelineError> {
    std::fs::read(path).map_err(|source| PipelineError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Angle-to-distance mapping stored as JSON object, e.g. `{"0": 1000, "359.5": 980}`
pub fn load_scan(path: impl AsRef<Path>) -> Result<Scan, PipelineError> {
    let path = path.as_ref();
    let scan: Scan = serde_json::from_slice(&read(path)?).map_err(|source| PipelineError::Parse {
        path: path.to_owned(),
        source,
    })?;
    if scan.skipped() > 0 {
        log::warn!("Skipped {} malformed samples in {path:?}", scan.skipped());
    }
    log::debug!("Loaded {} samples from {path:?}", scan.len());
    Ok(scan)
}

pub fn load_rig(path: impl AsRef<Path>) -> Result<RigConfig, PipelineError> {
    let path = path.as_ref();
    serde_json::from_slice(&read(path)?).map_err(|source| PipelineError::Parse {
        path: path.to_owned(),
        source,
    })
}

pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, PipelineError> {
    Ok(image::open(path)?)
}

/// Projects `scan` into `image` and renders both the bare overlay and the composite.
pub fn run(
    image: &DynamicImage,
    scan: &Scan,
    rig: &RigConfig,
) -> Result<OverlayOutput, ProjectionError> {
    let (width, height) = (image.width(), image.height());
    if (width, height)
        != (
            rig.camera.horizontal_resolution_px,
            rig.camera.vertical_resolution_px,
        )
    {
        log::warn!(
            "Image is {width}x{height}, camera is configured for {}x{}. Rescaling camera",
            rig.camera.horizontal_resolution_px,
            rig.camera.vertical_resolution_px
        );
    }
    let camera = rig.camera.fit_to_image(width, height);

    let projection = project(scan, &camera, &rig.mount, rig.fov_mode)?;
    let instructions = render(&projection, &camera, &rig.mount, &rig.style);

    let mut overlay = blank_overlay(width, height);
    paint(&mut overlay, &instructions);
    let composite = composite(&grayscale_base(image), &overlay);

    Ok(OverlayOutput {
        overlay,
        composite,
        projection,
        skipped_samples: scan.skipped(),
    })
}

impl OverlayOutput {
    /// Returns the paths of the overlay and the composite
    pub fn write(&self, dir: impl AsRef<Path>) -> Result<(PathBuf, PathBuf), PipelineError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|source| PipelineError::Io {
            path: dir.to_owned(),
            source,
        })?;
        let overlay_path = dir.join(OVERLAY_FILE);
        let composite_path = dir.join(COMPOSITE_FILE);
        self.overlay
            .save_with_format(&overlay_path, ImageFormat::Png)?;
        self.composite
            .save_with_format(&composite_path, ImageFormat::Png)?;
        log::info!("Wrote {overlay_path:?} and {composite_path:?}");
        Ok((overlay_path, composite_path))
    }
}
