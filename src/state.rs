use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analysis::axis::{default_axes, AxisSelection};
use crate::color::SeriesColors;
use crate::data::loader;
use crate::pipeline::{Pipeline, Stage};
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Encoded image bytes, keyed by a stable URI for egui's cache.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub uri: String,
    pub bytes: Arc<[u8]>,
}

/// Captions of the step-guide screenshots, in step order.
pub const STEP_GUIDE_CAPTIONS: [&str; 5] = [
    "Step 1: Upload CSV",
    "Step 2: View Statistics",
    "Step 3: Data Visualization",
    "Step 4: Descriptive Analysis",
    "Step 5: Provide Insights",
];

/// One entry of the step guide. The image is `None` when its file is missing.
#[derive(Debug, Clone)]
pub struct GuideStep {
    pub caption: String,
    pub image: Option<LoadedImage>,
}

/// One session's state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// The analysis run for the current upload.
    pub pipeline: Pipeline,

    /// Path of the last file chosen in the dialog (for Reload).
    pub source_path: Option<PathBuf>,

    /// Axis choices as shown in the side panel combo boxes.
    pub x_choice: Option<String>,
    pub y_choice: Option<String>,

    /// File-intake problems (unreadable file, wrong extension) shown in the
    /// top bar. Pipeline errors are rendered with their step instead.
    pub status_message: Option<String>,

    pub logo: Option<LoadedImage>,
    pub colors: SeriesColors,

    pub step_guide: Vec<GuideStep>,
    /// Index into `step_guide` chosen in the guide's combo box.
    pub guide_index: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let logo = settings.logo_path.as_deref().and_then(load_image);
        let step_guide = load_step_guide(&settings.step_guide_images);
        Self {
            settings,
            pipeline: Pipeline::new(),
            source_path: None,
            x_choice: None,
            y_choice: None,
            status_message: None,
            logo,
            colors: SeriesColors::default(),
            step_guide,
            guide_index: 0,
        }
    }

    /// Read a file from disk and start a fresh run with it.
    pub fn open_path(&mut self, path: &Path) {
        match loader::read_upload(path) {
            Ok(bytes) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.source_path = Some(path.to_path_buf());
                self.status_message = None;
                self.upload(&name, &bytes);
            }
            Err(e) => {
                log::error!("Failed to read file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-read the last opened file; the only way out of an error besides
    /// opening another file.
    pub fn reload(&mut self) {
        if let Some(path) = self.source_path.clone() {
            self.open_path(&path);
        }
    }

    /// Back to the empty `NoFile` state.
    pub fn clear(&mut self) {
        self.pipeline.reset();
        self.source_path = None;
        self.x_choice = None;
        self.y_choice = None;
        self.status_message = None;
    }

    /// Upload raw bytes and, if statistics succeed, apply the default axes.
    pub fn upload(&mut self, name: &str, bytes: &[u8]) {
        let stage = self.pipeline.upload(name, bytes).clone();
        self.x_choice = None;
        self.y_choice = None;

        if stage == Stage::StatisticsShown {
            if let Some(selection) = self.pipeline.dataset().and_then(default_axes) {
                self.set_axes(selection.x, selection.y);
            }
        }
    }

    /// Record both axis choices and re-run the analysis from the axes step.
    pub fn set_axes(&mut self, x: String, y: String) {
        self.x_choice = Some(x.clone());
        self.y_choice = Some(y.clone());
        self.pipeline.select_axes(AxisSelection::new(x, y));
    }

    pub fn set_x(&mut self, x: String) {
        match self.y_choice.clone() {
            Some(y) => self.set_axes(x, y),
            None => self.x_choice = Some(x),
        }
    }

    pub fn set_y(&mut self, y: String) {
        match self.x_choice.clone() {
            Some(x) => self.set_axes(x, y),
            None => self.y_choice = Some(y),
        }
    }
}

/// Pair each guide image with its caption. Steps beyond the known captions
/// are simply numbered.
fn load_step_guide(paths: &[PathBuf]) -> Vec<GuideStep> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| GuideStep {
            caption: STEP_GUIDE_CAPTIONS
                .get(i)
                .map_or_else(|| format!("Step {}", i + 1), |c| c.to_string()),
            image: load_image(path),
        })
        .collect()
}

/// Read an image from disk; a missing image is only worth a warning.
fn load_image(path: &Path) -> Option<LoadedImage> {
    match std::fs::read(path) {
        Ok(bytes) => Some(LoadedImage {
            uri: format!("bytes://{}", path.display()),
            bytes: bytes.into(),
        }),
        Err(e) => {
            log::warn!("Image not found: {} ({e})", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn state() -> AppState {
        AppState::new(Settings {
            logo_path: None,
            step_guide_images: Vec::new(),
            ..Settings::default()
        })
    }

    #[test]
    fn upload_applies_default_axes() {
        let mut s = state();
        s.upload("sales.csv", b"region,spend,revenue\nN,1,3\nS,2,5\nE,3,7\n");
        assert_eq!(s.x_choice.as_deref(), Some("spend"));
        assert_eq!(s.y_choice.as_deref(), Some("revenue"));
        assert_eq!(s.pipeline.stage(), &Stage::NarrativeShown);
    }

    #[test]
    fn changing_one_axis_reruns() {
        let mut s = state();
        s.upload("sales.csv", b"a,b,c\n1,2,9\n2,4,7\n3,6,1\n");
        s.set_y("c".to_string());
        let pair = s.pipeline.axes().unwrap();
        assert_eq!(pair.selection, AxisSelection::new("a", "c"));
    }

    #[test]
    fn unreadable_file_sets_status() {
        let mut s = state();
        s.open_path(Path::new("/definitely/not/here.csv"));
        assert!(s.status_message.as_deref().unwrap().starts_with("Error:"));
        assert_eq!(s.pipeline.stage(), &Stage::NoFile);
    }

    #[test]
    fn reload_recovers_from_axis_error() {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        f.write_all(b"name,v,w\nA,1,2\nB,2,3\n").unwrap();
        f.flush().unwrap();

        let mut s = state();
        s.open_path(f.path());
        s.set_x("name".to_string());
        assert!(s.pipeline.is_halted());

        s.reload();
        assert_eq!(s.pipeline.stage(), &Stage::NarrativeShown);
    }

    #[test]
    fn missing_logo_is_skipped() {
        assert!(load_image(Path::new("/no/such/logo.png")).is_none());
    }

    #[test]
    fn step_guide_keeps_captions_for_missing_images() {
        let mut shot = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        shot.write_all(b"\x89PNG").unwrap();
        shot.flush().unwrap();

        let s = AppState::new(Settings {
            logo_path: None,
            step_guide_images: vec![
                shot.path().to_path_buf(),
                PathBuf::from("/no/such/step2.png"),
            ],
            ..Settings::default()
        });
        assert_eq!(s.step_guide.len(), 2);
        assert_eq!(s.step_guide[0].caption, "Step 1: Upload CSV");
        assert_eq!(&*s.step_guide[0].image.as_ref().unwrap().bytes, b"\x89PNG");
        assert_eq!(s.step_guide[1].caption, "Step 2: View Statistics");
        assert!(s.step_guide[1].image.is_none());
        assert_eq!(s.guide_index, 0);
    }

    #[test]
    fn extra_guide_images_are_numbered() {
        let paths: Vec<PathBuf> = (0..6).map(|i| PathBuf::from(format!("/no/{i}.png"))).collect();
        let guide = load_step_guide(&paths);
        assert_eq!(guide[4].caption, "Step 5: Provide Insights");
        assert_eq!(guide[5].caption, "Step 6");
    }
}
