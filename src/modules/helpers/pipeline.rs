use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use super::codec::{self, Decoder};
use super::errors::ConvertError;
use super::jpeg_export::{self, DEFAULT_JPEG_QUALITY};
use super::reveal::{FolderRevealer, SystemRevealer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOptions {
    pub jpeg_quality: u8,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { jpeg_quality: DEFAULT_JPEG_QUALITY }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Converted { source: PathBuf, output: PathBuf },
    Failed { source: PathBuf, reason: String },
}

impl ConversionOutcome {
    pub fn source(&self) -> &Path {
        match self {
            ConversionOutcome::Converted { source, .. } => source,
            ConversionOutcome::Failed { source, .. } => source,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ConversionOutcome::Failed { .. })
    }

    /// Text shown to the user when this item failed.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            ConversionOutcome::Failed { source, reason } => {
                Some(format!("Failed to convert {}: {}", source.display(), reason))
            }
            ConversionOutcome::Converted { .. } => None,
        }
    }
}

/// Percent of a batch done once item `index` (zero-based) has been attempted.
pub fn progress_percent(index: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (index + 1) as f32 / total as f32 * 100.0
}

#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub destination: PathBuf,
    pub total: usize,
    pub converted: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, String)>,
    pub finished_at: DateTime<Local>,
}

impl BatchSummary {
    pub fn message(&self) -> String {
        if self.failures.is_empty() {
            format!(
                "All files have been successfully converted and saved to {}!",
                self.destination.display()
            )
        } else {
            format!(
                "Converted {} of {} files and saved them to {}. {} failed.",
                self.converted.len(),
                self.total,
                self.destination.display(),
                self.failures.len()
            )
        }
    }
}

/// Receives batch events in the order they happen.
pub trait BatchObserver {
    fn item_finished(&mut self, outcome: ConversionOutcome);
    fn progress(&mut self, percent: f32);
    fn batch_completed(&mut self, summary: BatchSummary);
}

pub struct BatchConverter {
    options: ConvertOptions,
    decoder: Box<dyn Decoder>,
    revealer: Box<dyn FolderRevealer>,
}

impl BatchConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self::with_parts(options, codec::default_decoder(), Box::new(SystemRevealer))
    }

    pub fn with_parts(
        options: ConvertOptions,
        decoder: Box<dyn Decoder>,
        revealer: Box<dyn FolderRevealer>,
    ) -> Self {
        Self { options, decoder, revealer }
    }

    pub fn convert_one(&self, source: &Path, destination: &Path) -> Result<PathBuf, ConvertError> {
        let decoded = self.decoder.decode(source)?;
        let img = decoded.into_dynamic()?;
        let output = jpeg_export::output_path_for(source, destination)?;
        jpeg_export::write_jpeg(&img, &output, self.options.jpeg_quality)?;
        Ok(output)
    }

    /// Converts `paths` one after another into `destination`.
    ///
    /// Every item gets exactly one outcome and one progress report, whether
    /// it failed or not. An empty batch reports nothing at all.
    pub fn run(&self, paths: &[PathBuf], destination: &Path, observer: &mut dyn BatchObserver) {
        let total = paths.len();
        if total == 0 {
            log::debug!("Empty batch, nothing to convert");
            return;
        }

        log::info!("Converting {} file(s) into {}", total, destination.display());
        let mut converted = Vec::new();
        let mut failures = Vec::new();

        for (idx, source) in paths.iter().enumerate() {
            let outcome = match self.convert_one(source, destination) {
                Ok(output) => {
                    log::info!("Converted {} -> {}", source.display(), output.display());
                    converted.push(output.clone());
                    ConversionOutcome::Converted { source: source.clone(), output }
                }
                Err(e) => {
                    log::error!("Failed to convert {}: {}", source.display(), e);
                    failures.push((source.clone(), e.to_string()));
                    ConversionOutcome::Failed { source: source.clone(), reason: e.to_string() }
                }
            };

            observer.item_finished(outcome);
            observer.progress(progress_percent(idx, total));
        }

        let summary = BatchSummary {
            destination: destination.to_path_buf(),
            total,
            converted,
            failures,
            finished_at: Local::now(),
        };
        log::info!("{}", summary.message());

        observer.batch_completed(summary);
        self.revealer.reveal(destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::helpers::codec::ImageCrateDecoder;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Item(ConversionOutcome),
        Progress(f32),
        Completed(usize, usize),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
        summary: Option<BatchSummary>,
    }

    impl Recorder {
        fn percents(&self) -> Vec<f32> {
            self.events.iter().filter_map(|e| match e {
                Event::Progress(p) => Some(*p),
                _ => None,
            }).collect()
        }

        fn outcomes(&self) -> Vec<&ConversionOutcome> {
            self.events.iter().filter_map(|e| match e {
                Event::Item(o) => Some(o),
                _ => None,
            }).collect()
        }
    }

    impl BatchObserver for Recorder {
        fn item_finished(&mut self, outcome: ConversionOutcome) {
            self.events.push(Event::Item(outcome));
        }

        fn progress(&mut self, percent: f32) {
            self.events.push(Event::Progress(percent));
        }

        fn batch_completed(&mut self, summary: BatchSummary) {
            self.events.push(Event::Completed(summary.converted.len(), summary.failures.len()));
            self.summary = Some(summary);
        }
    }

    #[derive(Clone, Default)]
    struct RevealLog(Arc<Mutex<Vec<PathBuf>>>);

    impl FolderRevealer for RevealLog {
        fn reveal(&self, path: &Path) {
            self.0.lock().unwrap().push(path.to_path_buf());
        }
    }

    fn converter(reveals: &RevealLog) -> BatchConverter {
        BatchConverter::with_parts(
            ConvertOptions::default(),
            Box::new(ImageCrateDecoder),
            Box::new(reveals.clone()),
        )
    }

    fn write_fixture(path: &Path, width: u32, height: u32) {
        image::RgbImage::from_pixel(width, height, image::Rgb([180, 90, 30]))
            .save_with_format(path, image::ImageFormat::Png)
            .unwrap();
    }

    #[test]
    fn progress_is_reported_once_per_item_and_ends_at_100() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..3).map(|i| {
            let p = src.path().join(format!("img{}.heic", i));
            write_fixture(&p, 4, 4);
            p
        }).collect();

        let reveals = RevealLog::default();
        let mut rec = Recorder::default();
        converter(&reveals).run(&paths, out.path(), &mut rec);

        let progress = rec.percents();
        assert_eq!(progress.len(), 3);
        assert!((progress[2] - 100.0).abs() < 1e-4);
        assert!(progress.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn failed_item_does_not_stop_the_batch() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let a = src.path().join("a.heic");
        let b = src.path().join("b.heic");
        let c = src.path().join("c.heic");
        write_fixture(&a, 2, 2);
        std::fs::write(&b, b"corrupt").unwrap();
        write_fixture(&c, 2, 2);

        let reveals = RevealLog::default();
        let mut rec = Recorder::default();
        converter(&reveals).run(&[a.clone(), b.clone(), c.clone()], out.path(), &mut rec);

        assert!(out.path().join("a.jpg").exists());
        assert!(!out.path().join("b.jpg").exists());
        assert!(out.path().join("c.jpg").exists());

        let outcomes = rec.outcomes();
        assert_eq!(outcomes.len(), 3);
        assert!(!outcomes[0].is_failure());
        assert!(outcomes[1].is_failure());
        assert_eq!(outcomes[1].source(), b.as_path());
        assert!(outcomes[1].failure_message().unwrap().starts_with("Failed to convert"));
        assert!(!outcomes[2].is_failure());

        assert_eq!(rec.percents().len(), 3);
        let summary = rec.summary.unwrap();
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, b);
    }

    #[test]
    fn events_arrive_in_item_order_before_completion() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let valid1 = src.path().join("valid1.heic");
        let valid2 = src.path().join("valid2.heic");
        write_fixture(&valid1, 3, 3);
        write_fixture(&valid2, 3, 3);

        let reveals = RevealLog::default();
        let mut rec = Recorder::default();
        converter(&reveals).run(&[valid1.clone(), valid2.clone()], out.path(), &mut rec);

        assert_eq!(rec.events, vec![
            Event::Item(ConversionOutcome::Converted { source: valid1, output: out.path().join("valid1.jpg") }),
            Event::Progress(50.0),
            Event::Item(ConversionOutcome::Converted { source: valid2, output: out.path().join("valid2.jpg") }),
            Event::Progress(100.0),
            Event::Completed(2, 0),
        ]);
        assert_eq!(*reveals.0.lock().unwrap(), vec![out.path().to_path_buf()]);
    }

    #[test]
    fn empty_batch_reports_nothing_and_reveals_nothing() {
        let out = tempfile::tempdir().unwrap();
        let reveals = RevealLog::default();
        let mut rec = Recorder::default();

        converter(&reveals).run(&[], out.path(), &mut rec);

        assert!(rec.events.is_empty());
        assert!(rec.summary.is_none());
        assert!(reveals.0.lock().unwrap().is_empty());
    }

    #[test]
    fn later_source_wins_on_name_collision() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("x")).unwrap();
        std::fs::create_dir(root.path().join("y")).unwrap();
        let first = root.path().join("x").join("photo.heic");
        let second = root.path().join("y").join("photo.heic");
        write_fixture(&first, 4, 2);
        write_fixture(&second, 6, 3);

        let reveals = RevealLog::default();
        let mut rec = Recorder::default();
        converter(&reveals).run(&[first, second], out.path(), &mut rec);

        let written: Vec<_> = std::fs::read_dir(out.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
        assert_eq!(image::image_dimensions(out.path().join("photo.jpg")).unwrap(), (6, 3));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_file_name_is_converted() {
        use crate::modules::helpers::intake::PendingList;
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let source = src.path().join(OsStr::from_bytes(b"caf\xE9.heic"));
        write_fixture(&source, 2, 2);

        let mut pending = PendingList::new();
        assert_eq!(pending.ingest(vec![source]).accepted, 1);

        let reveals = RevealLog::default();
        let mut rec = Recorder::default();
        converter(&reveals).run(&pending.snapshot(), out.path(), &mut rec);

        assert!(rec.outcomes().iter().all(|o| !o.is_failure()));
        assert!(out.path().join(OsStr::from_bytes(b"caf\xE9.jpg")).exists());
    }

    #[test]
    fn unwritable_destination_fails_every_item_but_still_completes() {
        let src = tempfile::tempdir().unwrap();
        let a = src.path().join("a.heic");
        write_fixture(&a, 2, 2);
        let missing = src.path().join("does").join("not").join("exist");

        let reveals = RevealLog::default();
        let mut rec = Recorder::default();
        converter(&reveals).run(&[a.clone(), a], &missing, &mut rec);

        assert!(rec.outcomes().iter().all(|o| o.is_failure()));
        assert_eq!(rec.percents(), vec![50.0, 100.0]);
        let summary = rec.summary.unwrap();
        assert!(summary.message().contains("2 failed"));
        assert_eq!(*reveals.0.lock().unwrap(), vec![missing]);
    }

    #[test]
    fn completion_message_names_destination() {
        let summary = BatchSummary {
            destination: PathBuf::from("/home/me/Downloads"),
            total: 1,
            converted: vec![PathBuf::from("/home/me/Downloads/a.jpg")],
            failures: Vec::new(),
            finished_at: Local::now(),
        };
        assert_eq!(
            summary.message(),
            "All files have been successfully converted and saved to /home/me/Downloads!"
        );
    }

    #[test]
    fn percent_formula() {
        assert_eq!(progress_percent(0, 4), 25.0);
        assert_eq!(progress_percent(3, 4), 100.0);
        assert_eq!(progress_percent(0, 0), 0.0);
    }
}
