use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use crate::modules::helpers::destination::DestinationResolver;
use crate::modules::helpers::intake::{PendingList, PICKER_EXTENSIONS};
use crate::modules::helpers::notices::NoticeBoard;
use crate::modules::helpers::pipeline::{
    BatchConverter, BatchObserver, BatchSummary, ConversionOutcome, ConvertOptions,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionState {
    Idle,
    Converting,
    Completed,
    Failed,
}

#[derive(Debug)]
pub enum BatchEvent {
    Item(ConversionOutcome),
    Progress(f32),
    Completed(BatchSummary),
}

/// Forwards pipeline events to the UI thread and wakes it up after each one.
struct ChannelObserver {
    tx: Sender<BatchEvent>,
    ctx: egui::Context,
}

impl ChannelObserver {
    fn send(&self, event: BatchEvent) {
        let _ = self.tx.send(event);
        self.ctx.request_repaint();
    }
}

impl BatchObserver for ChannelObserver {
    fn item_finished(&mut self, outcome: ConversionOutcome) {
        self.send(BatchEvent::Item(outcome));
    }

    fn progress(&mut self, percent: f32) {
        self.send(BatchEvent::Progress(percent));
    }

    fn batch_completed(&mut self, summary: BatchSummary) {
        self.send(BatchEvent::Completed(summary));
    }
}

pub struct HeicConverter {
    pub(super) pending: PendingList,
    pub(super) destination: DestinationResolver,
    pub(super) jpeg_quality: u8,
    pub(super) state: ConversionState,
    pub(super) progress_percent: f32,
    pub(super) current: usize,
    pub(super) total: usize,
    pub(super) message: String,
    pub(super) last_summary: Option<BatchSummary>,
    pub(super) show_advanced: bool,
    pub(super) drag_hover: bool,
    events: Option<Receiver<BatchEvent>>,
}

impl HeicConverter {
    pub fn new(jpeg_quality: u8) -> Self {
        Self::with_destination(DestinationResolver::new(), jpeg_quality)
    }

    pub fn with_destination(destination: DestinationResolver, jpeg_quality: u8) -> Self {
        Self {
            pending: PendingList::new(),
            destination,
            jpeg_quality,
            state: ConversionState::Idle,
            progress_percent: 0.0,
            current: 0,
            total: 0,
            message: String::new(),
            last_summary: None,
            show_advanced: false,
            drag_hover: false,
            events: None,
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    pub fn is_converting(&self) -> bool {
        self.state == ConversionState::Converting
    }

    pub fn add_files(&mut self, paths: Vec<PathBuf>, notices: &mut NoticeBoard) {
        let report = self.pending.ingest(paths);
        for warning in report.warnings() {
            notices.warning(warning);
        }
        if report.accepted > 0 {
            log::debug!("Queued {} file(s), {} pending", report.accepted, self.pending.len());
        }
    }

    pub fn pick_files(&mut self, notices: &mut NoticeBoard) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("HEIC Images", PICKER_EXTENSIONS)
            .pick_files()
        {
            self.add_files(paths, notices);
        }
    }

    pub fn handle_dropped_files(&mut self, ctx: &egui::Context, notices: &mut NoticeBoard) {
        self.drag_hover = ctx.input(|i| !i.raw.hovered_files.is_empty());

        let dropped: Vec<egui::DroppedFile> = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        let paths: Vec<PathBuf> = dropped
            .into_iter()
            .filter_map(|f| match f.path {
                Some(path) => Some(path),
                None if !f.name.is_empty() => Some(PathBuf::from(f.name)),
                None => None,
            })
            .collect();
        self.add_files(paths, notices);
    }

    pub fn clear_files(&mut self) {
        self.pending.clear();
    }

    pub fn choose_destination(&mut self) {
        self.destination.choose();
    }

    pub fn start_conversion(&mut self, ctx: &egui::Context) {
        let options = ConvertOptions { jpeg_quality: self.jpeg_quality };
        self.start_with(BatchConverter::new(options), ctx);
    }

    pub(super) fn start_with(&mut self, converter: BatchConverter, ctx: &egui::Context) {
        if self.pending.is_empty() || self.is_converting() {
            return;
        }

        let paths = self.pending.snapshot();
        let destination = self.destination.current().to_path_buf();
        let (tx, rx) = channel();

        self.state = ConversionState::Converting;
        self.progress_percent = 0.0;
        self.current = 0;
        self.total = paths.len();
        self.message = "Starting conversion...".to_string();
        self.events = Some(rx);

        let mut observer = ChannelObserver { tx, ctx: ctx.clone() };
        thread::spawn(move || {
            converter.run(&paths, &destination, &mut observer);
        });
    }

    /// Drains everything the worker has sent since the last frame.
    pub fn poll_events(&mut self, notices: &mut NoticeBoard) {
        loop {
            let Some(rx) = &self.events else { return };
            match rx.try_recv() {
                Ok(event) => self.apply_event(event, notices),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    self.events = None;
                    if self.is_converting() {
                        log::error!("Conversion worker stopped before finishing the batch");
                        self.state = ConversionState::Failed;
                        self.message = "Conversion stopped unexpectedly".to_string();
                    }
                    return;
                }
            }
        }
    }

    pub(super) fn apply_event(&mut self, event: BatchEvent, notices: &mut NoticeBoard) {
        match event {
            BatchEvent::Item(outcome) => {
                self.current += 1;
                if let Some(message) = outcome.failure_message() {
                    notices.error(message);
                }
                let name = outcome.source()
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "Unknown".to_string());
                let verb = if outcome.is_failure() { "Failed" } else { "Converted" };
                self.message = format!("{} {} ({}/{})", verb, name, self.current, self.total);
            }
            BatchEvent::Progress(percent) => {
                self.progress_percent = percent;
            }
            BatchEvent::Completed(summary) => {
                notices.info(summary.message());
                self.state = if summary.failures.is_empty() {
                    ConversionState::Completed
                } else {
                    ConversionState::Failed
                };
                self.message = format!(
                    "Completed: {} succeeded, {} failed",
                    summary.converted.len(),
                    summary.failures.len()
                );
                self.last_summary = Some(summary);
                self.events = None;
            }
        }
    }
}
