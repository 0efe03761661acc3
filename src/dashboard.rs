use crate::history::HistoryStore;
use crate::status::StatusPoller;
use crate::submit::Submitter;

#[cfg(feature = "ui")]
use crate::editor::EditorBuffer;
#[cfg(feature = "ui")]
use crate::history::PrintJob;
#[cfg(feature = "ui")]
use crate::utils::{format_relative, now_unix_ms};
#[cfg(feature = "ui")]
use eframe::egui;
#[cfg(feature = "ui")]
use std::sync::mpsc::{channel, Receiver, Sender};

#[cfg(feature = "ui")]
pub struct DashboardApp {
    history: HistoryStore,
    submitter: Submitter,
    poller: StatusPoller,
    rt: tokio::runtime::Handle,
    editor: EditorBuffer,
    // Submit tasks report completed jobs back to the UI thread here.
    printed_tx: Sender<PrintJob>,
    printed_rx: Receiver<PrintJob>,
}

#[cfg(feature = "ui")]
pub fn run_dashboard(
    history: HistoryStore,
    submitter: Submitter,
    poller: StatusPoller,
    rt: tokio::runtime::Handle,
) -> anyhow::Result<()> {
    let options = eframe::NativeOptions::default();
    let _ = eframe::run_native(
        "Print Station",
        options,
        Box::new(move |_cc| Box::new(DashboardApp::new(history, submitter, poller, rt))),
    );
    Ok(())
}

#[cfg(feature = "ui")]
impl DashboardApp {
    fn new(
        history: HistoryStore,
        submitter: Submitter,
        poller: StatusPoller,
        rt: tokio::runtime::Handle,
    ) -> Self {
        let (printed_tx, printed_rx) = channel();
        Self {
            history,
            submitter,
            poller,
            rt,
            editor: EditorBuffer::new(),
            printed_tx,
            printed_rx,
        }
    }

    fn spawn_submit(&self) {
        let submitter = self.submitter.clone();
        let text = self.editor.text().to_owned();
        let tx = self.printed_tx.clone();
        self.rt.spawn(async move {
            match submitter.submit(&text).await {
                Ok(Some(job)) => {
                    let _ = tx.send(job);
                }
                Ok(None) => {}
                Err(e) => tracing::error!("failed to print: {:#}", e),
            }
        });
    }
}

#[cfg(feature = "ui")]
impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Successful prints clear the editor; failed ones leave it intact.
        while self.printed_rx.try_recv().is_ok() {
            self.editor.clear();
        }

        let status = self.poller.status();
        let now = now_unix_ms();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Print Station");

            ui.horizontal(|ui| {
                if status.online {
                    ui.colored_label(egui::Color32::GREEN, "● Printer online");
                } else {
                    ui.colored_label(egui::Color32::RED, "● Printer offline");
                }
                if let Some(last) = status.last_poll_unix_ms {
                    ui.label(format!("checked {}", format_relative(last, now)));
                }
                if status.failed_polls > 0 {
                    ui.label(format!("{} failed polls", status.failed_polls));
                }
            });
            ui.separator();

            ui.add_enabled(
                status.online,
                egui::TextEdit::multiline(self.editor.text_mut())
                    .hint_text("Text to print")
                    .desired_width(f32::INFINITY)
                    .desired_rows(6),
            );

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(status.online, egui::Button::new("Print"))
                    .clicked()
                {
                    self.spawn_submit();
                }
                if ui
                    .add_enabled(status.online, egui::Button::new("Clear"))
                    .clicked()
                {
                    self.editor.clear();
                }
            });

            ui.separator();
            ui.heading("History");

            let jobs = self.history.jobs();
            if jobs.is_empty() {
                ui.label("No jobs printed yet");
            } else {
                let mut load = None;
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .max_height(240.0)
                    .show(ui, |ui| {
                        for job in &jobs {
                            let label =
                                format!("{}  ({})", job.text, format_relative(job.date, now));
                            if ui.link(label).clicked() {
                                load = Some(job.clone());
                            }
                        }
                    });
                if let Some(job) = load {
                    self.editor.load_job(&job);
                }
            }

            ui.separator();
            if ui.button("Clear History").clicked() {
                if let Err(e) = self.history.clear() {
                    tracing::error!("failed to clear history: {:#}", e);
                }
            }
        });

        ctx.request_repaint_after(std::time::Duration::from_secs(1));
    }
}

#[cfg(not(feature = "ui"))]
pub fn run_dashboard(
    _history: HistoryStore,
    _submitter: Submitter,
    _poller: StatusPoller,
    _rt: tokio::runtime::Handle,
) -> anyhow::Result<()> {
    tracing::info!("Dashboard requires 'ui' feature. Build with: cargo build --features ui");
    Ok(())
}
