use std::io::Write;
use std::time::Duration;

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::common::config::AppConfig;

/// Text of one spinner frame.
pub fn spinner_line(tick: usize, last_node: Option<&str>) -> String {
    let frames = AppConfig::SPINNER_FRAMES;
    let frame = frames[tick % frames.len()];
    match last_node {
        Some(node) => format!("Searching for PVCs {frame} ({node})"),
        None => format!("Searching for PVCs {frame}"),
    }
}

/// "Searching for PVCs" spinner fed by the collection progress channel.
pub struct Spinner {
    done: CancellationToken,
    handle: JoinHandle<()>,
}

impl Spinner {
    pub fn start<W: Write + Send + 'static>(
        mut progress: mpsc::UnboundedReceiver<String>,
        mut out: W,
    ) -> Self {
        let done = CancellationToken::new();
        let token = done.clone();

        let handle = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(Duration::from_millis(AppConfig::SPINNER_TICK_MS));
            let mut last_node: Option<String> = None;
            let mut tick = 0usize;

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    Some(node) = progress.recv() => last_node = Some(node),
                    _ = ticker.tick() => {
                        let line = spinner_line(tick, last_node.as_deref());
                        tick = tick.wrapping_add(1);
                        let _ = queue!(
                            out,
                            Print("\r"),
                            Clear(ClearType::CurrentLine),
                            SetForegroundColor(Color::Cyan),
                            Print(format!("  {line}")),
                            ResetColor
                        );
                        let _ = out.flush();
                    }
                }
            }

            let _ = queue!(out, Print("\r"), Clear(ClearType::CurrentLine));
            let _ = out.flush();
        });

        Self { done, handle }
    }

    /// Stop the spinner and clear its line.
    pub async fn finish(self) {
        self.done.cancel();
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_line() {
        assert_eq!(spinner_line(0, None), "Searching for PVCs |");
        assert_eq!(spinner_line(1, Some("worker-1")), "Searching for PVCs / (worker-1)");
        assert_eq!(spinner_line(4, None), "Searching for PVCs |");
    }

    #[tokio::test]
    async fn test_spinner_stops_on_finish() {
        let (tx, rx) = mpsc::unbounded_channel();
        let spinner = Spinner::start(rx, std::io::sink());
        tx.send("worker-1".to_string()).unwrap();
        spinner.finish().await;
    }
}
