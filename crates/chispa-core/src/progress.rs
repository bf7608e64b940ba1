use std::io::Write;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(80);
const STOP_TIMEOUT: Duration = Duration::from_millis(500);
const CLEAR_WIDTH: usize = 80;

/// Whether long steps draw a spinner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Terminal,
    Silent,
}

/// Cosmetic ticking indicator on stderr.
///
/// Carries no data. `stop` is safe on a spinner that never started and
/// waits at most `STOP_TIMEOUT` for the ticking task to finish.
pub struct Spinner {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn idle() -> Self {
        Self {
            cancel: CancellationToken::new(),
            handle: None,
        }
    }

    pub fn start(message: impl Into<String>, mode: ProgressMode) -> Self {
        if mode == ProgressMode::Silent {
            return Self::idle();
        }

        let message = message.into();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            let mut idx = 0;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let frame = FRAMES[idx % FRAMES.len()];
                        let mut err = std::io::stderr().lock();
                        let _ = write!(err, "\r  {frame} {message}");
                        let _ = err.flush();
                        idx += 1;
                    }
                }
            }
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub async fn stop(mut self) {
        self.cancel.cancel();

        let Some(handle) = self.handle.take() else {
            return;
        };
        if timeout(STOP_TIMEOUT, handle).await.is_err() {
            tracing::debug!("Spinner did not stop within {:?}", STOP_TIMEOUT);
        }

        let mut err = std::io::stderr().lock();
        let _ = write!(err, "\r{}\r", " ".repeat(CLEAR_WIDTH));
        let _ = err.flush();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stopping_idle_spinner_is_noop() {
        let spinner = Spinner::idle();
        assert!(!spinner.is_running());
        spinner.stop().await;
    }

    #[tokio::test]
    async fn silent_mode_never_spawns() {
        let spinner = Spinner::start("Generating image...", ProgressMode::Silent);
        assert!(!spinner.is_running());
        spinner.stop().await;
    }

    #[tokio::test]
    async fn terminal_spinner_stops_promptly() {
        let spinner = Spinner::start("Generating image...", ProgressMode::Terminal);
        assert!(spinner.is_running());

        tokio::time::sleep(Duration::from_millis(200)).await;
        let stopped = timeout(Duration::from_secs(2), spinner.stop()).await;
        assert!(stopped.is_ok(), "stop() blocked past its bound");
    }
}
