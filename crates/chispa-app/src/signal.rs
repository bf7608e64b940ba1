use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Routes Ctrl+C: while a prompt is open it cancels the prompt, otherwise
/// it ends the process.
#[derive(Clone, Default)]
pub struct Interrupts {
    prompting: Arc<AtomicBool>,
    pressed: Arc<Notify>,
}

impl Interrupts {
    pub fn listen(&self) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if this.prompting.load(Ordering::SeqCst) {
                    this.pressed.notify_waiters();
                } else {
                    tracing::info!("Interrupted outside a prompt");
                    eprintln!("\nCancelled");
                    std::process::exit(1);
                }
            }
        })
    }

    /// Run `fut` as a prompt; `None` when Ctrl+C arrives first
    pub async fn prompt<F: Future>(&self, fut: F) -> Option<F::Output> {
        // registered before the flag flips so no press is lost
        let pressed = self.pressed.notified();
        self.prompting.store(true, Ordering::SeqCst);

        let out = tokio::select! {
            out = fut => Some(out),
            _ = pressed => None,
        };

        self.prompting.store(false, Ordering::SeqCst);
        out
    }

    #[cfg(test)]
    fn press(&self) {
        self.pressed.notify_waiters();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn prompt_returns_value_when_not_pressed() {
        let interrupts = Interrupts::default();
        assert_eq!(interrupts.prompt(async { 7 }).await, Some(7));
        assert!(!interrupts.prompting.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn press_cancels_open_prompt() {
        let interrupts = Interrupts::default();
        let presser = interrupts.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            presser.press();
        });

        let out = interrupts.prompt(std::future::pending::<()>()).await;
        assert_eq!(out, None);
        assert!(!interrupts.prompting.load(Ordering::SeqCst));
    }
}
