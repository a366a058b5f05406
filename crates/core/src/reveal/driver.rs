//! Timer driver for [`Reveal`].
//!
//! Runs one reveal on a `tokio::time::interval` and publishes every display
//! through a watch channel. The task is aborted when its handle is dropped,
//! so a reveal never outlives the message that owns it.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::engine::{Reveal, Tick};

/// A running (or already finished) reveal.
#[derive(Debug)]
pub struct RevealHandle {
    display: watch::Receiver<String>,
    task: Option<JoinHandle<()>>,
}

/// Start revealing `text`, one token per `interval`.
///
/// With `animate` false the full text is published at once and no timer is
/// started. Must be called from within a tokio runtime.
pub fn spawn_reveal(text: impl Into<String>, animate: bool, interval: Duration) -> RevealHandle {
    let mut reveal = Reveal::new(text, animate);
    let (tx, rx) = watch::channel(reveal.display().to_string());

    if reveal.is_done() {
        return RevealHandle { display: rx, task: None };
    }

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick of a tokio interval completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match reveal.tick() {
                Tick::Advanced(display) => {
                    if tx.send(display.to_string()).is_err() {
                        break;
                    }
                }
                Tick::Done | Tick::Superseded => break,
            }
            if reveal.is_done() {
                break;
            }
        }
        tracing::trace!(chars = reveal.display().len(), "reveal finished");
    });

    RevealHandle { display: rx, task: Some(task) }
}

impl RevealHandle {
    /// The display as of now.
    pub fn display(&self) -> String {
        self.display.borrow().clone()
    }

    /// A receiver that is notified on every change of the display.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.display.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stop the timer; the display keeps whatever was shown last.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Wait for the reveal to complete and return the final display.
    pub async fn finished(mut self) -> String {
        if let Some(task) = self.task.take() {
            // a cancelled task only means the display stopped early
            let _ = task.await;
        }
        self.display()
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Holds at most one running reveal for a message slot.
///
/// Showing new text (or the same text with a different animate flag) drops
/// the previous handle, which aborts its timer before the new one starts.
#[derive(Debug)]
pub struct RevealSlot {
    interval: Duration,
    current: Option<(String, bool, RevealHandle)>,
}

impl RevealSlot {
    pub fn new(interval: Duration) -> Self {
        Self { interval, current: None }
    }

    /// Returns true when a new reveal was started.
    pub fn show(&mut self, text: &str, animate: bool) -> bool {
        if let Some((current, flag, _)) = &self.current
            && current == text
            && *flag == animate
        {
            return false;
        }
        // drop (and abort) the old reveal before starting the next one
        self.current = None;
        self.current = Some((text.to_string(), animate, spawn_reveal(text, animate, self.interval)));
        true
    }

    pub fn display(&self) -> String {
        self.current.as_ref().map(|(_, _, handle)| handle.display()).unwrap_or_default()
    }

    pub fn handle(&self) -> Option<&RevealHandle> {
        self.current.as_ref().map(|(_, _, handle)| handle)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(5);

    #[tokio::test(start_paused = true)]
    async fn test_instant_reveal_starts_no_timer() {
        let handle = spawn_reveal("**done**", false, TICK);
        assert_eq!(handle.display(), "**done**");
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_token_per_interval() {
        let handle = spawn_reveal("ab `cd`", true, TICK);
        assert_eq!(handle.display(), "");

        tokio::time::sleep(TICK + Duration::from_millis(1)).await;
        assert_eq!(handle.display(), "a");

        tokio::time::sleep(TICK).await;
        assert_eq!(handle.display(), "ab");

        tokio::time::sleep(TICK * 2).await;
        assert_eq!(handle.display(), "ab `cd`");
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_yields_full_text() {
        let text = "I have **3 years** at `AWS`.";
        let handle = spawn_reveal(text, true, TICK);
        assert_eq!(handle.finished().await, text);
    }

    #[tokio::test(start_paused = true)]
    async fn test_published_displays_only_grow() {
        let text = "Built a **GenAI** prototype with `Bedrock`.";
        let handle = spawn_reveal(text, true, TICK);
        let mut rx = handle.subscribe();

        let mut previous = String::new();
        while rx.changed().await.is_ok() {
            let current = rx.borrow_and_update().clone();
            assert!(current.len() > previous.len());
            assert!(current.starts_with(&previous));
            previous = current;
            if previous == text {
                break;
            }
        }
        assert_eq!(previous, text);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_freezes_display() {
        let mut handle = spawn_reveal("abcdef", true, TICK);
        tokio::time::sleep(TICK * 2 + Duration::from_millis(1)).await;
        handle.cancel();
        let frozen = handle.display();

        tokio::time::sleep(TICK * 10).await;
        assert_eq!(handle.display(), frozen);
        assert!(frozen.len() < "abcdef".len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_restart_never_mixes_texts() {
        let mut slot = RevealSlot::new(TICK);
        assert!(slot.show("first message", true));
        tokio::time::sleep(TICK * 3 + Duration::from_millis(1)).await;
        assert!("first message".starts_with(&slot.display()));

        assert!(slot.show("second", true));
        let mut rx = slot.handle().unwrap().subscribe();
        assert_eq!(rx.borrow().as_str(), "");

        while rx.changed().await.is_ok() {
            let current = rx.borrow_and_update().clone();
            assert!("second".starts_with(current.as_str()));
            if current == "second" {
                break;
            }
        }
        assert_eq!(slot.display(), "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_same_input_keeps_running_reveal() {
        let mut slot = RevealSlot::new(TICK);
        assert!(slot.show("abc", true));
        tokio::time::sleep(TICK + Duration::from_millis(1)).await;
        assert!(!slot.show("abc", true));
        assert_eq!(slot.display(), "a");
    }
}
