//! Spinners for catalog round trips

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// Create a spinner for indeterminate progress
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Await `future` behind a spinner, or silently when `quiet`
pub async fn while_loading<F: Future>(message: &str, quiet: bool, future: F) -> F::Output {
    if quiet {
        return future.await;
    }
    let pb = spinner(message);
    let output = future.await;
    pb.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_creation() {
        let pb = spinner("Loading...");
        pb.finish_and_clear();
    }

    #[tokio::test]
    async fn test_while_loading_returns_output() {
        assert_eq!(while_loading("Loading", true, async { 7 }).await, 7);
        assert_eq!(while_loading("Loading", false, async { 8 }).await, 8);
    }
}
