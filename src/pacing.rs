// src/pacing.rs
use std::time::Duration;

/// Pause inserted between two page requests of the same domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

    pub fn fixed(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::fixed(Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps() {
        let start = Instant::now();
        Pacer::default().pause().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_none_returns_immediately() {
        let start = Instant::now();
        Pacer::none().pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
