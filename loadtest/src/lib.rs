use std::time::Duration;

/// Requests averaged per printed line when hitting a local service.
pub const LOCAL_WINDOW: usize = 50;

/// The base url of a running prediction service, always ending in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    base: String,
}

impl Target {
    pub fn new(url: &str) -> Self {
        let mut base = url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Self { base }
    }

    /// The liveness route.
    pub fn root(&self) -> &str {
        &self.base
    }

    pub fn predict(&self) -> String {
        format!("{}predict", self.base)
    }

    /// Whether the service runs on this machine.
    pub fn is_local(&self) -> bool {
        let rest = self
            .base
            .split_once("://")
            .map_or(self.base.as_str(), |(_, rest)| rest);
        let authority = rest.split('/').next().unwrap_or_default();
        let host = match authority.strip_prefix('[') {
            Some(v6) => v6.split(']').next().unwrap_or_default(),
            None => authority.split(':').next().unwrap_or_default(),
        };

        matches!(host, "localhost" | "127.0.0.1" | "0.0.0.0" | "::1")
    }

    /// How many requests to average per printed line, unless the user picks one.
    pub fn default_window(&self) -> usize {
        if self.is_local() { LOCAL_WINDOW } else { 1 }
    }
}

/// Accumulates request latencies and yields their mean every `size` samples.
#[derive(Debug)]
pub struct LatencyWindow {
    size: usize,
    count: usize,
    total: Duration,
}

impl LatencyWindow {
    /// Creates a new `LatencyWindow`, `size` is clamped to `1..=u32::MAX`.
    pub fn new(size: usize) -> Self {
        Self {
            size: size.clamp(1, u32::MAX as usize),
            count: 0,
            total: Duration::ZERO,
        }
    }

    /// Records a latency.
    ///
    /// # Returns
    /// The mean latency of the window if this sample completed it, the window then starts over.
    pub fn record(&mut self, elapsed: Duration) -> Option<Duration> {
        self.count += 1;
        self.total += elapsed;

        if self.count < self.size {
            return None;
        }

        let mean = self.total / u32::try_from(self.count).unwrap_or(u32::MAX);
        self.count = 0;
        self.total = Duration::ZERO;
        Some(mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_always_ends_with_a_slash() {
        let target = Target::new("https://appml.run.app");

        assert_eq!(target.root(), "https://appml.run.app/");
        assert_eq!(target.predict(), "https://appml.run.app/predict");
        assert_eq!(Target::new("http://localhost:8080/").root(), "http://localhost:8080/");
    }

    #[test]
    fn local_targets_average_more_requests() {
        assert!(Target::new("http://localhost:8080/").is_local());
        assert!(Target::new("127.0.0.1:8080").is_local());
        assert!(!Target::new("https://appml.run.app/").is_local());

        assert_eq!(Target::new("http://localhost:8080").default_window(), LOCAL_WINDOW);
        assert_eq!(Target::new("https://appml.run.app").default_window(), 1);
    }

    #[test]
    fn window_yields_the_mean_and_resets() {
        let mut window = LatencyWindow::new(2);

        assert_eq!(window.record(Duration::from_millis(10)), None);
        assert_eq!(
            window.record(Duration::from_millis(30)),
            Some(Duration::from_millis(20))
        );
        assert_eq!(window.record(Duration::from_millis(5)), None);
        assert_eq!(
            window.record(Duration::from_millis(5)),
            Some(Duration::from_millis(5))
        );
    }

    #[test]
    fn window_of_one_yields_every_sample() {
        let mut window = LatencyWindow::new(0);

        assert_eq!(
            window.record(Duration::from_millis(7)),
            Some(Duration::from_millis(7))
        );
    }

    #[test]
    fn huge_windows_are_clamped() {
        let mut window = LatencyWindow::new(usize::MAX);
        assert_eq!(window.size, u32::MAX as usize);

        window.count = window.size - 1;
        window.total = Duration::from_secs(u64::from(u32::MAX) - 1);
        assert_eq!(window.record(Duration::from_secs(1)), Some(Duration::from_secs(1)));
    }
}
