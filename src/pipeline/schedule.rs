// src/pipeline/schedule.rs

//! Fixed-interval scheduling.
//!
//! A job runs once at startup, then once per period. Ticks are measured from
//! the end of the startup run. A tick that overruns later deadlines is
//! followed by one late tick, then the schedule returns to its hourly grid.
//! The loop has no exit: the process runs until it is killed.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::pipeline::check::UpdateChecker;

/// A job driven by [`run_periodic`].
pub trait PeriodicJob: Send + Sync + 'static {
    /// The job name (used for logging)
    fn name(&self) -> &'static str;

    /// Runs once before the first tick.
    fn startup(&self) -> impl Future<Output = ()> + Send;

    /// Runs on every tick.
    fn tick(&self) -> impl Future<Output = ()> + Send;
}

/// Run `job` at startup and then every `period`, forever.
pub async fn run_periodic<J: PeriodicJob>(job: J, period: Duration) {
    job.startup().await;

    let mut timer = tokio::time::interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    log::debug!("{} scheduled every {:?}", job.name(), period);

    loop {
        timer.tick().await;
        job.tick().await;
    }
}

impl PeriodicJob for UpdateChecker {
    fn name(&self) -> &'static str {
        "bulletin check"
    }

    async fn startup(&self) {
        match self.initial_check().await {
            Ok(outcome) => log::debug!("Initial check finished: {:?}", outcome),
            Err(e) => log::error!("Error during initial check: {}", e),
        }
        log::info!("Starting monitoring of {}", self.bulletin_url());
    }

    /// Bootstrap-or-check, so a baseline missed at startup is taken later.
    async fn tick(&self) {
        match self.initial_check().await {
            Ok(outcome) => log::debug!("Check finished: {:?}", outcome),
            Err(e) => log::error!("Error checking for updates: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Config;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HOUR: Duration = Duration::from_secs(3600);

    #[derive(Clone, Default)]
    struct CountingJob {
        startups: Arc<AtomicUsize>,
        ticks: Arc<AtomicUsize>,
    }

    impl PeriodicJob for CountingJob {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn startup(&self) {
            self.startups.fetch_add(1, Ordering::SeqCst);
        }

        async fn tick(&self) {
            self.ticks.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn startup_runs_immediately_then_once_per_period() {
        let job = CountingJob::default();
        let handle = tokio::spawn(run_periodic(job.clone(), HOUR));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(job.startups.load(Ordering::SeqCst), 1);
        assert_eq!(job.ticks.load(Ordering::SeqCst), 0);

        tokio::time::sleep(HOUR).await;
        assert_eq!(job.ticks.load(Ordering::SeqCst), 1);

        tokio::time::sleep(HOUR * 2).await;
        assert_eq!(job.ticks.load(Ordering::SeqCst), 3);
        assert_eq!(job.startups.load(Ordering::SeqCst), 1);

        handle.abort();
    }

    #[derive(Clone, Default)]
    struct SlowFirstTick {
        ticks: Arc<AtomicUsize>,
    }

    impl PeriodicJob for SlowFirstTick {
        fn name(&self) -> &'static str {
            "slow first tick"
        }

        async fn startup(&self) {}

        async fn tick(&self) {
            if self.ticks.fetch_add(1, Ordering::SeqCst) == 0 {
                // Overruns the 2h and 3h deadlines.
                tokio::time::sleep(HOUR * 2 + Duration::from_secs(60)).await;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn overrun_fires_one_late_tick_instead_of_a_burst() {
        let job = SlowFirstTick::default();
        let handle = tokio::spawn(run_periodic(job.clone(), HOUR));

        // Tick 1 at 1h runs until 3h01m, then a single late tick follows.
        tokio::time::sleep(HOUR * 3 + Duration::from_secs(120)).await;
        assert_eq!(job.ticks.load(Ordering::SeqCst), 2);

        // Back on the hourly grid at 4h.
        tokio::time::sleep(HOUR).await;
        assert_eq!(job.ticks.load(Ordering::SeqCst), 3);

        handle.abort();
    }

    fn checker_for(server: &MockServer, snapshot: &std::path::Path) -> UpdateChecker {
        let config = Config::from_json(&format!(
            r#"{{
                "gotify_url": "{uri}",
                "gotify_token": "t",
                "file_path": "{file}",
                "bulletin_url": "{uri}/bulletinC.txt",
                "api_url": "{uri}/leap.json"
            }}"#,
            uri = server.uri(),
            file = snapshot.display(),
        ))
        .unwrap();
        UpdateChecker::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn baseline_is_taken_on_tick_after_failed_startup() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        let snapshot = tmp.path().join("b.txt");

        Mock::given(method("GET"))
            .and(path("/bulletinC.txt"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bulletinC.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("LEAP SECOND DATA v1"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let checker = checker_for(&server, &snapshot);

        checker.startup().await;
        assert!(!snapshot.exists());

        checker.tick().await;
        assert_eq!(std::fs::read(&snapshot).unwrap(), b"LEAP SECOND DATA v1");

        // Later ticks compare against the new baseline.
        checker.tick().await;
        assert_eq!(std::fs::read(&snapshot).unwrap(), b"LEAP SECOND DATA v1");
    }
}
