use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use thiserror::Error;
use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
    time::{Instant, sleep_until},
};
use tracing::{debug, info};

use crate::settings::{
    errors::SettingsError,
    time::{AutoSleepTimer, TimeOfDay},
};

#[derive(PartialEq, Eq, Debug, Clone, Error)]
pub enum SleepTimerError {
    #[error("Sleep timer needs a positive number of minutes, got {0}")]
    InvalidDuration(i32),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepTimerState {
    Idle,
    Running { duration: Duration, ends_at: Instant },
}

type ExpireHandler = dyn Fn() + Send + Sync;

/// A single countdown that runs `on_expire` when it reaches zero.
pub struct SleepTimer {
    state: Arc<watch::Sender<SleepTimerState>>,
    task: Mutex<Option<JoinHandle<()>>>,
    runtime: Handle,
    on_expire: Arc<ExpireHandler>,
}

impl SleepTimer {
    pub fn new(runtime: Handle, on_expire: impl Fn() + Send + Sync + 'static) -> Self {
        let (state, _) = watch::channel(SleepTimerState::Idle);

        Self {
            state: Arc::new(state),
            task: Mutex::new(None),
            runtime,
            on_expire: Arc::new(on_expire),
        }
    }

    pub fn state(&self) -> SleepTimerState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SleepTimerState> {
        self.state.subscribe()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state(), SleepTimerState::Running { .. })
    }

    pub fn remaining(&self) -> Option<Duration> {
        match self.state() {
            SleepTimerState::Idle => None,
            SleepTimerState::Running { ends_at, .. } => {
                Some(ends_at.saturating_duration_since(Instant::now()))
            }
        }
    }

    /// Start counting down, replacing any countdown already running.
    pub fn start(&self, minutes: i32) -> Result<(), SleepTimerError> {
        if minutes <= 0 {
            return Err(SleepTimerError::InvalidDuration(minutes));
        }

        let duration = Duration::from_secs(u64::from(minutes.unsigned_abs()) * 60);
        let ends_at = Instant::now() + duration;
        let running = SleepTimerState::Running { duration, ends_at };

        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = task.take() {
            previous.abort();
        }

        self.state.send_replace(running);
        info!(minutes, "sleep timer started");

        let state = self.state.clone();
        let on_expire = self.on_expire.clone();
        *task = Some(self.runtime.spawn(async move {
            sleep_until(ends_at).await;

            // a restart may have raced this task past its abort point
            let expired = state.send_if_modified(|current| {
                if *current == running {
                    *current = SleepTimerState::Idle;
                    true
                } else {
                    false
                }
            });

            if expired {
                info!("sleep timer expired");
                on_expire();
            }
        }));

        Ok(())
    }

    pub fn cancel(&self) {
        if let Some(task) = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
            debug!("sleep timer cancelled");
        }
        self.state.send_replace(SleepTimerState::Idle);
    }

    /// Start the countdown if the schedule covers `now` and nothing is running yet.
    pub fn start_auto_if_due(
        &self,
        schedule: &AutoSleepTimer,
        now: TimeOfDay,
        minutes: i32,
    ) -> Result<bool, SleepTimerError> {
        if self.is_running() || !schedule.should_start_at(now) {
            return Ok(false);
        }

        debug!(%now, "inside auto sleep timer window");
        self.start(minutes)?;
        Ok(true)
    }
}

impl Drop for SleepTimer {
    fn drop(&mut self) {
        if let Some(task) = self
            .task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting_timer() -> (SleepTimer, Arc<AtomicUsize>) {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let timer = SleepTimer::new(Handle::current(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (timer, fired)
    }

    #[tokio::test(start_paused = true)]
    async fn expires_after_the_requested_minutes() {
        let (timer, fired) = counting_timer();
        timer.start(5).unwrap();
        assert_eq!(timer.remaining(), Some(Duration::from_secs(300)));

        tokio::time::sleep(Duration::from_secs(299)).await;
        assert!(timer.is_running());
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(timer.state(), SleepTimerState::Idle);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_running_countdown() {
        let (timer, fired) = counting_timer();
        timer.start(5).unwrap();
        tokio::time::sleep(Duration::from_secs(120)).await;
        timer.start(15).unwrap();

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(301)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_without_firing() {
        let (timer, fired) = counting_timer();
        timer.start(1).unwrap();
        timer.cancel();

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(timer.remaining(), None);
    }

    #[tokio::test]
    async fn rejects_non_positive_minutes() {
        let (timer, _) = counting_timer();
        assert_eq!(timer.start(0), Err(SleepTimerError::InvalidDuration(0)));
        assert_eq!(timer.start(-3), Err(SleepTimerError::InvalidDuration(-3)));
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn auto_start_only_inside_enabled_window() {
        let (timer, _) = counting_timer();
        let late = TimeOfDay::new(23, 0).unwrap();
        let noon = TimeOfDay::new(12, 0).unwrap();
        let schedule = AutoSleepTimer::default();

        assert!(!timer.start_auto_if_due(&schedule, late, 20).unwrap());

        let schedule = schedule.with_enabled(true);
        assert!(!timer.start_auto_if_due(&schedule, noon, 20).unwrap());
        assert!(timer.start_auto_if_due(&schedule, late, 20).unwrap());
        assert!(!timer.start_auto_if_due(&schedule, late, 20).unwrap());
        assert_eq!(timer.remaining(), Some(Duration::from_secs(1200)));
    }
}
