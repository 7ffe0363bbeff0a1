use crate::models::ViewState;
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};

/// Timing of the synthetic submit progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSchedule {
    pub step: u8,
    pub interval: Duration,
    pub cap: u8,
    pub reset_delay: Duration,
}

impl Default for ProgressSchedule {
    fn default() -> Self {
        Self {
            step: 10,
            interval: Duration::from_millis(200),
            cap: 90,
            reset_delay: Duration::from_millis(500),
        }
    }
}

impl ProgressSchedule {
    pub fn next(&self, current: u8) -> u8 {
        current.saturating_add(self.step).min(self.cap)
    }
}

/// Repeating task advancing `submit_progress` while a submission is in flight.
///
/// The task ends on its own once the cap is reached. Otherwise it is aborted by
/// [`ProgressTicker::stop`] or on drop, whichever comes first.
#[derive(Debug)]
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn start(view: Arc<Mutex<ViewState>>, schedule: ProgressSchedule) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + schedule.interval, schedule.interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let mut view = view.lock().await;
                if !view.submitting {
                    break;
                }
                view.submit_progress = schedule.next(view.submit_progress);
                if view.submit_progress >= schedule.cap {
                    break;
                }
            }
        });

        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_flight() -> Arc<Mutex<ViewState>> {
        Arc::new(Mutex::new(ViewState {
            submitting: true,
            ..ViewState::default()
        }))
    }

    #[test]
    fn next_is_capped() {
        let schedule = ProgressSchedule::default();
        assert_eq!(schedule.next(0), 10);
        assert_eq!(schedule.next(80), 90);
        assert_eq!(schedule.next(85), 90);
        assert_eq!(schedule.next(90), 90);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_advances_on_schedule() {
        let view = in_flight();
        let schedule = ProgressSchedule::default();
        let ticker = ProgressTicker::start(Arc::clone(&view), schedule);

        tokio::time::sleep(schedule.interval * 3 + Duration::from_millis(50)).await;
        assert_eq!(view.lock().await.submit_progress, 30);
        assert!(ticker.is_running());
        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_stops_itself_at_cap() {
        let view = in_flight();
        let schedule = ProgressSchedule::default();
        let ticker = ProgressTicker::start(Arc::clone(&view), schedule);

        tokio::time::sleep(schedule.interval * 30).await;
        assert_eq!(view.lock().await.submit_progress, 90);
        assert!(!ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_ticker_no_longer_advances() {
        let view = in_flight();
        let schedule = ProgressSchedule::default();
        let ticker = ProgressTicker::start(Arc::clone(&view), schedule);

        tokio::time::sleep(schedule.interval * 2 + Duration::from_millis(50)).await;
        ticker.stop();
        tokio::time::sleep(schedule.interval * 5).await;
        assert_eq!(view.lock().await.submit_progress, 20);
    }
}
