//! Background clock for a shared session.
//!
//! A [`Ticker`] owns one named thread that sleeps on a stop channel and
//! calls [`GameSession::tick`] each time the wait times out. Stopping (or
//! dropping) the handle disconnects the channel and joins the thread, so
//! once `stop` returns no further tick can land.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use influencer_logic::dice::RandomSource;

use crate::session::{lock_session, Clock, SharedSession};

pub struct Ticker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start ticking `session` once per `interval`.
    pub fn spawn<S, C>(session: SharedSession<S, C>, interval: Duration) -> io::Result<Self>
    where
        S: RandomSource + Send + 'static,
        C: Clock + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("influencer-ticker".to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        // rejected ticks (paused, not started) are no-ops
                        let _ = lock_session(&session).tick();
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;
        log::debug!("ticker started with interval {interval:?}");
        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::session::{FixedClock, GameSession};
    use chrono::{TimeZone, Utc};
    use influencer_logic::careers::Career;
    use influencer_logic::dice::ScriptedSource;
    use std::sync::{Arc, Mutex};

    fn shared() -> SharedSession<ScriptedSource, FixedClock> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        let mut session =
            GameSession::with_parts(SimConfig::default(), ScriptedSource::new([0.9]), clock);
        session.new_game("Ana", Career::Streamer).unwrap();
        Arc::new(Mutex::new(session))
    }

    fn clock_of(session: &SharedSession<ScriptedSource, FixedClock>) -> (u32, u8) {
        let guard = lock_session(session);
        (guard.snapshot().day, guard.snapshot().hour)
    }

    #[test]
    fn test_ticks_until_stopped() {
        let session = shared();
        let ticker = Ticker::spawn(Arc::clone(&session), Duration::from_millis(2)).unwrap();
        assert!(ticker.is_running());
        thread::sleep(Duration::from_millis(100));
        ticker.stop();

        let stopped_at = clock_of(&session);
        assert_ne!(stopped_at, (1, 8));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(clock_of(&session), stopped_at);
    }

    #[test]
    fn test_drop_stops_ticking() {
        let session = shared();
        {
            let _ticker = Ticker::spawn(Arc::clone(&session), Duration::from_millis(1)).unwrap();
            thread::sleep(Duration::from_millis(30));
        }
        let stopped_at = clock_of(&session);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(clock_of(&session), stopped_at);
    }

    #[test]
    fn test_paused_session_does_not_advance() {
        let session = shared();
        lock_session(&session).pause().unwrap();
        let ticker = Ticker::spawn(Arc::clone(&session), Duration::from_millis(1)).unwrap();
        thread::sleep(Duration::from_millis(30));
        ticker.stop();
        assert_eq!(clock_of(&session), (1, 8));
    }
}
