//! Haptic feedback worker.
//!
//! A single background thread performs pulses so the (possibly slow) platform call never
//! runs on the input path. There is one pending slot: requests made while a pulse is
//! still pending collapse into it.

use crate::error::{HapticError, PadError, PadResult};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Platform haptic actuator.
pub trait Haptics: Send + 'static {
    fn pulse(&mut self, duration: Duration) -> Result<(), HapticError>;
}

/// Stand-in actuator for hosts without a vibrator.
#[derive(Debug, Default)]
pub struct LoggingHaptics;

impl Haptics for LoggingHaptics {
    fn pulse(&mut self, duration: Duration) -> Result<(), HapticError> {
        debug!(ms = duration.as_millis() as u64, "haptic pulse");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Signal {
    pending: bool,
    stopping: bool,
}

type Shared = Arc<(Mutex<Signal>, Condvar)>;

pub struct VibrationWorker {
    shared: Shared,
    duration: Duration,
    handle: Option<JoinHandle<()>>,
}

impl VibrationWorker {
    pub fn spawn<H: Haptics>(haptics: H, duration: Duration) -> PadResult<Self> {
        let shared: Shared = Arc::new((Mutex::new(Signal::default()), Condvar::new()));
        let worker_shared = Arc::clone(&shared);

        let handle = std::thread::Builder::new()
            .name("vpad-vibration".into())
            .spawn(move || run(worker_shared, haptics, duration))
            .map_err(PadError::Spawn)?;

        Ok(Self {
            shared,
            duration,
            handle: Some(handle),
        })
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Request one pulse. Never blocks on the pulse itself.
    pub fn vibrate(&self) {
        if self.duration.is_zero() {
            return;
        }
        let (lock, cvar) = &*self.shared;
        let mut signal = lock.lock();
        if signal.stopping {
            return;
        }
        signal.pending = true;
        cvar.notify_one();
    }

    /// Shut the worker down and wait for it. Safe to call more than once.
    pub fn stop(&mut self) {
        {
            let (lock, cvar) = &*self.shared;
            let mut signal = lock.lock();
            signal.stopping = true;
            cvar.notify_one();
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("vibration worker panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for VibrationWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<H: Haptics>(shared: Shared, mut haptics: H, duration: Duration) {
    let (lock, cvar) = &*shared;
    loop {
        {
            let mut signal = lock.lock();
            while !signal.pending && !signal.stopping {
                cvar.wait(&mut signal);
            }
            if signal.stopping {
                break;
            }
            signal.pending = false;
        }

        // lock released while pulsing
        if let Err(e) = haptics.pulse(duration) {
            warn!("Haptic pulse failed: {}", e);
        }
    }
    debug!("vibration worker stopped");
}
