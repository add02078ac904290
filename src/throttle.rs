/// Leading-edge rate limiter: the first call in an idle period passes and
/// opens a busy window, calls inside that window are dropped.
#[derive(Clone, Debug)]
pub struct ThrottleGate {
    window_ms: f64,
    busy_until: Option<f64>,
}

impl ThrottleGate {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            busy_until: None,
        }
    }

    /// Returns whether a call made at `now_ms` should run.
    pub fn try_pass(&mut self, now_ms: f64) -> bool {
        if let Some(until) = self.busy_until {
            if now_ms < until {
                return false;
            }
        }

        self.busy_until = Some(now_ms + self.window_ms);
        true
    }
}

/// Wraps `callback` so it runs at most once per `window_ms` as measured by
/// `clock`. Dropped calls are never replayed.
pub fn throttle_with_clock<F, C>(mut callback: F, window_ms: f64, clock: C) -> impl FnMut()
where
    F: FnMut(),
    C: Fn() -> f64,
{
    let mut gate = ThrottleGate::new(window_ms);
    move || {
        if gate.try_pass(clock()) {
            callback();
        }
    }
}

/// Browser flavour of [`throttle_with_clock`] driven by `Date.now()`.
#[cfg(target_arch = "wasm32")]
pub fn throttle<F>(callback: F, window_ms: f64) -> impl FnMut()
where
    F: FnMut(),
{
    throttle_with_clock(callback, window_ms, js_sys::Date::now)
}
