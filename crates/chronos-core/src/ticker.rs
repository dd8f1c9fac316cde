//! Periodic tick driver.
//!
//! The tick is the only autonomous driver of state change. It hands the
//! callback a fresh wall-clock read every period; the callback derives
//! elapsed time from timestamps, so a delayed or missed tick causes no
//! drift. The loop ends when the callback breaks (typically: nothing is
//! running anymore).

use std::ops::ControlFlow;

use tokio::time::{sleep, Duration};

use crate::clock;

pub async fn run<F>(period: Duration, mut on_tick: F)
where
    F: FnMut(u64) -> ControlFlow<()>,
{
    loop {
        sleep(period).await;
        if on_tick(clock::now_ms()).is_break() {
            break;
        }
    }
}
