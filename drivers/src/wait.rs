/*++

Licensed under the Apache-2.0 license.

File Name:

    wait.rs

Abstract:

    File contains common functions to implement bounded wait routines.

--*/

/// Outcome of a bounded poll
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PollResult {
    Ready,
    TimedOut,
}

/// Poll `predicate` until it holds or `timeout_us` microseconds have elapsed
///
/// # Arguments
///
/// * `now` - Monotonic microsecond clock
/// * `timeout_us` - Poll budget
/// * `predicate` - Condition to wait for
pub fn until_timeout<N, F>(now: N, timeout_us: u64, mut predicate: F) -> PollResult
where
    N: Fn() -> u64,
    F: FnMut() -> bool,
{
    let deadline = now().saturating_add(timeout_us);

    loop {
        if predicate() {
            return PollResult::Ready;
        }
        if now() >= deadline {
            break;
        }
    }

    // The condition may settle between the last poll and the deadline check.
    if predicate() {
        PollResult::Ready
    } else {
        PollResult::TimedOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn test_ready_immediately() {
        let ticks = Cell::new(0u64);
        let result = until_timeout(
            || {
                ticks.set(ticks.get() + 1);
                ticks.get()
            },
            10,
            || true,
        );
        assert_eq!(result, PollResult::Ready);
        assert_eq!(ticks.get(), 1);
    }

    #[test]
    fn test_ready_after_polls() {
        let polls = Cell::new(0u32);
        let time = Cell::new(0u64);
        let result = until_timeout(
            || {
                time.set(time.get() + 1);
                time.get()
            },
            100,
            || {
                polls.set(polls.get() + 1);
                polls.get() == 5
            },
        );
        assert_eq!(result, PollResult::Ready);
    }

    #[test]
    fn test_timeout() {
        let time = Cell::new(0u64);
        let result = until_timeout(
            || {
                time.set(time.get() + 1);
                time.get()
            },
            50,
            || false,
        );
        assert_eq!(result, PollResult::TimedOut);
        assert!(time.get() >= 51);
    }

    #[test]
    fn test_late_success_after_deadline() {
        let polls = Cell::new(0u32);
        let result = until_timeout(
            || 1000,
            0,
            || {
                polls.set(polls.get() + 1);
                polls.get() > 1
            },
        );
        assert_eq!(result, PollResult::Ready);
        assert_eq!(polls.get(), 2);
    }
}
