use std::sync::atomic::{AtomicU8, Ordering};

const IDLE: u8 = 0;
const IN_FLIGHT: u8 = 1;

/// Single-flight latch for one kind of network operation.
///
/// The latch has exactly two states, `Idle` and `InFlight`, and the only
/// transition into `InFlight` is the atomic compare-exchange in
/// [`try_acquire`](FetchGuard::try_acquire). Holding the returned permit
/// marks the operation in flight; dropping it returns the latch to idle,
/// so release happens on every exit path of the guarded operation.
#[derive(Debug, Default)]
pub struct FetchGuard {
    state: AtomicU8,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(IDLE),
        }
    }

    /// Attempt the `Idle -> InFlight` transition. `None` means another
    /// operation of this kind is already in flight.
    pub fn try_acquire(&self) -> Option<FetchPermit<'_>> {
        self.state
            .compare_exchange(IDLE, IN_FLIGHT, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FetchPermit { guard: self })
    }

    pub fn is_idle(&self) -> bool {
        self.state.load(Ordering::Acquire) == IDLE
    }
}

/// Proof that the latch is held. Dropping it releases the latch.
#[derive(Debug)]
pub struct FetchPermit<'a> {
    guard: &'a FetchGuard,
}

impl Drop for FetchPermit<'_> {
    fn drop(&mut self) {
        self.guard.state.store(IDLE, Ordering::Release);
    }
}
