//! Worker lifecycle state.
//!
//! # States
//! - Idle: constructed, never run
//! - Running: inside `Worker::run`
//! - Stopped: the last run returned (cancellation or `Worker::stop`)

/// Lifecycle state of a worker.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle = 0,
    Running = 1,
    Stopped = 2,
}

impl From<u8> for WorkerState {
    fn from(val: u8) -> Self {
        match val {
            1 => WorkerState::Running,
            2 => WorkerState::Stopped,
            _ => WorkerState::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repr_round_trips() {
        for state in [WorkerState::Idle, WorkerState::Running, WorkerState::Stopped] {
            assert_eq!(WorkerState::from(state as u8), state);
        }
        assert_eq!(WorkerState::from(42), WorkerState::Idle);
    }
}
