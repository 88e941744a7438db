//! This module provides ways to tweak a local store, so that it can return errors on some tests

use std::error::Error;

/// This stores some behaviour tweaks, that describe how a mocked store will behave during a given test
///
/// So that a function fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    pub weeks_behaviour: (u32, u32),
    pub events_for_week_behaviour: (u32, u32),
    pub create_week_behaviour: (u32, u32),
    pub update_week_behaviour: (u32, u32),
    pub create_event_behaviour: (u32, u32),
    pub upload_file_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            weeks_behaviour: (0, n_fails),
            events_for_week_behaviour: (0, n_fails),
            create_week_behaviour: (0, n_fails),
            update_week_behaviour: (0, n_fails),
            create_event_behaviour: (0, n_fails),
            upload_file_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_list_weeks(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.weeks_behaviour, "weeks")
    }
    pub fn can_list_events(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.events_for_week_behaviour, "events_for_week")
    }
    pub fn can_create_week(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.create_week_behaviour, "create_week")
    }
    pub fn can_update_week(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.update_week_behaviour, "update_week")
    }
    pub fn can_create_event(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.create_event_behaviour, "create_event")
    }
    pub fn can_upload_file(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.upload_file_behaviour, "upload_file")
    }
}

/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), Box<dyn Error>> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value).into())
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        assert!(ok.can_create_week().is_ok());
        assert!(ok.can_create_week().is_ok());
        assert!(ok.can_list_weeks().is_ok());

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_create_week().is_err());
        assert!(now.can_update_week().is_err());
        assert!(now.can_update_week().is_err());
        assert!(now.can_create_week().is_err());
        assert!(now.can_create_week().is_ok());
        assert!(now.can_update_week().is_ok());

        let mut custom = MockBehaviour {
            create_week_behaviour: (1, 2),
            ..MockBehaviour::default()
        };
        assert!(custom.can_create_week().is_ok());
        assert!(custom.can_create_week().is_err());
        assert!(custom.can_create_week().is_err());
        assert!(custom.can_create_week().is_ok());
        assert!(custom.can_create_week().is_ok());
    }
}
