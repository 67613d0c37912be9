//! Scripted location service for the CLI probe and tests.

use crate::location::service::{AuthorizationStatus, LocationError, LocationSender, LocationService};
use crate::model::event::Coordinate;
use std::collections::VecDeque;

/// Answers requests from a script instead of device hardware.
///
/// Every request posts its answer immediately; the provider still only sees
/// it on the next `pump`. An exhausted script posts nothing, which lets the
/// fix timeout fire.
#[derive(Debug, Clone)]
pub struct SimulatedLocationService {
    sender: LocationSender,
    grant: bool,
    fixes: VecDeque<Result<Coordinate, LocationError>>,
}

impl SimulatedLocationService {
    pub fn granted(sender: LocationSender) -> Self {
        Self {
            sender,
            grant: true,
            fixes: VecDeque::new(),
        }
    }

    pub fn denied(sender: LocationSender) -> Self {
        Self {
            sender,
            grant: false,
            fixes: VecDeque::new(),
        }
    }

    /// Queues the answer for the next fix request.
    pub fn push_fix(&mut self, fix: Result<Coordinate, LocationError>) {
        self.fixes.push_back(fix);
    }

    pub fn with_fix(mut self, coordinate: Coordinate) -> Self {
        self.push_fix(Ok(coordinate));
        self
    }

    pub fn remaining_fixes(&self) -> usize {
        self.fixes.len()
    }
}

impl LocationService for SimulatedLocationService {
    fn request_authorization(&mut self) {
        let status = if self.grant {
            AuthorizationStatus::Granted
        } else {
            AuthorizationStatus::Denied
        };
        self.sender.authorization_changed(status);
    }

    fn request_one_shot_fix(&mut self) {
        if !self.grant {
            return;
        }
        match self.fixes.pop_front() {
            Some(Ok(coordinate)) => {
                self.sender.deliver_fix(coordinate);
            }
            Some(Err(error)) => {
                self.sender.fail_fix(error);
            }
            None => {}
        }
    }
}
