//! Test doubles shared by unit tests.

use crate::invoker::{InvokeError, Invoker};
use crate::notify::{Notification, Notifier};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// Scripted cmake that records every argument vector it receives.
#[derive(Default)]
pub struct FakeCMake {
    responses: HashMap<Vec<String>, Vec<String>>,
    failing: bool,
    broken_pipe: bool,
    calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl FakeCMake {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cmake that cannot be started.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// A cmake whose output breaks off after the scripted lines.
    pub fn broken_pipe(self) -> Self {
        Self {
            broken_pipe: true,
            ..self
        }
    }

    /// Answer `args` with `lines`. Unscripted calls produce no output.
    pub fn respond(mut self, args: &[&str], lines: &[&str]) -> Self {
        self.responses.insert(
            args.iter().map(|s| s.to_string()).collect(),
            lines.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Shared handle to the call log, usable after the fake is moved.
    pub fn calls(&self) -> Rc<RefCell<Vec<Vec<String>>>> {
        Rc::clone(&self.calls)
    }
}

impl Invoker for FakeCMake {
    type Lines = std::vec::IntoIter<io::Result<String>>;

    fn invoke(&self, args: &[&str]) -> Result<Self::Lines, InvokeError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        self.calls.borrow_mut().push(args.clone());

        if self.failing {
            return Err(InvokeError::Spawn {
                program: PathBuf::from("cmake"),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            });
        }

        let mut lines: Vec<io::Result<String>> = self
            .responses
            .get(&args)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(Ok)
            .collect();
        if self.broken_pipe {
            lines.push(Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed")));
        }
        Ok(lines.into_iter())
    }
}

/// Count how many recorded calls equal `args`.
pub fn count_calls(calls: &RefCell<Vec<Vec<String>>>, args: &[&str]) -> usize {
    calls
        .borrow()
        .iter()
        .filter(|call| call.iter().map(String::as_str).eq(args.iter().copied()))
        .count()
}

/// Notifier that keeps every notification.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    seen: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen.borrow_mut().push(notification.clone());
    }
}
