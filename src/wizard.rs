//! The guest booking wizard: a linear four-step state machine that collects
//! the booking selection and gates each step behind its own validation. The
//! module is free of web and database types so the flow can be exercised
//! directly.

use crate::models::{Barber, HaircutStyle, Service};

pub const ERR_NAME_REQUIRED: &str = "Full Name is required to proceed.";
pub const ERR_STYLE_REQUIRED: &str = "Please select a haircut style.";
pub const ERR_SCHEDULE_REQUIRED: &str = "Please select service, date, and time";
pub const ERR_BARBER_REQUIRED: &str = "Please select a barber";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    GuestAndStyle,
    ServiceAndTime,
    BarberChoice,
    Confirm,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::GuestAndStyle => 1,
            Step::ServiceAndTime => 2,
            Step::BarberChoice => 3,
            Step::Confirm => 4,
        }
    }

    /// Steps posted back from the form; anything out of range restarts the
    /// wizard at the first step.
    pub fn from_number(number: u8) -> Step {
        match number {
            2 => Step::ServiceAndTime,
            3 => Step::BarberChoice,
            4 => Step::Confirm,
            _ => Step::GuestAndStyle,
        }
    }

    fn next(self) -> Step {
        match self {
            Step::GuestAndStyle => Step::ServiceAndTime,
            Step::ServiceAndTime => Step::BarberChoice,
            Step::BarberChoice => Step::Confirm,
            Step::Confirm => Step::Confirm,
        }
    }

    fn previous(self) -> Step {
        match self {
            Step::GuestAndStyle | Step::ServiceAndTime => Step::GuestAndStyle,
            Step::BarberChoice => Step::ServiceAndTime,
            Step::Confirm => Step::BarberChoice,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestInfo {
    pub name: String,
    pub phone: String,
}

/// Everything the guest has picked so far. Fields fill in as steps complete
/// and are only cleared by abandoning the flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingSelection {
    pub guest: GuestInfo,
    pub haircut: Option<HaircutStyle>,
    pub service: Option<Service>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub barber: Option<Barber>,
}

impl BookingSelection {
    fn guest_and_style_error(&self) -> Option<&'static str> {
        if self.guest.name.trim().is_empty() {
            return Some(ERR_NAME_REQUIRED);
        }
        if self.haircut.is_none() {
            return Some(ERR_STYLE_REQUIRED);
        }
        None
    }

    fn schedule_error(&self) -> Option<&'static str> {
        if self.service.is_none() || self.date.is_none() || self.time.is_none() {
            return Some(ERR_SCHEDULE_REQUIRED);
        }
        None
    }

    fn barber_error(&self) -> Option<&'static str> {
        if self.barber.is_none() {
            return Some(ERR_BARBER_REQUIRED);
        }
        None
    }

    /// First unmet requirement across all steps, if any. Checkout uses this
    /// as a backstop against forms that skipped the per-step gates.
    pub fn first_incomplete(&self) -> Option<&'static str> {
        self.guest_and_style_error()
            .or_else(|| self.schedule_error())
            .or_else(|| self.barber_error())
    }
}

#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    selection: BookingSelection,
    error: Option<String>,
    busy: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::resume(Step::GuestAndStyle, BookingSelection::default())
    }

    /// Rebuild the wizard at a known step, as posted back by the form.
    pub fn resume(step: Step, selection: BookingSelection) -> Self {
        Wizard {
            step,
            selection,
            error: None,
            busy: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Move forward one step if the current step's requirements are met.
    /// On failure the step is kept and the blocking message recorded.
    pub fn advance(&mut self) -> bool {
        if self.busy {
            return false;
        }
        let blocking = match self.step {
            Step::GuestAndStyle => self.selection.guest_and_style_error(),
            Step::ServiceAndTime => self.selection.schedule_error(),
            Step::BarberChoice => self.selection.barber_error(),
            Step::Confirm => None,
        };
        if let Some(message) = blocking {
            self.error = Some(message.to_string());
            return false;
        }
        self.error = None;
        self.step = self.step.next();
        true
    }

    /// Move back one step. Never validates and never discards selections
    /// made on later steps.
    pub fn retreat(&mut self) {
        if self.busy {
            return;
        }
        self.error = None;
        self.step = self.step.previous();
    }

    pub fn begin_checkout(&mut self) {
        self.error = None;
        self.busy = true;
    }

    pub fn fail_checkout(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.busy = false;
    }
}
