/// ----- BUTTONS MODULE -----
/// This module polls the buttons inside the car. A press only counts if
/// the button still reads pressed after the debounce delay.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;

use log::debug;

use shared_resources::call::{CallHeading, Slot};
use shared_resources::config::TimingConfig;
use shared_resources::status_event::StatusEvent;

use crate::utilities::inputs::InputLinks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Top = 0,
    Mid = 1,
    Ground = 2,
    DoorOpen = 3,
    DoorClose = 4,
}

impl Button {
    pub fn iter() -> impl Iterator<Item = Button> {
        [Button::Top, Button::Mid, Button::Ground, Button::DoorOpen, Button::DoorClose]
            .iter()
            .copied()
    }

    fn floor(self) -> Option<Slot> {
        match self {
            Button::Top => Some(Slot::Top),
            Button::Mid => Some(Slot::Mid),
            Button::Ground => Some(Slot::Ground),
            Button::DoorOpen | Button::DoorClose => None,
        }
    }
}

pub trait ButtonSource {
    fn is_pressed(&self, button: Button) -> bool;
}

/// Buttons pressed from software. A press stays readable for exactly two
/// reads, the poll and its debounce check.
#[derive(Debug, Default)]
pub struct LatchedButtons {
    reads_left: [AtomicU8; 5],
}

impl LatchedButtons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, button: Button) {
        self.reads_left[button as usize].store(2, Ordering::Relaxed);
    }
}

impl ButtonSource for LatchedButtons {
    fn is_pressed(&self, button: Button) -> bool {
        self.reads_left[button as usize]
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |left| left.checked_sub(1))
            .is_ok()
    }
}

fn check_and_debounce<S: ButtonSource>(source: &S, button: Button, timing: &TimingConfig) -> bool {
    if !source.is_pressed(button) {
        return false;
    }
    thread::sleep(timing.button_debounce());
    source.is_pressed(button)
}

pub fn handle_press(button: Button, links: &InputLinks) {
    debug!("button {:?} pressed", button);
    match button.floor() {
        Some(slot) => {
            if links.call(slot, CallHeading::Travel) {
                links.log(StatusEvent::FloorRequested { floor: None, direction: None });
            }
        }
        None => match button {
            Button::DoorOpen => links.open_door(),
            _ => links.close_door(),
        },
    }
}

/// Runs one pass over every button.
pub fn poll<S: ButtonSource>(source: &S, links: &InputLinks, timing: &TimingConfig) {
    for button in Button::iter() {
        if check_and_debounce(source, button, timing) {
            handle_press(button, links);
        }
    }
}

pub fn main<S: ButtonSource>(timing: TimingConfig, source: Arc<S>, links: InputLinks) {
    loop {
        poll(source.as_ref(), &links, &timing);
        thread::sleep(timing.button_poll());
    }
}
