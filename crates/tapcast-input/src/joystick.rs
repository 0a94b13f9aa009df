//! Directional combination state machine for the movement joystick.
//!
//! All four direction keys share one pointer identity. Holding up to two
//! directions at once combines their offsets into a diagonal; releases
//! subtract offsets until no direction remains held, at which point the
//! joystick returns to rest and the contact is lifted.

use std::thread;
use std::time::Duration;

use tracing::debug;

use tapcast_core::geometry::{Point, Size};
use tapcast_core::pointer::VirtualPointer;
use tapcast_core::protocol::messages::TouchAction;

use crate::pointer::PointerEngine;
use crate::ports::ControlChannel;

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    const fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Displacement this direction contributes to the joystick position.
    const fn offset(self, step: i32) -> (i32, i32) {
        match self {
            Direction::Forward => (0, -step),
            Direction::Backward => (0, step),
            Direction::Left => (-step, 0),
            Direction::Right => (step, 0),
        }
    }
}

/// State of the emulated movement joystick.
#[derive(Debug)]
pub struct DirectionalPad {
    held: [bool; 4],
    /// Direction whose press initiated the current gesture. Informational:
    /// the gesture ends when the last held direction is released, whichever
    /// key that is.
    started_by: Option<Direction>,
    moving: bool,
    pos: Point,
    rest: Point,
    step: i32,
    /// Pause between the initial DOWN and its first MOVE so the device does
    /// not coalesce them into one event.
    first_move_delay: Duration,
}

impl DirectionalPad {
    pub fn new(rest: Point, step: i32, first_move_delay: Duration) -> Self {
        Self {
            held: [false; 4],
            started_by: None,
            moving: false,
            pos: rest,
            rest,
            step,
            first_move_delay,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    /// Clears all state back to rest without emitting anything.
    ///
    /// Only valid once the joystick contact has been lifted (mode exit runs
    /// a release sweep first).
    pub fn reset(&mut self) {
        self.held = [false; 4];
        self.started_by = None;
        self.moving = false;
        self.pos = self.rest;
    }

    /// Snaps the stored position back to rest, unless a gesture is in
    /// progress (a mid-gesture snap would desynchronize the held offsets).
    pub fn recenter(&mut self) {
        if !self.moving {
            self.pos = self.rest;
        }
    }

    /// Applies one direction-key transition.
    ///
    /// Redundant events (autorepeat of a held direction, release of a
    /// direction that is not held) are no-ops.
    pub fn handle_key(
        &mut self,
        engine: &mut PointerEngine,
        channel: &dyn ControlChannel,
        frame_size: Size,
        direction: Direction,
        down: bool,
    ) {
        if down {
            self.handle_press(engine, channel, frame_size, direction);
        } else {
            self.handle_release(engine, channel, frame_size, direction);
        }
    }

    fn handle_press(
        &mut self,
        engine: &mut PointerEngine,
        channel: &dyn ControlChannel,
        frame_size: Size,
        direction: Direction,
    ) {
        if self.held[direction.index()] {
            return;
        }

        let (dx, dy) = direction.offset(self.step);

        if !self.moving {
            debug!(?direction, "movement start");
            engine.press(channel, frame_size, VirtualPointer::Joystick, self.pos);
            thread::sleep(self.first_move_delay);
            self.pos = self.pos.offset(dx, dy);
            self.held[direction.index()] = true;
            self.started_by = Some(direction);
            self.moving = true;
            engine.emit(
                channel,
                frame_size,
                VirtualPointer::Joystick,
                TouchAction::Move,
                self.pos,
            );
            return;
        }

        // Second direction joins the gesture: combine offsets additively.
        self.pos = self.pos.offset(dx, dy);
        self.held[direction.index()] = true;
        engine.emit(
            channel,
            frame_size,
            VirtualPointer::Joystick,
            TouchAction::Move,
            self.pos,
        );
    }

    fn handle_release(
        &mut self,
        engine: &mut PointerEngine,
        channel: &dyn ControlChannel,
        frame_size: Size,
        direction: Direction,
    ) {
        if !self.held[direction.index()] {
            return;
        }
        self.held[direction.index()] = false;

        if self.held.iter().any(|&h| h) {
            // Another direction is still held: drop back to a single axis.
            let (dx, dy) = direction.offset(self.step);
            self.pos = self.pos.offset(-dx, -dy);
            engine.emit(
                channel,
                frame_size,
                VirtualPointer::Joystick,
                TouchAction::Move,
                self.pos,
            );
            return;
        }

        debug!(started_by = ?self.started_by, "movement stop");
        self.pos = self.rest;
        engine.release(channel, frame_size, VirtualPointer::Joystick, self.pos);
        self.moving = false;
        self.started_by = None;
    }
}
