//! Interaction impulse ingress.
//!
//! External input (a pointer drag, a scripted emitter) reaches the
//! simulation as [`Impulse`] values: a cell coordinate plus additive
//! density and velocity deltas. Impulses are submitted through a
//! cloneable [`ImpulseSender`] backed by a bounded channel and merged
//! into the source buffers at the start of the next tick, so a tick in
//! progress never observes a half-applied impulse.

use std::error::Error;
use std::fmt;

use crossbeam_channel::{Sender, TrySendError};

/// An additive source contribution at one grid cell.
///
/// The deltas land in the previous/source buffers, so they enter the
/// simulation through `add_source` scaled by the tick's `dt` like any
/// other source term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impulse {
    /// Cell x coordinate.
    pub x: u32,
    /// Cell y coordinate.
    pub y: u32,
    /// Density source delta.
    pub density: f32,
    /// Velocity-x source delta.
    pub velocity_x: f32,
    /// Velocity-y source delta.
    pub velocity_y: f32,
}

impl Impulse {
    /// A pure density impulse.
    pub fn density_at(x: u32, y: u32, amount: f32) -> Self {
        Self {
            x,
            y,
            density: amount,
            velocity_x: 0.0,
            velocity_y: 0.0,
        }
    }

    /// A pure velocity impulse.
    pub fn force_at(x: u32, y: u32, velocity_x: f32, velocity_y: f32) -> Self {
        Self {
            x,
            y,
            density: 0.0,
            velocity_x,
            velocity_y,
        }
    }
}

/// Errors from impulse submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImpulseError {
    /// The impulse coordinate lies outside the grid.
    OutOfBounds {
        /// Submitted x coordinate.
        x: u32,
        /// Submitted y coordinate.
        y: u32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// The bounded queue is at capacity.
    QueueFull,
    /// The simulator has been dropped.
    Disconnected,
}

impl fmt::Display for ImpulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "impulse at ({x}, {y}) outside {width}x{height} grid")
            }
            Self::QueueFull => write!(f, "impulse queue full"),
            Self::Disconnected => write!(f, "simulator dropped"),
        }
    }
}

impl Error for ImpulseError {}

/// Cloneable submission handle for interaction impulses.
///
/// Obtained from [`Simulator::impulse_sender`](crate::Simulator::impulse_sender).
/// Safe to hand to an input thread; submission never blocks.
#[derive(Clone, Debug)]
pub struct ImpulseSender {
    tx: Sender<Impulse>,
    width: u32,
    height: u32,
}

impl ImpulseSender {
    pub(crate) fn new(tx: Sender<Impulse>, width: u32, height: u32) -> Self {
        Self { tx, width, height }
    }

    /// Submit an impulse for the next tick.
    ///
    /// Coordinates are validated here, at the boundary, so the drain
    /// path inside the tick never has to reject anything.
    pub fn send(&self, impulse: Impulse) -> Result<(), ImpulseError> {
        if impulse.x >= self.width || impulse.y >= self.height {
            return Err(ImpulseError::OutOfBounds {
                x: impulse.x,
                y: impulse.y,
                width: self.width,
                height: self.height,
            });
        }
        self.tx.try_send(impulse).map_err(|e| match e {
            TrySendError::Full(_) => ImpulseError::QueueFull,
            TrySendError::Disconnected(_) => ImpulseError::Disconnected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn out_of_bounds_rejected_before_enqueue() {
        let (tx, rx) = bounded(4);
        let sender = ImpulseSender::new(tx, 8, 8);
        let err = sender.send(Impulse::density_at(8, 0, 1.0)).unwrap_err();
        assert!(matches!(err, ImpulseError::OutOfBounds { x: 8, .. }));
        assert!(rx.try_recv().is_err(), "rejected impulse was enqueued");
    }

    #[test]
    fn full_queue_reports_queue_full() {
        let (tx, _rx) = bounded(1);
        let sender = ImpulseSender::new(tx, 8, 8);
        sender.send(Impulse::density_at(1, 1, 1.0)).unwrap();
        assert_eq!(
            sender.send(Impulse::density_at(2, 2, 1.0)),
            Err(ImpulseError::QueueFull)
        );
    }

    #[test]
    fn dropped_receiver_reports_disconnected() {
        let (tx, rx) = bounded(4);
        drop(rx);
        let sender = ImpulseSender::new(tx, 8, 8);
        assert_eq!(
            sender.send(Impulse::density_at(1, 1, 1.0)),
            Err(ImpulseError::Disconnected)
        );
    }

    #[test]
    fn accepted_impulse_round_trips() {
        let (tx, rx) = bounded(4);
        let sender = ImpulseSender::new(tx, 8, 8);
        let imp = Impulse::force_at(3, 4, 0.5, -0.5);
        sender.send(imp).unwrap();
        assert_eq!(rx.try_recv().unwrap(), imp);
    }
}
