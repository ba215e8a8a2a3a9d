//! Frame bookkeeping for time-stepped animations

mod frame;

pub use frame::Frame;
