//! Month-grid calendar and notification reservations.
//!
//! The grid is the 35- or 42-cell date sequence a month view renders,
//! including leading/trailing days from adjacent months. Reservations are
//! in-memory maps keyed by absolute date (and by weekday for templates);
//! they survive month paging and die with the screen.

pub mod grid;
pub mod reservations;

pub use grid::{DayTone, MonthGrid, WEEKDAY_LABELS};
pub use reservations::ReservationBook;
