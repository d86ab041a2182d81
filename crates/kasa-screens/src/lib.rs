//! Headless screen models for Kasa.
//!
//! Each screen owns its state and exposes the operations the view layer
//! wires to user input. Fallible collaborator calls are caught here,
//! logged, and surfaced as placeholder strings; no error type crosses a
//! screen boundary.

pub mod bridge;
pub mod forecast;
pub mod month;
pub mod today;

pub use forecast::ForecastScreen;
pub use month::{CellModel, MonthScreen};
pub use today::{NotificationRow, TodayScreen};
