pub mod calendar;
pub mod normalizer;
pub mod window;

pub use calendar::{generate_date_range, CalendarDay};
pub use normalizer::{
    apply_reservation_change, set_duration, set_reservation_date, Notice, NoticeKind,
    ReservationChange, ReservationOutcome,
};
pub use window::{compute_return_date, ReservationWindow};
