//! Data models shared between the server and its clients

pub mod dining_table;
pub mod reservation;
pub mod serde_helpers;

pub use dining_table::{DiningTable, DiningTableCreate, TableCreated, TableList};
pub use reservation::{Reservation, ReservationCreated, ReservationList, ReservationRequest};
