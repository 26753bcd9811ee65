pub mod app;
pub mod client;
pub mod forms;
pub mod loaders;

pub use crate::domain::model::{
    AvailableTimes, BookingRequest, ContactRequest, MessageResponse, Service,
};
pub use crate::domain::ports::{ConfigProvider, SalonApi, SelectionStore};
pub use crate::utils::error::Result;
