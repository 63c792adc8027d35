mod advertisements;
pub mod validation;
mod view_counter;

pub use advertisements::AdvertisementGateway;
pub use view_counter::ViewCounter;
