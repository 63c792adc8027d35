mod advertisements;
mod health;
mod metrics;
mod router;

pub use advertisements::AdvertisementResponse;
pub use router::{router, AppState};
