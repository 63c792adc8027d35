mod advertisement_record;
mod advertisement_store;
mod in_memory;

pub use advertisement_record::{AdId, Advertisement, NewAdvertisement};
pub use advertisement_store::{AdvertisementStore, CasOutcome, StoreError};
pub use in_memory::InMemoryAdvertisementStore;
