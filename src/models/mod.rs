pub mod coordinates;
pub mod distance;
pub mod facility;
pub mod search;
pub mod user;

pub use coordinates::Coordinates;
pub use distance::DistanceKm;
pub use facility::{FacilityCategory, FacilityRecord, SearchScope};
pub use search::{NearbySearchRequest, SearchResult};
pub use user::{LoginRequest, PublicUser, RegisterRequest, UserRecord};
