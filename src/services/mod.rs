pub mod appointments;
pub mod chat;
pub mod directions;
pub mod facility_search;
pub mod geocoder;
pub mod overpass;
