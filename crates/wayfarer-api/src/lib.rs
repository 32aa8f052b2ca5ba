// wayfarer-api: Async Rust clients for the public travel data providers.

pub mod error;
pub mod nager;
pub mod open_meteo;
pub mod restcountries;
pub mod sunrise_sunset;
pub mod ticketmaster;
pub mod transport;
pub mod types;

pub use error::Error;
pub use nager::NagerClient;
pub use open_meteo::OpenMeteoClient;
pub use restcountries::RestCountriesClient;
pub use sunrise_sunset::SunriseSunsetClient;
pub use ticketmaster::TicketmasterClient;
pub use transport::TransportConfig;
