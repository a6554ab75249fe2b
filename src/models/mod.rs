pub mod accumulator;
pub mod result;
pub mod station;
pub mod temperature;

pub use accumulator::Accumulator;
pub use result::ResultEntry;
pub use station::StationKey;
pub use temperature::Temperature;
