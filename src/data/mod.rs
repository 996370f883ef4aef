//! Data module - CSV loading, cleaning and transformation

pub mod cleaner;
pub mod loader;
pub mod schema;
pub mod transformer;

pub use cleaner::{parse_date, CleaningSummary, DataCleaner, ImputeOutcome};
pub use loader::{load_weather_data, DataLoader, LoaderError};
pub use schema::SchemaError;
pub use transformer::{celsius_to_fahrenheit, DataTransformer};
