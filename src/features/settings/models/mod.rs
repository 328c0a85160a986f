pub mod store_settings;

pub use store_settings::StoreSettings;
