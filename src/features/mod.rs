pub mod auth;
pub mod banners;
pub mod categories;
pub mod checkout;
pub mod clients;
pub mod featured;
pub mod files;
pub mod products;
pub mod profiles;
pub mod ready_pcs;
pub mod settings;
