pub mod featured_product;

pub use featured_product::FeaturedProduct;
