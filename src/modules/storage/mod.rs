pub mod minio_client;

pub use minio_client::MinIOClient;
