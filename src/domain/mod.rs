pub mod feed;
pub mod settings;
