pub mod host_url;
pub mod upload;
