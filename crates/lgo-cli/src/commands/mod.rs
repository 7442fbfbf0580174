pub mod dispatch;
pub mod export;
pub mod import;
pub mod init;
pub mod observation;
pub mod observations;
pub mod schema;
pub mod shared;
pub mod species;
pub mod status;
