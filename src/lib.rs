pub mod config;
pub mod content;
pub mod error;
pub mod logger;
pub mod site;
pub mod util;
mod test_data;
