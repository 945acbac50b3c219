pub mod slug;
pub mod toml_value;
