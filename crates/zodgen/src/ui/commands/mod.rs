mod generate;
mod list;

pub use generate::{GenerateConfig, generate_code};
pub use list::list_operations;
