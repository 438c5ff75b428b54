mod recommend;
mod server;

pub use recommend::*;
pub use server::*;
