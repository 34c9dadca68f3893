pub mod layouts;
pub mod pages;

pub use layouts::{base, PageConfig};
pub use pages::welcome_page;
