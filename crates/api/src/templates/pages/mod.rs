pub mod welcome;

pub use welcome::welcome_page;
