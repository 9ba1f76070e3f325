pub mod app;
pub mod input;
pub mod render;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::run;
