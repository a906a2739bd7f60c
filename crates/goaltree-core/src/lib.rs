//! Core domain types for goaltree: the goal tree, dotted-path specifier
//! resolution, document persistence, and text rendering.

pub mod config;
pub mod goal;
pub mod specifier;
pub mod store;
pub mod views;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::version;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
