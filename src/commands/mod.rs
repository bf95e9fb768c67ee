// Command handlers module
pub mod fetch;
pub mod tidy;

// Re-exports for cleaner imports
pub use fetch::execute as fetch;
pub use tidy::execute as tidy;
