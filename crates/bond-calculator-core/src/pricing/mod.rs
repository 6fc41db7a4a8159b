pub mod fixed;
pub mod floating;
