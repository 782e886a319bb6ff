pub mod generate;
pub mod rank;
pub mod read;
pub mod spec;
