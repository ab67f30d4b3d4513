pub mod kiwi;
pub mod simulated;
