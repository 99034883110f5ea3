// Shared helpers with no engine dependencies

pub mod math;
