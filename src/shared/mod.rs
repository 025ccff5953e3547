pub mod coerce;
pub mod constants;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;
