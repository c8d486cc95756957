pub mod fee;
pub mod sampler;
pub mod swap;

#[cfg(test)]
mod proptest_properties;
