pub mod booking;
pub mod contact;

#[cfg(test)]
pub(crate) mod testing;
