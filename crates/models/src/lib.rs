pub mod errors;
pub mod db;
pub mod registration;

#[cfg(test)]
mod tests;
