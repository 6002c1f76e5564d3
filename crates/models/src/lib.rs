pub mod db;
pub mod company;
pub mod invoice;

#[cfg(test)]
mod tests;
