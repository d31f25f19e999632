pub mod handlers;
pub mod pipeline;
pub mod services;
pub mod usecases;

#[cfg(test)]
pub mod testing;
