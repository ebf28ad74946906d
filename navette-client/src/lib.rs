pub mod client;
pub mod session;

#[cfg(test)]
mod test_server;
