mod client;

pub use client::EdgeClient;

#[cfg(test)]
pub(crate) use client::tests::client_for;
