//! End-to-end tests that exercise the server over a real HTTP socket

#[cfg(test)]
mod e2e;
