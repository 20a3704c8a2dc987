//! Thread-rng backed randomness adapter

use rand::Rng;

use crate::application::ports::outbound::RandomSourcePort;

/// Uniform draws from the thread-local generator
pub struct ThreadRngRandomSource;

impl RandomSourcePort for ThreadRngRandomSource {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen()
    }
}
