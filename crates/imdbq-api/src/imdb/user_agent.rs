//! Browser User-Agent pool.

use rand::Rng;
use rand::seq::SliceRandom;

/// Browser identification strings sent instead of a library agent.
///
/// The endpoints reject obvious non-browser clients.
pub const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Picks one entry of [`USER_AGENTS`] using the given random source.
pub fn pick_user_agent<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    USER_AGENTS.choose(rng).copied().unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_pick_returns_pool_member() {
        // Arrange
        let mut rng = rand::thread_rng();

        // Act
        let ua = pick_user_agent(&mut rng);

        // Assert
        assert!(USER_AGENTS.contains(&ua));
    }

    #[test]
    fn test_pick_is_deterministic_for_seed() {
        // Arrange
        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);

        // Act & Assert
        assert_eq!(pick_user_agent(&mut first), pick_user_agent(&mut second));
    }
}
