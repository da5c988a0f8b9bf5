pub mod cache;
pub mod coingecko;
pub mod repo;

pub use cache::{CachedCryptos, CryptoCache};
pub use coingecko::CoinGeckoRepo;
pub use repo::{CryptoRepo, RepoError};
