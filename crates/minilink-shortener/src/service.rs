use crate::error::CreateError;
use minilink_core::cache::CACHE_TTL;
use minilink_core::{MappingStore, ShortCode, StoreError, UrlCache, UrlMapping};
use minilink_generator::CodeGenerator;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Upper bound on candidate generation per acquisition round.
const MAX_GENERATION_ATTEMPTS: usize = 5;

/// How many times a lost creation race triggers a fresh acquisition
/// round before the request fails.
const RACE_RETRIES: usize = 1;

/// Deadline applied to every individual store/cache call.
const CALL_TIMEOUT: Duration = Duration::from_secs(3);

/// Result of a successful mapping creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedMapping {
    /// The short code that was persisted.
    pub short_code: ShortCode,
    /// The public shortened URL, `https://{domain}/{short_code}`.
    pub shortened_url: String,
}

/// Service that creates URL mappings.
///
/// Uniqueness is enforced in two layers: an existence check filters
/// obviously taken candidates, and the store's conditional write
/// resolves the remaining check-then-act race. The existence check and
/// the write are deliberately not atomic with each other; the write's
/// `AlreadyExists` is the authoritative collision signal and triggers
/// one fresh acquisition round.
#[derive(Debug, Clone)]
pub struct CreationService<S, C, G> {
    store: Arc<S>,
    cache: Arc<C>,
    generator: Arc<G>,
}

impl<S, C, G> CreationService<S, C, G>
where
    S: MappingStore,
    C: UrlCache,
    G: CodeGenerator,
{
    pub fn new(store: Arc<S>, cache: Arc<C>, generator: G) -> Self {
        Self {
            store,
            cache,
            generator: Arc::new(generator),
        }
    }

    /// Creates a new mapping from `short code → url` served under `domain`.
    pub async fn create(&self, domain: &str, url: &str) -> Result<CreatedMapping, CreateError> {
        Self::validate(domain, url)?;

        for round in 0..=RACE_RETRIES {
            let code = self.acquire_candidate().await?;
            let mapping = UrlMapping::new(code.clone(), url, domain);

            match timeout(CALL_TIMEOUT, self.store.put_if_absent(&mapping)).await {
                Ok(Ok(())) => {
                    debug!(code = %code, domain = %domain, "created mapping");
                    self.seed_cache(&code, url).await;
                    return Ok(CreatedMapping {
                        shortened_url: code.to_url(domain),
                        short_code: code,
                    });
                }
                Ok(Err(StoreError::AlreadyExists(_))) => {
                    // A concurrent creator won the conditional write
                    // after our existence check saw the code as free.
                    warn!(code = %code, round, "lost creation race, regenerating");
                }
                Ok(Err(e)) => return Err(CreateError::StoreUnavailable(e.to_string())),
                Err(_) => {
                    return Err(CreateError::StoreUnavailable(
                        "store write timed out".to_string(),
                    ))
                }
            }
        }

        Err(CreateError::GenerationExhausted)
    }

    /// Runs the uniqueness acquisition loop: generate a candidate and
    /// accept the first one the store does not know about.
    async fn acquire_candidate(&self) -> Result<ShortCode, CreateError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = self.generator.generate();

            let existing = timeout(CALL_TIMEOUT, self.store.get(&candidate))
                .await
                .map_err(|_| {
                    CreateError::StoreUnavailable("store lookup timed out".to_string())
                })?
                .map_err(|e| CreateError::StoreUnavailable(e.to_string()))?;

            if existing.is_none() {
                return Ok(candidate);
            }
        }

        Err(CreateError::GenerationExhausted)
    }

    /// Best-effort cache seed; failures degrade to a future store read.
    async fn seed_cache(&self, code: &ShortCode, url: &str) {
        match timeout(CALL_TIMEOUT, self.cache.set_url(code, url, CACHE_TTL)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(code = %code, error = %e, "failed to seed cache after creation"),
            Err(_) => warn!(code = %code, "cache seed timed out"),
        }
    }

    fn validate(domain: &str, url: &str) -> Result<(), CreateError> {
        if domain.is_empty() {
            return Err(CreateError::InvalidInput(
                "domain must not be empty".to_string(),
            ));
        }

        if url.is_empty() {
            return Err(CreateError::InvalidInput(
                "url must not be empty".to_string(),
            ));
        }

        // Url::parse rejects anything that is not an absolute URL.
        url::Url::parse(url)
            .map_err(|e| CreateError::InvalidInput(format!("invalid URL '{url}': {e}")))?;

        Ok(())
    }
}
