pub mod catalog;
pub mod ids;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing {
    use crate::services::ids::{GenerationError, IdGenerator};
    use async_trait::async_trait;
    use mediatag_storage::{PresignError, PresignResult, PresignedRequest, Presigner};
    use std::collections::{BTreeMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;
    use url::Url;

    /// Signs nothing; returns a predictable URL and records every call.
    #[derive(Debug, Default)]
    pub struct StaticPresigner {
        pub calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Presigner for StaticPresigner {
        async fn presign_put(&self, bucket: &str, key: &str) -> PresignResult<PresignedRequest> {
            self.calls
                .lock()
                .unwrap()
                .push((bucket.to_string(), key.to_string()));

            let url = Url::parse(&format!(
                "http://localstack:4566/{}/{}?X-Amz-Signature=test",
                bucket, key
            ))
            .map_err(|e| PresignError::InvalidKey(e.to_string()))?;

            Ok(PresignedRequest {
                method: "PUT".to_string(),
                url,
                signed_headers: BTreeMap::from([(
                    "Host".to_string(),
                    vec!["localstack:4566".to_string()],
                )]),
                expires_in: Duration::from_secs(900),
            })
        }
    }

    #[derive(Debug, Default)]
    pub struct FailingPresigner;

    #[async_trait]
    impl Presigner for FailingPresigner {
        async fn presign_put(&self, _bucket: &str, _key: &str) -> PresignResult<PresignedRequest> {
            Err(PresignError::SigningFailed("no credentials".to_string()))
        }
    }

    /// Hands out a fixed list of identifiers in order, then fails.
    #[derive(Debug, Default)]
    pub struct FixedIdGenerator {
        ids: Mutex<VecDeque<String>>,
    }

    impl FixedIdGenerator {
        pub fn new<I, S>(ids: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                ids: Mutex::new(ids.into_iter().map(Into::into).collect()),
            }
        }
    }

    impl IdGenerator for FixedIdGenerator {
        fn generate(&self) -> Result<String, GenerationError> {
            let mut ids = self
                .ids
                .lock()
                .map_err(|_| GenerationError::Unavailable("lock poisoned".to_string()))?;
            ids.pop_front().ok_or(GenerationError::Exhausted)
        }
    }

    #[test]
    fn test_fixed_generator_runs_out() {
        let generator = FixedIdGenerator::new(["a", "b"]);
        assert_eq!(generator.generate().unwrap(), "a");
        assert_eq!(generator.generate().unwrap(), "b");
        assert_eq!(generator.generate(), Err(GenerationError::Exhausted));
    }
}
