//! Media catalog service
//!
//! Maintains the global tag set, the tag to media index and the media records,
//! and issues upload authorizations for new media.
//!
//! A catalog mutation is several independent store commands sent as one
//! pipelined batch. The store applies each command atomically but nothing ties
//! them together: when a command fails, the ones before it stay applied and the
//! error names the failing position. No rollback is attempted.

use crate::error::{CatalogError, CatalogResult};
use crate::services::ids::IdGenerator;
use crate::services::upload::UploadAuthorizer;
use mediatag_core::models::{MediaRecord, Tag, UploadAuthorization};
use mediatag_core::Config;
use mediatag_db::keys::{self, TAGS_KEY};
use mediatag_db::{CatalogStore, StoreCommand};
use std::sync::Arc;
use url::Url;

/// Where listed media are served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    bucket: String,
    endpoint: Url,
}

impl CatalogSettings {
    /// `endpoint` must be able to carry a path; its query and fragment are dropped.
    pub fn new(bucket: impl Into<String>, mut endpoint: Url) -> Result<Self, url::ParseError> {
        if endpoint.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        endpoint.set_query(None);
        endpoint.set_fragment(None);

        Ok(Self {
            bucket: bucket.into(),
            endpoint,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, url::ParseError> {
        Self::new(config.s3_bucket(), config.media_endpoint_url().clone())
    }

    /// `{endpoint}/{bucket}/{id}`, keeping any path the endpoint already has
    pub fn media_url(&self, id: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.bucket).push(id);
        }
        url
    }
}

#[derive(Clone)]
pub struct MediaCatalogService {
    store: Arc<dyn CatalogStore>,
    authorizer: UploadAuthorizer,
    ids: Arc<dyn IdGenerator>,
    settings: CatalogSettings,
}

impl MediaCatalogService {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        authorizer: UploadAuthorizer,
        ids: Arc<dyn IdGenerator>,
        settings: CatalogSettings,
    ) -> Self {
        Self {
            store,
            authorizer,
            ids,
            settings,
        }
    }

    /// Add `name` to the global tag set. Creating an existing tag succeeds.
    #[tracing::instrument(skip(self), fields(operation = "create_tag"))]
    pub async fn create_tag(&self, name: &str) -> CatalogResult<()> {
        self.store
            .set_add(TAGS_KEY, name)
            .await
            .map_err(CatalogError::store("creating tag"))?;

        tracing::debug!(tag = %name, "Tag created");
        Ok(())
    }

    /// Every tag ever created, in no particular order
    #[tracing::instrument(skip(self), fields(operation = "list_tags"))]
    pub async fn list_tags(&self) -> CatalogResult<Vec<Tag>> {
        self.store
            .set_members(TAGS_KEY)
            .await
            .map_err(CatalogError::store("getting tags from store"))
    }

    /// Media carrying `tag`. An unknown tag gives an empty list.
    ///
    /// All records are fetched in one batch. Any record that cannot be read or
    /// decoded fails the whole call; partial listings are never returned.
    #[tracing::instrument(skip(self), fields(operation = "list_media"))]
    pub async fn list_media(&self, tag: &str) -> CatalogResult<Vec<MediaRecord>> {
        let ids = self
            .store
            .set_members(&keys::tag_index_key(tag))
            .await
            .map_err(CatalogError::store("getting media keys from store"))?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let commands = ids
            .iter()
            .map(|id| StoreCommand::HashGetAll {
                key: keys::media_key(id),
            })
            .collect();
        let replies = self
            .store
            .execute_batch(commands)
            .await
            .map_err(CatalogError::store("getting media records from store"))?;

        let mut records = Vec::with_capacity(ids.len());
        for (index, (id, reply)) in ids.into_iter().zip(replies).enumerate() {
            let reply = reply.map_err(|source| CatalogError::RecordRead { index, source })?;
            let fields = reply
                .into_fields()
                .map_err(|other| CatalogError::RecordShape {
                    index,
                    found: other.kind(),
                })?;
            let (name, tags) = keys::decode_media_fields(&fields).map_err(|source| {
                CatalogError::TagDecode {
                    record: index,
                    source,
                }
            })?;

            records.push(MediaRecord {
                url: self.settings.media_url(&id),
                id,
                name,
                tags,
            });
        }

        tracing::debug!(tag = %tag, count = records.len(), "Media listed");
        Ok(records)
    }

    /// Register a new media item under `tags` and authorize its upload.
    ///
    /// The authorization is obtained before the catalog is written, so a failed
    /// write still leaves a usable upload URL behind for an uncatalogued id.
    #[tracing::instrument(skip(self, tags), fields(operation = "create_media", tag_count = tags.len()))]
    pub async fn create_media(&self, name: &str, tags: &[Tag]) -> CatalogResult<UploadAuthorization> {
        let id = self.ids.generate()?;
        let authorization = self.authorizer.authorize(&self.settings.bucket, &id).await?;

        let mut commands = Vec::with_capacity(tags.len() * 2 + 1);
        commands.push(StoreCommand::HashSet {
            key: keys::media_key(&id),
            fields: keys::media_fields(name, tags),
        });
        for tag in tags {
            commands.push(StoreCommand::SetAdd {
                key: TAGS_KEY.to_string(),
                member: tag.clone(),
            });
            commands.push(StoreCommand::SetAdd {
                key: keys::tag_index_key(tag),
                member: id.clone(),
            });
        }

        let results = self
            .store
            .execute_batch(commands)
            .await
            .map_err(CatalogError::store("writing media record"))?;

        for (index, result) in results.into_iter().enumerate() {
            if let Err(source) = result {
                tracing::error!(
                    media_id = %id,
                    command_index = index,
                    error = %source,
                    "Media write partially applied"
                );
                return Err(CatalogError::Command { index, source });
            }
        }

        tracing::info!(media_id = %id, "Media created");
        Ok(authorization)
    }
}
