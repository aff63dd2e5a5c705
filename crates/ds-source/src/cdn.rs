use ds_schemas::{FeaturedHadith, SectionEntry, SectionMetadata, SectionPayload, SectionTarget};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{order_sections, HadithSource, SourceError};

pub const DEFAULT_BASE_URL: &str = ds_schemas::DEFAULT_API_BASE;

/// jsDelivr-hosted hadith-api editions.
#[derive(Debug, Clone)]
pub struct CdnHadithSource {
    http: reqwest::Client,
    base_url: String,
}

impl Default for CdnHadithSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CdnHadithSource {
    pub fn new() -> Self {
        Self::new_with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn new_with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn edition_url(&self, lang: &str, book: &str, tail: &str) -> String {
        format!(
            "{}/editions/{}-{}{}",
            self.base_url.trim_end_matches('/'),
            lang,
            book,
            tail
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, SourceError> {
        debug!(source = self.source_name(), url = %url, "fetch");
        let resp = self.http.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "hadith request failed");
            SourceError::Transport(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "hadith request non-success");
            return Err(SourceError::Status {
                code: status.as_u16(),
                url,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(url = %url, error = %e, "hadith response json decode failed");
            SourceError::Decode(e.to_string())
        })
    }
}

/// Book-level document; only the metadata is kept.
#[derive(Debug, Deserialize)]
struct BookIndex {
    #[serde(default)]
    metadata: SectionMetadata,
}

#[async_trait::async_trait]
impl HadithSource for CdnHadithSource {
    fn source_name(&self) -> &'static str {
        "jsdelivr"
    }

    async fn fetch_section(&self, target: &SectionTarget) -> Result<SectionPayload, SourceError> {
        let url = self.edition_url(
            &target.lang,
            &target.book,
            &format!("/sections/{}.json", target.section),
        );
        self.get_json(url).await
    }

    async fn fetch_book_sections(
        &self,
        book: &str,
        lang: &str,
    ) -> Result<Vec<SectionEntry>, SourceError> {
        let url = self.edition_url(lang, book, ".json");
        let index: BookIndex = self.get_json(url).await?;
        Ok(order_sections(&index.metadata.sections))
    }

    async fn fetch_featured(
        &self,
        book: &str,
        lang: &str,
        number: u32,
    ) -> Result<FeaturedHadith, SourceError> {
        let url = self.edition_url(lang, book, &format!("/{number}.min.json"));
        let payload: SectionPayload = self.get_json(url).await?;

        let section_label = match payload.metadata.current_section() {
            Some((id, title)) => format!("Section {id}, {title}"),
            None => String::new(),
        };
        let hadith = payload
            .hadiths
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::Empty(format!("{lang}-{book}/{number}")))?;

        Ok(FeaturedHadith {
            section_label,
            hadith,
        })
    }
}
