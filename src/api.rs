// API client module: a small blocking HTTP client for the listing
// backend. `ListingApi` is the seam the form component talks to, so the
// component can be driven without a live server.

use crate::config::Config;
use crate::draft::{ImageFile, ListingDraft, IMAGE_MIME};
use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// The three parts posted to `/items`, taken from a draft at submit time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingPayload {
    pub name: String,
    pub category: String,
    pub image: Option<ImageFile>,
}

impl From<&ListingDraft> for ListingPayload {
    fn from(draft: &ListingDraft) -> Self {
        ListingPayload {
            name: draft.name.clone(),
            category: draft.category.clone(),
            image: draft.image.clone(),
        }
    }
}

/// Network side of the listing form.
pub trait ListingApi {
    /// POST the payload to `/items` and return the parsed JSON body.
    fn create_item(&self, payload: &ListingPayload) -> Result<serde_json::Value>;
}

impl<T: ListingApi + ?Sized> ListingApi for &T {
    fn create_item(&self, payload: &ListingPayload) -> Result<serde_json::Value> {
        (**self).create_item(payload)
    }
}

/// One listed item as returned by `GET /items`. Older backends only send
/// name and category, so the rest is optional.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub image_filename: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Items {
    pub items: Vec<Item>,
}

/// Holds a reqwest blocking client and the backend base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn items_url(&self) -> String {
        format!("{}/items", self.base_url)
    }

    /// Where the backend serves a stored item image.
    pub fn image_url(&self, image_filename: &str) -> String {
        format!("{}/image/{}", self.base_url, image_filename)
    }

    /// Fetch every listed item.
    pub fn fetch_items(&self) -> Result<Items> {
        let url = self.items_url();
        let res = self
            .client
            .get(&url)
            .send()
            .context("Failed to send get items request")?;
        Self::read_json(res, "Fetching items")
    }

    /// Fetch one item by id. The backend answers 404 for unknown ids.
    pub fn fetch_item(&self, id: i64) -> Result<Option<Item>> {
        let url = format!("{}/{}", self.items_url(), id);
        let res = self
            .client
            .get(&url)
            .send()
            .context("Failed to send get item request")?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::read_json(res, "Fetching item").map(Some)
    }

    /// Items whose name contains `keyword`.
    pub fn search_items(&self, keyword: &str) -> Result<Items> {
        let url = format!("{}/search", self.base_url);
        let res = self
            .client
            .get(&url)
            .query(&[("keyword", keyword)])
            .send()
            .context("Failed to send search request")?;
        Self::read_json(res, "Searching items")
    }

    fn read_json<T: DeserializeOwned>(res: Response, what: &str) -> Result<T> {
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_default();
            anyhow::bail!("{} failed: {} - {}", what, status, txt);
        }
        res.json()
            .with_context(|| format!("Parsing {} response json", what.to_lowercase()))
    }

    fn multipart_form(payload: &ListingPayload) -> Result<multipart::Form> {
        let form = multipart::Form::new()
            .text("name", payload.name.clone())
            .text("category", payload.category.clone());

        // An unset file input still submits the field, just empty.
        let Some(image) = &payload.image else {
            return Ok(form.text("image", ""));
        };
        let part = multipart::Part::file(&image.path)
            .with_context(|| format!("Failed to open image file {}", image.path.display()))?
            .file_name(image.file_name.clone())
            .mime_str(IMAGE_MIME)
            .context("Invalid image mime type")?;
        Ok(form.part("image", part))
    }
}

impl ListingApi for ApiClient {
    /// Any status is accepted as long as the body is JSON; a non-2xx
    /// status is only logged.
    fn create_item(&self, payload: &ListingPayload) -> Result<serde_json::Value> {
        let url = self.items_url();
        let form = Self::multipart_form(payload)?;
        let res = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .context("Failed to send listing request")?;
        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%status, url = %url, "listing request returned a non-success status");
        }
        res.json().context("Parsing listing response json")
    }
}
