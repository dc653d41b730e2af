// This file is part of the terraform-provider-azurerm project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::marker::PhantomData;

use futures::{stream, Stream, TryStreamExt};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::trace;
use url::Url;

use super::{ArmClient, ClientError, OperationOptions, Request};

/// One page of an ARM list operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(default)]
    pub next_link: Option<String>,
}

/// Iterator over the pages of a list operation, following `nextLink`.
pub struct Pager<'c, T> {
    client: &'c ArmClient,
    next: Option<Url>,
    headers: HeaderMap,
    pages: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<'c, T: DeserializeOwned> Pager<'c, T> {
    pub fn new(client: &'c ArmClient, first: Url) -> Self {
        Self {
            client,
            next: Some(first),
            headers: HeaderMap::new(),
            pages: 0,
            _marker: PhantomData,
        }
    }

    /// Pager starting at `path` with the given `api-version` and options.
    pub fn for_path(
        client: &'c ArmClient,
        path: &str,
        api_version: &str,
        options: &impl OperationOptions,
    ) -> Result<Self, ClientError> {
        let request: Request<'c> = client
            .new_request(Method::GET, path, api_version)
            .with_options(options)?;
        let mut pager = Self::new(client, request.url);
        pager.headers = request.headers;
        Ok(pager)
    }

    /// Fetch the next page, `None` once every page was read.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, ClientError> {
        let Some(url) = self.next.take() else {
            return Ok(None);
        };

        let response = self
            .client
            .new_request_from_url(Method::GET, url)
            .headers(self.headers.clone())
            .expect(&[StatusCode::OK])
            .execute()
            .await?;
        let page: Page<T> = response.json()?;
        self.pages += 1;
        trace!(page = self.pages, items = page.value.len(), "read page");

        self.next = match page.next_link.filter(|link| !link.is_empty()) {
            Some(link) => Some(self.client.resolve(&link)?),
            None => None,
        };
        Ok(Some(page.value))
    }

    /// Read every page.
    pub async fn collect_all(self) -> Result<Vec<T>, ClientError> {
        self.collect_matching(|_| true).await
    }

    /// Read every page, keeping the items accepted by `predicate`.
    pub async fn collect_matching(
        mut self,
        predicate: impl Fn(&T) -> bool,
    ) -> Result<Vec<T>, ClientError> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page.into_iter().filter(|item| predicate(item)));
        }
        Ok(items)
    }

    /// Stream of items across every page.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, ClientError>> + 'c
    where
        T: 'c,
    {
        stream::try_unfold(self, |mut pager| async move {
            Ok::<_, ClientError>(pager.next_page().await?.map(|items| {
                (
                    stream::iter(items.into_iter().map(Ok::<T, ClientError>)),
                    pager,
                )
            }))
        })
        .try_flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_tolerates_missing_fields() {
        let page: Page<u32> = serde_json::from_str("{}").unwrap();
        assert!(page.value.is_empty());
        assert_eq!(page.next_link, None);

        let page: Page<u32> =
            serde_json::from_str(r#"{"value": [1, 2], "nextLink": "https://x/y?page=2"}"#).unwrap();
        assert_eq!(page.value, vec![1, 2]);
        assert_eq!(page.next_link.as_deref(), Some("https://x/y?page=2"));
    }
}
