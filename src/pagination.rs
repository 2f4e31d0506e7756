//! Offset/limit paging shared by the resolver and the listing service.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::api::Page;
use crate::error::{DeepboxError, Result};

/// Position of a fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageInfo {
    /// 1-based page counter
    pub number: usize,
    /// Total reported by the API
    pub total: u64,
}

/// Walks `offset += chunk_size` until `offset >= size` or an empty page.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pager<'a> {
    chunk_size: u32,
    cancel: &'a CancellationToken,
}

impl<'a> Pager<'a> {
    pub fn new(chunk_size: u32, cancel: &'a CancellationToken) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            cancel,
        }
    }

    /// Hand every page to `on_page`.
    pub async fn for_each<T, F, Fut>(
        &self,
        mut fetch: F,
        mut on_page: impl FnMut(Vec<T>, PageInfo) -> Result<()>,
    ) -> Result<()>
    where
        F: FnMut(u64, u32) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let mut offset = 0u64;
        let mut number = 0usize;
        loop {
            if self.cancel.is_cancelled() {
                return Err(DeepboxError::Cancelled);
            }
            let page = fetch(offset, self.chunk_size).await?;
            number += 1;
            let count = page.items.len();
            let total = page.size;
            on_page(page.items, PageInfo { number, total })?;
            offset += u64::from(self.chunk_size);
            if count == 0 || offset >= total {
                return Ok(());
            }
        }
    }

    /// First item satisfying `matches`, stopping as soon as it is seen.
    pub async fn find<T, F, Fut>(
        &self,
        mut fetch: F,
        mut matches: impl FnMut(&T) -> bool,
    ) -> Result<Option<T>>
    where
        F: FnMut(u64, u32) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let mut offset = 0u64;
        loop {
            if self.cancel.is_cancelled() {
                return Err(DeepboxError::Cancelled);
            }
            let page = fetch(offset, self.chunk_size).await?;
            let count = page.items.len();
            let total = page.size;
            if let Some(found) = page.items.into_iter().find(|item| matches(item)) {
                return Ok(Some(found));
            }
            offset += u64::from(self.chunk_size);
            if count == 0 || offset >= total {
                return Ok(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn numbers(total: u64) -> impl Fn(u64, u32) -> std::future::Ready<Result<Page<u64>>> {
        move |offset, limit| {
            let end = (offset + u64::from(limit)).min(total);
            std::future::ready(Ok(Page::new((offset..end).collect(), total)))
        }
    }

    #[tokio::test]
    async fn test_for_each_inexact_boundary() {
        let cancel = CancellationToken::new();
        let pager = Pager::new(5, &cancel);
        let mut seen = Vec::new();
        let mut pages = Vec::new();
        pager
            .for_each(numbers(12), |items, info| {
                seen.extend(items);
                pages.push(info);
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(seen, (0..12).collect::<Vec<_>>());
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2], PageInfo { number: 3, total: 12 });
    }

    #[tokio::test]
    async fn test_for_each_exact_boundary() {
        let cancel = CancellationToken::new();
        let pager = Pager::new(5, &cancel);
        let calls = RefCell::new(0);
        let fetch = numbers(10);
        let mut count = 0;
        pager
            .for_each(
                |offset, limit| {
                    *calls.borrow_mut() += 1;
                    fetch(offset, limit)
                },
                |items, _| {
                    count += items.len();
                    Ok(())
                },
            )
            .await
            .unwrap();
        assert_eq!(count, 10);
        assert_eq!(*calls.borrow(), 2);
    }

    #[tokio::test]
    async fn test_empty_listing_fetches_once() {
        let cancel = CancellationToken::new();
        let pager = Pager::new(5, &cancel);
        let mut pages = 0;
        pager
            .for_each(numbers(0), |_, _| {
                pages += 1;
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(pages, 1);
    }

    #[tokio::test]
    async fn test_find_stops_early() {
        let cancel = CancellationToken::new();
        let pager = Pager::new(5, &cancel);
        let calls = RefCell::new(0);
        let fetch = numbers(100);
        let found = pager
            .find(
                |offset, limit| {
                    *calls.borrow_mut() += 1;
                    fetch(offset, limit)
                },
                |n| *n == 7,
            )
            .await
            .unwrap();
        assert_eq!(found, Some(7));
        assert_eq!(*calls.borrow(), 2);

        let missing = pager.find(numbers(12), |n| *n == 99).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_cancelled_before_fetch() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let pager = Pager::new(5, &cancel);
        let result = pager.find(numbers(12), |_| true).await;
        assert!(matches!(result, Err(DeepboxError::Cancelled)));
    }
}
