use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Error;
use crate::limits::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::model::{Page, PageCursor};

use super::PageSource;

/// In-memory page source over a fixed list.
///
/// Tokens are compact JSON `PageCursor`s. Each page is sliced on the blocking
/// pool and awaited, so a page is always produced off the caller's task.
pub struct VecPageSource<T> {
    items: Option<Arc<Vec<T>>>,
    default_page_size: u32,
}

impl<T> VecPageSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Some(Arc::new(items)),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Page size used when the caller sends an empty token.
    pub fn with_page_size(items: Vec<T>, page_size: u32) -> Result<Self, Error> {
        if page_size == 0 {
            return Err(Error::InvalidArgument("page size must be positive".into()));
        }
        Ok(Self {
            items: Some(Arc::new(items)),
            default_page_size: page_size.min(MAX_PAGE_SIZE),
        })
    }

    pub fn is_released(&self) -> bool {
        self.items.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, |items| items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a token. Empty means page 1 at `default_page_size`.
pub fn decode_token(token: &str, default_page_size: u32) -> Result<PageCursor, Error> {
    if token.trim().is_empty() {
        return Ok(PageCursor::new(1, default_page_size));
    }
    let cursor: PageCursor = serde_json::from_str(token)
        .map_err(|e| Error::SourceFailure(format!("malformed page token: {e}")))?;
    if cursor.current_page == 0 {
        return Err(Error::InvalidArgument("page numbers start at 1".into()));
    }
    if cursor.page_size == 0 {
        return Err(Error::InvalidArgument("page size must be positive".into()));
    }
    Ok(PageCursor::new(cursor.current_page, cursor.page_size.min(MAX_PAGE_SIZE)))
}

pub fn encode_token(cursor: &PageCursor) -> Result<String, Error> {
    serde_json::to_string(cursor)
        .map_err(|e| Error::SourceFailure(format!("failed to encode page token: {e}")))
}

#[async_trait]
impl<T> PageSource<T> for VecPageSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get_page(&mut self, token: &str) -> Result<Option<Page<T>>, Error> {
        let items = self
            .items
            .clone()
            .ok_or_else(|| Error::SourceFailure("page source already released".into()))?;
        let cursor = decode_token(token, self.default_page_size)?;

        let page_items = tokio::task::spawn_blocking(move || {
            items
                .iter()
                .skip(cursor.offset())
                .take(cursor.page_size as usize)
                .cloned()
                .collect::<Vec<T>>()
        })
        .await
        .map_err(|e| Error::SourceFailure(format!("page task failed: {e}")))?;

        // A short page is the last one.
        let next_token = if page_items.len() < cursor.page_size as usize {
            String::new()
        } else {
            encode_token(&cursor.next())?
        };
        Ok(Some(Page::new(page_items, next_token)))
    }

    fn release(&mut self) {
        self.items = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_empty_is_first_page() {
        assert_eq!(decode_token("", 7).unwrap(), PageCursor::new(1, 7));
        assert_eq!(decode_token("  ", 7).unwrap(), PageCursor::new(1, 7));
    }

    #[test]
    fn decode_roundtrips_encode() {
        let cursor = PageCursor::new(4, 25);
        let token = encode_token(&cursor).unwrap();
        assert_eq!(decode_token(&token, 50).unwrap(), cursor);
    }

    #[test]
    fn decode_malformed_is_source_failure() {
        assert!(matches!(
            decode_token("page=2", 50),
            Err(Error::SourceFailure(_))
        ));
    }

    #[test]
    fn decode_rejects_zero_page_or_size() {
        assert!(matches!(
            decode_token(r#"{"current_page":0,"page_size":5}"#, 50),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            decode_token(r#"{"current_page":1,"page_size":0}"#, 50),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn decode_clamps_page_size() {
        let token = encode_token(&PageCursor::new(1, u32::MAX)).unwrap();
        assert_eq!(decode_token(&token, 50).unwrap().page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn zero_default_page_size_rejected() {
        assert!(matches!(
            VecPageSource::with_page_size(vec![1, 2, 3], 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn pages_and_tokens() {
        let mut source = VecPageSource::with_page_size(vec![1, 2, 3, 4, 5], 2).unwrap();

        let first = source.get_page("").await.unwrap().unwrap();
        assert_eq!(first.items, vec![1, 2]);
        assert_eq!(decode_token(&first.next_token, 0).unwrap(), PageCursor::new(2, 2));

        let second = source.get_page(&first.next_token).await.unwrap().unwrap();
        assert_eq!(second.items, vec![3, 4]);

        let third = source.get_page(&second.next_token).await.unwrap().unwrap();
        assert_eq!(third.items, vec![5]);
        assert!(third.is_last());
    }

    #[tokio::test]
    async fn full_last_page_needs_one_more_request() {
        let mut source = VecPageSource::with_page_size(vec![1, 2], 2).unwrap();
        let first = source.get_page("").await.unwrap().unwrap();
        assert!(!first.is_last());
        let second = source.get_page(&first.next_token).await.unwrap().unwrap();
        assert!(second.items.is_empty());
        assert!(second.is_last());
    }

    #[tokio::test]
    async fn page_past_end_is_empty() {
        let mut source = VecPageSource::new(vec!['a', 'b']);
        let token = encode_token(&PageCursor::new(9, 10)).unwrap();
        let page = source.get_page(&token).await.unwrap().unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn release_is_idempotent_and_final() {
        let mut source = VecPageSource::new(vec![1u8]);
        assert!(!source.is_released());
        source.release();
        source.release();
        assert!(source.is_released());
        assert!(source.is_empty());
        assert!(matches!(
            source.get_page("").await,
            Err(Error::SourceFailure(_))
        ));
    }
}
