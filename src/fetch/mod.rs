mod vec_source;

pub use vec_source::{decode_token, encode_token, VecPageSource};

use std::marker::PhantomData;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::FetchConfig;
use crate::error::Error;
use crate::model::Page;

/// A cursor-paginated source of `T`.
///
/// An empty token asks for the first page. `Ok(None)` or a page with no items
/// means the source is exhausted. The token is opaque to callers: they hand
/// back whatever `next_token` the previous page carried.
#[async_trait]
pub trait PageSource<T: Send>: Send {
    async fn get_page(&mut self, token: &str) -> Result<Option<Page<T>>, Error>;

    /// Free whatever backs the source. Must tolerate repeated calls.
    fn release(&mut self);
}

/// Drain `source` into one vector, page after page, then release it.
///
/// Pages are requested strictly one at a time. Item order is page order, then
/// order within the page. Any failure fails the whole call and discards what
/// was accumulated. `release` runs exactly once on every path, including when
/// the returned future is dropped before completion or a page request panics.
pub async fn fetch_all<T, S>(source: &mut S, config: &FetchConfig) -> Result<Vec<T>, Error>
where
    T: Send,
    S: PageSource<T> + ?Sized,
{
    let started = Instant::now();
    let mut guard = ReleaseOnDrop::<T, S>::new(source);
    let result = drain(&mut *guard.source, config).await;
    drop(guard);

    metrics::histogram!(crate::observability::FETCH_DURATION_SECONDS)
        .record(started.elapsed().as_secs_f64());
    match &result {
        Ok(items) => {
            metrics::counter!(crate::observability::ITEMS_FETCHED_TOTAL)
                .increment(items.len() as u64);
            debug!(items = items.len(), "fetch complete");
        }
        Err(e) => {
            metrics::counter!(
                crate::observability::FETCH_FAILURES_TOTAL,
                "reason" => crate::observability::error_label(e)
            )
            .increment(1);
            warn!("fetch failed: {e}");
        }
    }
    result
}

/// Blocking form of `fetch_all` for callers outside an async runtime.
///
/// Drives the loop on a private current-thread runtime. Called from inside a
/// tokio runtime it releases the source and fails instead of nesting `block_on`.
pub fn fetch_all_blocking<T, S>(source: &mut S, config: &FetchConfig) -> Result<Vec<T>, Error>
where
    T: Send,
    S: PageSource<T> + ?Sized,
{
    if tokio::runtime::Handle::try_current().is_ok() {
        source.release();
        return Err(Error::SourceFailure(
            "fetch_all_blocking called inside an async runtime".into(),
        ));
    }
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            source.release();
            return Err(Error::SourceFailure(format!("failed to start runtime: {e}")));
        }
    };
    runtime.block_on(fetch_all(source, config))
}

/// Calls `release` when dropped, so cancellation and unwinding still free the
/// source.
struct ReleaseOnDrop<'a, T, S>
where
    T: Send,
    S: PageSource<T> + ?Sized,
{
    source: &'a mut S,
    _item: PhantomData<fn() -> T>,
}

impl<'a, T, S> ReleaseOnDrop<'a, T, S>
where
    T: Send,
    S: PageSource<T> + ?Sized,
{
    fn new(source: &'a mut S) -> Self {
        Self {
            source,
            _item: PhantomData,
        }
    }
}

impl<T, S> Drop for ReleaseOnDrop<'_, T, S>
where
    T: Send,
    S: PageSource<T> + ?Sized,
{
    fn drop(&mut self) {
        self.source.release();
    }
}

async fn drain<T, S>(source: &mut S, config: &FetchConfig) -> Result<Vec<T>, Error>
where
    T: Send,
    S: PageSource<T> + ?Sized,
{
    let mut items: Vec<T> = Vec::new();
    let mut token = String::new();
    let mut pages = 0usize;

    loop {
        if let Some(max) = config.max_pages
            && pages >= max {
                return Err(Error::LimitExceeded("too many pages"));
            }

        let page = match request_page(source, &token, config.page_timeout).await? {
            Some(page) if !page.items.is_empty() => page,
            Some(page) => {
                // Empty items end the fetch even if the source still offers a token.
                if !page.next_token.is_empty() {
                    debug!(pages, "empty page carried a next token, stopping");
                }
                break;
            }
            None => break,
        };

        pages += 1;
        metrics::counter!(crate::observability::PAGES_FETCHED_TOTAL).increment(1);
        debug!(page = pages, items = page.items.len(), "received page");

        items.extend(page.items);
        token = page.next_token;
        if token.is_empty() {
            break;
        }
    }

    Ok(items)
}

async fn request_page<T, S>(
    source: &mut S,
    token: &str,
    timeout: Option<Duration>,
) -> Result<Option<Page<T>>, Error>
where
    T: Send,
    S: PageSource<T> + ?Sized,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, source.get_page(token))
            .await
            .map_err(|_| Error::Timeout(limit))?,
        None => source.get_page(token).await,
    }
}
