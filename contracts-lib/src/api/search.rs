//! Debounced search input.

use std::time::Duration;

use async_stream::stream;
use futures::Stream;
use futures::StreamExt;

/// Quiet period the contracts list waits for before searching.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

enum Event {
    Input(Option<String>),
    Quiet,
}

/// Turns raw search-box input into the searches worth running.
///
/// A value is yielded once the input has been quiet for `quiet`, and only if
/// it differs from the last yielded value. When the input ends, a value still
/// waiting out its quiet period is yielded right away.
pub fn debounce_search<S>(input: S, quiet: Duration) -> impl Stream<Item = String>
where
    S: Stream<Item = String>,
{
    stream! {
        let mut input = Box::pin(input);
        let mut pending: Option<String> = None;
        let mut last: Option<String> = None;

        loop {
            if pending.is_none() {
                match input.next().await {
                    Some(value) => pending = Some(value),
                    None => break,
                }
                continue;
            }

            let event = tokio::select! {
                next = input.next() => Event::Input(next),
                _ = tokio::time::sleep(quiet) => Event::Quiet,
            };
            match event {
                Event::Input(Some(value)) => pending = Some(value),
                Event::Input(None) => break,
                Event::Quiet => {
                    if let Some(value) = pending.take() {
                        if last.as_ref() != Some(&value) {
                            last = Some(value.clone());
                            yield value;
                        }
                    }
                }
            }
        }

        if let Some(value) = pending.take() {
            if last.as_ref() != Some(&value) {
                yield value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::SinkExt;
    use futures::channel::mpsc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_settled_input_is_yielded() {
        let (mut tx, rx) = mpsc::channel::<String>(16);
        let mut searches = Box::pin(debounce_search(rx, SEARCH_DEBOUNCE));

        let typing = tokio::spawn(async move {
            for text in ["l", "li", "lim"] {
                tx.send(text.to_string()).await.unwrap();
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            tokio::time::sleep(Duration::from_millis(600)).await;
            // Same text again after the quiet period is suppressed.
            tx.send("lim".to_string()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(600)).await;
            tx.send("limp".to_string()).await.unwrap();
        });

        assert_eq!(searches.next().await.as_deref(), Some("lim"));
        assert_eq!(searches.next().await.as_deref(), Some("limp"));
        assert_eq!(searches.next().await, None);
        typing.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input() {
        let searches = debounce_search(futures::stream::empty(), SEARCH_DEBOUNCE);
        let all: Vec<String> = searches.collect().await;
        assert!(all.is_empty());
    }
}
