use crate::{ImageStreamRegistry, ImageStreamSession, MultipartFramer, StreamError};

use std::cell::Cell;
use std::convert::Infallible;

use bytes::Bytes;
use futures::StreamExt;
use googletest::assert_that;
use googletest::prelude::eq;

fn new_registry(max_clients: Option<usize>) -> ImageStreamRegistry {
    ImageStreamRegistry::new("Map image", MultipartFramer::default(), max_clients, 4)
}

fn svg() -> Result<Bytes, Infallible> {
    Ok(Bytes::from_static(b"<svg/>"))
}

#[test]
fn given_three_writers_when_triggered_then_one_render_and_identical_frames() {
    let registry = new_registry(None);
    let mut writers: Vec<_> = (0..3).map(|_| registry.subscribe().unwrap()).collect();
    let renders = Cell::new(0);

    let delivered = registry.trigger(|| {
        renders.set(renders.get() + 1);
        svg()
    });

    assert_that!(delivered, eq(3));
    assert_that!(renders.get(), eq(1));
    let expected = registry.framer().frame(b"<svg/>");
    for writer in writers.iter_mut() {
        assert_eq!(writer.try_recv(), Some(expected.clone()));
    }
}

#[test]
fn given_failing_second_writer_when_triggered_then_others_receive_and_it_is_dropped() {
    let registry = new_registry(None);
    let mut first = registry.subscribe().unwrap();
    let mut second = registry.subscribe().unwrap();
    let mut third = registry.subscribe().unwrap();
    second.close();

    assert_that!(registry.trigger(svg), eq(2));
    assert!(first.try_recv().is_some());
    assert!(third.try_recv().is_some());
    assert_that!(registry.writer_count(), eq(2));

    let renders = Cell::new(0);
    let delivered = registry.trigger(|| {
        renders.set(renders.get() + 1);
        svg()
    });

    assert_that!(delivered, eq(2));
    assert_that!(renders.get(), eq(1));
    assert_eq!(second.try_recv(), None);
}

#[test]
fn given_no_writers_when_triggered_then_nothing_rendered() {
    let registry = new_registry(None);
    let renders = Cell::new(0);

    let delivered = registry.trigger(|| {
        renders.set(renders.get() + 1);
        svg()
    });

    assert_that!(delivered, eq(0));
    assert_that!(renders.get(), eq(0));
}

#[test]
fn given_render_failure_when_triggered_then_skipped_and_writers_kept() {
    let registry = new_registry(None);
    let mut writer = registry.subscribe().unwrap();

    let delivered = registry.trigger(|| Err::<Bytes, _>("map is empty"));

    assert_that!(delivered, eq(0));
    assert_that!(registry.writer_count(), eq(1));
    assert_eq!(writer.try_recv(), None);
}

#[test]
fn given_uncapped_registry_when_many_subscribe_then_all_accepted() {
    let registry = new_registry(None);

    let writers: Vec<_> = (0..50).map(|_| registry.subscribe()).collect();

    assert!(writers.iter().all(|w| w.is_ok()));
    assert_that!(registry.writer_count(), eq(50));
}

#[test]
fn given_capped_registry_when_full_then_capacity_exceeded() {
    let registry = new_registry(Some(1));
    let _writer = registry.subscribe().unwrap();

    let result = registry.subscribe();

    assert!(matches!(result, Err(StreamError::CapacityExceeded { max: 1, .. })));
}

#[tokio::test]
async fn given_writers_when_shutdown_then_streams_end_and_later_use_fails() {
    let registry = new_registry(None);
    let mut writer = registry.subscribe().unwrap();

    registry.shutdown();

    assert_eq!(writer.recv().await, None);
    assert_that!(registry.writer_count(), eq(0));
    assert_that!(registry.trigger(svg), eq(0));
    assert!(matches!(registry.subscribe(), Err(StreamError::HubClosed { .. })));
}

#[test]
fn given_dropped_subscription_when_counted_then_unregistered() {
    let registry = new_registry(None);
    let writer = registry.subscribe().unwrap();

    drop(writer);

    assert_that!(registry.writer_count(), eq(0));
}

#[tokio::test]
async fn given_session_when_streamed_then_preamble_first_frame_then_pushed_frames() {
    let registry = new_registry(None);
    let framer = registry.framer().clone();
    let subscription = registry.subscribe().unwrap();
    let session = ImageStreamSession::new(subscription, &framer, b"<first/>");
    let mut stream = Box::pin(session.into_stream());

    registry.trigger(|| Ok::<_, Infallible>(Bytes::from_static(b"<second/>")));

    let mut chunks = Vec::new();
    for _ in 0..3 {
        chunks.push(stream.next().await.unwrap().unwrap());
    }

    assert_eq!(
        chunks,
        vec![
            framer.preamble(),
            framer.frame(b"<first/>"),
            framer.frame(b"<second/>"),
        ]
    );

    registry.shutdown();
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn given_frame_queued_when_registry_shut_down_then_stream_ends_without_it() {
    let registry = new_registry(None);
    let framer = registry.framer().clone();
    let subscription = registry.subscribe().unwrap();
    let session = ImageStreamSession::new(subscription, &framer, b"<first/>");
    let mut stream = Box::pin(session.into_stream());
    stream.next().await.unwrap().unwrap();
    stream.next().await.unwrap().unwrap();

    registry.trigger(svg);
    registry.shutdown();

    assert!(stream.next().await.is_none());
}
