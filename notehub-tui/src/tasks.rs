//! Background request tasks.
//!
//! Tasks only talk to the network and report back through the event
//! channel; the event loop owns every piece of state.

use std::sync::Arc;

use notehub_core::NotesApi;
use tokio::sync::mpsc;

use crate::browser::FetchRequest;
use crate::creator::CreateRequest;
use crate::events::TuiEvent;

pub fn spawn_fetch(
    api: Arc<dyn NotesApi>,
    request: FetchRequest,
    per_page: u32,
    sender: mpsc::Sender<TuiEvent>,
) {
    tokio::spawn(async move {
        let params = request.key.to_params(per_page);
        let result = api.fetch_notes(&params).await;
        let event = TuiEvent::NotesFetched {
            request_id: request.id,
            result,
        };
        if sender.send(event).await.is_err() {
            tracing::debug!(id = request.id, "Event loop closed before fetch completed");
        }
    });
}

pub fn spawn_create(
    api: Arc<dyn NotesApi>,
    request: CreateRequest,
    sender: mpsc::Sender<TuiEvent>,
) {
    tokio::spawn(async move {
        let result = api.create_note(&request.payload).await;
        let event = TuiEvent::NoteCreated {
            submission_id: request.submission_id,
            result,
        };
        if sender.send(event).await.is_err() {
            tracing::debug!(
                submission_id = request.submission_id,
                "Event loop closed before create completed"
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use notehub_cache::Watermark;
    use notehub_core::{CreateNotePayload, NoteTag, QueryKey};
    use notehub_test_utils::{fixtures, FakeNotesApi};

    #[tokio::test]
    async fn test_fetch_reports_through_channel() {
        let api = Arc::new(FakeNotesApi::with_notes(fixtures::notes(3)));
        let (tx, mut rx) = mpsc::channel(4);
        let request = FetchRequest {
            id: 7,
            key: QueryKey::first_page(Some(NoteTag::Work)),
            watermark: Watermark::zero(),
        };
        spawn_fetch(api.clone(), request, 10, tx);

        match rx.recv().await {
            Some(TuiEvent::NotesFetched { request_id, result }) => {
                assert_eq!(request_id, 7);
                assert_eq!(result.unwrap().notes.len(), 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        let calls = api.fetch_calls();
        assert_eq!(calls[0].per_page, 10);
        assert_eq!(calls[0].tag, Some(NoteTag::Work));
    }

    #[tokio::test]
    async fn test_create_reports_through_channel() {
        let api = Arc::new(FakeNotesApi::new());
        let (tx, mut rx) = mpsc::channel(4);
        let payload = CreateNotePayload {
            title: "Buy milk".to_string(),
            content: String::new(),
            tag: NoteTag::Shopping,
        };
        let request = CreateRequest {
            submission_id: 3,
            payload,
        };
        spawn_create(api, request, tx);
        assert!(matches!(
            rx.recv().await,
            Some(TuiEvent::NoteCreated {
                submission_id: 3,
                result: Ok(_)
            })
        ));
    }
}
