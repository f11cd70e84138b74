mod support;

use foundry_client::execution::TransportBody;
use foundry_client::prelude::*;
use std::io::Write;
use std::sync::Arc;
use support::{CountingTokenProvider, ENDPOINT, RecordingTransport, header, text_response};

fn audio_fixture() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("wikipedia_ai")
        .suffix(".mp3")
        .tempfile()
        .unwrap();
    file.write_all(b"ID3\x03\x00fake-mp3-frames").unwrap();
    file
}

#[tokio::test]
async fn uploads_file_as_multipart() {
    let transport = Arc::new(RecordingTransport::json(
        200,
        serde_json::json!({"text": "Artificial intelligence is intelligence exhibited by machines."}),
    ));
    let client = InferenceClient::builder(ENDPOINT, Credential::api_key("k"))
        .with_transport(transport.clone())
        .build()
        .unwrap();
    let audio = audio_fixture();

    let request = TranscriptionRequest {
        language: Some("en".to_string()),
        ..TranscriptionRequest::new("whisper", audio.path())
    };
    let result = client.transcribe(&request).await.unwrap();

    assert_eq!(
        result.text,
        "Artificial intelligence is intelligence exhibited by machines."
    );
    let req = transport.last_request();
    assert_eq!(req.url, format!("{ENDPOINT}/audio/transcriptions"));
    // reqwest sets the multipart boundary itself
    assert_eq!(header(&req, "content-type"), None);
    let TransportBody::Multipart(form) = &req.body else {
        panic!("expected multipart body, got {:?}", req.body);
    };
    assert_eq!(form.field("model"), Some("whisper"));
    assert_eq!(form.field("language"), Some("en"));
    assert_eq!(form.files.len(), 1);
    assert_eq!(form.files[0].field, "file");
    assert_eq!(form.files[0].mime_type, "audio/mpeg");
    assert!(form.files[0].file_name.ends_with(".mp3"));
    assert_eq!(form.files[0].bytes, b"ID3\x03\x00fake-mp3-frames".to_vec());
}

#[tokio::test]
async fn plain_text_format_returns_raw_body() {
    let transport = Arc::new(RecordingTransport::new(|_| {
        text_response(200, "1\n00:00:00,000 --> 00:00:01,000\nHello\n")
    }));
    let client = InferenceClient::builder(ENDPOINT, Credential::api_key("k"))
        .with_transport(transport)
        .build()
        .unwrap();
    let audio = audio_fixture();

    let request = TranscriptionRequest {
        response_format: Some(TranscriptionFormat::Srt),
        ..TranscriptionRequest::new("whisper", audio.path())
    };
    let result = client.transcribe(&request).await.unwrap();

    assert!(result.text.contains("Hello"));
    assert!(result.segments.is_empty());
}

#[tokio::test]
async fn missing_file_fails_without_resolving_or_sending() {
    let transport = Arc::new(RecordingTransport::json(200, serde_json::json!({"text": ""})));
    let provider = Arc::new(CountingTokenProvider::ok("tok"));
    let client = InferenceClient::builder(ENDPOINT, Credential::token(provider.clone()))
        .with_transport(transport.clone())
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.wav");

    let err = client
        .transcribe(&TranscriptionRequest::new("whisper", &missing))
        .await
        .unwrap_err();

    match err {
        LlmError::FileAccessError { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(transport.calls(), 0);
    assert_eq!(provider.calls(), 0);
}
