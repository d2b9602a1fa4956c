use super::*;

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::with_base_url("test-key", 30, "vtds-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[test]
fn uploads_playlist_id_swaps_uc_prefix() {
    assert_eq!(
        uploads_playlist_id("UCabcdef").as_deref(),
        Some("UUabcdef")
    );
}

#[test]
fn uploads_playlist_id_passes_uu_through() {
    assert_eq!(
        uploads_playlist_id("UUabcdef").as_deref(),
        Some("UUabcdef")
    );
}

#[test]
fn uploads_playlist_id_rejects_other_prefixes() {
    assert!(uploads_playlist_id("HCabcdef").is_none());
    assert!(uploads_playlist_id("").is_none());
}

#[test]
fn playlist_items_url_contains_expected_params() {
    let client = test_client("https://www.googleapis.com/youtube/v3");
    let url = client.playlist_items_url("UUabc", None);
    let s = url.as_str();
    assert!(s.starts_with("https://www.googleapis.com/youtube/v3/playlistItems?"));
    assert!(s.contains("part=snippet"));
    assert!(s.contains("maxResults=50"));
    assert!(s.contains("playlistId=UUabc"));
    assert!(s.contains("key=test-key"));
    assert!(!s.contains("pageToken"));
}

#[test]
fn playlist_items_url_appends_page_token() {
    let client = test_client("https://www.googleapis.com/youtube/v3");
    let url = client.playlist_items_url("UUabc", Some("CAUQAA"));
    assert!(url.as_str().contains("pageToken=CAUQAA"));
}
