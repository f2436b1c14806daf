//! Integration tests for the match stores.

use chrono::Utc;
use squash_marker::{
    GameScore, JsonFileStore, MatchRecord, MatchSettings, MatchStore, MemoryStore,
    NewMatchRecord, StoreError,
};
use std::path::PathBuf;
use uuid::Uuid;

fn record(p1: &str, p2: &str, event: &str) -> NewMatchRecord {
    NewMatchRecord {
        player1_name: p1.to_string(),
        player2_name: p2.to_string(),
        player1_color: "border-red-500".to_string(),
        player2_color: "border-blue-500".to_string(),
        game_scores: vec![
            GameScore { player1: 15, player2: 10 },
            GameScore { player1: 15, player2: 13 },
            GameScore { player1: 17, player2: 15 },
        ],
        match_settings: MatchSettings::default(),
        event_name: event.to_string(),
        date: Utc::now(),
    }
}

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("squash-marker-test-{}.json", Uuid::new_v4()))
}

async fn exercise_store(store: &dyn MatchStore) {
    let first = store.save_match(record("Alice", "Bob", "League")).await.unwrap();
    let second = store.save_match(record("Cara", "Dan", " ")).await.unwrap();
    store.save_match(record("Eve", "Finn", "League")).await.unwrap();
    assert_ne!(first.id, second.id);

    let all = store.get_matches().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].record.player1_name, "Eve");
    assert_eq!(all[2].record.player1_name, "Alice");

    let fetched = store.get_match(second.id).await.unwrap();
    assert_eq!(fetched, second);

    assert_eq!(store.get_event_names().await.unwrap(), vec!["League".to_string()]);

    assert!(store.delete_match(first.id).await.unwrap());
    assert!(!store.delete_match(first.id).await.unwrap());
    assert!(matches!(
        store.get_match(first.id).await,
        Err(StoreError::NotFound(id)) if id == first.id
    ));
    assert_eq!(store.get_matches().await.unwrap().len(), 2);
}

async fn exercise_events(store: &dyn MatchStore) {
    let spring = store.create_event(" Spring Open ".to_string()).await.unwrap();
    assert_eq!(spring.name, "Spring Open");
    let again = store.create_event("Spring Open".to_string()).await.unwrap();
    assert_eq!(again, spring);
    assert!(matches!(
        store.create_event("   ".to_string()).await,
        Err(StoreError::BlankEventName)
    ));

    store.save_match(record("Alice", "Bob", "League")).await.unwrap();
    store.save_match(record("Cara", "Dan", "Spring Open")).await.unwrap();
    assert_eq!(
        store.get_event_names().await.unwrap(),
        vec!["Spring Open".to_string(), "League".to_string()]
    );
}

#[tokio::test]
async fn memory_store_round_trip() {
    exercise_store(&MemoryStore::new()).await;
}

#[tokio::test]
async fn json_file_store_round_trip() {
    let path = temp_path();
    exercise_store(&JsonFileStore::new(path.clone())).await;

    // A fresh store on the same file sees the same data.
    let reopened = JsonFileStore::new(path.clone());
    assert_eq!(reopened.get_matches().await.unwrap().len(), 2);
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn memory_store_creates_events_once() {
    exercise_events(&MemoryStore::new()).await;
}

#[tokio::test]
async fn json_file_store_creates_events_once() {
    let path = temp_path();
    exercise_events(&JsonFileStore::new(path.clone())).await;

    let reopened = JsonFileStore::new(path.clone());
    let event = reopened.create_event("League".to_string()).await.unwrap();
    assert_eq!(event.name, "League");
    assert_eq!(reopened.get_event_names().await.unwrap().len(), 2);
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn blank_event_name_leaves_no_file_behind() {
    let path = temp_path();
    let store = JsonFileStore::new(path.clone());
    assert!(store.create_event(String::new()).await.is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn missing_file_is_an_empty_store() {
    let store = JsonFileStore::new(temp_path());
    assert!(store.get_matches().await.unwrap().is_empty());
    assert!(store.get_event_names().await.unwrap().is_empty());
    assert!(!store.delete_match(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn event_names_fall_back_to_stored_matches() {
    let path = temp_path();
    let matches = vec![
        MatchRecord::new(record("A", "B", "Open")),
        MatchRecord::new(record("C", "D", "")),
        MatchRecord::new(record("E", "F", "Open")),
        MatchRecord::new(record("G", "H", "Masters")),
    ];
    let doc = serde_json::json!({ "matches": matches });
    std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

    let store = JsonFileStore::new(path.clone());
    assert_eq!(
        store.get_event_names().await.unwrap(),
        vec!["Open".to_string(), "Masters".to_string()]
    );
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn corrupt_file_is_a_serialization_error() {
    let path = temp_path();
    std::fs::write(&path, b"{ not json").unwrap();
    let store = JsonFileStore::new(path.clone());
    assert!(matches!(
        store.get_matches().await,
        Err(StoreError::Serialization(_))
    ));
    let _ = std::fs::remove_file(path);
}

#[test]
fn records_serialize_in_camel_case() {
    let stored = MatchRecord::new(record("Alice", "Bob", "League"));
    let json = serde_json::to_value(&stored).unwrap();
    assert_eq!(json["player1Name"], "Alice");
    assert_eq!(json["eventName"], "League");
    assert_eq!(json["matchSettings"]["pointsToWin"], 15);
    assert_eq!(json["gameScores"][2]["player1"], 17);
    assert!(json["id"].is_string());
    assert!(json["date"].is_string());

    let back: MatchRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, stored);
}

#[test]
fn posted_record_without_a_date_is_stamped_now() {
    let before = Utc::now();
    let body = serde_json::json!({
        "player1Name": "Alice",
        "player2Name": "Bob",
        "player1Color": "border-red-500",
        "player2Color": "border-blue-500",
        "gameScores": [{ "player1": 11, "player2": 4 }],
        "matchSettings": { "pointsToWin": 11, "clearPoints": 2, "bestOf": 1 }
    });
    let record: NewMatchRecord = serde_json::from_value(body).unwrap();
    assert!(record.date >= before);
    assert_eq!(record.event_name, "");
    assert_eq!(record.game_scores, vec![GameScore { player1: 11, player2: 4 }]);
}
