use super::*;

use buildport_protocols::{AffixPreset, ItemAffix, SlotType, Variant};

fn build(url: &str, name: &str) -> Build {
    let mut build = Build::for_url(url);
    build.name = name.to_string();
    build.date = "2024-05-01".to_string();

    let mut preset = AffixPreset::new(name);
    preset
        .item_affixes
        .push(ItemAffix::new("S04_CoreStat_Strength", SlotType::Helm));
    build.variants.push(Variant {
        name: name.to_string(),
        affix_preset: preset,
    });
    build
}

#[tokio::test]
async fn test_new_creates_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("nested").join("builds");

    let catalog = JsonBuildCatalog::new(&path).await.unwrap();
    assert!(path.is_dir());
    assert!(catalog.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_put_and_get() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = JsonBuildCatalog::new(temp_dir.path()).await.unwrap();

    let stored = build("https://example.com/builds/a", "Whirlwind");
    catalog.put(&stored.id, stored.clone()).await.unwrap();

    assert_eq!(catalog.get(&stored.id).await.unwrap(), Some(stored.clone()));
    assert!(catalog.get("missing").await.unwrap().is_none());

    let file = temp_dir.path().join(JsonBuildCatalog::id_to_filename(&stored.id));
    let content = std::fs::read_to_string(file).unwrap();
    assert!(content.contains("\"Name\": \"Whirlwind\""));
}

#[tokio::test]
async fn test_put_replaces_same_id() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = JsonBuildCatalog::new(temp_dir.path()).await.unwrap();

    let url = "https://example.com/builds/a";
    catalog.put(&Build::id_for_url(url), build(url, "Old")).await.unwrap();
    catalog.put(&Build::id_for_url(url), build(url, "New")).await.unwrap();

    let all = catalog.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "New");
}

#[tokio::test]
async fn test_get_all_sorted_by_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = JsonBuildCatalog::new(temp_dir.path()).await.unwrap();

    for (url, name) in [
        ("https://example.com/3", "Pulverize Druid"),
        ("https://example.com/1", "Blessed Shield"),
        ("https://example.com/2", "Minion Necro"),
    ] {
        let b = build(url, name);
        catalog.put(&b.id.clone(), b).await.unwrap();
    }

    let names: Vec<String> = catalog
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, vec!["Blessed Shield", "Minion Necro", "Pulverize Druid"]);
}

#[tokio::test]
async fn test_delete() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = JsonBuildCatalog::new(temp_dir.path()).await.unwrap();

    let stored = build("https://example.com/builds/a", "Whirlwind");
    catalog.put(&stored.id, stored.clone()).await.unwrap();
    catalog.delete(&stored.id).await.unwrap();

    assert!(catalog.get(&stored.id).await.unwrap().is_none());
    let file = temp_dir.path().join(JsonBuildCatalog::id_to_filename(&stored.id));
    assert!(!file.exists());

    // Unknown ids are not an error.
    catalog.delete("unknown").await.unwrap();
}

#[tokio::test]
async fn test_reload_from_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let stored = build("https://example.com/builds/a", "Whirlwind");

    {
        let catalog = JsonBuildCatalog::new(temp_dir.path()).await.unwrap();
        catalog.put(&stored.id, stored.clone()).await.unwrap();
    }

    let reopened = JsonBuildCatalog::new(temp_dir.path()).await.unwrap();
    assert_eq!(reopened.get(&stored.id).await.unwrap(), Some(stored));
}

#[tokio::test]
async fn test_unreadable_files_skipped() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("broken.json"), "{ not json").unwrap();
    std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

    let stored = build("https://example.com/builds/a", "Whirlwind");
    std::fs::write(
        temp_dir.path().join(JsonBuildCatalog::id_to_filename(&stored.id)),
        serde_json::to_string(&stored).unwrap(),
    )
    .unwrap();

    let catalog = JsonBuildCatalog::new(temp_dir.path()).await.unwrap();
    let all = catalog.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, stored.id);
}

#[test]
fn test_id_to_filename() {
    let id = Build::id_for_url("https://example.com/?a=1");
    let filename = JsonBuildCatalog::id_to_filename(&id);
    assert_eq!(filename, format!("{}.json", id));

    assert_eq!(JsonBuildCatalog::id_to_filename("a/b\\c"), "a_b_c.json");
}
