use super::*;

use buildport_protocols::{AffixCatalogEntry, AspectCatalogEntry};

use crate::catalog_index::CatalogIndex;

fn assembler() -> BuildAssembler {
    let index = CatalogIndex::from_entries(
        &[
            AffixCatalogEntry::new("S04_CoreStat_Strength", "Strength"),
            AffixCatalogEntry::new("S04_Damage", "+20% Damage"),
            AffixCatalogEntry::new("S04_MaxLife", "Maximum Life"),
            AffixCatalogEntry::new("S04_Armor", "Armor (+[50 - 80])"),
        ],
        &[
            AspectCatalogEntry::new("legendary_moonrise", "Aspect of the Moonrise"),
            AspectCatalogEntry::new("legendary_ravenous", "Ravenous Aspect"),
        ],
    );
    BuildAssembler::new(Arc::new(AffixResolver::new(Arc::new(index)))).with_max_concurrent(2)
}

fn affix(id: &str, tempered: bool, implicit: bool) -> ItemAffix {
    ItemAffix::new(id, SlotType::Helm)
        .tempered(tempered)
        .implicit(implicit)
}

#[tokio::test]
async fn test_assemble_helm_example() {
    let mut raw = RawVariant::new("Main");
    raw.extend_slot(
        SlotType::Helm,
        vec!["Strength".to_string(), "Tempered: +20% Damage".to_string()],
    );

    let preset = assembler().assemble(&raw).await.unwrap();
    assert_eq!(preset.name, "Main");
    assert_eq!(
        preset.item_affixes,
        vec![
            ItemAffix::new("S04_CoreStat_Strength", SlotType::Helm),
            ItemAffix::new("S04_Damage", SlotType::Helm).tempered(true),
        ]
    );
    assert!(preset.item_aspects.is_empty());
}

#[tokio::test]
async fn test_assemble_tempered_sorted_last_across_slots() {
    let mut raw = RawVariant::new("Main");
    raw.extend_slot(
        SlotType::Helm,
        vec!["Tempered: +20% Damage".to_string(), "Strength".to_string()],
    );
    raw.extend_slot(SlotType::Chest, vec!["Maximum Life".to_string()]);

    let preset = assembler().assemble(&raw).await.unwrap();
    let order: Vec<(&str, SlotType)> = preset
        .item_affixes
        .iter()
        .map(|a| (a.id.as_str(), a.slot))
        .collect();
    assert_eq!(
        order,
        vec![
            ("S04_CoreStat_Strength", SlotType::Helm),
            ("S04_MaxLife", SlotType::Chest),
            ("S04_Damage", SlotType::Helm),
        ]
    );
}

#[tokio::test]
async fn test_assemble_dedups_same_id_and_slot() {
    let mut raw = RawVariant::new("Main");
    raw.extend_slot(
        SlotType::Ring,
        vec!["Strength".to_string(), "Strenght".to_string()],
    );
    raw.extend_slot(SlotType::Amulet, vec!["Strength".to_string()]);

    let preset = assembler().assemble(&raw).await.unwrap();
    assert_eq!(preset.item_affixes.len(), 2);
    assert_eq!(preset.affixes_for(SlotType::Ring).count(), 1);
    assert_eq!(preset.affixes_for(SlotType::Amulet).count(), 1);
}

#[tokio::test]
async fn test_assemble_expands_aspects() {
    let mut raw = RawVariant::new("Main");
    raw.aspects = vec![
        "Aspect of the Moonrise".to_string(),
        "Ravenous Aspect".to_string(),
        "aspect of the moonrise".to_string(),
    ];

    let preset = assembler().assemble(&raw).await.unwrap();
    assert_eq!(preset.item_aspects.len(), 20);
    assert_eq!(preset.item_aspects[0], ItemAspect::new("legendary_moonrise", SlotType::Helm));
    assert_eq!(preset.item_aspects[10], ItemAspect::new("legendary_ravenous", SlotType::Helm));
}

#[tokio::test]
async fn test_assemble_empty_catalog_skips_entries() {
    let empty = BuildAssembler::new(Arc::new(AffixResolver::new(Arc::new(
        CatalogIndex::default(),
    ))));
    let mut raw = RawVariant::new("Main");
    raw.extend_slot(SlotType::Helm, vec!["Strength".to_string()]);
    raw.aspects = vec!["Aspect of the Moonrise".to_string()];

    let preset = empty.assemble(&raw).await.unwrap();
    assert!(preset.item_affixes.is_empty());
    assert!(preset.item_aspects.is_empty());
}

#[tokio::test]
async fn test_assemble_is_deterministic() {
    let mut raw = RawVariant::new("Main");
    for slot in SlotType::ALL {
        raw.extend_slot(
            slot,
            vec![
                "Strength".to_string(),
                "Maximum Life".to_string(),
                "Tempered: +20% Damage".to_string(),
                "Armor".to_string(),
            ],
        );
    }

    let assembler = assembler();
    let first = assembler.assemble(&raw).await.unwrap();
    for _ in 0..5 {
        assert_eq!(assembler.assemble(&raw).await.unwrap(), first);
    }
}

#[test]
fn test_sort_affixes_ordering() {
    let mut affixes = vec![
        affix("t1", true, false),
        affix("n1", false, false),
        affix("i1", false, true),
        affix("t2", true, true),
        affix("n2", false, false),
    ];
    sort_affixes(&mut affixes);

    let ids: Vec<&str> = affixes.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["i1", "n1", "n2", "t2", "t1"]);
}

#[test]
fn test_sort_affixes_idempotent() {
    let mut affixes = vec![
        affix("a", true, false),
        affix("b", false, false),
        affix("c", false, true),
        affix("a", false, false),
    ];
    sort_affixes(&mut affixes);
    let once = affixes.clone();
    sort_affixes(&mut affixes);
    assert_eq!(affixes, once);
}

#[test]
fn test_dedup_affixes_keeps_first() {
    let mut affixes = vec![
        affix("a", false, false),
        affix("a", true, false),
        ItemAffix::new("a", SlotType::Chest),
        affix("b", false, false),
    ];
    dedup_affixes(&mut affixes);

    assert_eq!(affixes.len(), 3);
    assert!(!affixes[0].is_tempered);
    assert_eq!(affixes[1].slot, SlotType::Chest);
}

#[test]
fn test_expand_aspects_covers_every_slot() {
    let expanded = expand_aspects(vec!["x".to_string(), "y".to_string(), "x".to_string()]);
    assert_eq!(expanded.len(), 20);

    for id in ["x", "y"] {
        let slots: Vec<SlotType> = expanded
            .iter()
            .filter(|a| a.id == id)
            .map(|a| a.slot)
            .collect();
        assert_eq!(slots, SlotType::ALL.to_vec());
    }

    let unique: HashSet<&ItemAspect> = expanded.iter().collect();
    assert_eq!(unique.len(), expanded.len());
}

#[test]
fn test_expand_aspects_empty() {
    assert!(expand_aspects(Vec::new()).is_empty());
}
