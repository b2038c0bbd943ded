use std::fs;
use std::path::PathBuf;

use chunk_reader::chunk::codec::{self, FileFamily};
use chunk_reader::chunk::reader;
use chunk_reader::chunk::schemas::{items, monsters, weapons};
use chunk_reader::chunk::tree::{EquipEntry, EquipForest, UpgradeRelation};
use chunk_reader::chunk::types::models::Language;
use chunk_reader::{StructFile, Value};

// ---- fixture builders -------------------------------------------------

fn struct_file(magic: u16, entries: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&magic.to_le_bytes());
    buf.extend_from_slice(&[0, 0]);
    buf.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for entry in entries {
        buf.extend_from_slice(entry);
    }
    buf
}

fn item_entry(id: u32, rarity: u8, buy: u32, sell: u32) -> Vec<u8> {
    let mut e = Vec::new();
    e.extend_from_slice(&id.to_le_bytes());
    e.extend_from_slice(&7u16.to_le_bytes()); // icon
    e.push(1); // icon_color
    e.push(rarity);
    e.push(10); // carry_limit
    e.push(0); // flags
    e.extend_from_slice(&buy.to_le_bytes());
    e.extend_from_slice(&sell.to_le_bytes());
    e.extend_from_slice(&0u16.to_le_bytes()); // combo_id
    e
}

fn hitzone_entry(monster: u16, part: u8, cut: u8) -> Vec<u8> {
    let mut e = Vec::new();
    e.extend_from_slice(&monster.to_le_bytes());
    e.push(part);
    e.push(0); // state
    e.push(cut);
    e.extend_from_slice(&[45, 30, 20, 10, 15, 5, 0, 100]); // impact..stun
    e.extend_from_slice(&[0, 0, 0]); // pad
    e
}

fn loot_record(monster: u16, rank: u8, slots: &[(u16, u8, u8)]) -> Vec<u8> {
    let mut e = Vec::new();
    e.extend_from_slice(&monster.to_le_bytes());
    e.push(rank);
    e.push(0); // pad
    e.extend_from_slice(&(slots.len() as u32).to_le_bytes());
    for (item, stack, chance) in slots {
        e.extend_from_slice(&item.to_le_bytes());
        e.push(*stack);
        e.push(*chance);
    }
    e
}

fn craft_entry(
    owner: u32,
    create: &[(u16, u8)],
    descendants: &[u16],
    direct: bool,
) -> Vec<u8> {
    let mut e = Vec::new();
    e.extend_from_slice(&owner.to_le_bytes());
    for slot in 0..4 {
        let (item, qty) = create.get(slot).copied().unwrap_or((0, 0));
        e.extend_from_slice(&item.to_le_bytes());
        e.push(qty);
    }
    e.extend_from_slice(&[0u8; 12]); // upgrade slots, all empty
    for slot in 0..4 {
        let index = descendants.get(slot).copied().unwrap_or(0);
        e.extend_from_slice(&index.to_le_bytes());
    }
    e.push(direct as u8);
    e.push(0); // pad
    e
}

/// Minimal single-language text table: (optional key, string) in index order.
fn gmd_file(name: &str, entries: &[(Option<&str>, &str)]) -> Vec<u8> {
    const CORRELATION_SIZE: usize = 32;
    const KEY_OFFSET_POS: usize = 24;
    const BUCKET_REGION_SIZE: usize = 2048;

    let mut key_block = Vec::new();
    let mut string_block = Vec::new();
    let mut correlations = Vec::new();
    for (index, (key, text)) in entries.iter().enumerate() {
        if let Some(key) = key {
            let mut record = [0u8; CORRELATION_SIZE];
            record[0..4].copy_from_slice(&(index as u32).to_le_bytes());
            record[KEY_OFFSET_POS..KEY_OFFSET_POS + 4]
                .copy_from_slice(&(key_block.len() as u32).to_le_bytes());
            correlations.extend_from_slice(&record);
            key_block.extend_from_slice(key.as_bytes());
            key_block.push(0);
        }
        string_block.extend_from_slice(text.as_bytes());
        string_block.push(0);
    }
    let key_count = entries.iter().filter(|(k, _)| k.is_some()).count() as u32;

    let mut buf = Vec::new();
    buf.extend_from_slice(&chunk_reader::chunk::format::gmd::GMD_MAGIC.to_le_bytes());
    buf.extend_from_slice(&0x0001_0302u32.to_le_bytes()); // version
    buf.extend_from_slice(&1u32.to_le_bytes()); // language
    buf.extend_from_slice(&[0; 8]); // unknown words
    buf.extend_from_slice(&key_count.to_le_bytes());
    buf.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(key_block.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(string_block.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(name.len() as u32).to_le_bytes());
    buf.extend_from_slice(name.as_bytes());
    buf.push(0);
    buf.extend_from_slice(&correlations);
    buf.extend_from_slice(&[0u8; BUCKET_REGION_SIZE]);
    buf.extend_from_slice(&key_block);
    buf.extend_from_slice(&string_block);
    buf
}

struct TempDir(PathBuf);

impl TempDir {
    fn new(tag: &str) -> TempDir {
        let dir = std::env::temp_dir().join(format!("chunk-reader-{}-{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        TempDir(dir)
    }

    fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.0.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

// ---- containers -------------------------------------------------------

#[test]
fn plain_struct_file_from_disk() {
    let dir = TempDir::new("items");
    let buf = struct_file(
        items::ITEM_MAGIC,
        &[item_entry(1, 0, 50, 5), item_entry(2, 3, 980, 98)],
    );
    let path = dir.write("items.bin", &buf);

    let records = reader::read_struct_file(&path, items::ITEM_MAGIC, &items::ITEM).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].uint("id").unwrap(), 1);
    assert_eq!(records[1].uint("buy_price").unwrap(), 980);
    assert_eq!(records[1].uint("rarity_raw").unwrap(), 3);
}

#[test]
fn encrypted_struct_file_round_trips_through_its_family() {
    // 8-byte header + 2 x 16-byte entries is cipher aligned as shipped
    let plain = struct_file(
        monsters::HITZONE_MAGIC,
        &[hitzone_entry(17, 0, 60), hitzone_entry(17, 1, 25)],
    );
    assert_eq!(plain.len() % 8, 0);
    let encrypted = codec::encrypt(&plain, FileFamily::Hitzone).unwrap();
    assert_ne!(encrypted, plain);

    let dir = TempDir::new("hitzones");
    let path = dir.write("hitzones.bin", &encrypted);
    let records = reader::read_encrypted_struct_file(
        &path,
        FileFamily::Hitzone,
        monsters::HITZONE_MAGIC,
        &monsters::MONSTER_HITZONE,
    )
    .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].uint("cut").unwrap(), 60);
    assert_eq!(records[1].uint("part").unwrap(), 1);
    assert_eq!(records[1].uint("stun").unwrap(), 100);
}

#[test]
fn encrypted_struct_file_with_wrong_family_fails_validation() {
    let plain = struct_file(monsters::HITZONE_MAGIC, &[hitzone_entry(17, 0, 60)]);
    let encrypted = codec::encrypt(&plain, FileFamily::Hitzone).unwrap();
    let dir = TempDir::new("wrong-family");
    let path = dir.write("hitzones.bin", &encrypted);
    // garbage plaintext never carries the right magic
    assert!(
        reader::read_encrypted_struct_file(
            &path,
            FileFamily::Status,
            monsters::HITZONE_MAGIC,
            &monsters::MONSTER_HITZONE,
        )
        .is_err()
    );
}

#[test]
fn encrypted_record_stream_stops_at_cipher_slack() {
    // 12 + 8 = 20 bytes of records, padded to 24 for the cipher
    let mut plain = Vec::new();
    plain.extend_from_slice(&loot_record(3, 1, &[(257, 1, 80)]));
    plain.extend_from_slice(&loot_record(4, 0, &[]));
    plain.resize(24, 0);
    let encrypted = codec::encrypt(&plain, FileFamily::Loot).unwrap();

    let dir = TempDir::new("loot");
    let path = dir.write("loot.bin", &encrypted);
    let records =
        reader::read_encrypted_records(&path, FileFamily::Loot, &items::LOOT_TABLE).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].uint("monster").unwrap(), 3);
    let slots = records[0].list("slots").unwrap();
    assert_eq!(slots.len(), 1);
    let slot = slots[0].as_struct().unwrap();
    assert_eq!(slot.uint("item").unwrap(), 257);
    assert_eq!(slot.uint("chance").unwrap(), 80);
    assert!(records[1].list("slots").unwrap().is_empty());
}

#[test]
fn entry_views_read_without_decoding_the_whole_file() {
    let buf = struct_file(
        items::ITEM_MAGIC,
        &[item_entry(1, 0, 50, 5), item_entry(2, 4, 980, 98)],
    );
    let file = StructFile::parse(&buf, items::ITEM_MAGIC, &items::ITEM).unwrap();
    let view = file.entry(1).unwrap();
    assert_eq!(view.get("sell_price").unwrap(), Value::UInt(98));
    assert_eq!(view.get("rarity_raw").unwrap(), Value::UInt(4));
}

// ---- text tables ------------------------------------------------------

#[test]
fn per_language_tables_merge_from_a_directory() {
    let dir = TempDir::new("text");
    dir.write(
        "item_eng.gmd",
        &gmd_file(
            "item",
            &[(Some("ITEM_000"), "Potion"), (None, "whet-\nstone")],
        ),
    );
    dir.write(
        "item_fre.gmd",
        &gmd_file("item", &[(Some("ITEM_000"), "Potion"), (None, "pierre")]),
    );

    let table = reader::read_text_tables(&dir.0, "item").unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get_by_key("ITEM_000", Language::English), Some("Potion"));
    assert_eq!(table.get_by_key("ITEM_000", Language::French), Some("Potion"));
    // hyphen joining is English-only
    assert_eq!(table.get(1, Language::English), Some("whetstone"));
    assert_eq!(table.get(1, Language::French), Some("pierre"));
}

#[test]
fn missing_languages_are_skipped_but_zero_is_an_error() {
    let dir = TempDir::new("text-missing");
    dir.write("quest_jpn.gmd", &gmd_file("quest", &[(None, "text")]));

    let table = reader::read_text_tables(&dir.0, "quest").unwrap();
    assert_eq!(table.get(0, Language::Japanese), Some("text"));
    assert_eq!(table.get(0, Language::English), None);

    assert!(reader::read_text_tables(&dir.0, "armor").is_err());
}

// ---- equipment trees --------------------------------------------------

#[test]
fn weapon_forest_assembles_from_decoded_containers() {
    // three weapons: 0 -> 1 (direct continuation), 0 -> 2 (branch)
    let craft = struct_file(
        weapons::WEAPON_CRAFT_MAGIC,
        &[
            craft_entry(0, &[(0x0101, 2)], &[1, 2], true),
            craft_entry(1, &[], &[], false),
            craft_entry(2, &[(0x0102, 1)], &[], false),
        ],
    );
    let file = StructFile::parse(&craft, weapons::WEAPON_CRAFT_MAGIC, &weapons::WEAPON_CRAFT)
        .unwrap();
    let relations: Vec<UpgradeRelation> = file
        .decode_all()
        .unwrap()
        .iter()
        .map(|record| UpgradeRelation::from_record(record).unwrap())
        .collect();
    assert_eq!(relations[0].create, vec![(0x0101, 2)]);
    assert_eq!(relations[0].descendants, vec![1, 2]);
    assert!(relations[0].direct_descendant);

    let entries = vec![
        EquipEntry {
            id: 100,
            name: "Iron Sword".to_string(),
            tree_id: 1,
            record: stub_weapon(),
        },
        EquipEntry {
            id: 101,
            name: "Iron Sword+".to_string(),
            tree_id: 6,
            record: stub_weapon(),
        },
        EquipEntry {
            id: 102,
            name: "Steel Edge".to_string(),
            tree_id: 2,
            record: stub_weapon(),
        },
    ];
    let forest = EquipForest::assemble(entries, &relations).unwrap();

    assert_eq!(forest.roots(), &[0]);
    assert!(forest.isolated().is_empty());
    // the direct descendant stays in its parent's line
    assert_eq!(forest.node(1).unwrap().tree, 1);
    assert_eq!(forest.node(2).unwrap().tree, 2);
    let names: Vec<&str> = forest.walk().map(|node| node.entry.name.as_str()).collect();
    assert_eq!(names, vec!["Iron Sword", "Iron Sword+", "Steel Edge"]);
}

fn stub_weapon() -> chunk_reader::Record {
    let mut entry = vec![0u8; 24];
    entry[4] = 0; // great-sword
    weapons::WEAPON
        .decode(&mut chunk_reader::chunk::layout::Cursor::new(&entry))
        .unwrap()
}
