//! Persistence tests: CRUD, id generation, malformed storage, import/export.

mod common;

use std::collections::HashSet;
use std::fs;

use tokenbank::store::generate_id;
use tokenbank::{Currency, NewPlatform, PlatformPatch, PlatformStore, TokenBankError};

// ---------------------------------------------------------------------------
// list / save
// ---------------------------------------------------------------------------

#[test]
fn list_is_empty_before_anything_is_stored() {
    let (bank, _tmp) = common::setup_bank();
    assert!(bank.store().list().is_empty());
    assert!(!bank.store().path().exists());
}

#[test]
fn list_treats_malformed_storage_as_empty() {
    let (bank, _tmp) = common::setup_bank();
    fs::write(bank.store().path(), "{ not json").unwrap();
    assert!(bank.store().list().is_empty());

    fs::write(bank.store().path(), r#"{"id": "x"}"#).unwrap();
    assert!(bank.store().list().is_empty());
}

#[test]
fn storage_file_is_named_after_storage_key() {
    let (bank, tmp) = common::setup_bank();
    assert_eq!(
        bank.store().path(),
        tmp.path().join("tokenbank_platforms.json")
    );
}

#[test]
fn save_persists_a_json_array() {
    let (bank, _tmp, _sample) = common::setup_sample_bank();

    let raw = fs::read_to_string(bank.store().path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let arr = value.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0]["type"], "deepseek");
    assert_eq!(arr[0]["currency"], "CNY");
    assert!(arr[0]["expiryDate"].is_string());
    assert!(arr[1]["expiryDate"].is_null());
    assert!(arr[0]["createdAt"].is_string());
}

#[test]
fn store_reopened_on_same_directory_sees_saved_data() {
    let (bank, tmp, sample) = common::setup_sample_bank();
    drop(bank);

    let reopened = PlatformStore::new(Some(tmp.path().to_path_buf())).unwrap();
    let platforms = reopened.list();
    assert_eq!(platforms.len(), 3);
    assert_eq!(platforms[0], sample.deepseek);
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

#[test]
fn add_assigns_id_and_timestamps() {
    let (bank, _tmp) = common::setup_bank();

    let platform = bank
        .store()
        .add(NewPlatform::new("Moonshot", "moonshot", 5.0))
        .unwrap();

    assert!(platform.id.starts_with("platform_"));
    assert_eq!(platform.created_at, platform.updated_at);
    assert_eq!(platform.currency, Currency::Cny);
    assert!(platform.plan.is_none());
    assert!(platform.last_refresh_date.is_none());
    assert_eq!(bank.store().list(), vec![platform]);
}

#[test]
fn add_generates_distinct_ids() {
    let (bank, _tmp) = common::setup_bank();

    for i in 0..50 {
        bank.store()
            .add(NewPlatform::new(format!("p{i}"), "other", 1.0))
            .unwrap();
    }

    let ids: HashSet<String> = bank.store().list().into_iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn generated_ids_have_time_and_random_parts() {
    let id = generate_id();
    let rest = id.strip_prefix("platform_").unwrap();
    let (millis, random) = rest.split_once('_').unwrap();
    assert!(millis.parse::<i64>().unwrap() > 0);
    assert_eq!(random.len(), 9);
    assert!(random.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));

    let many: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
    assert_eq!(many.len(), 1000);
}

#[test]
fn add_rejects_negative_balance() {
    let (bank, _tmp) = common::setup_bank();

    let err = bank
        .store()
        .add(NewPlatform::new("Bad", "other", -1.0))
        .unwrap_err();
    assert!(matches!(err, TokenBankError::InvalidArgument(_)));
    assert!(bank.store().list().is_empty());
}

#[test]
fn unreadable_storage_lists_empty_and_rejects_writes() {
    let (bank, _tmp) = common::setup_bank();
    // A directory where the file should be fails both the read and the rename.
    fs::create_dir(bank.store().path()).unwrap();

    assert!(bank.store().list().is_empty());
    let err = bank
        .store()
        .add(NewPlatform::new("OpenAI", "openai", 1.0))
        .unwrap_err();
    assert!(matches!(err, TokenBankError::Io(_)));
    assert!(bank.store().path().is_dir());
}

#[test]
fn malformed_records_are_skipped_and_valid_ones_survive_writes() {
    let (bank, _tmp, sample) = common::setup_sample_bank();
    let mut records: Vec<serde_json::Value> =
        vec![serde_json::to_value(&sample.openai).unwrap()];
    let mut null_balance = serde_json::to_value(&sample.deepseek).unwrap();
    null_balance["balance"] = serde_json::Value::Null;
    records.push(null_balance);
    let mut odd_currency = serde_json::to_value(&sample.volcano).unwrap();
    odd_currency["currency"] = "EUR".into();
    records.push(odd_currency);
    fs::write(bank.store().path(), serde_json::to_string(&records).unwrap()).unwrap();

    assert_eq!(bank.store().list(), vec![sample.openai.clone()]);

    let added = bank
        .store()
        .add(NewPlatform::new("Moonshot", "moonshot", 2.0))
        .unwrap();

    assert_eq!(bank.store().list(), vec![sample.openai.clone(), added]);
}

// ---------------------------------------------------------------------------
// update / set_balance
// ---------------------------------------------------------------------------

#[test]
fn update_balance_changes_only_balance_and_updated_at() {
    let (bank, _tmp, sample) = common::setup_sample_bank();
    let before = sample.deepseek.clone();

    let after = bank
        .store()
        .update(&before.id, &PlatformPatch::balance(42.0))
        .unwrap();

    assert_eq!(after.balance, 42.0);
    assert!(after.updated_at >= before.updated_at);
    assert!(after.updated_at >= after.created_at);

    let mut expected = before.clone();
    expected.balance = 42.0;
    expected.updated_at = after.updated_at;
    assert_eq!(after, expected);
    assert_eq!(bank.store().get_by_id(&before.id).unwrap(), expected);
}

#[test]
fn update_unknown_id_leaves_collection_unchanged() {
    let (bank, _tmp, _sample) = common::setup_sample_bank();
    let before = bank.store().list();

    let err = bank
        .store()
        .update("platform_missing", &PlatformPatch::balance(42.0))
        .unwrap_err();

    assert!(matches!(err, TokenBankError::NotFound(_)));
    assert_eq!(bank.store().list(), before);
}

#[test]
fn update_can_clear_nullable_fields() {
    let (bank, _tmp, sample) = common::setup_sample_bank();

    let patch = PlatformPatch {
        plan: Some(None),
        expiry_date: Some(None),
        ..Default::default()
    };
    let after = bank.store().update(&sample.deepseek.id, &patch).unwrap();

    assert!(after.plan.is_none());
    assert!(after.expiry_date.is_none());
    assert_eq!(after.notes, "main key");
}

#[test]
fn update_rejects_negative_balance_without_writing() {
    let (bank, _tmp, sample) = common::setup_sample_bank();
    let before = bank.store().list();

    let err = bank
        .store()
        .update(&sample.openai.id, &PlatformPatch::balance(-3.0))
        .unwrap_err();

    assert!(matches!(err, TokenBankError::InvalidArgument(_)));
    assert_eq!(bank.store().list(), before);
}

#[test]
fn set_balance_updates_one_record() {
    let (bank, _tmp, sample) = common::setup_sample_bank();

    bank.store().set_balance(&sample.openai.id, 7.25).unwrap();

    assert_eq!(bank.store().get_by_id(&sample.openai.id).unwrap().balance, 7.25);
    assert_eq!(bank.store().get_by_id(&sample.deepseek.id).unwrap().balance, 10.0);
}

// ---------------------------------------------------------------------------
// remove / get_by_id / clear
// ---------------------------------------------------------------------------

#[test]
fn remove_deletes_the_record() {
    let (bank, _tmp, sample) = common::setup_sample_bank();

    bank.store().remove(&sample.openai.id).unwrap();

    let platforms = bank.store().list();
    assert_eq!(platforms.len(), 2);
    assert!(bank.store().get_by_id(&sample.openai.id).is_none());
}

#[test]
fn remove_unknown_id_leaves_collection_unchanged() {
    let (bank, _tmp, _sample) = common::setup_sample_bank();
    let before = bank.store().list();

    let err = bank.store().remove("platform_missing").unwrap_err();

    assert!(matches!(err, TokenBankError::NotFound(_)));
    assert_eq!(bank.store().list().len(), before.len());
    assert_eq!(bank.store().list(), before);
}

#[test]
fn get_by_id_returns_none_for_unknown_id() {
    let (bank, _tmp, sample) = common::setup_sample_bank();
    assert!(bank.store().get_by_id("nope").is_none());
    assert_eq!(bank.store().get_by_id(&sample.volcano.id).unwrap(), sample.volcano);
}

#[test]
fn clear_is_idempotent() {
    let (bank, _tmp, _sample) = common::setup_sample_bank();

    bank.store().clear().unwrap();
    assert!(bank.store().list().is_empty());
    bank.store().clear().unwrap();
    assert!(bank.store().list().is_empty());
}

// ---------------------------------------------------------------------------
// export / import
// ---------------------------------------------------------------------------

#[test]
fn export_then_import_round_trips() {
    let (bank, _tmp, _sample) = common::setup_sample_bank();
    let before = bank.store().list();
    let exported = bank.store().export_all().unwrap();

    bank.store().clear().unwrap();
    let count = bank.store().import_all(&exported).unwrap();

    assert_eq!(count, 3);
    assert_eq!(bank.store().list(), before);
    assert_eq!(bank.store().export_all().unwrap(), exported);
}

#[test]
fn export_is_pretty_printed_array() {
    let (bank, _tmp, _sample) = common::setup_sample_bank();
    let exported = bank.store().export_all().unwrap();

    assert!(exported.starts_with("[\n  {"));
    assert!(exported.contains("\n    \"name\": \"DeepSeek\""));
}

#[test]
fn export_of_empty_store_is_empty_array() {
    let (bank, _tmp) = common::setup_bank();
    assert_eq!(bank.store().export_all().unwrap(), "[]");
}

#[test]
fn import_replaces_existing_collection() {
    let (bank, _tmp, _sample) = common::setup_sample_bank();
    let text = r#"[{
        "id": "platform_1_abc",
        "name": "Imported",
        "type": "zhipu",
        "plan": null,
        "balance": 3.5,
        "currency": "USD",
        "expiryDate": "",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-02T00:00:00.000Z"
    }]"#;

    assert_eq!(bank.store().import_all(text).unwrap(), 1);

    let platforms = bank.store().list();
    assert_eq!(platforms.len(), 1);
    assert_eq!(platforms[0].name, "Imported");
    assert_eq!(platforms[0].currency, Currency::Usd);
    assert!(platforms[0].expiry_date.is_none());
    assert_eq!(platforms[0].notes, "");
}

#[test]
fn import_rejects_non_array_without_mutation() {
    let (bank, _tmp, _sample) = common::setup_sample_bank();
    let before = bank.store().list();

    for text in ["{\"a\": 1}", "42", "not json", "\"[]\""] {
        let err = bank.store().import_all(text).unwrap_err();
        assert!(matches!(err, TokenBankError::InvalidImport(_)), "{text}");
    }

    assert_eq!(bank.store().list(), before);
}

#[test]
fn import_rejects_malformed_records_and_duplicate_ids() {
    let (bank, _tmp, sample) = common::setup_sample_bank();
    let before = bank.store().list();

    let missing_fields = r#"[{"id": "x"}]"#;
    assert!(matches!(
        bank.store().import_all(missing_fields).unwrap_err(),
        TokenBankError::InvalidImport(_)
    ));

    let duplicated = serde_json::to_string(&vec![sample.openai.clone(), sample.openai.clone()]).unwrap();
    assert!(matches!(
        bank.store().import_all(&duplicated).unwrap_err(),
        TokenBankError::InvalidImport(_)
    ));

    let mut negative = sample.openai.clone();
    negative.balance = -1.0;
    let negative = serde_json::to_string(&vec![negative]).unwrap();
    assert!(matches!(
        bank.store().import_all(&negative).unwrap_err(),
        TokenBankError::InvalidImport(_)
    ));

    assert_eq!(bank.store().list(), before);
}

#[test]
fn import_of_empty_array_empties_the_store() {
    let (bank, _tmp, _sample) = common::setup_sample_bank();
    assert_eq!(bank.store().import_all("[]").unwrap(), 0);
    assert!(bank.store().list().is_empty());
}
