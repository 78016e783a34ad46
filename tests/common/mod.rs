//! Shared test fixtures for the TokenBank integration tests.
//!
//! Provides `setup_bank()` which opens a `TokenBank` over a temporary data
//! directory, and `setup_sample_bank()` which also seeds a few platforms.

#![allow(dead_code)]

use chrono::{Duration, Local, NaiveDate};
use tokenbank::{Currency, NewPlatform, Platform, TokenBank};

/// Open a `TokenBank` backed by an empty temporary data directory.
///
/// Returns `(TokenBank, tempfile::TempDir)`. The caller must keep the `TempDir`
/// alive for the duration of the test so the directory is not deleted
/// prematurely.
pub fn setup_bank() -> (TokenBank, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let bank = TokenBank::builder().data_dir(tmp_dir.path()).build().unwrap();
    (bank, tmp_dir)
}

/// Platforms seeded by [`setup_sample_bank`].
pub struct Sample {
    pub deepseek: Platform,
    pub openai: Platform,
    pub volcano: Platform,
}

/// Open a `TokenBank` seeded with three platforms:
///
/// - DeepSeek, `pro`, ¥10.00, expiring in three days
/// - OpenAI, `basic`, ¥20.00, no expiry
/// - Volcano Engine, `volcano_collab`, 500 tokens, never refreshed
pub fn setup_sample_bank() -> (TokenBank, tempfile::TempDir, Sample) {
    let (bank, tmp) = setup_bank();
    let store = bank.store();

    let deepseek = store
        .add(
            NewPlatform::new("DeepSeek", "deepseek", 10.0)
                .with_plan("pro")
                .with_expiry(days_from_today(3))
                .with_notes("main key"),
        )
        .unwrap();
    let openai = store
        .add(NewPlatform::new("OpenAI", "openai", 20.0).with_plan("basic"))
        .unwrap();
    let volcano = store
        .add(
            NewPlatform::new("Volcano Engine", "volcano", 500.0)
                .with_plan("volcano_collab")
                .with_currency(Currency::Tokens),
        )
        .unwrap();

    (
        bank,
        tmp,
        Sample {
            deepseek,
            openai,
            volcano,
        },
    )
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}
