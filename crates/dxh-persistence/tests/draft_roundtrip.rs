//! Draft round-trip through the file store.

use std::fs;

use dxh_model::{FieldValue, FormSnapshot};
use dxh_persistence::{DraftStore, FileStore, KeyValueStore};
use proptest::prelude::*;
use tempfile::tempdir;

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        ".{0,24}".prop_map(FieldValue::Text),
        // Delimiters inside entries must not split them apart on load.
        proptest::collection::vec("[a-z,、 ]{0,8}", 0..5).prop_map(FieldValue::List),
    ]
}

proptest! {
    #[test]
    fn prop_load_after_save_returns_same_snapshot(
        fields in proptest::collection::btree_map("[a-zA-Z]{1,12}", field_value(), 0..12),
    ) {
        let dir = tempdir().unwrap();
        let drafts = DraftStore::new(FileStore::new(dir.path()));
        let snapshot: FormSnapshot = fields.into_iter().collect();

        prop_assert!(drafts.save_draft(&snapshot));
        prop_assert_eq!(drafts.load_draft(), Some(snapshot));
    }
}

#[test]
fn test_draft_survives_a_new_store_instance() {
    let dir = tempdir().unwrap();
    let snapshot = FormSnapshot::new()
        .with("name", "Taro")
        .with("priority", vec!["業務効率化".to_string()]);

    DraftStore::new(FileStore::new(dir.path())).save_draft(&snapshot);

    let reopened = DraftStore::new(FileStore::new(dir.path()));
    let record = reopened.load_record().unwrap().unwrap();
    assert_eq!(record.fields, snapshot);
}

#[test]
fn test_truncated_file_is_treated_as_absent() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let drafts = DraftStore::new(store.clone());
    drafts.save_draft(&FormSnapshot::new().with("name", "Taro"));

    let path = store.path_for(drafts.key()).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    fs::write(&path, &content[..content.len() / 2]).unwrap();

    assert_eq!(drafts.load_draft(), None);
    // The next autosave replaces the corrupt record.
    drafts.save_draft(&FormSnapshot::new().with("name", "Jiro"));
    assert_eq!(
        drafts.load_draft(),
        Some(FormSnapshot::new().with("name", "Jiro"))
    );
    assert!(store.get(drafts.key()).unwrap().is_some());
}
