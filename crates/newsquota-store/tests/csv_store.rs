use std::fs;

use newsquota_store::{CsvStore, Dataset, Record, StoreError};

#[test]
fn load_cleans_rows_and_fills_optional_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    fs::write(
        &input,
        "\u{feff}id,text,label\n\
         1,  Madaxweyne cusub ayaa la doortay  , Politics \n\
         2,short,Politics\n\
         3,,World\n\
         4,Kulanka kubadda cagta ee maanta,\n\
         5,Ganacsiga dekedda ayaa kordhay,Economy\n",
    )
    .unwrap();

    let ds = Dataset::from_csv(&input).unwrap();

    assert_eq!(
        vec![
            Record::new("Madaxweyne cusub ayaa la doortay", "Politics", "", ""),
            Record::new("Ganacsiga dekedda ayaa kordhay", "Economy", "", ""),
        ],
        ds.records()
    );
}

#[test]
fn load_fails_without_label_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    fs::write(&input, "text,category\nSome long headline,World\n").unwrap();

    match Dataset::from_csv(&input) {
        Err(StoreError::MissingColumn { column, .. }) => assert_eq!("label", column),
        other => panic!("expected missing column, got {other:?}"),
    }
}

#[test]
fn persist_round_trips_and_leaves_no_temporary_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let records = vec![
        Record::new("Doorashada, \"golaha\" shacabka", "Politics", "Caasimada", "https://x.so/a"),
        Record::new("Kooxda ayaa guuleysatay ciyaarta", "Sports", "Kooxda", ""),
    ];

    let store = CsvStore::new(&out);
    assert_eq!(2, store.persist(&records).unwrap());

    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(1, entries);

    let raw = fs::read_to_string(&out).unwrap();
    assert!(raw.starts_with("\u{feff}text,label,source,url\n"));

    let reloaded = Dataset::from_csv(&out).unwrap();
    assert_eq!(records, reloaded.records());
}

#[test]
fn persist_replaces_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    fs::write(&out, "garbage that is not a dataset").unwrap();

    let store = CsvStore::new(&out).with_bom(false);
    store.persist(std::iter::empty::<&Record>()).unwrap();

    assert_eq!("text,label,source,url\n", fs::read_to_string(&out).unwrap());
}

#[cfg(unix)]
#[test]
fn persist_keeps_the_destination_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let records = [Record::new("Madaxweyne cusub ayaa la doortay", "Politics", "", "")];

    let existing = dir.path().join("existing.csv");
    fs::write(&existing, "text,label\n").unwrap();
    fs::set_permissions(&existing, fs::Permissions::from_mode(0o640)).unwrap();
    CsvStore::new(&existing).persist(&records).unwrap();
    let mode = fs::metadata(&existing).unwrap().permissions().mode();
    assert_eq!(0o640, mode & 0o777);

    let fresh = dir.path().join("fresh.csv");
    CsvStore::new(&fresh).persist(&records).unwrap();
    let mode = fs::metadata(&fresh).unwrap().permissions().mode();
    assert_eq!(0o644, mode & 0o777);
}
