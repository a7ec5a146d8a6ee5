use std::collections::BTreeSet;
use std::path::PathBuf;

use active_triphones::triphones::label::{is_sentinel, PhoneTriplet};
use active_triphones::triphones::{
    collect_extant, partition_by_center, CountModel, PhoneRoster, Result, TraceParser,
    TraceRecord, VectorModel,
};
use approx::assert_relative_eq;
use ndarray::{arr1, array};

const FRAME_CAP: u32 = 5;
const WORDS: [&str; 2] = ["alpha", "beta"];

fn fixture_record() -> Result<TraceRecord> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/traces/hv.trace");
    TraceParser::new(FRAME_CAP).parse_file(&path)
}

#[test]
fn single_frame_scenario() -> Result<()> {
    let trace = "\
File: /corpus/alpha.mfc
Activated phone models for frame 1 (1) : sil
Activated phone models for frame 2 (3) : sil-b+ih sil-b+ih ih-s+sil
";
    let record = TraceParser::new(3).parse(trace.as_bytes())?;
    let catalogue = collect_extant(&record, &["alpha"], 3)?;
    assert_eq!(
        catalogue.iter().collect::<Vec<_>>(),
        vec!["ih-s+sil", "sil-b+ih"]
    );

    let roster = PhoneRoster::from_phones("scenario", 1, ["b"])?;
    let counts = CountModel::new(roster).build(&record, &["alpha"], 3)?;
    assert_eq!(counts.get("b", "alpha"), Some(&arr1(&[1.0, 0.0])));
    Ok(())
}

#[test]
fn catalogue_excludes_sentinels_and_partitions_cleanly() -> Result<()> {
    let record = fixture_record()?;
    let catalogue = collect_extant(&record, &WORDS, FRAME_CAP)?;
    assert_eq!(catalogue.len(), 8);
    for sentinel in ["", "sil", "sp"] {
        assert!(!catalogue.contains(sentinel));
    }
    // gamma is not in the word list
    assert!(!catalogue.contains("sil-zh+uw"));

    let partition = partition_by_center(&catalogue, PhoneRoster::sufficient_data().phones())?;
    assert_eq!(partition.columns("b"), ["sil-b+ey", "sil-b+ih"]);
    assert!(partition.columns("zh").is_empty());
    let union: BTreeSet<&str> = partition
        .iter()
        .flat_map(|(_, columns)| columns.iter().map(String::as_str))
        .collect();
    assert_eq!(union, catalogue.iter().collect::<BTreeSet<_>>());
    Ok(())
}

#[test]
fn vector_cells_mirror_frame_membership() -> Result<()> {
    let record = fixture_record()?;
    let catalogue = collect_extant(&record, &WORDS, FRAME_CAP)?;
    let model = VectorModel::default();
    let partition = partition_by_center(&catalogue, model.roster().phones())?;
    let features = model.build(&record, &WORDS, &partition, FRAME_CAP)?;

    assert_eq!(
        features.get("b", "alpha"),
        Some(&array![[0.0, 1.0], [0.0, 1.0], [0.0, 0.0], [0.0, 0.0]])
    );

    for phone in model.roster().iter() {
        let columns = partition.columns(phone);
        for word in WORDS {
            let matrix = features.get(phone, word).expect("allocated");
            assert_eq!(matrix.dim(), ((FRAME_CAP - 1) as usize, columns.len()));
            let frames = record.word(word).expect("word parsed");
            for ((row, column), cell) in matrix.indexed_iter() {
                let present = frames.active(row as u32 + 2).contains(&columns[column]);
                assert_eq!(*cell, if present { 1.0 } else { 0.0 });
            }
        }
    }
    Ok(())
}

#[test]
fn counts_match_unique_centre_phone_mentions() -> Result<()> {
    let record = fixture_record()?;
    let roster = PhoneRoster::from_phones("stops", 1, ["b", "k", "t"])?;
    let features = CountModel::new(roster.clone()).build(&record, &WORDS, FRAME_CAP)?;

    assert_eq!(features.get("b", "beta"), Some(&arr1(&[1.0, 1.0, 0.0, 0.0])));
    assert_eq!(features.get("k", "beta"), Some(&arr1(&[1.0, 0.0, 0.0, 0.0])));
    assert_eq!(features.get("t", "beta"), Some(&arr1(&[0.0, 0.0, 1.0, 0.0])));
    assert!(features.get("ih", "alpha").is_none());

    for phone in roster.iter() {
        for word in WORDS {
            let counts = features.get(phone, word).expect("allocated");
            let frames = record.word(word).expect("word parsed");
            for (offset, value) in counts.iter().enumerate() {
                let expected = frames
                    .active(offset as u32 + 2)
                    .iter()
                    .filter(|label| !is_sentinel(label))
                    .filter_map(|label| PhoneTriplet::parse(label).ok())
                    .filter(|triplet| triplet.center == phone)
                    .count();
                assert_relative_eq!(*value, expected as f64);
            }
        }
    }
    Ok(())
}

#[test]
fn column_order_is_stable_across_runs() -> Result<()> {
    let first = {
        let record = fixture_record()?;
        let catalogue = collect_extant(&record, &WORDS, FRAME_CAP)?;
        partition_by_center(&catalogue, &["b", "k"])?
    };
    let second = {
        let record = fixture_record()?;
        let words = ["beta", "alpha"];
        let catalogue = collect_extant(&record, &words, FRAME_CAP)?;
        partition_by_center(&catalogue, &["k", "b"])?
    };
    assert_eq!(first, second);
    Ok(())
}
