extern crate rand;
extern crate stereo_bench;
extern crate tempfile;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use stereo_bench::*;
use tempfile::TempDir;

fn table(seq_c: f64) -> String {
    format!(
        "id,mean,std,median
cpu_seq_c_exec,{},0.5,{}
cpu_seq_exec,8,0.4,8
gpu_par_c_exec,2,0.1,2
gpu_par_exec,1,0.05,1
",
        seq_c, seq_c
    )
}

fn write(dir: &Path, name: &str, seq_c: f64) {
    fs::write(dir.join(name), table(seq_c)).unwrap();
}

fn group() -> Group {
    Group::new(Dim::square(3), Dim::square(8))
}

/// Two runs of 64x64 and one of every other size, for group 3x3/8x8, plus a
/// table of another group.
fn populate(dir: &Path) {
    write(dir, "matrix: 64x64,kernel: 3x3,BlockDim: 8x8_1.csv", 5.0);
    write(dir, "matrix: 64x64,kernel: 3x3,BlockDim: 8x8_2.csv", 7.0);
    write(dir, "matrix: 256x256,kernel: 3x3,BlockDim: 8x8", 40.0);
    write(dir, "matrix: 32x32,kernel: 3x3,BlockDim: 8x8", 1.0);
    write(dir, "matrix: 128x128,kernel: 3x3,BlockDim: 8x8", 12.0);
    write(dir, "matrix: 64x64,kernel: 5x5,BlockDim: 8x8", 500.0);
}

#[test]
fn mean_of_two_runs_of_one_size() {
    let tmp = TempDir::new().unwrap();
    populate(tmp.path());
    let dataset = Dataset::scan(tmp.path()).unwrap();
    let tables = dataset.load_tables(&group()).unwrap();
    assert_eq!(tables.len(), 5);

    let series = aggregate_timings(
        &tables,
        &group(),
        &dataset.matrix_sizes(),
        &Aggregation::default(),
    )
    .unwrap();
    let seq_c = &series[&Variant::SeqWithCopy];
    assert_eq!(seq_c.get(Dim::square(64)), Some(6.0));
    assert_eq!(
        seq_c.iter().collect::<Vec<_>>(),
        vec![
            (Dim::square(32), 1.0),
            (Dim::square(64), 6.0),
            (Dim::square(128), 12.0),
            (Dim::square(256), 40.0),
        ]
    );
}

#[test]
fn aggregation_ignores_listing_order() {
    let tmp = TempDir::new().unwrap();
    populate(tmp.path());
    let dataset = Dataset::scan(tmp.path()).unwrap();
    let sizes = dataset.matrix_sizes();
    let mut tables = dataset.load_tables(&group()).unwrap();
    let aggregation = Aggregation::default();

    let expected = (
        aggregate_timings(&tables, &group(), &sizes, &aggregation).unwrap(),
        aggregate_speed_ups(&tables, &group(), &sizes, &aggregation).unwrap(),
    );

    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..20 {
        tables.shuffle(&mut rng);
        let timings = aggregate_timings(&tables, &group(), &sizes, &aggregation).unwrap();
        let speed_ups = aggregate_speed_ups(&tables, &group(), &sizes, &aggregation).unwrap();
        assert_eq!(timings, expected.0);
        assert_eq!(speed_ups, expected.1);
    }
}

#[test]
fn annotated_and_plain_tables_agree() {
    let plain = TempDir::new().unwrap();
    let annotated = TempDir::new().unwrap();
    populate(plain.path());
    populate(annotated.path());
    annotate_dir(annotated.path()).unwrap();

    let speed_ups = |dir: &Path| {
        let dataset = Dataset::scan(dir).unwrap();
        let tables = dataset.load_tables(&group()).unwrap();
        aggregate_speed_ups(
            &tables,
            &group(),
            &dataset.matrix_sizes(),
            &Aggregation::default(),
        )
        .unwrap()
    };
    let from_plain = speed_ups(plain.path());
    assert_eq!(from_plain, speed_ups(annotated.path()));
    // 5/2 and 7/2 average to 3.0
    assert_eq!(
        from_plain[&SpeedUpPair::SeqWithCopyToParWithCopy].get(Dim::square(64)),
        Some(3.0)
    );
}

#[test]
fn sizes_missing_from_a_group_follow_the_policy() {
    let tmp = TempDir::new().unwrap();
    populate(tmp.path());
    write(tmp.path(), "matrix: 512x512,kernel: 5x5,BlockDim: 8x8", 900.0);
    let dataset = Dataset::scan(tmp.path()).unwrap();
    let other = Group::new(Dim::square(5), Dim::square(8));
    let tables = dataset.load_tables(&other).unwrap();

    let skipped = aggregate_timings(
        &tables,
        &other,
        &dataset.matrix_sizes(),
        &Aggregation::default(),
    )
    .unwrap();
    assert_eq!(
        skipped[&Variant::Par].sizes(),
        vec![Dim::square(64), Dim::square(512)]
    );

    let fail = Aggregation {
        empty: EmptyPolicy::Fail,
        ..Aggregation::default()
    };
    match aggregate_timings(&tables, &other, &dataset.matrix_sizes(), &fail) {
        Err(errors::Error(errors::ErrorKind::EmptyAggregation(_, size), _)) => {
            assert_eq!(size, "32x32")
        }
        other => panic!("unexpected {:?}", other.map(|s| s.len())),
    }
}
