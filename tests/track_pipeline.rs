//! End-to-end pipelines: BED text in, manipulated BED text out.

use tral_genomics::feature::INTERVAL_FIELDS;
use tral_genomics::ops::{registry, InputKind, MeanKind, MergeScores};
use tral_genomics::prelude::*;

fn load(content: &str) -> Track {
    Track::from_reader(BedReader::new(content.as_bytes())).unwrap()
}

fn genome() -> Genome {
    let mut g = Genome::new();
    g.insert("chrI".to_string(), 1000);
    g.insert("chrII".to_string(), 500);
    g
}

#[test]
fn test_complement_across_chromosomes() {
    let track = load("chrI\t10\t20\nchrI\t30\t40\nchrII\t0\t100\n");
    let genome = genome();

    let mut result = Track::with_fields(INTERVAL_FIELDS);
    for chrom in genome.chromosomes() {
        let l = genome.require_chrom_length(chrom).unwrap();
        result
            .write(chrom, Complement::new(track.read(chrom), l))
            .unwrap();
    }

    let mut output = Vec::new();
    {
        let mut writer = BedWriter::new(&mut output);
        result.to_writer(&mut writer).unwrap();
    }
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "chrI\t0\t10\nchrI\t20\t30\nchrI\t40\t1000\nchrII\t100\t500\n"
    );
}

#[test]
fn test_overlap_restricted_to_shared_chromosomes() {
    let x = load("chrI\t0\t20\nchrII\t5\t15\n");
    let y = load("chrI\t10\t30\n");

    let hits: Vec<Feature> = Overlap::new(x.read("chrI"), y.read("chrI"))
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!((hits[0].start, hits[0].end), (10, 20));

    // chrII exists only in X: overlapping against the empty stream
    // yields nothing.
    assert_eq!(Overlap::new(x.read("chrII"), y.read("chrII")).count(), 0);
}

#[test]
fn test_difference_uses_two_cursors_per_track() {
    let x = load("chrI\t0\t40\nchrI\t50\t60\n");
    let y = load("chrI\t10\t20\n");

    // A Track hands out a fresh forward-only cursor per read() call,
    // which is exactly what the XOR composition needs.
    let xor: Vec<Feature> = Difference::new(
        x.read("chrI"),
        x.read("chrI"),
        y.read("chrI"),
        y.read("chrI"),
        1000,
    )
    .collect::<Result<_>>()
    .unwrap();

    let spans: Vec<(i64, i64)> = xor.iter().map(|f| (f.start, f.end)).collect();
    assert_eq!(spans, vec![(0, 10), (20, 40), (50, 60)]);
}

#[test]
fn test_signal_pipeline_merge_then_smooth() {
    let a = load("chrI\t10\t20\t.\t50.0\t.\nchrI\t30\t40\t.\t100.0\t.\n");
    let b = load("chrI\t10\t12\t.\t20.0\t.\n");

    let merged = MergeScores::new(
        vec![a.read("chrI"), b.read("chrI")],
        MeanKind::Arithmetic,
    );
    let merged: Vec<Feature> = merged.collect::<Result<_>>().unwrap();
    let values: Vec<(i64, i64, f64)> = merged.iter().map(|f| (f.start, f.end, f.score)).collect();
    assert_eq!(
        values,
        vec![(10, 12, 35.0), (12, 20, 25.0), (30, 40, 50.0)]
    );

    let smoothed = WindowSmoothing::new(merged.into_iter().map(Ok), 0, 1000).unwrap();
    let runs: Vec<Feature> = smoothed.collect::<Result<_>>().unwrap();
    // Radius zero: the smoothed signal is the input signal, re-emitted
    // as runs of constant value.
    let run_values: Vec<(i64, i64, f64)> = runs.iter().map(|f| (f.start, f.end, f.score)).collect();
    assert_eq!(
        run_values,
        vec![(10, 12, 35.0), (12, 20, 25.0), (30, 40, 50.0)]
    );
}

#[test]
fn test_per_feature_scoring_keeps_annotations() {
    let signal = load("chrI\t0\t100\t.\t4.0\t.\n");
    let peaks = load("chrI\t10\t20\tpeak1\t0.0\t+\nchrI\t60\t80\tpeak2\t0.0\t-\n");

    let scored: Vec<Feature> =
        MeanScoreByFeature::new(signal.read("chrI"), peaks.read("chrI"))
            .collect::<Result<_>>()
            .unwrap();

    assert_eq!(scored[0].name, "peak1");
    assert_eq!(scored[0].score, 4.0);
    assert_eq!(scored[1].name, "peak2");
    assert_eq!(scored[1].strand, Strand::Reverse);
}

#[test]
fn test_registry_drives_dispatch() {
    let track = load("chrI\t10\t20\nchrI\t30\t40\n");
    let genome = genome();

    let manip = registry::find("complement").unwrap();
    assert_eq!(manip.kind, InputKind::Single);

    // A driver resolves the descriptor once, then wires streams
    // accordingly.
    let l = if manip.needs_chrom_length {
        genome.require_chrom_length("chrI").unwrap()
    } else {
        0
    };
    let gaps: Vec<Feature> = Complement::new(track.read("chrI"), l)
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(gaps.len(), 3);
}

#[test]
fn test_custom_boolean_majority_vote() {
    let t1 = load("chrI\t0\t30\n");
    let t2 = load("chrI\t10\t40\n");
    let t3 = load("chrI\t20\t50\n");

    let majority = CustomBoolean::new(
        vec![t1.read("chrI"), t2.read("chrI"), t3.read("chrI")],
        |bits: &[bool]| bits.iter().filter(|&&b| b).count() >= 2,
        1000,
    )
    .unwrap();

    let spans: Vec<(i64, i64)> = majority
        .collect::<Result<Vec<_>>>()
        .unwrap()
        .iter()
        .map(|f| (f.start, f.end))
        .collect();
    assert_eq!(spans, vec![(10, 40)]);
}

#[test]
fn test_threshold_then_fusion() {
    let track = load(
        "chrI\t0\t10\ta\t10.0\t.\nchrI\t8\t20\tb\t1.0\t.\nchrI\t15\t30\tc\t5.0\t.\n",
    );

    let kept = Threshold::new(track.read("chrI"), 5.0);
    let fused: Vec<Feature> = Fusion::new(kept).collect::<Result<_>>().unwrap();

    // The low-scoring middle feature is gone, so the survivors no
    // longer chain together.
    let spans: Vec<(i64, i64)> = fused.iter().map(|f| (f.start, f.end)).collect();
    assert_eq!(spans, vec![(0, 10), (15, 30)]);
}

#[test]
fn test_malformed_bed_is_a_line_numbered_error() {
    let result = Track::from_reader(BedReader::new(
        "chrI\t10\t20\nchrI\tfive\t30\n".as_bytes(),
    ));
    match result {
        Err(TrackError::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected parse error, got {:?}", other.map(|_| ())),
    }
}
