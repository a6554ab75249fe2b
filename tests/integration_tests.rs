use brc_processor::config::EngineConfig;
use brc_processor::error::{ProcessingError, RecordDefect};
use brc_processor::models::ResultEntry;
use brc_processor::processors::{ParallelProcessor, Processor, Strategy, StreamProcessor};
use brc_processor::readers::MeasurementSource;
use brc_processor::writers::{OutputFormat, ResultFormatter, ResultWriter};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

const NAMES: &[&str] = &[
    "Hamburg", "Bulawayo", "Palembang", "St. John's", "Cracow", "Bridgetown", "Istanbul",
    "Roseau", "Conakry", "İzmir", "Abéché", "Chișinău", "Petropavlovsk-Kamchatsky", "Zürich",
    "São Paulo", "東京", "Québec", "Kraków; Old Town",
];

fn run_all(input: &str, workers: usize) -> Vec<(Strategy, Vec<String>)> {
    let source = MeasurementSource::from_bytes(input);
    let config = EngineConfig::new(workers);
    Strategy::all()
        .into_iter()
        .map(|strategy| {
            let entries = strategy.processor().process(&source, &config).unwrap();
            (strategy, ResultFormatter::render_lines(&entries))
        })
        .collect()
}

fn assert_all_render(input: &str, expected: &[&str]) {
    for workers in [1, 2, 4] {
        for (strategy, lines) in run_all(input, workers) {
            assert_eq!(lines, expected, "{:?} with {} workers", strategy, workers);
        }
    }
}

/// Random records; returns the text plus per-station (sum of tenths, count)
fn generate(seed: u64, records: usize) -> (String, HashMap<&'static str, (i64, u64)>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut text = String::new();
    let mut totals: HashMap<&'static str, (i64, u64)> = HashMap::new();

    for _ in 0..records {
        let name = NAMES[rng.gen_range(0..NAMES.len())];
        let tenths: i16 = rng.gen_range(-999..=999);
        text.push_str(&format!(
            "{};{}{}.{}\n",
            name,
            if tenths < 0 { "-" } else { "" },
            tenths.unsigned_abs() / 10,
            tenths.unsigned_abs() % 10
        ));
        let total = totals.entry(name).or_insert((0, 0));
        total.0 += tenths as i64;
        total.1 += 1;
    }

    (text, totals)
}

#[test]
fn test_single_record() {
    assert_all_render("Hamburg;12.0", &["Hamburg;12.0;12.0;12.0"]);
}

#[test]
fn test_mean_rounds_half_up() {
    assert_all_render(
        "Hamburg;12.0\nHamburg;34.2\nHamburg;8.9",
        &["Hamburg;8.9;18.4;34.2"],
    );
    assert_all_render("A;-0.1\nA;-0.2\n", &["A;-0.2;-0.1;-0.1"]);
    assert_all_render("B;0.1\nB;0.2\n", &["B;0.1;0.2;0.2"]);
}

#[test]
fn test_stations_sorted_by_name() {
    assert_all_render(
        "Hamburg;12.0\nBulawayo;8.9\nPalembang;38.8\nHamburg;34.2\n",
        &[
            "Bulawayo;8.9;8.9;8.9",
            "Hamburg;12.0;23.1;34.2",
            "Palembang;38.8;38.8;38.8",
        ],
    );
}

#[test]
fn test_malformed_record_fails_with_offset() {
    let input = "Hamburg;12.0\nOops\nHamburg;8.9\n";
    let source = MeasurementSource::from_bytes(input);

    for strategy in Strategy::all() {
        for workers in [1, 2, 3] {
            let err = strategy
                .processor()
                .process(&source, &EngineConfig::new(workers))
                .unwrap_err();

            match err {
                ProcessingError::MalformedRecord { offset, end, defect } => {
                    assert_eq!(offset, 13, "{:?}", strategy);
                    assert_eq!(end, 17, "{:?}", strategy);
                    assert_eq!(defect, RecordDefect::MissingSeparator);
                }
                other => panic!("{:?}: unexpected error {}", strategy, other),
            }
        }
    }
}

#[test]
fn test_extreme_values() {
    assert_all_render(
        "Cold;-99.9\nHot;99.9\n",
        &["Cold;-99.9;-99.9;-99.9", "Hot;99.9;99.9;99.9"],
    );
}

#[test]
fn test_empty_input() {
    for (_, lines) in run_all("", 4) {
        assert!(lines.is_empty());
    }
}

#[test]
fn test_crlf_and_missing_final_newline() {
    assert_all_render(
        "Hamburg;12.0\r\nHamburg;14.0\r\nBulawayo;8.9",
        &["Bulawayo;8.9;8.9;8.9", "Hamburg;12.0;13.0;14.0"],
    );
}

#[test]
fn test_separator_inside_name() {
    assert_all_render("Kraków; Old Town;1.5\n", &["Kraków; Old Town;1.5;1.5;1.5"]);
}

#[test]
fn test_more_workers_than_records() {
    assert_all_render("a;1.0\nb;2.0\n", &["a;1.0;1.0;1.0", "b;2.0;2.0;2.0"]);

    let entries = ParallelProcessor::new()
        .process(&MeasurementSource::from_bytes("a;1.0\nb;2.0\n"), &EngineConfig::new(64))
        .unwrap();
    assert_eq!(entries.len(), 2);
}

#[test]
fn test_invalid_temperatures_rejected() {
    for input in ["a;1\n", "a;100.0\n", "a;1.23\n", "a;+1.0\n", "a;.5\n", "a;1.\n", ";1.0\n"] {
        let source = MeasurementSource::from_bytes(input);
        for strategy in Strategy::all() {
            let result = strategy.processor().process(&source, &EngineConfig::new(2));
            assert!(result.is_err(), "{:?} accepted {:?}", strategy, input);
        }
    }
}

#[test]
fn test_chunking_does_not_change_results() {
    let (text, _) = generate(0xB7C, 20_000);
    let source = MeasurementSource::from_bytes(text);

    let reference = Strategy::Naive
        .processor()
        .process(&source, &EngineConfig::new(1))
        .unwrap();

    for workers in [1, 2, 3, 5, 8, 13, 32] {
        let config = EngineConfig::new(workers);
        for strategy in [Strategy::Parallel, Strategy::Stream] {
            let entries = strategy.processor().process(&source, &config).unwrap();
            assert_eq!(entries, reference, "{:?} with {} workers", strategy, workers);
        }

        let pairwise = ParallelProcessor::new()
            .process(&source, &config.clone().with_parallel_merge(true))
            .unwrap();
        assert_eq!(pairwise, reference, "pairwise merge with {} workers", workers);
    }
}

#[test]
fn test_statistics_are_consistent() {
    let (text, totals) = generate(7, 5_000);
    let entries = ParallelProcessor::new()
        .process(&MeasurementSource::from_bytes(text), &EngineConfig::new(4))
        .unwrap();

    assert_eq!(entries.len(), totals.len());

    for entry in &entries {
        let (sum_tenths, count) = totals[entry.name.as_str()];
        assert_eq!(entry.count, count);
        assert!(entry.min <= entry.mean && entry.mean <= entry.max, "{:?}", entry);

        let sum = sum_tenths as f64 / 10.0;
        let drift = (entry.mean * count as f64 - sum).abs();
        assert!(drift <= 0.05 * count as f64 + 1e-6, "{}: drift {}", entry.name, drift);
    }
}

#[test]
fn test_output_sorted_and_unique() {
    let (text, _) = generate(99, 3_000);
    let entries = ParallelProcessor::new()
        .process(&MeasurementSource::from_bytes(text), &EngineConfig::new(3))
        .unwrap();

    for pair in entries.windows(2) {
        assert!(
            pair[0].name.as_bytes() < pair[1].name.as_bytes(),
            "{} before {}",
            pair[0].name,
            pair[1].name
        );
    }
}

#[test]
fn test_mapped_file_matches_in_memory() {
    let (text, _) = generate(3, 10_000);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();

    let mapped = MeasurementSource::open(file.path()).unwrap();
    assert!(mapped.is_mapped());
    assert_eq!(mapped.len(), text.len());

    let config = EngineConfig::new(4);
    let from_file = ParallelProcessor::new().process(&mapped, &config).unwrap();
    let from_memory = ParallelProcessor::new()
        .process(&MeasurementSource::from_bytes(text), &config)
        .unwrap();

    assert_eq!(from_file, from_memory);
}

#[test]
fn test_empty_file() {
    let file = NamedTempFile::new().unwrap();
    let source = MeasurementSource::open(file.path()).unwrap();

    assert!(source.is_empty());
    for strategy in Strategy::all() {
        let entries = strategy.processor().process(&source, &EngineConfig::new(4)).unwrap();
        assert!(entries.is_empty());
    }
}

#[test]
fn test_stream_reader_truncation() {
    let config = EngineConfig::new(2).with_require_terminated(true);

    let entries = StreamProcessor::new()
        .process_reader(&b"a;1.0\nb;2.0\n"[..], &config, None)
        .unwrap();
    assert_eq!(entries.len(), 2);

    let err = StreamProcessor::new()
        .process_reader(&b"a;1.0\nb;2.0"[..], &config, None)
        .unwrap_err();
    assert_eq!(err.offset(), Some(6));
}

#[test]
fn test_json_output() {
    let source = MeasurementSource::from_bytes("Hamburg;12.0\nHamburg;34.2\nHamburg;8.9\n");
    let entries = ParallelProcessor::new()
        .process(&source, &EngineConfig::new(2))
        .unwrap();

    let json = ResultWriter::new(OutputFormat::Json).to_string(&entries).unwrap();
    let parsed: Vec<ResultEntry> = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].name, "Hamburg");
    assert_eq!(parsed[0].min, 8.9);
    assert_eq!(parsed[0].mean, 18.4);
    assert_eq!(parsed[0].max, 34.2);
    assert_eq!(parsed[0].count, 3);
}
