use anchorbc::*;

use flate2::{read::GzDecoder, write::GzEncoder, Compression};

use std::io::{Read, Write};
use std::path::PathBuf;

fn config(max_edits: usize) -> ExtractConfig {
    ExtractConfig {
        anchor: "GGCTAG".to_owned(),
        max_edits,
        min_barcode_len: 3,
        ..ExtractConfig::default()
    }
}

fn fastq(seqs: &[&str]) -> Vec<u8> {
    let mut res = Vec::new();
    for (i, seq) in seqs.iter().enumerate() {
        write!(res, "@read{}\n{}\n+\n{}\n", i, seq, "I".repeat(seq.len())).unwrap();
    }
    res
}

fn run(seqs: &[&str], config: &ExtractConfig) -> (String, ExtractStats) {
    let bytes = fastq(seqs);
    let mut out = Vec::new();
    let stats = extract(iter_fastq_reader(&bytes[..], 2).unwrap(), config, &mut out).unwrap();
    (String::from_utf8(out).unwrap(), stats)
}

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("anchorbc-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn scenario_a_exact_match() {
    let (out, _) = run(&["AAATTTGGCTAG"], &config(0));
    assert_eq!(out, "AAATTT\n");
}

#[test]
fn scenario_b_ambiguous_base() {
    let (out, stats) = run(&["AANTTTGGCTAG"], &config(0));
    assert_eq!(out, "");
    assert_eq!(stats.ambiguous, 1);
}

#[test]
fn scenario_c_too_short() {
    let (out, stats) = run(&["AAGGCTAG"], &config(0));
    assert_eq!(out, "");
    assert_eq!(stats.too_short, 1);
}

#[test]
fn scenario_d_substitution() {
    let seqs = ["AAATTTGGCAAG"];

    let (out, _) = run(&seqs, &config(1));
    assert_eq!(out, "AAATTT\n");

    let (out, stats) = run(&seqs, &config(0));
    assert_eq!(out, "");
    assert_eq!(stats.matched, 0);
}

#[test]
fn scenario_e_empty_input() {
    let mut out = Vec::new();
    let stats = extract(iter_fastq_reader(&b""[..], 2).unwrap(), &config(0), &mut out).unwrap();
    assert!(out.is_empty());
    assert_eq!(stats.records, 0);
    assert_eq!(stats.emitted, 0);
}

#[test]
fn order_and_stats() {
    let seqs = [
        "CCCCCCGGCTAG",
        "AAAAAAAAAAAA",
        "GGGAAAGGCTAGTT",
        "AANTTTGGCTAG",
        "AGGCTAG",
        "TTTTTTGGCAAG",
        "ACGTACGGCTAGGGCTAG",
    ];
    let (out, stats) = run(&seqs, &config(1));

    assert_eq!(out, "CCCCCC\nGGGAAA\nTTTTTT\nACGTAC\n");
    assert_eq!(
        stats,
        ExtractStats {
            records: 7,
            matched: 6,
            too_short: 1,
            ambiguous: 1,
            emitted: 4,
            elapsed_secs: stats.elapsed_secs,
        }
    );
    assert_eq!(
        stats.records,
        (stats.records - stats.matched) + stats.too_short + stats.ambiguous + stats.emitted
    );
}

#[test]
fn idempotent() {
    let seqs = ["AAATTTGGCTAG", "GGGAAAGGCTCG", "TTTCCCGCTAG", "AAAA"];
    let (out1, _) = run(&seqs, &config(1));
    let (out2, _) = run(&seqs, &config(1));
    assert_eq!(out1, out2);
    assert!(!out1.is_empty());
}

#[test]
fn default_config() {
    let anchor = DEFAULT_ANCHOR;
    let ok = format!("ACGTACGTACGTAC{}GGGG", anchor);
    let short = format!("ACGTACGTACG{}GGGG", anchor);
    let (out, stats) = run(&[ok.as_str(), short.as_str()], &ExtractConfig::default());
    assert_eq!(out, "ACGTACGTACGTAC\n");
    assert_eq!(stats.too_short, 1);
}

#[test]
fn records_from_caller() {
    let records = vec![("r1", "AAATTTGGCTAG"), ("r2", "TTTGGGGGCTAG")];
    let mut out = Vec::new();
    let stats = extract(iter_records(records, 1), &config(0), &mut out).unwrap();
    assert_eq!(out, b"AAATTT\nTTTGGG\n");
    assert_eq!(stats.emitted, 2);
}

#[test]
fn gzip_input() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&fastq(&["AAATTTGGCTAG", "CCCGGGGGCTAG"]))
        .unwrap();
    let bytes = encoder.finish().unwrap();

    let mut out = Vec::new();
    extract(iter_fastq_reader(&bytes[..], 256).unwrap(), &config(0), &mut out).unwrap();
    assert_eq!(out, b"AAATTT\nCCCGGG\n");
}

#[test]
fn malformed_record_is_fatal() {
    let bytes = b"@r0\nAAATTTGGCTAG\n+\nIIIIIIIIIIII\n@r1\nCCCTTTGGCTAG\n+\nIIIIIIIIIIII\nr2\nACGT\n+\nIIII\n";
    let mut out = Vec::new();
    let res = extract(iter_fastq_reader(&bytes[..], 256).unwrap(), &config(0), &mut out);

    match res {
        Err(Error::ParseRecord { origin, idx, .. }) => {
            assert_eq!(origin, Origin::Bytes);
            assert_eq!(idx, 2);
        }
        _ => panic!("expected a parse error"),
    }
    // records before the error, from the same chunk, were written and flushed
    assert_eq!(out, b"AAATTT\nCCCTTT\n");
}

#[test]
fn rejected_chunks_do_not_end_the_stream() {
    let records = [
        ("r0", "CCCC"),
        ("r1", "AAAA"),
        ("r2", "AAATTTGGCTAG"),
        ("r3", "GGGG"),
        ("r4", "AANTTTGGCTAG"),
        ("r5", "CCCTTTGGCTAG"),
    ];
    let mut out = Vec::new();
    let stats = extract(iter_records(records, 2), &config(0), &mut out).unwrap();

    assert_eq!(out, b"AAATTT\nCCCTTT\n");
    assert_eq!(stats.records, 6);
    assert_eq!(stats.matched, 3);
    assert_eq!(stats.ambiguous, 1);
    assert_eq!(stats.emitted, 2);
}

#[test]
fn every_chunk_rejected() {
    let seqs = ["CCCC"; 7];
    let (out, stats) = run(&seqs, &config(0));
    assert_eq!(out, "");
    assert_eq!(stats.records, 7);
    assert_eq!(stats.matched, 0);
}

// accepts `limit` bytes, then fails every write
struct FailingWriter {
    written: Vec<u8>,
    limit: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.written.len() + buf.len() > self.limit {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_error_is_fatal() {
    let pulled = std::cell::Cell::new(0);
    let records = (0..100).map(|i| {
        pulled.set(pulled.get() + 1);
        (format!("r{}", i), "AAATTTGGCTAG")
    });
    let mut writer = FailingWriter {
        written: Vec::new(),
        limit: 7 * 3,
    };

    let res = extract(iter_records(records, 2), &config(0), &mut writer);

    assert!(matches!(res, Err(Error::Write { .. })));
    // whole lines only, and nothing read past the chunk that failed
    assert_eq!(writer.written, b"AAATTT\nAAATTT\nAAATTT\n");
    assert_eq!(pulled.get(), 4);
}

#[test]
fn invalid_config_is_rejected() {
    let bytes = fastq(&["AAATTTGGCTAG"]);
    let mut out = Vec::new();
    let config = ExtractConfig {
        anchor: "".to_owned(),
        ..ExtractConfig::default()
    };
    let res = extract(iter_fastq_reader(&bytes[..], 1).unwrap(), &config, &mut out);
    assert!(matches!(res, Err(Error::InvalidConfig { .. })));
}

#[test]
fn extract_file_gz_output() {
    let input = temp_path("in.fastq");
    let output = temp_path("nested/out.txt.gz");
    std::fs::write(&input, fastq(&["AAATTTGGCTAG", "AAAA", "GGGCCCGGCTAG"])).unwrap();

    let stats = extract_file(
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        &config(0),
    )
    .unwrap();
    assert_eq!(stats.emitted, 2);

    let mut decoded = String::new();
    GzDecoder::new(std::fs::File::open(&output).unwrap())
        .read_to_string(&mut decoded)
        .unwrap();
    assert_eq!(decoded, "AAATTT\nGGGCCC\n");
}

#[test]
fn extract_file_failure_leaves_no_output() {
    let input = temp_path("bad.fastq");
    let output = temp_path("bad_out.txt");
    std::fs::write(&input, b"@r0\nAAATTTGGCTAG\n+\nIIIIIIIIIIII\nr1\nACGT\n+\nIIII\n").unwrap();

    let res = extract_file(
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        &config(0),
    );
    assert!(res.is_err());
    assert!(!output.exists());
    assert!(!temp_path("bad_out.txt.partial").exists());
}

#[test]
fn extract_file_missing_input() {
    let input = temp_path("does_not_exist.fastq");
    let output = temp_path("missing_out.txt");
    let res = extract_file(
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        &config(0),
    );
    assert!(matches!(res, Err(Error::FileIo { .. })));
    assert!(!output.exists());
}
